//! `csvscript run`: execute a CsvScript file against a data directory.
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;

use csvscript_runtime::config::{load_run_config, RunConfig};
use csvscript_runtime::script::{parse_program, Interpreter, RunReport};

/// Build the run configuration from an optional JSON file plus CLI overrides.
pub fn config_from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<RunConfig> {
    let mut config = match config_path {
        Some(path) => {
            log::info!("[CsvScript::Run] Using config: {:?}", path);
            load_run_config(path)?
        }
        None => {
            let config = RunConfig::default();
            eprintln!("[CsvScript::Run] No config file provided; using defaults.");
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&config).unwrap_or_default()
            );
            config
        }
    };

    if let Some(dir) = matches.get_one::<PathBuf>("data_dir") {
        config.data_dir = dir.clone();
    }
    if matches.get_flag("no_save") {
        config.save_persistent = false;
    }
    if matches.get_flag("quiet") {
        config.echo_expressions = false;
    }
    Ok(config)
}

pub fn run_script_file(script: &Path, config: &RunConfig) -> Result<RunReport> {
    let source = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script: {}", script.display()))?;
    let program = parse_program(&source)
        .with_context(|| format!("Failed to parse script: {}", script.display()))?;
    log::info!(
        "[CsvScript::Run] {} statements, data directory {}",
        program.statements.len(),
        config.data_dir.display()
    );

    let mut interpreter = Interpreter::new(config.clone());
    let report = interpreter
        .run(&program)
        .with_context(|| format!("Failed to run script: {}", script.display()))?;
    Ok(report)
}

/// Print echoed expression values, one `line: value` pair per line.
pub fn print_report<W: Write>(mut writer: W, report: &RunReport) -> Result<()> {
    for (line, value) in &report.echoed {
        writeln!(writer, "{}: {}", line, value)?;
    }
    for path in &report.saved {
        log::info!("[CsvScript::Run] Saved {}", path.display());
    }
    Ok(())
}
