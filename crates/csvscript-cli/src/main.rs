use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use csvscript_cli::commands::matrix::{
    apply_binary, apply_unary, extract_row, load_input, write_matrix, write_vector, BinaryOp,
    UnaryOp,
};
use csvscript_cli::commands::run::{config_from_arguments, print_report, run_script_file};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("CSVSCRIPT_LOG", "error,csvscript=info"))
        .init();

    let matches = Command::new("csvscript")
        .version(clap::crate_version!())
        .about("CsvScript - integer matrix runtime over CSV files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Execute a CsvScript program")
                .arg(
                    Arg::new("script")
                        .help("Path to the script file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("config")
                        .help("Path to run configuration file (JSON)")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("data_dir")
                        .short('d')
                        .long("data-dir")
                        .help(
                            "Directory holding <name>.csv for persistent matrices. \
                             Overrides the directory specified in the configuration file.",
                        )
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("no_save")
                        .long("no-save")
                        .help("Do not write persistent matrices back after the run.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help("Do not print the values of bare expression statements.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("shape")
                .about("Print the shape of a CSV matrix")
                .arg(csv_arg("input", "Path to the input matrix")),
        )
        .subcommand(
            Command::new("transpose")
                .about("Transpose a matrix")
                .arg(csv_arg("input", "Path to the input matrix"))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("multiply")
                .about("Multiply two matrices")
                .arg(csv_arg("lhs", "Path to the left matrix"))
                .arg(csv_arg("rhs", "Path to the right matrix"))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("add")
                .about("Add two matrices element-wise")
                .arg(csv_arg("lhs", "Path to the left matrix"))
                .arg(csv_arg("rhs", "Path to the right matrix"))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("scale")
                .about("Multiply every element by a scalar")
                .arg(csv_arg("input", "Path to the input matrix"))
                .arg(scalar_arg("scalar", "Scalar factor"))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("shift")
                .about("Add a scalar to every element")
                .arg(csv_arg("input", "Path to the input matrix"))
                .arg(scalar_arg("scalar", "Scalar offset"))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("row")
                .about("Extract one row as a CSV line")
                .arg(csv_arg("input", "Path to the input matrix"))
                .arg(
                    Arg::new("index")
                        .help("Zero-based row index")
                        .required(true)
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("scale")
                        .long("scale")
                        .help("Multiply the extracted row by this scalar")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("shift")
                        .long("shift")
                        .help("Add this scalar to the extracted row (after scaling)")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(output_arg()),
        )
        .get_matches();

    let outcome = match matches.subcommand() {
        Some(("run", sub_m)) => handle_run(sub_m),
        Some((name, sub_m)) => handle_matrix(name, sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    };

    if let Err(e) = outcome {
        log::error!("{:#}", e);
        std::process::exit(1)
    }
    Ok(())
}

fn csv_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn scalar_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .allow_negative_numbers(true)
        .value_parser(clap::value_parser!(i64))
}

fn output_arg() -> Arg {
    Arg::new("output_file")
        .short('o')
        .long("output")
        .help("Path to write the resulting CSV. Defaults to stdout.")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn handle_run(matches: &ArgMatches) -> Result<()> {
    let script: &PathBuf = matches.get_one("script").unwrap();
    log::info!("[CsvScript::Run] Running script: {:?}", script);

    let config = config_from_arguments(matches.get_one::<PathBuf>("config"), matches)?;
    let report = run_script_file(script, &config)?;
    print_report(std::io::stdout().lock(), &report)
}

fn path_arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a PathBuf {
    matches.get_one::<PathBuf>(name).unwrap()
}

fn output_arg_of(matches: &ArgMatches) -> Option<&PathBuf> {
    matches.get_one::<PathBuf>("output_file")
}

fn scalar_of(matches: &ArgMatches) -> i64 {
    *matches.get_one::<i64>("scalar").unwrap()
}

fn handle_matrix(name: &str, matches: &ArgMatches) -> Result<()> {
    match name {
        "shape" => {
            let matrix = load_input(path_arg(matches, "input"))?;
            println!("{} x {}", matrix.nrows(), matrix.ncols());
            Ok(())
        }
        "transpose" => write_matrix(
            &apply_unary(path_arg(matches, "input"), UnaryOp::Transpose)?,
            output_arg_of(matches),
        ),
        "scale" => write_matrix(
            &apply_unary(path_arg(matches, "input"), UnaryOp::Scale(scalar_of(matches)))?,
            output_arg_of(matches),
        ),
        "shift" => write_matrix(
            &apply_unary(path_arg(matches, "input"), UnaryOp::Shift(scalar_of(matches)))?,
            output_arg_of(matches),
        ),
        "multiply" => write_matrix(
            &apply_binary(
                path_arg(matches, "lhs"),
                path_arg(matches, "rhs"),
                BinaryOp::Multiply,
            )?,
            output_arg_of(matches),
        ),
        "add" => write_matrix(
            &apply_binary(path_arg(matches, "lhs"), path_arg(matches, "rhs"), BinaryOp::Add)?,
            output_arg_of(matches),
        ),
        "row" => {
            let index = *matches.get_one::<usize>("index").unwrap();
            let row = extract_row(
                path_arg(matches, "input"),
                index,
                matches.get_one::<i64>("scale").copied(),
                matches.get_one::<i64>("shift").copied(),
            )?;
            write_vector(&row, output_arg_of(matches))
        }
        _ => unreachable!(),
    }
}
