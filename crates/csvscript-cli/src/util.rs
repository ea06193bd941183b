use anyhow::Result;
use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
};

pub fn validate_csv_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let pb = path.as_ref();

    let ext = pb
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("csv") => {}
        _ => anyhow::bail!("File must have a .csv extension: {}", pb.display()),
    }

    if !pb.exists() {
        anyhow::bail!("File does not exist: {}", pb.display());
    }

    Ok(())
}

/// Open `path` for writing, or stdout when no path is given.
pub fn output_writer(path: Option<&PathBuf>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(p) => Ok(Box::new(io::BufWriter::new(File::create(p)?))),
        None => Ok(Box::new(io::stdout().lock())),
    }
}
