use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// Where a JSON report goes when `--out` is given (or not).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// `None` writes `validation_<timestamp>.json` into the current directory.
/// An existing directory, or a path ending in a separator, receives the
/// default file name. `-` means stdout.
pub fn resolve_destination(out: &Option<String>, timestamp: &str) -> Result<Destination> {
    let base = out.as_deref().unwrap_or(".");
    if base == "-" {
        return Ok(Destination::Stdout);
    }
    let path = Path::new(base);
    let filename = format!("validation_{}.json", timestamp);

    if path.is_dir() {
        return Ok(Destination::File(path.join(filename)));
    }
    if path.exists() {
        return Ok(Destination::File(path.to_path_buf()));
    }
    if base.ends_with('/') || base.ends_with('\\') {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        return Ok(Destination::File(path.join(filename)));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(Destination::File(path.to_path_buf()))
}

pub fn write_report(destination: &Destination, contents: &str) -> Result<()> {
    match destination {
        Destination::Stdout => println!("{}", contents),
        Destination::File(path) => {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
    }
    Ok(())
}
