//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use saxonq_ir::{ProcessorCatalog, ProcessorProfile, Program};
use saxonq_qasm::parse;
use serde::Serialize;

/// Read and parse a circuit file.
pub fn load_program(path: &Path) -> Result<Program> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    parse(&source).with_context(|| format!("Failed to parse {}", path.display()))
}

/// The processor named on the command line, else the configured default.
pub fn resolve_processor<'a>(
    catalog: &'a ProcessorCatalog,
    requested: Option<&str>,
    configured: Option<&str>,
) -> Result<Option<&'a ProcessorProfile>> {
    match requested.or(configured) {
        Some(name) => Ok(Some(catalog.require(name)?)),
        None => Ok(None),
    }
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
