//! Synth command implementation.

use anyhow::{Context, Result};
use console::style;
use saxonq_oracles::{OracleDescriptor, synthesize};
use saxonq_qasm::emit;
use std::fs;
use std::path::Path;

use super::common::print_json;

/// Read an oracle descriptor from a JSON file.
pub fn load_descriptor(path: &Path) -> Result<OracleDescriptor> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid oracle descriptor in {}", path.display()))
}

/// Synthesize `descriptor` and print the fragment as circuit text.
pub fn execute(descriptor: &OracleDescriptor, budget: Option<u32>, json: bool) -> Result<()> {
    let program = synthesize(descriptor, budget)
        .with_context(|| format!("Failed to synthesize {} oracle", descriptor.name()))?;

    if json {
        return print_json(&program);
    }

    eprintln!(
        "{} {} oracle: {} qubits, {} instructions",
        style("✓").green().bold(),
        descriptor.name(),
        program.num_qubits(),
        program.len()
    );
    print!("{}", emit(&program));
    Ok(())
}
