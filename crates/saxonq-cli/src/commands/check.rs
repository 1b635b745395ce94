//! Check command implementation.

use anyhow::{Context, Result};
use console::style;
use serde_json::json;
use std::path::Path;

use super::common::{load_program, print_json};

/// Parse a circuit file and require that it measures something.
pub fn execute(input: &Path, json: bool) -> Result<()> {
    let program = load_program(input)?;
    program
        .require_measurement()
        .with_context(|| format!("{} cannot be submitted", input.display()))?;

    if json {
        return print_json(&json!({
            "file": input.display().to_string(),
            "qubits": program.num_qubits(),
            "clbits": program.num_clbits(),
            "instructions": program.len(),
            "depth": program.depth(),
            "operations": program.count_ops(),
        }));
    }

    println!(
        "{} {} is valid",
        style("✓").green().bold(),
        style(input.display()).green()
    );
    println!(
        "  {} qubits, {} classical bits, {} instructions, depth {}",
        program.num_qubits(),
        program.num_clbits(),
        program.len(),
        program.depth()
    );
    Ok(())
}
