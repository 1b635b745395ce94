//! Expand command implementation.

use anyhow::Result;
use saxonq_qasm::{expand, expand_with_header};
use std::path::Path;

use super::common::{load_program, print_json};

/// Print the plain-language account of a circuit file.
pub fn execute(input: &Path, header: bool, json: bool) -> Result<()> {
    let program = load_program(input)?;
    let lines = if header {
        expand_with_header(&program)
    } else {
        expand(&program)
    };
    if json {
        return print_json(&lines);
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}
