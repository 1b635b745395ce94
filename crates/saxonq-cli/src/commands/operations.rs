//! Operations command implementation.

use anyhow::Result;
use console::style;
use saxonq_ir::list_operations;

use super::common::print_json;

/// List the operation registry.
pub fn execute(json: bool) -> Result<()> {
    let operations = list_operations();
    if json {
        return print_json(operations);
    }

    println!("{} Registered operations:\n", style("SaxonQ").cyan().bold());
    println!(
        "  {:<8} {:<12} {:<13} {:<8} {:<6}  {}",
        "NAME", "TARGETS", "CONTROLS", "PARAMS", "CLBITS", "DESCRIPTION"
    );
    for op in operations {
        println!(
            "  {:<8} {:<12} {:<13} {:<8} {:<6}  {}",
            style(op.name).bold(),
            op.targets.to_string(),
            op.controls.to_string(),
            op.params,
            op.clbits,
            op.label
        );
    }
    Ok(())
}
