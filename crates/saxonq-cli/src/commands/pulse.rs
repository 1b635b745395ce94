//! Pulse command implementation.

use anyhow::{Context, Result};
use console::style;
use saxonq_ir::ProcessorProfile;
use saxonq_pulse::transpile;
use std::path::Path;

use super::common::load_program;

/// Transpile a circuit file into a pulse schedule for `profile`.
pub fn execute(input: &Path, profile: &ProcessorProfile, json: bool) -> Result<()> {
    let program = load_program(input)?;
    let schedule = transpile(&program, profile)
        .with_context(|| format!("Failed to transpile for {}", profile.name))?;

    if json {
        println!("{}", schedule.to_json()?);
        return Ok(());
    }

    println!(
        "{} Pulse schedule for {} on {}",
        style("→").cyan().bold(),
        style(input.display()).green(),
        style(&profile.name).yellow()
    );
    for line in schedule.render() {
        println!("  {line}");
    }
    println!(
        "{} {} pulses, total duration {} ns, estimated fidelity {:.4}",
        style("✓").green().bold(),
        schedule.len(),
        schedule.total_duration_ns(),
        schedule.estimated_fidelity()
    );
    Ok(())
}
