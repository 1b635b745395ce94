//! Processors command implementation.

use anyhow::Result;
use console::style;
use saxonq_ir::ProcessorCatalog;
use serde::Serialize;

use super::common::print_json;

#[derive(Serialize)]
struct Listing<'a> {
    processors: Vec<&'a saxonq_ir::ProcessorProfile>,
}

/// List the processors of `catalog`.
pub fn execute(catalog: &ProcessorCatalog, json: bool) -> Result<()> {
    if json {
        return print_json(&Listing {
            processors: catalog.iter().collect(),
        });
    }

    println!("{} Available processors:\n", style("SaxonQ").cyan().bold());
    for profile in catalog.iter() {
        println!("  {} {}", style("●").green(), style(&profile.name).bold());
        println!(
            "    Qubits: {}  QV: {}  CLOPS: {}",
            profile.num_qubits, profile.quantum_volume, profile.clops
        );
        println!(
            "    T1: {} s  T2: {} s  T2*: {} s",
            profile.t1, profile.t2, profile.t2_star
        );
        println!(
            "    Fidelity: id {}  bit-flip {}  phase {}  two-qubit {}",
            profile.identity_fidelity,
            profile.bit_flip_fidelity,
            profile.phase_fidelity,
            profile.two_qubit_fidelity
        );
        println!();
    }
    Ok(())
}
