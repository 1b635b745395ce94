//! Experiment command implementation.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use saxonq_ir::{ProcessorCatalog, ProcessorProfile};
use saxonq_oracles::OracleResult;
use saxonq_oracles::protocol::{
    Experiment, bell_state, bernstein_vazirani_experiment, deutsch_jozsa_experiment,
    first_fitting_processor, ghz_state, grover_experiment, qft_period_experiment,
    shor_experiment, simon_experiment, state_transfer, superposition, teleportation,
};
use saxonq_qasm::emit;
use serde_json::json;

use super::common::print_json;
use super::simulator::IdealVerifier;

/// Experiments the CLI can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExperimentKind {
    Superposition,
    #[value(name = "swap")]
    StateTransfer,
    Teleportation,
    Bell,
    Ghz,
    #[value(name = "dj")]
    DeutschJozsa,
    #[value(name = "bv")]
    BernsteinVazirani,
    Simon,
    Qft,
    Grover,
    Shor,
}

impl ExperimentKind {
    /// Size used when `--size` is not given: qubits, or secret bits for
    /// Bernstein-Vazirani and Simon.
    pub fn default_size(self) -> u32 {
        match self {
            ExperimentKind::Simon => 2,
            _ => 3,
        }
    }
}

/// Build one experiment and print it with its job parameters.
pub fn execute(
    kind: ExperimentKind,
    size: Option<u32>,
    seed: Option<u64>,
    catalog: &ProcessorCatalog,
    processor: Option<&ProcessorProfile>,
    json: bool,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let size = size.unwrap_or_else(|| kind.default_size());
    let experiment = build(kind, size, &mut rng)
        .with_context(|| format!("Failed to build {kind:?} experiment"))?;

    let required = experiment.program.num_qubits();
    let profile = match processor {
        Some(profile) if !profile.fits(required) => bail!(
            "{} has {} qubits, the experiment needs {required}",
            profile.name,
            profile.num_qubits
        ),
        Some(profile) => profile,
        None => first_fitting_processor(catalog, required)?,
    };

    if json {
        return print_json(&json!({
            "processor": profile.name,
            "experiment": experiment,
            "qasm": emit(&experiment.program),
        }));
    }

    println!(
        "{} {} on {}",
        style("→").cyan().bold(),
        style(experiment.category).bold(),
        style(&profile.name).yellow()
    );
    println!("  {}", experiment.summary);
    for (key, value) in &experiment.params {
        println!("  {key} = {value}");
    }
    println!();
    print!("{}", emit(&experiment.program));
    Ok(())
}

fn build(kind: ExperimentKind, size: u32, rng: &mut StdRng) -> OracleResult<Experiment> {
    match kind {
        ExperimentKind::Superposition => superposition(size),
        ExperimentKind::StateTransfer => state_transfer(size),
        ExperimentKind::Teleportation => teleportation(rng),
        ExperimentKind::Bell => bell_state(rng),
        ExperimentKind::Ghz => ghz_state(size, rng),
        ExperimentKind::DeutschJozsa => deutsch_jozsa_experiment(size, rng),
        ExperimentKind::BernsteinVazirani => bernstein_vazirani_experiment(size, rng),
        ExperimentKind::Simon => simon_experiment(size, rng),
        ExperimentKind::Qft => qft_period_experiment(size, rng),
        ExperimentKind::Grover => grover_experiment(size, rng, &mut IdealVerifier),
        ExperimentKind::Shor => shor_experiment(rng),
    }
}
