//! SaxonQ Command-Line Interface
//!
//! Parse, check and explain circuit files, lower them to pulse schedules
//! for a simulated processor, and synthesize algorithm oracles.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use saxonq_oracles::{BitString, OracleDescriptor, OracleType};

mod commands;
mod config;
mod logging;

use commands::common::resolve_processor;
use commands::experiment::ExperimentKind;
use commands::{check, expand, experiment, operations, processors, pulse, synth};
use config::Config;

/// SaxonQ - circuit checking, pulse scheduling and oracle synthesis
#[derive(Parser)]
#[command(name = "saxonq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (YAML)
    #[arg(long, global = true, env = "SAXONQ_CONFIG")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered operations
    Operations,

    /// List the available processors
    Processors {
        /// Processor catalog file (JSON or YAML)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Parse a circuit file and check that it can be submitted
    Check {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Explain a circuit file line by line
    Expand {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Include the register allocations
        #[arg(long)]
        header: bool,
    },

    /// Lower a circuit file to a pulse schedule
    Pulse {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Target processor (defaults to the configured one)
        #[arg(short, long)]
        processor: Option<String>,

        /// Processor catalog file (JSON or YAML)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Synthesize an oracle and print it as circuit text
    Synth {
        /// Refuse oracles larger than this many qubits
        #[arg(long)]
        budget: Option<u32>,

        #[command(subcommand)]
        oracle: SynthOracle,
    },

    /// Build a complete experiment with its job parameters
    Experiment {
        /// Experiment to build
        #[arg(value_enum)]
        kind: ExperimentKind,

        /// Qubits, or secret bits for bv and simon
        #[arg(short = 'n', long)]
        size: Option<u32>,

        /// Seed for the random secrets and states
        #[arg(long)]
        seed: Option<u64>,

        /// Target processor (defaults to the first large enough)
        #[arg(short, long)]
        processor: Option<String>,

        /// Processor catalog file (JSON or YAML)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SynthOracle {
    /// Bernstein-Vazirani oracle
    Bv {
        /// Secret string, qubit 0 first
        secret: BitString,
    },

    /// Simon oracle
    Simon {
        /// Hidden XOR mask, qubit 0 first
        secret: BitString,
    },

    /// Deutsch-Jozsa oracle
    Dj {
        /// Qubits including the ancilla
        #[arg(short = 'n', long)]
        qubits: u32,

        /// Class of the hidden function
        #[arg(long, value_enum, default_value = "balanced")]
        kind: DjKind,

        /// Output of a constant function
        #[arg(long)]
        value: bool,
    },

    /// Grover phase oracle
    GroverPhase {
        /// Qubits including the free qubit
        #[arg(short = 'n', long)]
        qubits: u32,

        /// Marked state, qubit 0 first
        #[arg(long)]
        marked: BitString,
    },

    /// Grover inversion about the mean
    GroverInversion {
        /// Qubits including the free qubit
        #[arg(short = 'n', long)]
        qubits: u32,
    },

    /// Quantum Fourier transform
    Qft {
        /// Register size
        #[arg(short = 'n', long)]
        qubits: u32,

        /// Emit the inverse transform
        #[arg(long)]
        inverse: bool,
    },

    /// Shor period-finding program
    Shor {
        /// Number to factor
        #[arg(short = 'N', long)]
        modulus: u64,

        /// Base coprime to the modulus
        #[arg(short, long)]
        base: u64,
    },

    /// Oracle described by a JSON descriptor file
    File {
        /// Descriptor file
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DjKind {
    Constant,
    Balanced,
}

impl SynthOracle {
    fn into_descriptor(self) -> Result<OracleDescriptor> {
        Ok(match self {
            SynthOracle::Bv { secret } => OracleDescriptor::BernsteinVazirani { secret },
            SynthOracle::Simon { secret } => OracleDescriptor::Simon { secret },
            SynthOracle::Dj {
                qubits,
                kind,
                value,
            } => OracleDescriptor::DeutschJozsa {
                num_qubits: qubits,
                oracle_type: match kind {
                    DjKind::Constant => OracleType::Constant,
                    DjKind::Balanced => OracleType::Balanced,
                },
                value,
            },
            SynthOracle::GroverPhase { qubits, marked } => OracleDescriptor::GroverPhase {
                num_qubits: qubits,
                marked,
            },
            SynthOracle::GroverInversion { qubits } => {
                OracleDescriptor::GroverInversion { num_qubits: qubits }
            }
            SynthOracle::Qft { qubits, inverse } => OracleDescriptor::Qft {
                num_qubits: qubits,
                inverse,
            },
            SynthOracle::Shor { modulus, base } => OracleDescriptor::Shor { modulus, base },
            SynthOracle::File { path } => synth::load_descriptor(&path)?,
        })
    }
}

fn run(cli: Cli, config: &Config) -> Result<()> {
    let json = cli.json || config.output.json;
    let configured = config.default_processor.as_deref();

    match cli.command {
        Commands::Operations => operations::execute(json),

        Commands::Processors { catalog } => {
            processors::execute(&config.catalog(catalog.as_deref())?, json)
        }

        Commands::Check { input } => check::execute(&input, json),

        Commands::Expand { input, header } => expand::execute(&input, header, json),

        Commands::Pulse {
            input,
            processor,
            catalog,
        } => {
            let catalog = config.catalog(catalog.as_deref())?;
            let Some(profile) = resolve_processor(&catalog, processor.as_deref(), configured)?
            else {
                anyhow::bail!("No processor given: pass --processor or set default_processor");
            };
            pulse::execute(&input, profile, json)
        }

        Commands::Synth { budget, oracle } => {
            synth::execute(&oracle.into_descriptor()?, budget, json)
        }

        Commands::Experiment {
            kind,
            size,
            seed,
            processor,
            catalog,
        } => {
            let catalog = config.catalog(catalog.as_deref())?;
            let profile = resolve_processor(&catalog, processor.as_deref(), configured)?;
            experiment::execute(kind, size, seed, &catalog, profile, json)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red().bold());
            std::process::exit(1);
        }
    };
    logging::init(&config.logging, cli.verbose);

    if let Err(e) = run(cli, &config) {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pulse() {
        let cli = Cli::try_parse_from(["saxonq", "pulse", "-i", "bell.qasm", "-p", "Tick"]).unwrap();
        match cli.command {
            Commands::Pulse {
                input,
                processor,
                catalog,
            } => {
                assert_eq!(input, PathBuf::from("bell.qasm"));
                assert_eq!(processor.as_deref(), Some("Tick"));
                assert!(catalog.is_none());
            }
            _ => panic!("Expected Pulse command"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["saxonq", "operations", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_synth_bv() {
        let cli = Cli::try_parse_from(["saxonq", "synth", "--budget", "4", "bv", "101"]).unwrap();
        let Commands::Synth { budget, oracle } = cli.command else {
            panic!("Expected Synth command");
        };
        assert_eq!(budget, Some(4));
        assert_eq!(
            oracle.into_descriptor().unwrap(),
            OracleDescriptor::BernsteinVazirani {
                secret: "101".parse().unwrap()
            }
        );
    }

    #[test]
    fn test_parse_synth_rejects_bad_secret() {
        assert!(Cli::try_parse_from(["saxonq", "synth", "bv", "10x"]).is_err());
    }

    #[test]
    fn test_parse_synth_dj_defaults() {
        let cli = Cli::try_parse_from(["saxonq", "synth", "dj", "-n", "3"]).unwrap();
        let Commands::Synth { oracle, .. } = cli.command else {
            panic!("Expected Synth command");
        };
        assert_eq!(
            oracle.into_descriptor().unwrap(),
            OracleDescriptor::DeutschJozsa {
                num_qubits: 3,
                oracle_type: OracleType::Balanced,
                value: false,
            }
        );
    }

    #[test]
    fn test_parse_experiment() {
        let cli =
            Cli::try_parse_from(["saxonq", "experiment", "bv", "-n", "4", "--seed", "7"]).unwrap();
        match cli.command {
            Commands::Experiment {
                kind, size, seed, ..
            } => {
                assert_eq!(kind, ExperimentKind::BernsteinVazirani);
                assert_eq!(size, Some(4));
                assert_eq!(seed, Some(7));
            }
            _ => panic!("Expected Experiment command"),
        }
    }

    #[test]
    fn test_unknown_experiment() {
        assert!(Cli::try_parse_from(["saxonq", "experiment", "teleport-me"]).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        assert!(Cli::try_parse_from(["saxonq"]).is_err());
    }
}
