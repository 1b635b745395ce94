//! Processor profiles and the processor catalog.
//!
//! A [`ProcessorProfile`] describes a simulated backend: its size, headline
//! benchmarks, coherence times and per-operation fidelities. Profiles are
//! supplied from outside (the built-in catalog or a catalog file) and never
//! mutated; the pulse transpiler reads them to bound circuit size and to
//! derive pulse durations.
//!
//! The serialized form accepts both snake_case field names and the catalog
//! keys of the published backend listing (`"number of qubits"`,
//! `"T1 (in sec)"`, `"Fidelity CX"`, ...).

use crate::error::{ProfileError, ProfileResult};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Calibration record of one backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorProfile {
    /// Backend name.
    pub name: String,
    /// Number of physical qubits.
    #[serde(alias = "number of qubits")]
    pub num_qubits: u32,
    /// Quantum volume.
    #[serde(alias = "Quantum Volume")]
    pub quantum_volume: u32,
    /// Circuit layer operations per second.
    #[serde(alias = "CLOPS")]
    pub clops: u32,
    /// Energy relaxation time in seconds.
    #[serde(alias = "T1 (in sec)")]
    pub t1: f64,
    /// Dephasing time in seconds.
    #[serde(alias = "T2 (in sec)")]
    pub t2: f64,
    /// Inhomogeneous dephasing time in seconds.
    #[serde(alias = "T2* (in sec)")]
    pub t2_star: f64,
    /// Fidelity of the identity / idle operation.
    #[serde(alias = "Fidelity 0")]
    pub identity_fidelity: f64,
    /// Fidelity of bit-flip family rotations.
    #[serde(alias = "Fidelity 1")]
    pub bit_flip_fidelity: f64,
    /// Fidelity of phase family rotations.
    #[serde(alias = "Fidelity X")]
    pub phase_fidelity: f64,
    /// Fidelity of the native two-qubit gate.
    #[serde(alias = "Fidelity CX")]
    pub two_qubit_fidelity: f64,
}

impl ProcessorProfile {
    /// Check that every field is usable by the pulse model.
    ///
    /// # Errors
    ///
    /// [`ProfileError::InvalidField`] for a zero qubit count, a coherence time
    /// that is not finite and positive, or a fidelity outside `(0, 1]`.
    pub fn validate(&self) -> ProfileResult<()> {
        if self.num_qubits == 0 {
            return Err(self.invalid("num_qubits", "must be at least 1".into()));
        }
        for (field, value) in [("t1", self.t1), ("t2", self.t2), ("t2_star", self.t2_star)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(self.invalid(field, format!("{value} is not a positive time")));
            }
        }
        for (field, value) in [
            ("identity_fidelity", self.identity_fidelity),
            ("bit_flip_fidelity", self.bit_flip_fidelity),
            ("phase_fidelity", self.phase_fidelity),
            ("two_qubit_fidelity", self.two_qubit_fidelity),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(self.invalid(field, format!("{value} is outside (0, 1]")));
            }
        }
        Ok(())
    }

    fn invalid(&self, field: &'static str, reason: String) -> ProfileError {
        ProfileError::InvalidField {
            processor: self.name.clone(),
            field,
            reason,
        }
    }

    /// Whether a program over `required` qubits fits on this backend.
    pub fn fits(&self, required: u32) -> bool {
        required <= self.num_qubits
    }

    /// The shorter of T1 and T2, which bounds single-qubit pulse length.
    pub fn coherence_limit(&self) -> f64 {
        self.t1.min(self.t2)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    processors: Vec<ProcessorProfile>,
}

/// An ordered set of processor profiles with unique names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessorCatalog {
    profiles: Vec<ProcessorProfile>,
}

impl ProcessorCatalog {
    /// Build a catalog, validating every profile.
    ///
    /// # Errors
    ///
    /// [`ProfileError::DuplicateProcessor`] or the first validation failure.
    pub fn new(profiles: Vec<ProcessorProfile>) -> ProfileResult<Self> {
        for (i, profile) in profiles.iter().enumerate() {
            profile.validate()?;
            if profiles[..i].iter().any(|p| p.name == profile.name) {
                return Err(ProfileError::DuplicateProcessor(profile.name.clone()));
            }
        }
        Ok(Self { profiles })
    }

    /// The three simulated backends shipped with SaxonQ.
    pub fn builtin() -> Self {
        Self {
            profiles: vec![
                ProcessorProfile {
                    name: "Trick".into(),
                    num_qubits: 8,
                    quantum_volume: 32,
                    clops: 3000,
                    t1: 5.0,
                    t2: 3.0,
                    t2_star: 2.5,
                    identity_fidelity: 0.99,
                    bit_flip_fidelity: 0.98,
                    phase_fidelity: 0.96,
                    two_qubit_fidelity: 0.92,
                },
                ProcessorProfile {
                    name: "Tick".into(),
                    num_qubits: 4,
                    quantum_volume: 20,
                    clops: 5000,
                    t1: 12.0,
                    t2: 10.0,
                    t2_star: 7.5,
                    identity_fidelity: 0.999,
                    bit_flip_fidelity: 0.989,
                    phase_fidelity: 0.969,
                    two_qubit_fidelity: 0.95,
                },
                ProcessorProfile {
                    name: "Track".into(),
                    num_qubits: 3,
                    quantum_volume: 15,
                    clops: 1000,
                    t1: 2.0,
                    t2: 1.25,
                    t2_star: 1.125,
                    identity_fidelity: 0.90,
                    bit_flip_fidelity: 0.89,
                    phase_fidelity: 0.84,
                    two_qubit_fidelity: 0.72,
                },
            ],
        }
    }

    /// Parse a catalog from JSON text: `{"processors": [...]}`.
    pub fn from_json(text: &str) -> ProfileResult<Self> {
        let file: CatalogFile = serde_json::from_str(text)?;
        Self::new(file.processors)
    }

    /// Parse a catalog from YAML text with a top-level `processors` list.
    pub fn from_yaml(text: &str) -> ProfileResult<Self> {
        let file: CatalogFile = serde_yaml_ng::from_str(text)?;
        Self::new(file.processors)
    }

    /// Load a catalog file; `.yaml`/`.yml` files are read as YAML, anything
    /// else as JSON.
    pub fn from_file(path: &Path) -> ProfileResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        let catalog = if is_yaml {
            Self::from_yaml(&text)?
        } else {
            Self::from_json(&text)?
        };
        tracing::debug!(path = %path.display(), processors = catalog.len(), "loaded processor catalog");
        Ok(catalog)
    }

    /// Profile by exact name.
    pub fn get(&self, name: &str) -> Option<&ProcessorProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Profile by name, as an error when missing.
    pub fn require(&self, name: &str) -> ProfileResult<&ProcessorProfile> {
        self.get(name)
            .ok_or_else(|| ProfileError::UnknownProcessor(name.to_string()))
    }

    /// Names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    /// Profiles in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProcessorProfile> {
        self.profiles.iter()
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// First profile, in catalog order, with at least `required` qubits.
    pub fn first_with_at_least(&self, required: u32) -> Option<&ProcessorProfile> {
        self.profiles.iter().find(|p| p.fits(required))
    }

    /// Uniformly random profile.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&ProcessorProfile> {
        self.profiles.choose(rng)
    }
}

impl Default for ProcessorCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
