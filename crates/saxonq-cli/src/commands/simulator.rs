//! Ideal statevector evaluation, used to verify Grover searches locally.

use anyhow::{Result, bail};
use num_complex::Complex64;
use saxonq_ir::{Instruction, Program};
use saxonq_oracles::BitString;
use saxonq_oracles::protocol::Verifier;
use std::collections::BTreeMap;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use tracing::warn;

/// Largest register simulated densely.
pub const MAX_SIMULATED_QUBITS: u32 = 20;

type Matrix = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// A statevector over `n` qubits, qubit `q` at bit `q` of the basis index.
pub struct Statevector {
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// Evaluate the gates of `program` from `|0…0⟩`. Measurements and
    /// barriers leave the state untouched.
    pub fn run(program: &Program) -> Result<Self> {
        let n = program.num_qubits();
        if n > MAX_SIMULATED_QUBITS {
            bail!("{n} qubits exceed the simulator limit of {MAX_SIMULATED_QUBITS}");
        }
        let mut amplitudes = vec![ZERO; 1 << n];
        amplitudes[0] = ONE;
        let mut sv = Self { amplitudes };
        for ins in program.iter() {
            sv.apply(ins)?;
        }
        Ok(sv)
    }

    fn apply(&mut self, ins: &Instruction) -> Result<()> {
        let mask: usize = ins.controls().iter().map(|c| 1 << c.0).sum();
        let targets: Vec<usize> = ins.targets().iter().map(|q| q.0 as usize).collect();
        match ins.name() {
            "measure" | "barrier" | "id" => {}
            "reset" => bail!("reset cannot be simulated as a pure state"),
            name @ ("swap" | "cswap") => {
                let [a, b] = targets[..] else {
                    bail!("'{name}' needs two targets, got {}", targets.len());
                };
                self.swap(mask, a, b);
            }
            name => {
                let [target] = targets[..] else {
                    bail!("'{name}' needs one target, got {}", targets.len());
                };
                let params: Vec<f64> = ins.params().iter().map(|a| a.as_f64()).collect();
                let Some(m) = matrix(name, &params) else {
                    bail!("unsupported operation '{name}' with {} parameter(s)", params.len());
                };
                self.controlled(mask, target, &m);
            }
        }
        Ok(())
    }

    fn controlled(&mut self, mask: usize, target: usize, m: &Matrix) {
        let bit = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & bit != 0 || i & mask != mask {
                continue;
            }
            let (a0, a1) = (self.amplitudes[i], self.amplitudes[i | bit]);
            self.amplitudes[i] = m[0][0] * a0 + m[0][1] * a1;
            self.amplitudes[i | bit] = m[1][0] * a0 + m[1][1] * a1;
        }
    }

    fn swap(&mut self, mask: usize, a: usize, b: usize) {
        for i in 0..self.amplitudes.len() {
            if (i >> a) & 1 == 1 && (i >> b) & 1 == 0 && i & mask == mask {
                let j = (i & !(1 << a)) | (1 << b);
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// The most likely classical outcome of `program` in this state.
    pub fn most_frequent(&self, program: &Program) -> BitString {
        let readout: Vec<(usize, usize)> = program
            .iter()
            .filter(|ins| ins.is_measurement())
            .filter_map(|ins| match (ins.targets(), ins.clbits()) {
                ([q], [c]) => Some((q.0 as usize, c.0 as usize)),
                _ => None,
            })
            .collect();
        let mut outcomes: BTreeMap<usize, f64> = BTreeMap::new();
        for (basis, amp) in self.amplitudes.iter().enumerate() {
            let key = readout
                .iter()
                .filter(|&&(q, _)| (basis >> q) & 1 == 1)
                .fold(0usize, |acc, &(_, c)| acc | (1 << c));
            *outcomes.entry(key).or_insert(0.0) += amp.norm_sqr();
        }
        let best = outcomes
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(0, |(key, _)| key);
        BitString::from_value(best as u64, program.num_clbits() as usize)
    }
}

/// Verifier backed by [`Statevector`]; programs it cannot simulate are
/// reported with an empty outcome, so the search treats them as unverified.
#[derive(Debug, Default)]
pub struct IdealVerifier;

impl Verifier for IdealVerifier {
    fn most_frequent(&mut self, program: &Program) -> BitString {
        match Statevector::run(program) {
            Ok(sv) => sv.most_frequent(program),
            Err(e) => {
                warn!(error = %e, "Cannot verify program locally");
                BitString::default()
            }
        }
    }
}

fn diag(a: Complex64, b: Complex64) -> Matrix {
    [[a, ZERO], [ZERO, b]]
}

fn matrix(name: &str, params: &[f64]) -> Option<Matrix> {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    let phase = |theta: f64| Complex64::from_polar(1.0, theta);
    let real = |v: f64| Complex64::new(v, 0.0);
    let m = match (name, params) {
        ("x" | "cx" | "ccx" | "mcx", []) => [[ZERO, ONE], [ONE, ZERO]],
        ("y" | "cy", []) => [[ZERO, -I], [I, ZERO]],
        ("z" | "cz", []) => diag(ONE, -ONE),
        ("h" | "ch", []) => [[h, h], [h, -h]],
        ("s", []) => diag(ONE, I),
        ("sdg", []) => diag(ONE, -I),
        ("t", []) => diag(ONE, phase(FRAC_PI_4)),
        ("tdg", []) => diag(ONE, phase(-FRAC_PI_4)),
        ("sx", []) => {
            let (p, q) = (Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5));
            [[p, q], [q, p]]
        }
        ("sxdg", []) => {
            let (p, q) = (Complex64::new(0.5, -0.5), Complex64::new(0.5, 0.5));
            [[p, q], [q, p]]
        }
        ("rx" | "crx", &[theta]) => {
            let (s, c) = (theta / 2.0).sin_cos();
            [[real(c), Complex64::new(0.0, -s)], [Complex64::new(0.0, -s), real(c)]]
        }
        ("ry" | "cry", &[theta]) => {
            let (s, c) = (theta / 2.0).sin_cos();
            [[real(c), real(-s)], [real(s), real(c)]]
        }
        ("rz" | "crz", &[theta]) => diag(phase(-theta / 2.0), phase(theta / 2.0)),
        ("p" | "cp" | "mcp", &[lambda]) => diag(ONE, phase(lambda)),
        ("u", &[theta, phi, lambda]) => {
            let (s, c) = (theta / 2.0).sin_cos();
            [
                [real(c), -phase(lambda) * s],
                [phase(phi) * s, phase(phi + lambda) * c],
            ]
        }
        _ => return None,
    };
    Some(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saxonq_ir::{ClbitId, QubitId};

    #[test]
    fn test_most_frequent_reads_clbits() {
        // |q0 q1⟩ = |1 0⟩, q0 read into c1 only.
        let mut b = Program::builder(2, 2);
        b.x(QubitId(0)).unwrap().measure(QubitId(0), ClbitId(1)).unwrap();
        let program = b.finish();
        let sv = Statevector::run(&program).unwrap();
        assert_eq!(sv.most_frequent(&program).to_string(), "01");
    }

    #[test]
    fn test_matrix_requires_matching_parameters() {
        assert!(matrix("rx", &[]).is_none());
        assert!(matrix("u", &[1.0, 2.0]).is_none());
        assert!(matrix("h", &[0.5]).is_none());
        assert!(matrix("rz", &[0.5]).is_some());
        assert!(matrix("u", &[1.0, 2.0, 3.0]).is_some());
    }

    #[test]
    fn test_swap_and_rotation_evolve_state() {
        let mut b = Program::builder(2, 2);
        b.x(QubitId(0))
            .unwrap()
            .swap(QubitId(0), QubitId(1))
            .unwrap()
            .rz(std::f64::consts::PI, QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();
        let program = b.finish();
        let sv = Statevector::run(&program).unwrap();
        assert_eq!(sv.most_frequent(&program).to_string(), "01");
    }

    #[test]
    fn test_verifier_reports_unsimulable_programs() {
        let mut b = Program::builder(1, 1);
        b.reset(QubitId(0)).unwrap().measure(QubitId(0), ClbitId(0)).unwrap();
        let mut verifier = IdealVerifier;
        assert!(verifier.most_frequent(&b.finish()).is_empty());
    }
}
