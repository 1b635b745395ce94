//! Dense statevector evaluation of synthesized programs.
#![allow(dead_code)]

use num_complex::Complex64;
use saxonq_ir::{Instruction, Program};
use saxonq_oracles::BitString;
use std::collections::BTreeMap;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};

type Matrix = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

pub struct Statevector {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Self {
            num_qubits,
            amplitudes,
        }
    }

    /// Run the unitary part of `program`; measurements are read later.
    pub fn run(program: &Program) -> Self {
        let mut sv = Self::new(program.num_qubits() as usize);
        for ins in program.iter() {
            sv.apply(ins);
        }
        sv
    }

    pub fn probability(&self, basis: usize) -> f64 {
        self.amplitudes[basis].norm_sqr()
    }

    pub fn apply(&mut self, ins: &Instruction) {
        let controls: Vec<usize> = ins.controls().iter().map(|q| q.0 as usize).collect();
        let targets: Vec<usize> = ins.targets().iter().map(|q| q.0 as usize).collect();
        let params: Vec<f64> = ins.params().iter().map(|a| a.as_f64()).collect();
        match ins.name() {
            "measure" | "barrier" | "id" => {}
            "swap" | "cswap" => self.swap(&controls, targets[0], targets[1]),
            name => {
                let m = matrix(name, &params).unwrap_or_else(|| panic!("unsupported gate {name}"));
                self.controlled(&controls, targets[0], &m);
            }
        }
    }

    fn controlled(&mut self, controls: &[usize], target: usize, m: &Matrix) {
        let mask: usize = controls.iter().map(|c| 1 << c).sum();
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

    fn swap(&mut self, controls: &[usize], a: usize, b: usize) {
        let mask: usize = controls.iter().map(|c| 1 << c).sum();
        for i in 0..self.amplitudes.len() {
            let (bit_a, bit_b) = ((i >> a) & 1, (i >> b) & 1);
            if bit_a == 1 && bit_b == 0 && i & mask == mask {
                let j = (i & !(1 << a)) | (1 << b);
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Probability of every classical outcome of `program`, keyed with
    /// classical bit 0 first. Unmeasured bits read 0.
    pub fn distribution(&self, program: &Program) -> BTreeMap<String, f64> {
        let readout: Vec<(usize, usize)> = program
            .iter()
            .filter(|ins| ins.is_measurement())
            .map(|ins| (ins.targets()[0].0 as usize, ins.clbits()[0].0 as usize))
            .collect();
        let width = program.num_clbits() as usize;
        let mut out = BTreeMap::new();
        for (basis, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p < 1e-12 {
                continue;
            }
            let mut bits = vec![false; width];
            for &(q, c) in &readout {
                bits[c] = (basis >> q) & 1 == 1;
            }
            *out.entry(BitString::new(bits).to_string()).or_insert(0.0) += p;
        }
        out
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }
}

/// Outcome distribution of `program`.
pub fn distribution(program: &Program) -> BTreeMap<String, f64> {
    Statevector::run(program).distribution(program)
}

/// The most likely outcome of `program`.
pub fn most_frequent(program: &Program) -> BitString {
    distribution(program)
        .into_iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(outcome, _)| outcome.parse().unwrap())
        .unwrap_or_default()
}

fn diag(a: Complex64, b: Complex64) -> Matrix {
    [[a, ZERO], [ZERO, b]]
}

fn matrix(name: &str, params: &[f64]) -> Option<Matrix> {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    let phase = |theta: f64| Complex64::from_polar(1.0, theta);
    let m = match name {
        "x" | "cx" | "ccx" | "mcx" => [[ZERO, ONE], [ONE, ZERO]],
        "y" | "cy" => [[ZERO, -I], [I, ZERO]],
        "z" | "cz" => diag(ONE, -ONE),
        "h" | "ch" => [[h, h], [h, -h]],
        "s" => diag(ONE, I),
        "sdg" => diag(ONE, -I),
        "t" => diag(ONE, phase(FRAC_PI_4)),
        "tdg" => diag(ONE, phase(-FRAC_PI_4)),
        "sx" | "sxdg" => {
            let (p, q) = (Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5));
            if name == "sx" { [[p, q], [q, p]] } else { [[q, p], [p, q]] }
        }
        "rx" | "crx" => {
            let (c, s) = ((params[0] / 2.0).cos(), (params[0] / 2.0).sin());
            [[Complex64::new(c, 0.0), Complex64::new(0.0, -s)], [Complex64::new(0.0, -s), Complex64::new(c, 0.0)]]
        }
        "ry" | "cry" => {
            let (c, s) = ((params[0] / 2.0).cos(), (params[0] / 2.0).sin());
            [[Complex64::new(c, 0.0), Complex64::new(-s, 0.0)], [Complex64::new(s, 0.0), Complex64::new(c, 0.0)]]
        }
        "rz" | "crz" => diag(phase(-params[0] / 2.0), phase(params[0] / 2.0)),
        "p" | "cp" | "mcp" => diag(ONE, phase(params[0])),
        "u" => {
            let (theta, phi, lambda) = (params[0], params[1], params[2]);
            let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
            [
                [Complex64::new(c, 0.0), -phase(lambda) * s],
                [phase(phi) * s, phase(phi + lambda) * c],
            ]
        }
        _ => return None,
    };
    Some(m)
}
