//! Basis-state simulation of reversible fragments.
//!
//! Only permutation gates (`x`, the controlled flips, `swap`, `cswap`) are
//! supported; tests use it to evaluate oracles as truth tables.

use saxonq_ir::{Instruction, Program};

pub(crate) fn run(program: &Program, input: u64) -> u64 {
    program.iter().fold(input, |state, ins| apply(ins, state))
}

fn bit(state: u64, q: u32) -> bool {
    (state >> q) & 1 == 1
}

fn apply(ins: &Instruction, state: u64) -> u64 {
    if !ins.controls().iter().all(|c| bit(state, c.0)) {
        return state;
    }
    match ins.name() {
        "x" | "cx" | "ccx" | "mcx" => state ^ (1 << ins.targets()[0].0),
        "swap" | "cswap" => {
            let (a, b) = (ins.targets()[0].0, ins.targets()[1].0);
            if bit(state, a) == bit(state, b) {
                state
            } else {
                state ^ (1 << a) ^ (1 << b)
            }
        }
        "id" | "barrier" => state,
        other => panic!("'{other}' is not a classical permutation gate"),
    }
}

/// Read `width` bits starting at `offset`.
pub(crate) fn field(state: u64, offset: u32, width: u32) -> u64 {
    (state >> offset) & ((1 << width) - 1)
}
