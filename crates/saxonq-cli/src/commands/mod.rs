//! CLI command implementations.

pub mod check;
pub mod common;
pub mod expand;
pub mod experiment;
pub mod operations;
pub mod processors;
pub mod pulse;
pub mod simulator;
pub mod synth;
