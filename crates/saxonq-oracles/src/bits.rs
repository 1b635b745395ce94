//! Bit strings used as oracle secrets and measurement outcomes.
//!
//! Character `i` of the textual form is bit `i`, which belongs to qubit `i`
//! (or classical bit `i`). Reports shown to users follow the usual
//! measurement convention of printing the highest bit first; see
//! [`BitString::measurement_order`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{OracleError, OracleResult};

/// An ordered string of bits, bit 0 first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BitString(Vec<bool>);

impl BitString {
    /// Create from explicit bits.
    pub fn new(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    /// `width` low bits of `value`, least significant first.
    pub fn from_value(value: u64, width: usize) -> Self {
        Self((0..width).map(|i| i < 64 && (value >> i) & 1 == 1).collect())
    }

    /// `k` uniformly random bits.
    pub fn random<R: Rng + ?Sized>(k: usize, rng: &mut R) -> Self {
        Self((0..k).map(|_| rng.gen_bool(0.5)).collect())
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no bits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bit `i`, or `false` past the end.
    pub fn bit(&self, i: usize) -> bool {
        self.0.get(i).copied().unwrap_or(false)
    }

    /// All bits, bit 0 first.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Indices of the set bits, ascending.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().enumerate().filter(|(_, b)| **b).map(|(i, _)| i)
    }

    /// Indices of the clear bits, ascending.
    pub fn zeros(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().enumerate().filter(|(_, b)| !**b).map(|(i, _)| i)
    }

    /// Whether every bit is clear.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| !b)
    }

    /// Value with bit 0 least significant. Bits past 64 are ignored.
    pub fn to_value(&self) -> u64 {
        self.ones()
            .filter(|&i| i < 64)
            .fold(0, |acc, i| acc | (1 << i))
    }

    /// The string as a measurement report prints it, highest bit first.
    pub fn measurement_order(&self) -> String {
        self.0
            .iter()
            .rev()
            .map(|&b| if b { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(OracleError::invalid(
                    "bit string",
                    format!("'{other}' is not a binary digit"),
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl TryFrom<String> for BitString {
    type Error = OracleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BitString> for String {
    fn from(value: BitString) -> Self {
        value.to_string()
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self(bits)
    }
}

pub(crate) fn register_len(secret: &BitString, oracle: &'static str) -> OracleResult<u32> {
    match u32::try_from(secret.len()) {
        Ok(0) => Err(OracleError::too_small(oracle, 1, 0)),
        Ok(k) => Ok(k),
        Err(_) => Err(OracleError::invalid(oracle, "secret is too long")),
    }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn qubit_index(i: usize) -> u32 {
    // Callers only pass indices below a register length that fits in u32.
    i as u32
}
