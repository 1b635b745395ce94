//! Qubit, classical bit and register types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a program's quantum register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The same qubit shifted by `offset` places.
    #[must_use]
    pub fn offset(self, offset: u32) -> Self {
        QubitId(self.0 + offset)
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Index of a bit within a program's classical register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl ClbitId {
    /// The same bit shifted by `offset` places.
    #[must_use]
    pub fn offset(self, offset: u32) -> Self {
        ClbitId(self.0 + offset)
    }
}

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// A named register of `size` bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Register {
    /// Register name as written in program text.
    pub name: String,
    /// Number of bits.
    pub size: u32,
}

impl Register {
    /// Create a register.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Format element `index` as `name[index]`.
    pub fn element(&self, index: u32) -> String {
        format!("{}[{index}]", self.name)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(QubitId(0).to_string(), "q0");
        assert_eq!(ClbitId(3).to_string(), "c3");
    }

    #[test]
    fn test_offset() {
        assert_eq!(QubitId(2).offset(3), QubitId(5));
        assert_eq!(ClbitId(0).offset(4), ClbitId(4));
    }

    #[test]
    fn test_register_element() {
        let reg = Register::new("anc", 2);
        assert_eq!(reg.element(1), "anc[1]");
        assert_eq!(reg.to_string(), "anc[2]");
    }
}
