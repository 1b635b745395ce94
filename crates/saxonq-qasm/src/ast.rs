//! Syntax tree for `OpenQASM` 2.0 statements.

/// A reference to a register element (`q[2]`) or a whole register (`q`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    /// Register name.
    pub register: String,
    /// Element index, `None` for the whole register.
    pub index: Option<u32>,
}

/// One statement of a source line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `OPENQASM 2.0;`
    Version(String),

    /// `include "qelib1.inc";`
    Include(String),

    /// `qreg name[size];`
    QregDecl { name: String, size: u32 },

    /// `creg name[size];`
    CregDecl { name: String, size: u32 },

    /// `name(params) operands;` with operands written controls first.
    Gate {
        name: String,
        params: Vec<String>,
        operands: Vec<Operand>,
    },

    /// `measure q[i] -> c[j];`
    Measure { qubit: Operand, clbit: Operand },
}
