//! The operation registry.
//!
//! Every instruction in a [`Program`](crate::Program) is built here. The
//! registry is a fixed, read-only table mapping an operation name to its
//! shape: how many targets, controls, parameters and classical bits it takes.

use crate::angle::Angle;
use crate::error::{AngleError, InvalidParameter, OperandRole, OperationError, OperationResult};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// How many operands of one role an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// Exactly `n` operands.
    Exactly(usize),
    /// `n` or more operands.
    AtLeast(usize),
}

impl Arity {
    /// Whether `count` operands satisfy this arity.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }

    /// Smallest accepted count.
    pub fn min(self) -> usize {
        match self {
            Arity::Exactly(n) | Arity::AtLeast(n) => n,
        }
    }

    /// Whether the count is not fixed.
    pub fn is_variadic(self) -> bool {
        matches!(self, Arity::AtLeast(_))
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Physical family of an operation, used to pick calibration data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Identity / idle.
    Identity,
    /// Rotations that move population between |0⟩ and |1⟩.
    BitFlip,
    /// Rotations about Z.
    Phase,
    /// Gates with one or more control qubits.
    Controlled,
    /// Two-qubit exchange.
    Swap,
    /// Readout into a classical bit.
    Measurement,
    /// Reinitialization to |0⟩.
    Reset,
    /// Scheduling barrier with no physical action.
    Barrier,
}

/// Declared shape of a registered operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationShape {
    /// Canonical lowercase name.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Calibration family.
    pub kind: OperationKind,
    /// Target qubit arity.
    pub targets: Arity,
    /// Control qubit arity.
    pub controls: Arity,
    /// Number of angle parameters.
    pub params: usize,
    /// Number of classical destinations.
    pub clbits: usize,
}

impl OperationShape {
    const fn new(
        name: &'static str,
        label: &'static str,
        kind: OperationKind,
        targets: Arity,
        controls: Arity,
        params: usize,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            targets,
            controls,
            params,
            clbits: 0,
        }
    }

    const fn single(name: &'static str, label: &'static str, kind: OperationKind) -> Self {
        Self::new(name, label, kind, Arity::Exactly(1), Arity::Exactly(0), 0)
    }

    const fn rotation(name: &'static str, label: &'static str, kind: OperationKind) -> Self {
        Self::new(name, label, kind, Arity::Exactly(1), Arity::Exactly(0), 1)
    }

    const fn controlled(name: &'static str, label: &'static str, controls: usize, params: usize) -> Self {
        Self::new(
            name,
            label,
            OperationKind::Controlled,
            Arity::Exactly(1),
            Arity::Exactly(controls),
            params,
        )
    }

    /// Whether the operation takes angle parameters.
    pub fn is_parameterized(&self) -> bool {
        self.params > 0
    }

    /// Whether the operation acts on exactly one qubit.
    pub fn is_single_qubit(&self) -> bool {
        self.targets == Arity::Exactly(1) && self.controls == Arity::Exactly(0)
    }
}

use OperationKind::{Barrier, BitFlip, Identity, Measurement, Phase, Reset, Swap};

const MEASURE: OperationShape = OperationShape {
    name: "measure",
    label: "Measurement",
    kind: Measurement,
    targets: Arity::Exactly(1),
    controls: Arity::Exactly(0),
    params: 0,
    clbits: 1,
};

static OPERATIONS: &[OperationShape] = &[
    OperationShape::single("id", "Identity", Identity),
    OperationShape::single("x", "Pauli-X (bit flip)", BitFlip),
    OperationShape::single("y", "Pauli-Y", BitFlip),
    OperationShape::single("z", "Pauli-Z (phase flip)", Phase),
    OperationShape::single("h", "Hadamard", BitFlip),
    OperationShape::single("s", "S (quarter turn about Z)", Phase),
    OperationShape::single("sdg", "S-dagger", Phase),
    OperationShape::single("t", "T (eighth turn about Z)", Phase),
    OperationShape::single("tdg", "T-dagger", Phase),
    OperationShape::single("sx", "Square root of X", BitFlip),
    OperationShape::single("sxdg", "Square root of X, inverse", BitFlip),
    OperationShape::rotation("rx", "Rotation about X", BitFlip),
    OperationShape::rotation("ry", "Rotation about Y", BitFlip),
    OperationShape::rotation("rz", "Rotation about Z", Phase),
    OperationShape::rotation("p", "Phase", Phase),
    OperationShape::new(
        "u",
        "Universal single-qubit rotation",
        BitFlip,
        Arity::Exactly(1),
        Arity::Exactly(0),
        3,
    ),
    OperationShape::controlled("cx", "Controlled-NOT", 1, 0),
    OperationShape::controlled("cy", "Controlled-Y", 1, 0),
    OperationShape::controlled("cz", "Controlled-Z", 1, 0),
    OperationShape::controlled("ch", "Controlled-Hadamard", 1, 0),
    OperationShape::new("swap", "Swap", Swap, Arity::Exactly(2), Arity::Exactly(0), 0),
    OperationShape::controlled("cp", "Controlled phase", 1, 1),
    OperationShape::controlled("crx", "Controlled rotation about X", 1, 1),
    OperationShape::controlled("cry", "Controlled rotation about Y", 1, 1),
    OperationShape::controlled("crz", "Controlled rotation about Z", 1, 1),
    OperationShape::controlled("ccx", "Toffoli", 2, 0),
    OperationShape::new(
        "cswap",
        "Controlled swap (Fredkin)",
        OperationKind::Controlled,
        Arity::Exactly(2),
        Arity::Exactly(1),
        0,
    ),
    OperationShape::new(
        "mcx",
        "Multi-controlled X",
        OperationKind::Controlled,
        Arity::Exactly(1),
        Arity::AtLeast(1),
        0,
    ),
    OperationShape::new(
        "mcp",
        "Multi-controlled phase",
        OperationKind::Controlled,
        Arity::Exactly(1),
        Arity::AtLeast(1),
        1,
    ),
    MEASURE,
    OperationShape::single("reset", "Reset", Reset),
    OperationShape::new("barrier", "Barrier", Barrier, Arity::AtLeast(1), Arity::Exactly(0), 0),
];

static ALIASES: &[(&str, &str)] = &[
    ("i", "id"),
    ("cnot", "cx"),
    ("toffoli", "ccx"),
    ("fredkin", "cswap"),
    ("u1", "p"),
    ("u3", "u"),
    ("cu1", "cp"),
    ("cphase", "cp"),
];

static INDEX: LazyLock<FxHashMap<&'static str, &'static OperationShape>> = LazyLock::new(|| {
    let mut index: FxHashMap<&'static str, &'static OperationShape> =
        OPERATIONS.iter().map(|shape| (shape.name, shape)).collect();
    for &(alias, canonical) in ALIASES {
        if let Some(shape) = index.get(canonical).copied() {
            index.insert(alias, shape);
        }
    }
    index
});

/// Look up an operation by name or alias, ignoring ASCII case.
pub fn lookup(name: &str) -> Option<&'static OperationShape> {
    if let Some(shape) = INDEX.get(name).copied() {
        return Some(shape);
    }
    INDEX.get(name.to_ascii_lowercase().as_str()).copied()
}

/// All registered operations in presentation order.
pub fn list_operations() -> &'static [OperationShape] {
    OPERATIONS
}

/// Build a validated instruction from symbolic parameters.
///
/// Each parameter is parsed as an [`Angle`] (`"pi/2"`, `"0.3"`, ...).
///
/// # Errors
///
/// [`OperationError::UnknownOperation`] for an unregistered name,
/// [`OperationError::ArityMismatch`] when target or control counts disagree
/// with the declared shape, [`OperationError::ParameterMismatch`] when the
/// parameter count disagrees or a parameter does not parse (carrying the
/// [`InvalidParameter`] cause), and [`OperationError::DuplicateQubit`] when
/// a qubit is repeated.
pub fn build(
    op_name: &str,
    targets: &[QubitId],
    controls: &[QubitId],
    params: &[&str],
) -> OperationResult<Instruction> {
    let shape = resolve(op_name)?;
    check_params(shape, params.len())?;
    let angles = params
        .iter()
        .enumerate()
        .map(|(index, text)| {
            text.parse::<Angle>().map_err(|source| {
                invalid_parameter(
                    shape,
                    InvalidParameter {
                        index,
                        value: (*text).to_string(),
                        source,
                    },
                )
            })
        })
        .collect::<OperationResult<Vec<_>>>()?;
    assemble(shape, targets, controls, angles, Vec::new())
}

/// Build a validated instruction from already-resolved angles.
///
/// # Errors
///
/// As [`build`]; non-finite angles fail with
/// [`OperationError::ParameterMismatch`].
pub fn build_with_angles(
    op_name: &str,
    targets: &[QubitId],
    controls: &[QubitId],
    params: &[Angle],
) -> OperationResult<Instruction> {
    let shape = resolve(op_name)?;
    check_params(shape, params.len())?;
    if let Some((index, angle)) = params.iter().enumerate().find(|(_, a)| !a.is_finite()) {
        return Err(invalid_parameter(
            shape,
            InvalidParameter {
                index,
                value: angle.to_string(),
                source: AngleError::NonFinite,
            },
        ));
    }
    assemble(shape, targets, controls, params.to_vec(), Vec::new())
}

/// Build a measurement of `qubit` into `clbit`.
pub fn build_measure(qubit: QubitId, clbit: ClbitId) -> Instruction {
    Instruction::from_parts(&MEASURE, vec![qubit], Vec::new(), Vec::new(), vec![clbit])
}

fn resolve(op_name: &str) -> OperationResult<&'static OperationShape> {
    let shape = lookup(op_name).ok_or_else(|| OperationError::UnknownOperation {
        name: op_name.to_string(),
    })?;
    if shape.clbits > 0 {
        // Measurements bind a classical bit and go through `build_measure`.
        return Err(OperationError::ArityMismatch {
            op: shape.name,
            role: OperandRole::Clbits,
            expected: Arity::Exactly(shape.clbits),
            got: 0,
        });
    }
    Ok(shape)
}

fn check_params(shape: &'static OperationShape, got: usize) -> OperationResult<()> {
    if got == shape.params {
        Ok(())
    } else {
        Err(OperationError::ParameterMismatch {
            op: shape.name,
            expected: shape.params,
            got,
            invalid: None,
        })
    }
}

fn invalid_parameter(shape: &'static OperationShape, invalid: InvalidParameter) -> OperationError {
    OperationError::ParameterMismatch {
        op: shape.name,
        expected: shape.params,
        got: shape.params,
        invalid: Some(invalid),
    }
}

fn assemble(
    shape: &'static OperationShape,
    targets: &[QubitId],
    controls: &[QubitId],
    params: Vec<Angle>,
    clbits: Vec<ClbitId>,
) -> OperationResult<Instruction> {
    if !shape.targets.accepts(targets.len()) {
        return Err(OperationError::ArityMismatch {
            op: shape.name,
            role: OperandRole::Targets,
            expected: shape.targets,
            got: targets.len(),
        });
    }
    if !shape.controls.accepts(controls.len()) {
        return Err(OperationError::ArityMismatch {
            op: shape.name,
            role: OperandRole::Controls,
            expected: shape.controls,
            got: controls.len(),
        });
    }

    let mut seen: Vec<QubitId> = Vec::with_capacity(targets.len() + controls.len());
    for &qubit in controls.iter().chain(targets) {
        if seen.contains(&qubit) {
            return Err(OperationError::DuplicateQubit {
                op: shape.name,
                qubit,
            });
        }
        seen.push(qubit);
    }

    Ok(Instruction::from_parts(
        shape,
        targets.to_vec(),
        controls.to_vec(),
        params,
        clbits,
    ))
}
