//! Instructions: one operation applied to concrete operands.

use crate::angle::Angle;
use crate::operation::{OperationKind, OperationShape};
use crate::qubit::{ClbitId, QubitId};
use serde::Serialize;

/// A single validated operation application.
///
/// Instructions are produced by the registry ([`crate::build`]) and are
/// guaranteed to match their operation's declared shape. The source line is
/// carried for diagnostics only and does not take part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct Instruction {
    #[serde(rename = "op", serialize_with = "serialize_shape")]
    shape: &'static OperationShape,
    targets: Vec<QubitId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    controls: Vec<QubitId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    params: Vec<Angle>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    clbits: Vec<ClbitId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
}

fn serialize_shape<S: serde::Serializer>(
    shape: &&'static OperationShape,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(shape.name)
}

impl Instruction {
    pub(crate) fn from_parts(
        shape: &'static OperationShape,
        targets: Vec<QubitId>,
        controls: Vec<QubitId>,
        params: Vec<Angle>,
        clbits: Vec<ClbitId>,
    ) -> Self {
        Self {
            shape,
            targets,
            controls,
            params,
            clbits,
            line: None,
        }
    }

    /// Attach the 1-based source line this instruction was read from.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Drop the source line, as for synthesized instructions.
    #[must_use]
    pub fn without_line(mut self) -> Self {
        self.line = None;
        self
    }

    /// The registered shape of this instruction's operation.
    pub fn shape(&self) -> &'static OperationShape {
        self.shape
    }

    /// Canonical operation name.
    pub fn name(&self) -> &'static str {
        self.shape.name
    }

    /// Calibration family of the operation.
    pub fn kind(&self) -> OperationKind {
        self.shape.kind
    }

    /// Target qubits in order.
    pub fn targets(&self) -> &[QubitId] {
        &self.targets
    }

    /// Control qubits in order.
    pub fn controls(&self) -> &[QubitId] {
        &self.controls
    }

    /// Angle parameters in order.
    pub fn params(&self) -> &[Angle] {
        &self.params
    }

    /// Classical destinations in order.
    pub fn clbits(&self) -> &[ClbitId] {
        &self.clbits
    }

    /// Source line, if the instruction was parsed.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// All qubits touched: controls first, then targets.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.controls.iter().chain(&self.targets).copied()
    }

    /// Number of qubits touched.
    pub fn num_qubits(&self) -> usize {
        self.controls.len() + self.targets.len()
    }

    /// Check if this is a measurement.
    pub fn is_measurement(&self) -> bool {
        self.shape.kind == OperationKind::Measurement
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        self.shape.kind == OperationKind::Barrier
    }

    /// Check if this acts on exactly two qubits.
    pub fn is_two_qubit(&self) -> bool {
        !self.is_barrier() && self.num_qubits() == 2
    }

    /// Copy with every qubit and classical index shifted.
    pub(crate) fn shifted(&self, qubit_offset: u32, clbit_offset: u32) -> Self {
        Self {
            shape: self.shape,
            targets: self.targets.iter().map(|q| q.offset(qubit_offset)).collect(),
            controls: self.controls.iter().map(|q| q.offset(qubit_offset)).collect(),
            params: self.params.clone(),
            clbits: self.clbits.iter().map(|c| c.offset(clbit_offset)).collect(),
            line: self.line,
        }
    }
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.shape.name == other.shape.name
            && self.targets == other.targets
            && self.controls == other.controls
            && self.params == other.params
            && self.clbits == other.clbits
    }
}
