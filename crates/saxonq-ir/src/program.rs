//! Circuit programs and the program builder.

use crate::angle::Angle;
use crate::dag::DependencyGraph;
use crate::error::{ProgramError, ProgramResult};
use crate::instruction::Instruction;
use crate::operation::{self, build_measure};
use crate::qubit::{ClbitId, QubitId, Register};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Default quantum register name.
pub const DEFAULT_QREG: &str = "q";
/// Default classical register name.
pub const DEFAULT_CREG: &str = "c";

/// An immutable, validated circuit program.
///
/// Every qubit index is below the quantum register size and every classical
/// index below the classical register size. Programs are cheap to clone;
/// `compose`, `append` and the editing helpers return new programs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    qreg: Register,
    creg: Register,
    instructions: Arc<[Instruction]>,
}

impl Program {
    /// An empty program over `num_qubits` qubits and `num_clbits` classical bits.
    pub fn new(num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            qreg: Register::new(DEFAULT_QREG, num_qubits),
            creg: Register::new(DEFAULT_CREG, num_clbits),
            instructions: Arc::from(Vec::new()),
        }
    }

    /// Start building a program with default register names.
    pub fn builder(num_qubits: u32, num_clbits: u32) -> ProgramBuilder {
        ProgramBuilder::new(num_qubits, num_clbits)
    }

    /// Assemble a program from instructions, checking every index.
    ///
    /// # Errors
    ///
    /// [`ProgramError::QubitOutOfRange`] or [`ProgramError::ClbitOutOfRange`]
    /// for the first instruction addressing outside its register.
    pub fn from_instructions(
        qreg: Register,
        creg: Register,
        instructions: Vec<Instruction>,
    ) -> ProgramResult<Self> {
        for instruction in &instructions {
            check_bounds(&qreg, &creg, instruction)?;
        }
        Ok(Self {
            qreg,
            creg,
            instructions: Arc::from(instructions),
        })
    }

    /// Quantum register.
    pub fn qreg(&self) -> &Register {
        &self.qreg
    }

    /// Classical register.
    pub fn creg(&self) -> &Register {
        &self.creg
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.qreg.size
    }

    /// Number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.creg.size
    }

    /// Instructions in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over instructions in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Instruction at `index`.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Side-by-side composition.
    ///
    /// `other`'s qubits are placed after this program's qubits and its
    /// classical bits after this program's classical bits, so the two
    /// fragments act on disjoint registers and the result has
    /// `self.n + other.n` qubits and `self.m + other.m` classical bits.
    ///
    /// # Errors
    ///
    /// [`ProgramError::RegisterOverflow`] if either combined register size
    /// exceeds `u32::MAX`.
    pub fn compose(&self, other: &Program) -> ProgramResult<Program> {
        let qubit_offset = self.qreg.size;
        let clbit_offset = self.creg.size;
        let num_qubits = combined_size("quantum", qubit_offset, other.qreg.size)?;
        let num_clbits = combined_size("classical", clbit_offset, other.creg.size)?;
        let instructions: Vec<Instruction> = self
            .iter()
            .cloned()
            .chain(other.iter().map(|ins| ins.shifted(qubit_offset, clbit_offset)))
            .collect();
        Ok(Program {
            qreg: Register::new(self.qreg.name.clone(), num_qubits),
            creg: Register::new(self.creg.name.clone(), num_clbits),
            instructions: Arc::from(instructions),
        })
    }

    /// Sequential composition on shared wires.
    ///
    /// `other`'s instructions follow this program's unchanged, qubit `i` of
    /// both programs being the same wire. Register sizes are the larger of
    /// the two. This is how an oracle fragment is laid onto a caller's
    /// superposition circuit.
    #[must_use]
    pub fn append(&self, other: &Program) -> Program {
        let instructions: Vec<Instruction> = self.iter().chain(other.iter()).cloned().collect();
        Program {
            qreg: Register::new(self.qreg.name.clone(), self.qreg.size.max(other.qreg.size)),
            creg: Register::new(self.creg.name.clone(), self.creg.size.max(other.creg.size)),
            instructions: Arc::from(instructions),
        }
    }

    /// `times` copies of this program on the same wires.
    #[must_use]
    pub fn repeat(&self, times: usize) -> Program {
        let mut instructions = Vec::with_capacity(self.len() * times);
        for _ in 0..times {
            instructions.extend(self.iter().cloned());
        }
        Program {
            qreg: self.qreg.clone(),
            creg: self.creg.clone(),
            instructions: Arc::from(instructions),
        }
    }

    /// The same program without instruction `index`.
    ///
    /// # Errors
    ///
    /// [`ProgramError::InstructionOutOfRange`] if there is no such instruction.
    pub fn without_instruction(&self, index: usize) -> ProgramResult<Program> {
        if index >= self.len() {
            return Err(ProgramError::InstructionOutOfRange {
                index,
                len: self.len(),
            });
        }
        let instructions: Vec<Instruction> = self
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, ins)| ins.clone())
            .collect();
        Ok(Program {
            qreg: self.qreg.clone(),
            creg: self.creg.clone(),
            instructions: Arc::from(instructions),
        })
    }

    /// The same program with source lines stripped from every instruction.
    #[must_use]
    pub fn without_lines(&self) -> Program {
        Program {
            qreg: self.qreg.clone(),
            creg: self.creg.clone(),
            instructions: self.iter().cloned().map(Instruction::without_line).collect(),
        }
    }

    /// Whether any instruction is a measurement.
    pub fn has_measurement(&self) -> bool {
        self.iter().any(Instruction::is_measurement)
    }

    /// Fail unless the program measures something.
    ///
    /// # Errors
    ///
    /// [`ProgramError::NoMeasurement`] when no measurement is present.
    pub fn require_measurement(&self) -> ProgramResult<()> {
        if self.has_measurement() {
            Ok(())
        } else {
            Err(ProgramError::NoMeasurement)
        }
    }

    /// Qubit dependency graph.
    pub fn dependency_graph(&self) -> DependencyGraph {
        DependencyGraph::new(&self.instructions)
    }

    /// Longest chain of dependent instructions.
    pub fn depth(&self) -> usize {
        self.dependency_graph().depth(&self.instructions)
    }

    /// Instruction count per operation name.
    pub fn count_ops(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for instruction in self.iter() {
            *counts.entry(instruction.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of instructions touching exactly two qubits.
    pub fn num_two_qubit_ops(&self) -> usize {
        self.iter().filter(|ins| ins.is_two_qubit()).count()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn check_bounds(qreg: &Register, creg: &Register, instruction: &Instruction) -> ProgramResult<()> {
    if let Some(qubit) = instruction.qubits().find(|q| q.0 >= qreg.size) {
        return Err(ProgramError::QubitOutOfRange {
            qubit,
            size: qreg.size,
            op: Some(instruction.name()),
        });
    }
    if let Some(&clbit) = instruction.clbits().iter().find(|c| c.0 >= creg.size) {
        return Err(ProgramError::ClbitOutOfRange {
            clbit,
            size: creg.size,
            op: Some(instruction.name()),
        });
    }
    Ok(())
}

/// Mutable builder for a [`Program`].
///
/// Every instruction goes through the registry and is checked against the
/// declared registers as it is added.
#[derive(Debug, Clone)]
pub struct ProgramBuilder {
    qreg: Register,
    creg: Register,
    instructions: Vec<Instruction>,
}

impl ProgramBuilder {
    /// Create a builder over default-named registers.
    pub fn new(num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            qreg: Register::new(DEFAULT_QREG, num_qubits),
            creg: Register::new(DEFAULT_CREG, num_clbits),
            instructions: Vec::new(),
        }
    }

    /// Rename the registers.
    #[must_use]
    pub fn with_register_names(mut self, qreg: impl Into<String>, creg: impl Into<String>) -> Self {
        self.qreg.name = qreg.into();
        self.creg.name = creg.into();
        self
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.qreg.size
    }

    /// Number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.creg.size
    }

    /// Number of instructions added so far.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether no instruction was added yet.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Add an already-built instruction.
    ///
    /// # Errors
    ///
    /// [`ProgramError::QubitOutOfRange`] or [`ProgramError::ClbitOutOfRange`].
    pub fn push(&mut self, instruction: Instruction) -> ProgramResult<&mut Self> {
        check_bounds(&self.qreg, &self.creg, &instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Apply any registered operation with symbolic parameters.
    pub fn apply(
        &mut self,
        op_name: &str,
        targets: &[QubitId],
        controls: &[QubitId],
        params: &[&str],
    ) -> ProgramResult<&mut Self> {
        let instruction = operation::build(op_name, targets, controls, params)?;
        self.push(instruction)
    }

    /// Apply any registered operation with resolved angles.
    pub fn apply_angles(
        &mut self,
        op_name: &str,
        targets: &[QubitId],
        controls: &[QubitId],
        params: &[Angle],
    ) -> ProgramResult<&mut Self> {
        let instruction = operation::build_with_angles(op_name, targets, controls, params)?;
        self.push(instruction)
    }

    /// Append every instruction of `program` on the same wires.
    pub fn extend(&mut self, program: &Program) -> ProgramResult<&mut Self> {
        for instruction in program {
            self.push(instruction.clone())?;
        }
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply identity.
    pub fn id(&mut self, qubit: QubitId) -> ProgramResult<&mut Self> {
        self.apply("id", &[qubit], &[], &[])
    }

    /// Apply Pauli-X.
    pub fn x(&mut self, qubit: QubitId) -> ProgramResult<&mut Self> {
        self.apply("x", &[qubit], &[], &[])
    }

    /// Apply Pauli-Y.
    pub fn y(&mut self, qubit: QubitId) -> ProgramResult<&mut Self> {
        self.apply("y", &[qubit], &[], &[])
    }

    /// Apply Pauli-Z.
    pub fn z(&mut self, qubit: QubitId) -> ProgramResult<&mut Self> {
        self.apply("z", &[qubit], &[], &[])
    }

    /// Apply Hadamard.
    pub fn h(&mut self, qubit: QubitId) -> ProgramResult<&mut Self> {
        self.apply("h", &[qubit], &[], &[])
    }

    /// Apply S.
    pub fn s(&mut self, qubit: QubitId) -> ProgramResult<&mut Self> {
        self.apply("s", &[qubit], &[], &[])
    }

    /// Apply T.
    pub fn t(&mut self, qubit: QubitId) -> ProgramResult<&mut Self> {
        self.apply("t", &[qubit], &[], &[])
    }

    /// Apply Rx(θ).
    pub fn rx(&mut self, theta: impl Into<Angle>, qubit: QubitId) -> ProgramResult<&mut Self> {
        self.apply_angles("rx", &[qubit], &[], &[theta.into()])
    }

    /// Apply Ry(θ).
    pub fn ry(&mut self, theta: impl Into<Angle>, qubit: QubitId) -> ProgramResult<&mut Self> {
        self.apply_angles("ry", &[qubit], &[], &[theta.into()])
    }

    /// Apply Rz(θ).
    pub fn rz(&mut self, theta: impl Into<Angle>, qubit: QubitId) -> ProgramResult<&mut Self> {
        self.apply_angles("rz", &[qubit], &[], &[theta.into()])
    }

    /// Apply phase gate P(λ).
    pub fn p(&mut self, lambda: impl Into<Angle>, qubit: QubitId) -> ProgramResult<&mut Self> {
        self.apply_angles("p", &[qubit], &[], &[lambda.into()])
    }

    /// Apply H to every qubit in `qubits`.
    pub fn h_all(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> ProgramResult<&mut Self> {
        for qubit in qubits {
            self.h(qubit)?;
        }
        Ok(self)
    }

    /// Apply X to every qubit in `qubits`.
    pub fn x_all(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> ProgramResult<&mut Self> {
        for qubit in qubits {
            self.x(qubit)?;
        }
        Ok(self)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> ProgramResult<&mut Self> {
        self.apply("cx", &[target], &[control], &[])
    }

    /// Apply controlled-Z.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> ProgramResult<&mut Self> {
        self.apply("cz", &[target], &[control], &[])
    }

    /// Apply controlled phase CP(λ).
    pub fn cp(
        &mut self,
        lambda: impl Into<Angle>,
        control: QubitId,
        target: QubitId,
    ) -> ProgramResult<&mut Self> {
        self.apply_angles("cp", &[target], &[control], &[lambda.into()])
    }

    /// Apply SWAP.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> ProgramResult<&mut Self> {
        self.apply("swap", &[q1, q2], &[], &[])
    }

    /// Apply Toffoli.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> ProgramResult<&mut Self> {
        self.apply("ccx", &[target], &[c1, c2], &[])
    }

    /// Apply X controlled on every qubit in `controls`.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> ProgramResult<&mut Self> {
        self.apply("mcx", &[target], controls, &[])
    }

    /// Apply P(λ) controlled on every qubit in `controls`.
    pub fn mcp(
        &mut self,
        lambda: impl Into<Angle>,
        controls: &[QubitId],
        target: QubitId,
    ) -> ProgramResult<&mut Self> {
        self.apply_angles("mcp", &[target], controls, &[lambda.into()])
    }

    /// Flip the phase of the all-ones state of `qubits`.
    ///
    /// Emits `z`, `cz` or `mcp(π)` depending on how many qubits take part.
    pub fn multi_controlled_z(&mut self, qubits: &[QubitId]) -> ProgramResult<&mut Self> {
        match qubits {
            [] => Ok(self),
            [q] => self.z(*q),
            [c, t] => self.cz(*c, *t),
            [controls @ .., target] => self.mcp(Angle::PI, controls, *target),
        }
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> ProgramResult<&mut Self> {
        self.push(build_measure(qubit, clbit))
    }

    /// Measure qubit `i` into classical bit `i` for every qubit that has one.
    pub fn measure_all(&mut self) -> ProgramResult<&mut Self> {
        for i in 0..self.qreg.size.min(self.creg.size) {
            self.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> ProgramResult<&mut Self> {
        self.apply("reset", &[qubit], &[], &[])
    }

    /// Apply a barrier to the given qubits.
    pub fn barrier(&mut self, qubits: &[QubitId]) -> ProgramResult<&mut Self> {
        self.apply("barrier", qubits, &[], &[])
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> ProgramResult<&mut Self> {
        let qubits: Vec<_> = (0..self.qreg.size).map(QubitId).collect();
        self.barrier(&qubits)
    }

    /// Finish building.
    pub fn finish(self) -> Program {
        Program {
            qreg: self.qreg,
            creg: self.creg,
            instructions: Arc::from(self.instructions),
        }
    }
}

fn combined_size(register: &'static str, left: u32, right: u32) -> ProgramResult<u32> {
    left.checked_add(right).ok_or(ProgramError::RegisterOverflow {
        register,
        left,
        right,
    })
}
