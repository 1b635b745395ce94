//! Statement-to-program lowering.
//!
//! Enforces the header discipline (version first, both registers declared
//! exactly once before the first instruction) and turns gate statements into
//! registry-validated instructions.

use saxonq_ir::{
    Arity, ClbitId, Instruction, Program, QubitId, Register, build, build_measure, lookup,
};
use tracing::trace;

use crate::ast::{Operand, Statement};
use crate::error::{ParseError, ParseResult};

/// Accumulates header state and instructions across lines.
pub(super) struct Lowerer {
    statements_seen: usize,
    qreg: Option<Register>,
    creg: Option<Register>,
    instructions: Vec<Instruction>,
}

impl Lowerer {
    pub(super) fn new() -> Self {
        Self {
            statements_seen: 0,
            qreg: None,
            creg: None,
            instructions: Vec::new(),
        }
    }

    pub(super) fn lower(&mut self, statement: Statement, line: usize) -> ParseResult<()> {
        let first = self.statements_seen == 0;
        self.statements_seen += 1;

        match statement {
            Statement::Version(version) => {
                if !first {
                    return Err(header(line, "OPENQASM must be the first statement"));
                }
                if version != "2.0" {
                    return Err(header(line, format!("unsupported OPENQASM version {version}")));
                }
                Ok(())
            }
            Statement::Include(_) => {
                if !self.instructions.is_empty() {
                    return Err(header(line, "include after the first instruction"));
                }
                Ok(())
            }
            Statement::QregDecl { name, size } => {
                self.check_declarable(line, "qreg", self.qreg.is_some())?;
                self.qreg = Some(Register::new(name, size));
                Ok(())
            }
            Statement::CregDecl { name, size } => {
                self.check_declarable(line, "creg", self.creg.is_some())?;
                self.creg = Some(Register::new(name, size));
                Ok(())
            }
            Statement::Measure { qubit, clbit } => {
                let (qreg, creg) = self.registers(line)?;
                let qubits = resolve_qubits(&qreg, &qubit, line)?;
                let clbits = resolve_clbits(&creg, &clbit, line)?;
                if qubits.len() != clbits.len() {
                    return Err(ParseError::Syntax {
                        line,
                        message: format!(
                            "measure maps {} qubit(s) onto {} classical bit(s)",
                            qubits.len(),
                            clbits.len()
                        ),
                    });
                }
                for (q, c) in qubits.into_iter().zip(clbits) {
                    self.push(build_measure(q, c), line);
                }
                Ok(())
            }
            Statement::Gate {
                name,
                params,
                operands,
            } => {
                let (qreg, _) = self.registers(line)?;
                self.lower_gate(&qreg, &name, &params, &operands, line)
            }
        }
    }

    fn check_declarable(&self, line: usize, keyword: &str, declared: bool) -> ParseResult<()> {
        if !self.instructions.is_empty() {
            return Err(header(line, format!("{keyword} declared after the first instruction")));
        }
        if declared {
            return Err(header(line, format!("{keyword} declared more than once")));
        }
        Ok(())
    }

    fn registers(&self, line: usize) -> ParseResult<(Register, Register)> {
        match (&self.qreg, &self.creg) {
            (Some(q), Some(c)) => Ok((q.clone(), c.clone())),
            (None, _) => Err(header(line, "missing qreg declaration before first instruction")),
            (_, None) => Err(header(line, "missing creg declaration before first instruction")),
        }
    }

    fn lower_gate(
        &mut self,
        qreg: &Register,
        name: &str,
        params: &[String],
        operands: &[Operand],
        line: usize,
    ) -> ParseResult<()> {
        let params: Vec<&str> = params.iter().map(String::as_str).collect();
        let shape = lookup(name);

        let whole_register = operands.iter().any(|op| op.index.is_none());
        if whole_register {
            let broadcastable = shape.is_some_and(|s| {
                s.controls == Arity::Exactly(0)
                    && (s.targets == Arity::Exactly(1) || s.targets.is_variadic())
            });
            if !broadcastable || (operands.len() > 1 && !shape.is_some_and(|s| s.targets.is_variadic())) {
                return Err(ParseError::Syntax {
                    line,
                    message: format!("whole-register operand not supported for '{name}'"),
                });
            }
        }

        let mut qubits = Vec::new();
        for operand in operands {
            qubits.extend(resolve_qubits(qreg, operand, line)?);
        }

        if whole_register && shape.is_some_and(|s| s.targets == Arity::Exactly(1)) {
            // `h q;` applies the gate to every qubit of the register.
            for qubit in qubits {
                let instruction = build(name, &[qubit], &[], &params)
                    .map_err(|cause| ParseError::InvalidInstruction { line, cause })?;
                self.push(instruction, line);
            }
            return Ok(());
        }

        // Operands are written controls first; the registry shape says how
        // many trailing operands are targets.
        let num_targets = match shape.map(|s| s.targets) {
            Some(Arity::Exactly(n)) => n.min(qubits.len()),
            _ => qubits.len(),
        };
        let (controls, targets) = qubits.split_at(qubits.len() - num_targets);
        let instruction = build(name, targets, controls, &params)
            .map_err(|cause| ParseError::InvalidInstruction { line, cause })?;
        self.push(instruction, line);
        Ok(())
    }

    fn push(&mut self, instruction: Instruction, line: usize) {
        trace!(line, op = instruction.name(), "lowered instruction");
        self.instructions.push(instruction.with_line(line));
    }

    pub(super) fn finish(self, last_line: usize) -> ParseResult<Program> {
        let Some(qreg) = self.qreg else {
            return Err(header(last_line, "missing qreg declaration"));
        };
        let Some(creg) = self.creg else {
            return Err(header(last_line, "missing creg declaration"));
        };
        Ok(Program::from_instructions(qreg, creg, self.instructions)?)
    }
}

fn header(line: usize, reason: impl Into<String>) -> ParseError {
    ParseError::MalformedHeader {
        line,
        reason: reason.into(),
    }
}

fn check_register(register: &Register, operand: &Operand, line: usize, kind: &str) -> ParseResult<()> {
    if operand.register == register.name {
        Ok(())
    } else {
        Err(ParseError::Syntax {
            line,
            message: format!("unknown {kind} register '{}'", operand.register),
        })
    }
}

fn resolve_qubits(qreg: &Register, operand: &Operand, line: usize) -> ParseResult<Vec<QubitId>> {
    check_register(qreg, operand, line, "quantum")?;
    resolve(qreg, operand, line).map(|indices| indices.into_iter().map(QubitId).collect())
}

fn resolve_clbits(creg: &Register, operand: &Operand, line: usize) -> ParseResult<Vec<ClbitId>> {
    check_register(creg, operand, line, "classical")?;
    resolve(creg, operand, line).map(|indices| indices.into_iter().map(ClbitId).collect())
}

fn resolve(register: &Register, operand: &Operand, line: usize) -> ParseResult<Vec<u32>> {
    match operand.index {
        Some(index) if index >= register.size => Err(ParseError::IndexOutOfRange {
            line,
            register: register.name.clone(),
            index,
            size: register.size,
        }),
        Some(index) => Ok(vec![index]),
        None => Ok((0..register.size).collect()),
    }
}
