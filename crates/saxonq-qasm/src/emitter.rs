//! `OpenQASM` 2.0 emitter.
//!
//! The printed form is canonical: parsing it yields back an equal program.

use saxonq_ir::{Instruction, Program};
use std::fmt::Write;

/// Emit a program as `OpenQASM` 2.0 text.
pub fn emit(program: &Program) -> String {
    let mut emitter = Emitter::new(program);
    emitter.emit_program();
    emitter.output
}

/// Emit only the instruction lines of a program, one per instruction.
pub fn emit_instructions(program: &Program) -> Vec<String> {
    let emitter = Emitter::new(program);
    program.iter().map(|ins| emitter.format_instruction(ins)).collect()
}

struct Emitter<'a> {
    program: &'a Program,
    output: String,
}

impl<'a> Emitter<'a> {
    fn new(program: &'a Program) -> Self {
        Self {
            program,
            output: String::new(),
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn emit_program(&mut self) {
        self.writeln("OPENQASM 2.0;");
        self.writeln("include \"qelib1.inc\";");
        let qreg = self.program.qreg();
        let creg = self.program.creg();
        self.writeln(&format!("qreg {qreg};"));
        self.writeln(&format!("creg {creg};"));
        for instruction in self.program {
            let line = self.format_instruction(instruction);
            self.writeln(&line);
        }
    }

    fn format_instruction(&self, instruction: &Instruction) -> String {
        let qreg = self.program.qreg();
        let mut out = String::from(instruction.name());

        if instruction.is_measurement() {
            let creg = self.program.creg();
            let qubit = instruction.targets().first().map_or(0, |q| q.0);
            let clbit = instruction.clbits().first().map_or(0, |c| c.0);
            let _ = write!(out, " {} -> {};", qreg.element(qubit), creg.element(clbit));
            return out;
        }

        if !instruction.params().is_empty() {
            let params: Vec<String> = instruction.params().iter().map(ToString::to_string).collect();
            let _ = write!(out, "({})", params.join(","));
        }

        let operands: Vec<String> = instruction.qubits().map(|q| qreg.element(q.0)).collect();
        let _ = write!(out, " {};", operands.join(", "));
        out
    }
}
