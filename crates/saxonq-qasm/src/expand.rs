//! Verbose expansion: a plain-language account of what a program does.
//!
//! Each instruction yields one summary line, followed by one indented line
//! per angle parameter. Expansion never fails; programs are already valid.

use saxonq_ir::{Angle, Instruction, OperationKind, Program, QubitId, Register};

/// Explain every instruction of `program`, in execution order.
pub fn expand(program: &Program) -> Vec<String> {
    let mut lines = Vec::with_capacity(program.len());
    for (index, instruction) in program.iter().enumerate() {
        explain(program, index, instruction, &mut lines);
    }
    lines
}

/// Like [`expand`], preceded by one line per register allocation.
pub fn expand_with_header(program: &Program) -> Vec<String> {
    let qreg = program.qreg();
    let creg = program.creg();
    let mut lines = vec![
        format!(
            "Allocate quantum register '{}' of {} {}, all starting in |0⟩",
            qreg.name,
            qreg.size,
            plural(qreg.size as usize, "qubit", "qubits")
        ),
        format!(
            "Allocate classical register '{}' of {} {}",
            creg.name,
            creg.size,
            plural(creg.size as usize, "bit", "bits")
        ),
    ];
    lines.extend(expand(program));
    lines
}

fn explain(program: &Program, index: usize, instruction: &Instruction, lines: &mut Vec<String>) {
    let qreg = program.qreg();
    let shape = instruction.shape();
    let prefix = match instruction.line() {
        Some(line) => format!("Line {line}"),
        None => format!("Step {}", index + 1),
    };

    let summary = match instruction.kind() {
        OperationKind::Measurement => {
            let creg = program.creg();
            let qubit = instruction.targets().first().map_or(0, |q| q.0);
            let clbit = instruction.clbits().first().map_or(0, |c| c.0);
            format!(
                "{prefix}: measure qubit {} and store the outcome in classical bit {}",
                qreg.element(qubit),
                creg.element(clbit)
            )
        }
        OperationKind::Barrier => format!(
            "{prefix}: barrier across {} {}; no operation, later instructions wait for all of them",
            plural(instruction.targets().len(), "qubit", "qubits"),
            list(qreg, instruction.targets())
        ),
        OperationKind::Reset => format!(
            "{prefix}: reset qubit {} to |0⟩",
            list(qreg, instruction.targets())
        ),
        OperationKind::Swap => format!(
            "{prefix}: apply {} ({}) exchanging the states of qubits {}",
            shape.label,
            shape.name,
            list(qreg, instruction.targets())
        ),
        _ if instruction.controls().is_empty() => format!(
            "{prefix}: apply {} ({}) on {} {}",
            shape.label,
            shape.name,
            plural(instruction.targets().len(), "qubit", "qubits"),
            list(qreg, instruction.targets())
        ),
        _ => format!(
            "{prefix}: apply {} ({}) on target {} {} controlled by {} {}",
            shape.label,
            shape.name,
            plural(instruction.targets().len(), "qubit", "qubits"),
            list(qreg, instruction.targets()),
            plural(instruction.controls().len(), "qubit", "qubits"),
            list(qreg, instruction.controls())
        ),
    };
    lines.push(summary);

    let names = parameter_names(shape.name);
    for (i, angle) in instruction.params().iter().enumerate() {
        let name = names.get(i).copied().unwrap_or("angle");
        lines.push(format!("    {name} = {}", describe_angle(angle)));
    }
}

fn parameter_names(op: &str) -> &'static [&'static str] {
    match op {
        "u" => &["θ", "φ", "λ"],
        "p" | "cp" | "mcp" => &["λ"],
        _ => &["θ"],
    }
}

fn describe_angle(angle: &Angle) -> String {
    match angle {
        Angle::PiMultiple(_) => format!("{} = {:.6} rad", angle.symbolic(), angle.as_f64()),
        Angle::Radians(v) => format!("{v} rad"),
    }
}

fn list(register: &Register, qubits: &[QubitId]) -> String {
    let names: Vec<String> = qubits.iter().map(|q| register.element(q.0)).collect();
    match names.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}
