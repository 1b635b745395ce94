//! Lowering of circuit programs to pulse schedules.

use saxonq_ir::{ProcessorProfile, Program};
use tracing::{debug, info, instrument};

use crate::duration::DurationModel;
use crate::error::{TranspileError, TranspileResult};
use crate::schedule::{PulseEvent, PulseSchedule};

/// Lower `program` to a pulse schedule on `profile`.
///
/// Each instruction starts as soon as every instruction it depends on (the
/// previous instruction on each of its qubits) has finished. Instructions on
/// disjoint qubits may overlap. A barrier has zero duration but still holds
/// all the qubits it names until the slowest of them is free.
///
/// # Errors
///
/// - [`TranspileError::InvalidProfile`] if the profile fails validation.
/// - [`TranspileError::InsufficientQubits`] if the program's register is
///   larger than the processor.
#[instrument(skip_all, fields(processor = %profile.name, instructions = program.len()))]
pub fn transpile(program: &Program, profile: &ProcessorProfile) -> TranspileResult<PulseSchedule> {
    let model = DurationModel::for_profile(profile)?;

    if !profile.fits(program.num_qubits()) {
        return Err(TranspileError::InsufficientQubits {
            processor: profile.name.clone(),
            required: program.num_qubits(),
            available: profile.num_qubits,
        });
    }

    let dag = program.dependency_graph();
    let mut end_ns = vec![0u64; program.len()];
    let mut events = Vec::with_capacity(program.len());

    for (index, instruction) in program.iter().enumerate() {
        let start_ns = dag
            .predecessors(index)
            .into_iter()
            .map(|p| end_ns[p])
            .max()
            .unwrap_or(0);
        let calibration = model.calibrate(instruction);
        end_ns[index] = start_ns + calibration.duration_ns;

        debug!(
            index,
            op = instruction.name(),
            start_ns,
            duration_ns = calibration.duration_ns,
            channel = %calibration.channel,
            "Scheduled pulse"
        );

        events.push(PulseEvent {
            index,
            operation: instruction.name().to_string(),
            qubits: instruction.qubits().collect(),
            start_ns,
            calibration,
        });
    }

    let schedule = PulseSchedule::new(profile.name.clone(), program.num_qubits(), events);
    info!(
        events = schedule.len(),
        total_ns = schedule.total_duration_ns(),
        "Transpiled program to pulse schedule"
    );
    Ok(schedule)
}
