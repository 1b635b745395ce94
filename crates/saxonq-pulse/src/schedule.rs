//! Timed pulse schedules.

use saxonq_ir::QubitId;
use serde::{Deserialize, Serialize};

use crate::duration::{PulseCalibration, PulseChannel};
use crate::error::TranspileResult;

/// One timed pulse, derived from one program instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseEvent {
    /// Index of the originating instruction in the program.
    pub index: usize,
    /// Operation name.
    pub operation: String,
    /// Qubits the pulse occupies, controls first.
    pub qubits: Vec<QubitId>,
    /// Start time in nanoseconds from the beginning of the schedule.
    pub start_ns: u64,
    /// Calibration the duration was derived from.
    pub calibration: PulseCalibration,
}

impl PulseEvent {
    /// Duration in nanoseconds.
    pub fn duration_ns(&self) -> u64 {
        self.calibration.duration_ns
    }

    /// Time at which the pulse finishes.
    pub fn end_ns(&self) -> u64 {
        self.start_ns + self.calibration.duration_ns
    }

    /// Channel the pulse is played on.
    pub fn channel(&self) -> PulseChannel {
        self.calibration.channel
    }

    /// Whether the pulse occupies `qubit`.
    pub fn touches(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }
}

/// Pulse events of one program on one processor, sorted by start time and
/// then by instruction index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseSchedule {
    processor: String,
    num_qubits: u32,
    events: Vec<PulseEvent>,
}

impl PulseSchedule {
    /// Create a schedule, sorting `events` into the canonical order.
    pub fn new(processor: impl Into<String>, num_qubits: u32, mut events: Vec<PulseEvent>) -> Self {
        events.sort_by_key(|e| (e.start_ns, e.index));
        Self {
            processor: processor.into(),
            num_qubits,
            events,
        }
    }

    /// Name of the processor the schedule was built for.
    pub fn processor(&self) -> &str {
        &self.processor
    }

    /// Program register size.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// All events in schedule order.
    pub fn events(&self) -> &[PulseEvent] {
        &self.events
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the schedule has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events that occupy `qubit`, in schedule order.
    pub fn events_on(&self, qubit: QubitId) -> impl Iterator<Item = &PulseEvent> {
        self.events.iter().filter(move |e| e.touches(qubit))
    }

    /// End time of the last event.
    pub fn total_duration_ns(&self) -> u64 {
        self.events.iter().map(PulseEvent::end_ns).max().unwrap_or(0)
    }

    /// Sum of the durations of the events on `qubit`.
    pub fn qubit_busy_ns(&self, qubit: QubitId) -> u64 {
        self.events_on(qubit).map(PulseEvent::duration_ns).sum()
    }

    /// End time of the last event on `qubit`.
    pub fn qubit_end_ns(&self, qubit: QubitId) -> u64 {
        self.events_on(qubit).map(PulseEvent::end_ns).max().unwrap_or(0)
    }

    /// Product of per-operation fidelities over all physical pulses.
    pub fn estimated_fidelity(&self) -> f64 {
        self.events
            .iter()
            .map(|e| e.calibration.operation_fidelity())
            .product()
    }

    /// One text line per event, for job listings.
    pub fn render(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|e| {
                let qubits: Vec<String> = e.qubits.iter().map(ToString::to_string).collect();
                format!(
                    "t={:>12} ns  +{:>10} ns  {:<7}  {:<7} {}  (instruction {})",
                    e.start_ns,
                    e.duration_ns(),
                    e.channel().to_string(),
                    e.operation,
                    qubits.join(","),
                    e.index
                )
            })
            .collect()
    }

    /// Pretty-printed JSON form.
    ///
    /// # Errors
    ///
    /// Fails only if serialization itself fails.
    pub fn to_json(&self) -> TranspileResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(index: usize, start_ns: u64, duration_ns: u64, qubits: &[u32]) -> PulseEvent {
        PulseEvent {
            index,
            operation: "x".into(),
            qubits: qubits.iter().copied().map(QubitId).collect(),
            start_ns,
            calibration: PulseCalibration {
                channel: PulseChannel::Drive,
                duration_ns,
                fidelity: 0.5,
                coherence_s: 1.0,
                two_qubit_equivalents: 0,
            },
        }
    }

    #[test]
    fn test_events_sorted_by_start_then_index() {
        let schedule = PulseSchedule::new(
            "Unit",
            2,
            vec![event(2, 10, 5, &[0]), event(1, 0, 10, &[1]), event(0, 0, 10, &[0])],
        );
        let order: Vec<usize> = schedule.events().iter().map(|e| e.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_totals() {
        let schedule = PulseSchedule::new(
            "Unit",
            2,
            vec![event(0, 0, 10, &[0]), event(1, 0, 4, &[1]), event(2, 10, 5, &[0, 1])],
        );
        assert_eq!(schedule.total_duration_ns(), 15);
        assert_eq!(schedule.qubit_busy_ns(QubitId(0)), 15);
        assert_eq!(schedule.qubit_busy_ns(QubitId(1)), 9);
        assert_eq!(schedule.qubit_end_ns(QubitId(1)), 15);
        assert!((schedule.estimated_fidelity() - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_render_and_json() {
        let schedule = PulseSchedule::new("Unit", 1, vec![event(0, 0, 7, &[0])]);
        let lines = schedule.render();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("drive"));
        assert!(lines[0].contains("(instruction 0)"));

        let json = schedule.to_json().unwrap();
        let back: PulseSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule);
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = PulseSchedule::new("Unit", 3, Vec::new());
        assert!(schedule.is_empty());
        assert_eq!(schedule.total_duration_ns(), 0);
        assert!((schedule.estimated_fidelity() - 1.0).abs() < f64::EPSILON);
    }
}
