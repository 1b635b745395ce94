//! Pulse duration model derived from a processor profile.
//!
//! All times are whole nanoseconds. Fidelities stretch the nominal pulse:
//! a gate calibrated at fidelity `F` takes `unit / F`, so a worse gate is
//! always a slower one. The single-qubit unit is bounded by the shorter
//! coherence time, the two-qubit unit by T2.

use saxonq_ir::{Instruction, OperationKind, ProcessorProfile};
use serde::{Deserialize, Serialize};

use crate::error::TranspileResult;

/// Fraction of a coherence time spent on one nominal pulse.
pub const PULSES_PER_COHERENCE_TIME: f64 = 10_000.0;

/// A readout takes this many single-qubit units.
pub const READOUT_UNITS: f64 = 10.0;

const NANOS_PER_SECOND: f64 = 1e9;

/// Hardware line a pulse is played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseChannel {
    /// Single-qubit microwave drive.
    Drive,
    /// Two-qubit coupler.
    Coupler,
    /// Readout resonator, also used for active reset.
    Readout,
    /// No physical pulse; scheduling only.
    Virtual,
}

impl std::fmt::Display for PulseChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PulseChannel::Drive => "drive",
            PulseChannel::Coupler => "coupler",
            PulseChannel::Readout => "readout",
            PulseChannel::Virtual => "virtual",
        };
        f.write_str(name)
    }
}

/// Calibration data used to derive one pulse event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseCalibration {
    /// Channel the pulse is played on.
    pub channel: PulseChannel,
    /// Duration in nanoseconds.
    pub duration_ns: u64,
    /// Fidelity of one native pulse of this family.
    pub fidelity: f64,
    /// Coherence time (seconds) that bounds the pulse.
    pub coherence_s: f64,
    /// Number of native two-qubit pulses the operation decomposes into.
    pub two_qubit_equivalents: u32,
}

impl PulseCalibration {
    /// Fidelity of the whole operation: one pulse, or one per two-qubit
    /// equivalent.
    pub fn operation_fidelity(&self) -> f64 {
        match self.two_qubit_equivalents {
            0 => self.fidelity,
            n => self.fidelity.powi(i32::try_from(n).unwrap_or(i32::MAX)),
        }
    }
}

/// Per-family pulse durations for one processor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationModel {
    identity_ns: u64,
    bit_flip_ns: u64,
    phase_ns: u64,
    two_qubit_ns: u64,
    readout_ns: u64,
    identity_fidelity: f64,
    bit_flip_fidelity: f64,
    phase_fidelity: f64,
    two_qubit_fidelity: f64,
    coherence_limit_s: f64,
    t2_s: f64,
}

impl DurationModel {
    /// Derive the model for `profile`.
    ///
    /// # Errors
    ///
    /// [`TranspileError::InvalidProfile`](crate::TranspileError::InvalidProfile)
    /// when the profile has non-positive times or fidelities outside `(0, 1]`.
    pub fn for_profile(profile: &ProcessorProfile) -> TranspileResult<Self> {
        profile.validate()?;

        let single_unit = profile.coherence_limit() * NANOS_PER_SECOND / PULSES_PER_COHERENCE_TIME;
        let two_unit = profile.t2 * NANOS_PER_SECOND / PULSES_PER_COHERENCE_TIME;

        let identity = single_unit / profile.identity_fidelity;
        let bit_flip = single_unit / profile.bit_flip_fidelity;
        let phase = single_unit / profile.phase_fidelity;
        let slowest_single = identity.max(bit_flip).max(phase);
        let two_qubit = slowest_single + two_unit / profile.two_qubit_fidelity;

        Ok(Self {
            identity_ns: whole_ns(identity),
            bit_flip_ns: whole_ns(bit_flip),
            phase_ns: whole_ns(phase),
            two_qubit_ns: whole_ns(two_qubit),
            readout_ns: whole_ns(READOUT_UNITS * single_unit / profile.identity_fidelity),
            identity_fidelity: profile.identity_fidelity,
            bit_flip_fidelity: profile.bit_flip_fidelity,
            phase_fidelity: profile.phase_fidelity,
            two_qubit_fidelity: profile.two_qubit_fidelity,
            coherence_limit_s: profile.coherence_limit(),
            t2_s: profile.t2,
        })
    }

    /// Duration of one identity pulse.
    pub fn identity_ns(&self) -> u64 {
        self.identity_ns
    }

    /// Duration of one bit-flip family pulse.
    pub fn bit_flip_ns(&self) -> u64 {
        self.bit_flip_ns
    }

    /// Duration of one phase family pulse.
    pub fn phase_ns(&self) -> u64 {
        self.phase_ns
    }

    /// Duration of one native two-qubit pulse.
    pub fn two_qubit_ns(&self) -> u64 {
        self.two_qubit_ns
    }

    /// Duration of a measurement or reset.
    pub fn readout_ns(&self) -> u64 {
        self.readout_ns
    }

    /// Calibration for `instruction`. Depends only on its operation and
    /// control count.
    pub fn calibrate(&self, instruction: &Instruction) -> PulseCalibration {
        let single = |duration_ns, fidelity| PulseCalibration {
            channel: PulseChannel::Drive,
            duration_ns,
            fidelity,
            coherence_s: self.coherence_limit_s,
            two_qubit_equivalents: 0,
        };

        match instruction.kind() {
            OperationKind::Identity => single(self.identity_ns, self.identity_fidelity),
            OperationKind::BitFlip => single(self.bit_flip_ns, self.bit_flip_fidelity),
            OperationKind::Phase => single(self.phase_ns, self.phase_fidelity),
            OperationKind::Controlled | OperationKind::Swap => {
                let equivalents = two_qubit_equivalents(instruction);
                PulseCalibration {
                    channel: PulseChannel::Coupler,
                    duration_ns: self.two_qubit_ns.saturating_mul(u64::from(equivalents)),
                    fidelity: self.two_qubit_fidelity,
                    coherence_s: self.t2_s,
                    two_qubit_equivalents: equivalents,
                }
            }
            OperationKind::Measurement | OperationKind::Reset => PulseCalibration {
                channel: PulseChannel::Readout,
                duration_ns: self.readout_ns,
                fidelity: self.identity_fidelity,
                coherence_s: self.coherence_limit_s,
                two_qubit_equivalents: 0,
            },
            OperationKind::Barrier => PulseCalibration {
                channel: PulseChannel::Virtual,
                duration_ns: 0,
                fidelity: 1.0,
                coherence_s: self.coherence_limit_s,
                two_qubit_equivalents: 0,
            },
        }
    }
}

/// Native two-qubit pulses needed for a multi-qubit operation.
///
/// One control: 1. Swap: 3. Controlled swap: 8. `k >= 2` controls on a
/// single target: `6 * (k - 1)`, the cost of a Toffoli ladder.
pub fn two_qubit_equivalents(instruction: &Instruction) -> u32 {
    let controls = u32::try_from(instruction.controls().len()).unwrap_or(u32::MAX);
    match (instruction.kind(), controls, instruction.targets().len()) {
        (OperationKind::Swap, _, _) => 3,
        (OperationKind::Controlled, _, 2) => 8,
        (OperationKind::Controlled, 0 | 1, _) => 1,
        (OperationKind::Controlled, k, _) => 6u32.saturating_mul(k - 1),
        _ => 0,
    }
}

// Round up, ignoring float noise in the last few ulps.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_ns(value: f64) -> u64 {
    let adjusted = value - value.abs() * 1e-12;
    adjusted.ceil().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use saxonq_ir::{ProcessorCatalog, QubitId, build};

    fn profile() -> ProcessorProfile {
        ProcessorProfile {
            name: "Unit".into(),
            num_qubits: 4,
            quantum_volume: 8,
            clops: 1000,
            t1: 2.0,
            t2: 1.0,
            t2_star: 0.5,
            identity_fidelity: 1.0,
            bit_flip_fidelity: 0.5,
            phase_fidelity: 0.8,
            two_qubit_fidelity: 0.25,
        }
    }

    #[test]
    fn test_unit_durations() {
        let model = DurationModel::for_profile(&profile()).unwrap();
        // u1 = min(2, 1) s / 10^4 = 100 µs, u2 = 1 s / 10^4 = 100 µs.
        assert_eq!(model.identity_ns(), 100_000);
        assert_eq!(model.bit_flip_ns(), 200_000);
        assert_eq!(model.phase_ns(), 125_000);
        assert_eq!(model.two_qubit_ns(), 200_000 + 400_000);
        assert_eq!(model.readout_ns(), 1_000_000);
    }

    #[test]
    fn test_two_qubit_never_faster_than_single() {
        for profile in ProcessorCatalog::builtin().iter() {
            let model = DurationModel::for_profile(profile).unwrap();
            let slowest = model.identity_ns().max(model.bit_flip_ns()).max(model.phase_ns());
            assert!(model.two_qubit_ns() > slowest, "{}", profile.name);
        }
    }

    #[test]
    fn test_equivalents() {
        let q = |i| QubitId(i);
        let cx = build("cx", &[q(1)], &[q(0)], &[]).unwrap();
        let swap = build("swap", &[q(0), q(1)], &[], &[]).unwrap();
        let ccx = build("ccx", &[q(2)], &[q(0), q(1)], &[]).unwrap();
        let mcx = build("mcx", &[q(3)], &[q(0), q(1), q(2)], &[]).unwrap();
        let cswap = build("cswap", &[q(1), q(2)], &[q(0)], &[]).unwrap();
        let h = build("h", &[q(0)], &[], &[]).unwrap();
        assert_eq!(two_qubit_equivalents(&cx), 1);
        assert_eq!(two_qubit_equivalents(&swap), 3);
        assert_eq!(two_qubit_equivalents(&ccx), 6);
        assert_eq!(two_qubit_equivalents(&mcx), 12);
        assert_eq!(two_qubit_equivalents(&cswap), 8);
        assert_eq!(two_qubit_equivalents(&h), 0);
    }

    #[test]
    fn test_calibration_channels() {
        let model = DurationModel::for_profile(&profile()).unwrap();
        let q = QubitId(0);
        let rz = build("rz", &[q], &[], &["pi/4"]).unwrap();
        let barrier = build("barrier", &[q, QubitId(1)], &[], &[]).unwrap();
        let reset = build("reset", &[q], &[], &[]).unwrap();
        let ccx = build("ccx", &[QubitId(2)], &[q, QubitId(1)], &[]).unwrap();

        let cal = model.calibrate(&rz);
        assert_eq!(cal.channel, PulseChannel::Drive);
        assert_eq!(cal.duration_ns, 125_000);
        assert!((cal.fidelity - 0.8).abs() < 1e-12);

        let cal = model.calibrate(&barrier);
        assert_eq!(cal.channel, PulseChannel::Virtual);
        assert_eq!(cal.duration_ns, 0);

        assert_eq!(model.calibrate(&reset).channel, PulseChannel::Readout);

        let cal = model.calibrate(&ccx);
        assert_eq!(cal.duration_ns, 6 * 600_000);
        assert!((cal.operation_fidelity() - 0.25f64.powi(6)).abs() < 1e-15);
        assert!((cal.coherence_s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let mut bad = profile();
        bad.two_qubit_fidelity = 0.0;
        assert!(DurationModel::for_profile(&bad).is_err());
    }

    #[test]
    fn test_whole_ns_rounds_up() {
        assert_eq!(whole_ns(10.2), 11);
        assert_eq!(whole_ns(312_500.000_000_000_06), 312_500);
        assert_eq!(whole_ns(0.0), 0);
    }
}
