//! Textbook algorithm experiments: the oracle composed between a
//! preparation layer and a readout layer.

use rand::Rng;
use rand::seq::SliceRandom;
use saxonq_ir::{Angle, ClbitId, Program, ProgramBuilder, QubitId};
use tracing::debug;

use super::{Experiment, ExperimentCategory, require_qubits};
use crate::bernstein_vazirani::bernstein_vazirani;
use crate::bits::BitString;
use crate::deutsch_jozsa::{OracleType, describe, deutsch_jozsa};
use crate::error::{OracleError, OracleResult};
use crate::qft::qft;
use crate::shor::shor_period_finding;
use crate::simon::simon;

/// Moduli offered by [`shor_experiment`], with the bases tried for each.
pub const SHOR_INSTANCES: &[(u64, &[u64])] = &[(15, &[2, 7, 8, 11, 13]), (21, &[2]), (35, &[4])];

/// Largest register for [`qft_period_experiment`].
pub const MAX_QFT_PERIOD_QUBITS: u32 = 32;

/// `k` random secret bits for Bernstein-Vazirani or Simon.
pub fn random_secret<R: Rng + ?Sized>(k: usize, rng: &mut R) -> BitString {
    BitString::random(k, rng)
}

/// A uniformly random `k`-bit basis state for Grover search.
pub fn random_marked_state<R: Rng + ?Sized>(k: usize, rng: &mut R) -> BitString {
    let k = k.min(63);
    BitString::from_value(rng.gen_range(0..1u64 << k), k)
}

/// Deutsch-Jozsa over `n` qubits with a random oracle class and value.
///
/// The ancilla `n - 1` is prepared in `|−⟩`; after the oracle the input
/// register is measured, reading all zeros exactly for a constant oracle.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`] for `n < 2`.
pub fn deutsch_jozsa_experiment<R: Rng + ?Sized>(n: u32, rng: &mut R) -> OracleResult<Experiment> {
    require_qubits("Deutsch-Jozsa", 2, n)?;
    let oracle_type = if rng.gen_bool(0.5) {
        OracleType::Balanced
    } else {
        OracleType::Constant
    };
    let value = rng.gen_bool(0.5);
    let inputs: Vec<QubitId> = (0..n - 1).map(QubitId).collect();

    let mut b = Program::builder(n, n - 1);
    b.x(QubitId(n - 1))?
        .h_all((0..n).map(QubitId))?
        .extend(&deutsch_jozsa(n, oracle_type, value)?)?
        .h_all(inputs.iter().copied())?;
    measure_each(&mut b, &inputs)?;

    let oracle = describe(oracle_type, value);
    debug!(n, %oracle, "Built Deutsch-Jozsa experiment");
    let summary = format!("Your oracle is {oracle}");
    Ok(Experiment::new(ExperimentCategory::DeutschJozsa, b.finish(), summary).with_param("oracle", oracle))
}

/// Bernstein-Vazirani with a random `k`-bit secret.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`] for `k == 0`.
pub fn bernstein_vazirani_experiment<R: Rng + ?Sized>(k: u32, rng: &mut R) -> OracleResult<Experiment> {
    require_qubits("Bernstein-Vazirani", 1, k)?;
    let secret = random_secret(k as usize, rng);
    let all: Vec<QubitId> = (0..=k).map(QubitId).collect();
    let inputs = &all[..k as usize];

    let mut b = Program::builder(k + 1, k);
    b.x(QubitId(k))?
        .h_all(all.iter().copied())?
        .extend(&bernstein_vazirani(&secret)?)?
        .h_all(all.iter().copied())?;
    measure_each(&mut b, inputs)?;

    let code = secret.measurement_order();
    let summary = format!("Your code was {code}");
    Ok(Experiment::new(ExperimentCategory::BernsteinVazirani, b.finish(), summary)
        .with_param("BV_code", code))
}

/// Simon with a random `k`-bit secret over `2k` qubits.
///
/// Each run measures some `y` with `y · secret = 0 (mod 2)`.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`] for `k == 0`.
pub fn simon_experiment<R: Rng + ?Sized>(k: u32, rng: &mut R) -> OracleResult<Experiment> {
    require_qubits("Simon", 1, k)?;
    let secret = random_secret(k as usize, rng);
    let inputs: Vec<QubitId> = (0..k).map(QubitId).collect();

    let mut b = Program::builder(2 * k, k);
    b.h_all(inputs.iter().copied())?
        .extend(&simon(&secret)?)?
        .h_all(inputs.iter().copied())?;
    measure_each(&mut b, &inputs)?;

    let code = secret.measurement_order();
    let summary = format!("Your code was {code}");
    Ok(Experiment::new(ExperimentCategory::Simon, b.finish(), summary).with_param("Simon_code", code))
}

/// Prepare the Fourier state of a random period `k ∈ 1..=n` and transform
/// it back with [`qft()`].
///
/// Qubit `i` receives the phase `−2π·k / 2^(i+1)`, so the transform yields
/// `|k⟩` with qubit 0 as most significant bit: the outcome, classical bit 0
/// first, is `k` written in binary.
///
/// # Errors
///
/// - [`OracleError::DescriptorTooSmall`] for `n == 0`.
/// - [`OracleError::InvalidDescriptor`] above [`MAX_QFT_PERIOD_QUBITS`].
pub fn qft_period_experiment<R: Rng + ?Sized>(n: u32, rng: &mut R) -> OracleResult<Experiment> {
    require_qubits("QFT period", 1, n)?;
    if n > MAX_QFT_PERIOD_QUBITS {
        return Err(OracleError::invalid(
            "QFT period",
            format!("{n} qubits exceed the limit of {MAX_QFT_PERIOD_QUBITS}"),
        ));
    }
    let period = rng.gen_range(1..=u64::from(n));

    let mut b = Program::builder(n, n);
    b.h_all((0..n).map(QubitId))?;
    for i in 0..n {
        let modulus = 1u64 << (i + 1);
        let residue = period % modulus;
        #[allow(clippy::cast_precision_loss)]
        let ratio = -(residue as f64) / (modulus as f64 / 2.0);
        b.rz(Angle::pi_multiple(ratio), QubitId(i))?;
    }
    b.extend(&qft(n)?)?.measure_all()?;

    let label = format!("{period:0width$b}", width = n as usize);
    let summary = format!("Your state has a period of {label}");
    Ok(Experiment::new(ExperimentCategory::Qft, b.finish(), summary).with_param("period", label))
}

/// Shor period finding for a random instance from [`SHOR_INSTANCES`].
pub fn shor_experiment<R: Rng + ?Sized>(rng: &mut R) -> OracleResult<Experiment> {
    let &(modulus, bases) = SHOR_INSTANCES
        .choose(rng)
        .ok_or_else(|| OracleError::invalid("Shor", "no instances configured"))?;
    let &base = bases
        .choose(rng)
        .ok_or_else(|| OracleError::invalid("Shor", format!("no base configured for N = {modulus}")))?;

    let program = shor_period_finding(modulus, base)?;
    let summary = format!("Your number N was {modulus} and your random seed a was {base}");
    Ok(Experiment::new(ExperimentCategory::Shor, program, summary)
        .with_param("N", modulus.to_string())
        .with_param("a", base.to_string()))
}

pub(crate) fn measure_each(
    builder: &mut ProgramBuilder,
    qubits: &[QubitId],
) -> OracleResult<()> {
    for (clbit, &qubit) in qubits.iter().enumerate() {
        let clbit = u32::try_from(clbit).map_err(|_| OracleError::invalid("readout", "too many qubits"))?;
        builder.measure(qubit, ClbitId(clbit))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_deutsch_jozsa_layout() {
        let mut rng = StdRng::seed_from_u64(1);
        let experiment = deutsch_jozsa_experiment(3, &mut rng).unwrap();
        assert_eq!(experiment.program.num_qubits(), 3);
        assert_eq!(experiment.program.num_clbits(), 2);
        assert!(experiment.summary.starts_with("Your oracle is "));
        assert!(deutsch_jozsa_experiment(1, &mut rng).is_err());
    }

    #[test]
    fn test_bernstein_vazirani_summary_matches_program() {
        let mut rng = StdRng::seed_from_u64(5);
        let experiment = bernstein_vazirani_experiment(4, &mut rng).unwrap();
        let code = experiment.params["BV_code"].as_str().unwrap();
        // Reported highest bit first; one cx per set bit.
        let cx = experiment.program.count_ops().get("cx").copied().unwrap_or(0);
        assert_eq!(cx, code.matches('1').count());
        assert_eq!(experiment.summary, format!("Your code was {code}"));
    }

    #[test]
    fn test_simon_layout() {
        let mut rng = StdRng::seed_from_u64(9);
        let experiment = simon_experiment(3, &mut rng).unwrap();
        assert_eq!(experiment.program.num_qubits(), 6);
        assert_eq!(experiment.program.num_clbits(), 3);
        assert_eq!(experiment.category, ExperimentCategory::Simon);
    }

    #[test]
    fn test_qft_period_label() {
        let mut rng = StdRng::seed_from_u64(2);
        let experiment = qft_period_experiment(3, &mut rng).unwrap();
        let label = experiment.params["period"].as_str().unwrap();
        assert_eq!(label.len(), 3);
        let period = u64::from_str_radix(label, 2).unwrap();
        assert!((1..=3).contains(&period));
        assert!(qft_period_experiment(33, &mut rng).is_err());
    }

    #[test]
    fn test_shor_instances() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..10 {
            let experiment = shor_experiment(&mut rng).unwrap();
            let n: u64 = experiment.params["N"].as_str().unwrap().parse().unwrap();
            let a: u64 = experiment.params["a"].as_str().unwrap().parse().unwrap();
            let (_, bases) = SHOR_INSTANCES.iter().find(|(m, _)| *m == n).unwrap();
            assert!(bases.contains(&a));
            assert!(experiment.program.has_measurement());
        }
    }

    #[test]
    fn test_random_marked_state_width() {
        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(random_marked_state(5, &mut rng).len(), 5);
        assert!(random_marked_state(0, &mut rng).is_empty());
    }
}
