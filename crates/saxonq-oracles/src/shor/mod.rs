//! Shor period finding.
//!
//! The program has `t = L + 1` counting qubits `0..t` and `L` work qubits
//! `t..t + L`, where `L` is the bit length of `N`. The counting register is
//! read out into classical bits `0..t`; its value (classical bit `k` has
//! weight `2^k`) approximates `s·2^t / r` for the order `r` of `a` modulo
//! `N` and a random `s`.

mod modexp;
mod permutation;

pub use modexp::{controlled_modular_multiplication, modular_exponentiation};

use saxonq_ir::{ClbitId, Program, QubitId};
use tracing::{debug, instrument};

use permutation::mul_mod;

use crate::error::{OracleError, OracleResult};
use crate::qft::apply_qft;

/// Largest modulus accepted; the multiplication circuits grow linearly in
/// `N`.
pub const MAX_MODULUS: u64 = 255;

/// Period-finding program for factoring `modulus` with base `base`.
///
/// `h` on the counting register, `x` on work qubit 0, the modular
/// exponentiation fragment, the inverse Fourier transform of the counting
/// register, and measurement of counting qubit `k` into classical bit `k`.
///
/// # Errors
///
/// - [`OracleError::InvalidDescriptor`] unless `modulus` is odd and
///   composite, `1 < base < modulus`, and `gcd(base, modulus) = 1`.
/// - [`OracleError::DescriptorTooSmall`] when `modulus` exceeds
///   [`MAX_MODULUS`].
#[instrument]
pub fn shor_period_finding(modulus: u64, base: u64) -> OracleResult<Program> {
    validate(modulus, base)?;
    let width = bit_length(modulus);
    let counting = width + 1;
    let counting_qubits: Vec<QubitId> = (0..counting).map(QubitId).collect();

    let mut b = Program::builder(counting + width, counting);
    b.h_all(counting_qubits.iter().copied())?
        .x(QubitId(counting))?
        .extend(&modular_exponentiation(modulus, base, counting)?)?;

    // Most significant counting qubit first, so the transform reads the
    // register with qubit k at weight 2^k.
    let msb_first: Vec<QubitId> = counting_qubits.iter().rev().copied().collect();
    apply_qft(&mut b, &msb_first, true)?;

    for q in counting_qubits {
        b.measure(q, ClbitId(q.0))?;
    }
    debug!(
        qubits = b.num_qubits(),
        gates = b.len(),
        "Synthesized Shor period finding"
    );
    Ok(b.finish())
}

/// Qubits needed for `shor_period_finding(modulus, _)`: `2L + 1`.
pub fn shor_qubits(modulus: u64) -> u32 {
    2 * bit_length(modulus) + 1
}

pub(crate) fn validate(modulus: u64, base: u64) -> OracleResult<()> {
    const ORACLE: &str = "Shor";
    if modulus % 2 == 0 {
        return Err(OracleError::invalid(ORACLE, format!("N = {modulus} is even")));
    }
    if is_prime(modulus) {
        return Err(OracleError::invalid(ORACLE, format!("N = {modulus} is prime")));
    }
    if base <= 1 || base >= modulus {
        return Err(OracleError::invalid(
            ORACLE,
            format!("a = {base} is outside 2..{modulus}"),
        ));
    }
    if gcd(base, modulus) != 1 {
        return Err(OracleError::invalid(
            ORACLE,
            format!("a = {base} shares the factor {} with N", gcd(base, modulus)),
        ));
    }
    if modulus > MAX_MODULUS {
        return Err(OracleError::too_small(
            ORACLE,
            shor_qubits(modulus),
            shor_qubits(MAX_MODULUS),
        ));
    }
    Ok(())
}

/// Number of bits needed to write `value`.
pub(crate) fn bit_length(value: u64) -> u32 {
    u64::BITS - value.leading_zeros()
}

pub(crate) fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `base^exponent mod modulus` by repeated squaring.
pub fn pow_mod(base: u64, mut exponent: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let mut result = 1;
    let mut square = base % modulus;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mul_mod(result, square, modulus);
        }
        square = mul_mod(square, square, modulus);
        exponent >>= 1;
    }
    result
}

/// Multiplicative order of `base` modulo `modulus`, if they are coprime.
pub fn multiplicative_order(base: u64, modulus: u64) -> Option<u64> {
    if modulus < 2 || gcd(base, modulus) != 1 {
        return None;
    }
    let mut value = base % modulus;
    let mut order = 1;
    while value != 1 {
        value = mul_mod(value, base, modulus);
        order += 1;
    }
    Some(order)
}

fn is_prime(n: u64) -> bool {
    n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_for_15() {
        let program = shor_period_finding(15, 7).unwrap();
        assert_eq!(program.num_qubits(), 9);
        assert_eq!(shor_qubits(15), 9);
        assert_eq!(program.num_clbits(), 5);

        let measured: Vec<(u32, u32)> = program
            .iter()
            .filter(|ins| ins.is_measurement())
            .map(|ins| (ins.targets()[0].0, ins.clbits()[0].0))
            .collect();
        assert_eq!(measured, (0..5).map(|k| (k, k)).collect::<Vec<_>>());

        // Counting register in superposition, work register set to 1.
        let prefix: Vec<&str> = program.iter().take(6).map(|ins| ins.name()).collect();
        assert_eq!(prefix, vec!["h", "h", "h", "h", "h", "x"]);
        assert_eq!(program.instructions()[5].targets(), &[QubitId(5)]);
    }

    #[test]
    fn test_experiment_pairs_are_accepted() {
        for (n, a) in [(15, 2), (15, 7), (15, 8), (15, 11), (15, 13), (21, 2), (35, 4)] {
            let program = shor_period_finding(n, a).unwrap();
            assert_eq!(program.num_qubits(), shor_qubits(n));
            assert!(program.has_measurement());
        }
    }

    #[test]
    fn test_small_odd_composites_are_accepted() {
        for (n, a) in [(9, 2), (25, 2), (27, 2)] {
            let program = shor_period_finding(n, a).unwrap();
            assert_eq!(program.num_qubits(), shor_qubits(n));
            assert!(program.has_measurement());
        }
    }

    #[test]
    fn test_validation() {
        let invalid = |n, a| {
            matches!(
                shor_period_finding(n, a),
                Err(OracleError::InvalidDescriptor { .. })
            )
        };
        assert!(invalid(16, 3)); // even
        assert!(invalid(17, 3)); // prime
        assert!(invalid(9, 3)); // shares 3
        assert!(invalid(1, 1));
        assert!(invalid(15, 1));
        assert!(invalid(15, 15));
        assert!(invalid(15, 6)); // shares 3
        assert!(!invalid(1023, 2));
    }

    #[test]
    fn test_modulus_above_cap_exceeds_budget() {
        let err = shor_period_finding(1023, 2).unwrap_err();
        assert_eq!(
            err,
            OracleError::DescriptorTooSmall {
                oracle: "Shor",
                required: 21,
                available: 17,
            }
        );
        assert!(validate(MAX_MODULUS, 2).is_ok());
    }

    #[test]
    fn test_number_theory_helpers() {
        assert_eq!(gcd(21, 14), 7);
        assert_eq!(bit_length(15), 4);
        assert_eq!(bit_length(35), 6);
        assert_eq!(pow_mod(7, 4, 15), 1);
        assert_eq!(pow_mod(2, 10, 1000), 24);
        assert_eq!(multiplicative_order(7, 15), Some(4));
        assert_eq!(multiplicative_order(2, 21), Some(6));
        assert_eq!(multiplicative_order(4, 35), Some(6));
        assert_eq!(multiplicative_order(5, 15), None);
        assert!(is_prime(13) && !is_prime(15) && !is_prime(1));
    }
}
