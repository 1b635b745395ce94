//! Modular exponentiation from controlled modular multiplications.

use saxonq_ir::{Program, ProgramBuilder, QubitId};
use tracing::{debug, instrument};

use super::permutation::{adjacent_swaps, gray_path, mul_mod, multiplication_table, transpositions};
use super::{bit_length, gcd, validate};
use crate::error::{OracleError, OracleResult};

/// Fragment over `counting + L` qubits (`L` the bit length of `modulus`)
/// mapping `|x⟩|1⟩ → |x⟩|base^x mod modulus⟩`.
///
/// Counting qubit `k` has weight `2^k` and controls multiplication by
/// `base^(2^k) mod modulus` on the work register `counting..counting + L`,
/// whose qubit `counting + i` has weight `2^i`. The work register must be
/// prepared in `|1⟩` by the caller.
///
/// # Errors
///
/// - [`OracleError::DescriptorTooSmall`] for `counting == 0`.
/// - [`OracleError::InvalidDescriptor`] for a pair rejected by Shor's
///   validation (see [`shor_period_finding`](super::shor_period_finding)).
#[instrument]
pub fn modular_exponentiation(modulus: u64, base: u64, counting: u32) -> OracleResult<Program> {
    validate(modulus, base)?;
    if counting == 0 {
        return Err(OracleError::too_small("modular exponentiation", 1, 0));
    }
    let width = bit_length(modulus);
    let work: Vec<QubitId> = (counting..counting + width).map(QubitId).collect();

    let mut b = Program::builder(counting + width, 0);
    let mut multiplier = base % modulus;
    for k in 0..counting {
        controlled_modular_multiplication(&mut b, modulus, multiplier, QubitId(k), &work)?;
        multiplier = mul_mod(multiplier, multiplier, modulus);
    }
    debug!(gates = b.len(), "Synthesized modular exponentiation");
    Ok(b.finish())
}

/// Append `|y⟩ → |multiplier·y mod modulus⟩` on `work`, controlled by
/// `control`. Values at or above `modulus` are left unchanged.
///
/// The permutation is split into cycles, each cycle into transpositions,
/// and each transposition into a Gray-code walk of multi-controlled flips;
/// controls that must read 0 are wrapped in `x` gates.
///
/// # Errors
///
/// - [`OracleError::DescriptorTooSmall`] if `work` cannot hold every value
///   below `modulus`.
/// - [`OracleError::InvalidDescriptor`] if `multiplier` is not invertible
///   modulo `modulus`, or `control` is part of `work`.
pub fn controlled_modular_multiplication(
    builder: &mut ProgramBuilder,
    modulus: u64,
    multiplier: u64,
    control: QubitId,
    work: &[QubitId],
) -> OracleResult<()> {
    const ORACLE: &str = "controlled modular multiplication";

    if modulus < 2 {
        return Err(OracleError::invalid(ORACLE, format!("modulus {modulus} is below 2")));
    }
    let required = bit_length(modulus - 1);
    let available = u32::try_from(work.len()).unwrap_or(u32::MAX);
    if available < required {
        return Err(OracleError::too_small(ORACLE, required, available));
    }
    if gcd(multiplier, modulus) != 1 {
        return Err(OracleError::invalid(
            ORACLE,
            format!("{multiplier} has no inverse modulo {modulus}"),
        ));
    }
    if work.contains(&control) {
        return Err(OracleError::invalid(ORACLE, format!("control {control} is a work qubit")));
    }
    if multiplier % modulus == 1 {
        return Ok(());
    }

    let perm = multiplication_table(modulus, multiplier % modulus);
    for (u, v) in transpositions(&perm) {
        for (from, to) in adjacent_swaps(&gray_path(u, v)) {
            controlled_flip(builder, control, work, from, to)?;
        }
    }
    Ok(())
}

// Exchange basis states `from` and `to`, which differ in exactly one bit.
fn controlled_flip(
    builder: &mut ProgramBuilder,
    control: QubitId,
    work: &[QubitId],
    from: u64,
    to: u64,
) -> OracleResult<()> {
    let target = (from ^ to).trailing_zeros() as usize;
    let others = (0..work.len()).filter(|&i| i != target);

    let mut controls = vec![control];
    controls.extend(others.clone().map(|i| work[i]));
    let negated: Vec<QubitId> = others
        .filter(|&i| (from >> i) & 1 == 0)
        .map(|i| work[i])
        .collect();

    builder
        .x_all(negated.iter().copied())?
        .mcx(&controls, work[target])?
        .x_all(negated)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classical::{field, run};
    use crate::shor::pow_mod;

    fn check(modulus: u64, base: u64) {
        let width = bit_length(modulus);
        let counting = width + 1;
        let fragment = modular_exponentiation(modulus, base, counting).unwrap();
        assert_eq!(fragment.num_qubits(), counting + width);

        for x in 0..1u64 << counting {
            let input = x | (1 << counting);
            let output = run(&fragment, input);
            assert_eq!(field(output, 0, counting), x, "counting register changed");
            assert_eq!(
                field(output, counting, width),
                pow_mod(base, x, modulus),
                "{base}^{x} mod {modulus}"
            );
        }
    }

    #[test]
    fn test_modexp_15_7() {
        check(15, 7);
    }

    #[test]
    fn test_modexp_15_2() {
        check(15, 2);
    }

    #[test]
    fn test_modexp_21_2() {
        check(21, 2);
    }

    #[test]
    fn test_modexp_35_4() {
        check(35, 4);
    }

    #[test]
    fn test_modexp_9_2() {
        check(9, 2);
    }

    #[test]
    fn test_modexp_25_2() {
        check(25, 2);
    }

    #[test]
    fn test_multiplication_leaves_out_of_range_values() {
        let work: Vec<QubitId> = (1..5).map(QubitId).collect();
        let mut b = Program::builder(5, 0);
        controlled_modular_multiplication(&mut b, 15, 2, QubitId(0), &work).unwrap();
        let fragment = b.finish();
        // 15 is outside the multiplication table.
        assert_eq!(field(run(&fragment, 1 | (15 << 1)), 1, 4), 15);
        // Control clear: identity.
        assert_eq!(field(run(&fragment, 3 << 1), 1, 4), 3);
        // Control set: 3·2 mod 15.
        assert_eq!(field(run(&fragment, 1 | (3 << 1)), 1, 4), 6);
    }

    #[test]
    fn test_multiplication_rejections() {
        let work: Vec<QubitId> = (1..5).map(QubitId).collect();
        let mut b = Program::builder(5, 0);
        let err = controlled_modular_multiplication(&mut b, 15, 5, QubitId(0), &work).unwrap_err();
        assert!(matches!(err, OracleError::InvalidDescriptor { .. }));
        let err = controlled_modular_multiplication(&mut b, 15, 2, QubitId(0), &work[..3]).unwrap_err();
        assert!(matches!(
            err,
            OracleError::DescriptorTooSmall {
                required: 4,
                available: 3,
                ..
            }
        ));
        let err = controlled_modular_multiplication(&mut b, 15, 2, QubitId(1), &work).unwrap_err();
        assert!(matches!(err, OracleError::InvalidDescriptor { .. }));
        assert!(b.is_empty());
    }
}
