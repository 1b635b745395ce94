//! Basis-state permutations and their decomposition into transpositions.

/// Table of `y → multiplier·y mod modulus` on `0..modulus`.
pub(crate) fn multiplication_table(modulus: u64, multiplier: u64) -> Vec<u64> {
    (0..modulus).map(|y| mul_mod(multiplier, y, modulus)).collect()
}

/// Non-trivial cycles of `perm`, each starting at its smallest element.
pub(crate) fn cycles(perm: &[u64]) -> Vec<Vec<u64>> {
    let mut seen = vec![false; perm.len()];
    let mut out = Vec::new();
    for start in 0..perm.len() {
        if seen[start] {
            continue;
        }
        let mut cycle = Vec::new();
        let mut y = start;
        while !seen[y] {
            seen[y] = true;
            cycle.push(y as u64);
            y = usize::try_from(perm[y]).unwrap_or(start);
        }
        if cycle.len() > 1 {
            out.push(cycle);
        }
    }
    out
}

/// Transpositions that, applied to a basis state in order, realize `perm`.
///
/// The cycle `c0 → c1 → … → c(l−1) → c0` becomes
/// `(c(l−2) c(l−1)), …, (c1 c2), (c0 c1)`.
pub(crate) fn transpositions(perm: &[u64]) -> Vec<(u64, u64)> {
    let mut out = Vec::new();
    for cycle in cycles(perm) {
        for pair in cycle.windows(2).rev() {
            out.push((pair[0], pair[1]));
        }
    }
    out
}

/// Gray-code walk from `from` to `to`, flipping differing bits lowest first.
/// Both endpoints are included.
pub(crate) fn gray_path(from: u64, to: u64) -> Vec<u64> {
    let mut path = vec![from];
    let mut current = from;
    let mut diff = from ^ to;
    while diff != 0 {
        let lowest = diff & diff.wrapping_neg();
        current ^= lowest;
        diff ^= lowest;
        path.push(current);
    }
    path
}

/// Adjacent swaps that exchange the endpoints of a Gray path and leave every
/// intermediate state in place: `(g0 g1) … (g(d−1) gd) … (g0 g1)`.
pub(crate) fn adjacent_swaps(path: &[u64]) -> Vec<(u64, u64)> {
    let steps: Vec<(u64, u64)> = path.windows(2).map(|w| (w[0], w[1])).collect();
    let mut out = steps.clone();
    if let Some((_, back)) = steps.split_last() {
        out.extend(back.iter().rev());
    }
    out
}

pub(crate) fn mul_mod(a: u64, b: u64, modulus: u64) -> u64 {
    let product = u128::from(a) * u128::from(b) % u128::from(modulus);
    // Narrowing is exact: the remainder is below `modulus`.
    u64::try_from(product).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap_state(y: u64, (a, b): (u64, u64)) -> u64 {
        if y == a {
            b
        } else if y == b {
            a
        } else {
            y
        }
    }

    #[test]
    fn test_transpositions_realize_permutation() {
        for (modulus, multiplier) in [(15, 7), (15, 2), (21, 2), (35, 4), (35, 11)] {
            let perm = multiplication_table(modulus, multiplier);
            let swaps = transpositions(&perm);
            for y in 0..modulus {
                let out = swaps.iter().fold(y, |s, &t| swap_state(s, t));
                assert_eq!(out, perm[y as usize], "{multiplier}·{y} mod {modulus}");
            }
        }
    }

    #[test]
    fn test_cycles_of_multiplication_by_two_mod_15() {
        let perm = multiplication_table(15, 2);
        let cycles = cycles(&perm);
        // 0 is fixed; 2 has order 4 mod 15 and 5, 10 form a 2-cycle.
        assert!(cycles.contains(&vec![1, 2, 4, 8]));
        assert!(cycles.contains(&vec![5, 10]));
        assert!(cycles.iter().all(|c| !c.contains(&0)));
    }

    #[test]
    fn test_gray_path_flips_one_bit_per_step() {
        let path = gray_path(0b0101, 0b1010);
        assert_eq!(path.first(), Some(&0b0101));
        assert_eq!(path.last(), Some(&0b1010));
        assert_eq!(path.len(), 5);
        for w in path.windows(2) {
            assert_eq!((w[0] ^ w[1]).count_ones(), 1);
        }
    }

    #[test]
    fn test_adjacent_swaps_exchange_endpoints_only() {
        let path = gray_path(0b001, 0b110);
        let swaps = adjacent_swaps(&path);
        assert_eq!(swaps.len(), 2 * (path.len() - 1) - 1);
        for y in 0..8 {
            let out = swaps.iter().fold(y, |s, &t| swap_state(s, t));
            let expected = match y {
                0b001 => 0b110,
                0b110 => 0b001,
                other => other,
            };
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn test_mul_mod_large_operands() {
        assert_eq!(mul_mod(u64::MAX, 2, 7), ((u128::from(u64::MAX) * 2) % 7) as u64);
    }
}
