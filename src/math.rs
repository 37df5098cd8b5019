//! Exact rational arithmetic over the 5-limit harmonic lattice.
//!
//! A pitch is identified by a lattice position: an integer exponent
//! vector over the primes {2, 3, 5}. Position `(e2, e3, e5)` denotes the
//! frequency ratio `2^e2 * 3^e3 * 5^e5`. Keeping exponents as integers
//! (rather than carrying floating-point ratios around) is what lets the
//! chord-ratio display reduce to exact small integers.

use std::cmp::Ordering;

/// Prime dimensions of the lattice, in index order.
pub const PRIMES: [i64; 3] = [2, 3, 5];

/// Integer exponent vector over [`PRIMES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LatticePosition(pub [i64; 3]);

impl LatticePosition {
    /// The unison: ratio 1/1.
    pub const ORIGIN: LatticePosition = LatticePosition([0, 0, 0]);

    /// Component-wise vector sum. Stacking intervals multiplies their
    /// ratios, which is addition in exponent space.
    pub fn sum(self, other: LatticePosition) -> LatticePosition {
        let mut exps = [0i64; 3];
        for (i, e) in exps.iter_mut().enumerate() {
            *e = self.0[i] + other.0[i];
        }
        LatticePosition(exps)
    }

    /// The frequency ratio this position denotes.
    pub fn ratio(self) -> f64 {
        let mut ratio = 1.0;
        for (i, &prime) in PRIMES.iter().enumerate() {
            ratio *= (prime as f64).powi(self.0[i] as i32);
        }
        ratio
    }

    /// Harmonic distance: the prime-weighted sum of squared exponents.
    /// Smaller means the interval is simpler (more consonant). Exact
    /// integer, so comparisons never suffer float noise.
    pub fn distance(self) -> i64 {
        let mut distance = 0;
        for (i, &prime) in PRIMES.iter().enumerate() {
            let term = prime * self.0[i];
            distance += term * term;
        }
        distance
    }

    /// Ordering by the frequency ratio the positions denote, ascending.
    /// Usable directly as a sort comparator.
    pub fn cmp_by_ratio(&self, other: &LatticePosition) -> Ordering {
        self.ratio().total_cmp(&other.ratio())
    }
}

/// Euclidean greatest common divisor. `gcd(a, 0) == a`.
pub fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Least common multiple.
pub fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

/// GCD of a sequence by left fold. `None` on empty input; a
/// single-element sequence folds to that element unchanged.
pub fn gcd_fold(values: &[u64]) -> Option<u64> {
    values.iter().copied().reduce(gcd)
}

/// LCM of a sequence by left fold. `None` on empty input.
pub fn lcm_fold(values: &[u64]) -> Option<u64> {
    values.iter().copied().reduce(lcm)
}
