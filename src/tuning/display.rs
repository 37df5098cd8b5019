//! Integer chord-ratio reduction shared by the lattice-based systems.

use crate::math::{self, LatticePosition, PRIMES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The smallest integer chord ratio reproducing the relative frequencies
/// of a set of lattice positions, e.g. `4 : 5 : 6` for a major triad.
///
/// `reduced` is the LCM of the final terms. The original display
/// appended it in parentheses; it has no clear music-theoretic meaning
/// but is preserved for compatibility, so do not build on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordRatio {
    /// One positive integer per note, ascending by frequency.
    pub terms: Vec<u64>,
    /// LCM of `terms` (display quirk, see type docs).
    pub reduced: u64,
}

impl ChordRatio {
    /// Reduce a set of positions to their integer chord ratio.
    ///
    /// Returns `None` for fewer than two positions; a single note has no
    /// chord to describe.
    pub fn from_positions(positions: &[LatticePosition]) -> Option<ChordRatio> {
        if positions.len() < 2 {
            return None;
        }

        let mut sorted = positions.to_vec();
        sorted.sort_by(LatticePosition::cmp_by_ratio);

        // Split each position into an integer numerator (positive
        // exponents) and denominator (negated negative exponents).
        let mut numerators = Vec::with_capacity(sorted.len());
        let mut denominators = Vec::with_capacity(sorted.len());
        for pos in &sorted {
            let mut numerator: u64 = 1;
            let mut denominator: u64 = 1;
            for (i, &prime) in PRIMES.iter().enumerate() {
                let exponent = pos.0[i];
                if exponent > 0 {
                    numerator *= (prime as u64).pow(exponent as u32);
                } else if exponent < 0 {
                    denominator *= (prime as u64).pow((-exponent) as u32);
                }
            }
            numerators.push(numerator);
            denominators.push(denominator);
        }

        // Scale every fraction onto the common denominator, then divide
        // out the common factor. Both divisions are exact: the GCD
        // divides each numerator and each denominator divides the LCM.
        let common_denominator = math::lcm_fold(&denominators)?;
        let common_factor = math::gcd_fold(&numerators)?;
        let terms: Vec<u64> = numerators
            .iter()
            .zip(&denominators)
            .map(|(&n, &d)| common_denominator * n / (common_factor * d))
            .collect();
        let reduced = math::lcm_fold(&terms)?;

        Some(ChordRatio { terms, reduced })
    }
}

impl fmt::Display for ChordRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self.terms.iter().map(u64::to_string).collect();
        write!(f, "{} ({})", terms.join(" : "), self.reduced)
    }
}

/// Render positions as the display string hosts show next to the
/// keyboard: `""` when there is no chord.
pub fn render(positions: &[LatticePosition]) -> String {
    match ChordRatio::from_positions(positions) {
        Some(ratio) => ratio.to_string(),
        None => String::new(),
    }
}
