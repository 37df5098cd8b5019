//! 12-tone equal temperament: every semitone is the same logarithmic step.

use super::{NoteNumber, TuningContext, TuningSystem};
use crate::error::TuningError;

/// Equal temperament. Stateless; the whole system is one formula.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualTemperament;

impl TuningSystem for EqualTemperament {
    fn ratio(&self, ctx: &TuningContext, note: NoteNumber) -> Result<f64, TuningError> {
        let semitones = note - ctx.base_note;
        Ok(2f64.powf(semitones as f64 / 12.0))
    }

    // Equal-tempered intervals are irrational, so there is no integer
    // chord ratio to display. The default empty `ratio_display` stands.
}
