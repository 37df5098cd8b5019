//! 5-limit just intonation: a fixed lattice position per pitch class.

use super::display;
use super::{NoteNumber, TuningContext, TuningSystem};
use crate::error::TuningError;
use crate::math::LatticePosition;

/// Canonical lattice position for each semitone offset from the base,
/// hand-tuned to the classic 5-limit ratios.
const PITCH_CLASS_POSITIONS: [LatticePosition; 12] = [
    LatticePosition([0, 0, 0]),   // Unison      1/1
    LatticePosition([4, -1, -1]), // Minor 2nd   16/15
    LatticePosition([-3, 2, 0]),  // Major 2nd   9/8
    LatticePosition([1, 1, -1]),  // Minor 3rd   6/5
    LatticePosition([-2, 0, 1]),  // Major 3rd   5/4
    LatticePosition([2, -1, 0]),  // Perfect 4th 4/3
    LatticePosition([6, -2, -1]), // Tritone     64/45
    LatticePosition([-1, 1, 0]),  // Perfect 5th 3/2
    LatticePosition([3, 0, -1]),  // Minor 6th   8/5
    LatticePosition([0, -1, 1]),  // Major 6th   5/3
    LatticePosition([4, -2, 0]),  // Minor 7th   16/9
    LatticePosition([-3, 1, 1]),  // Major 7th   15/8
];

/// Just intonation. Stateless; every note folds to a pitch class whose
/// position is shifted by whole octaves along the 2-axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct JustIntonation;

impl JustIntonation {
    /// Lattice position of `note` relative to the base reference.
    pub fn position(ctx: &TuningContext, note: NoteNumber) -> LatticePosition {
        let semitones = note - ctx.base_note;
        // Floored division so that one semitone below the base lands in
        // octave -1 at offset 11, not octave 0 at offset -1.
        let octave = semitones.div_euclid(12) as i64;
        let offset = semitones.rem_euclid(12) as usize;
        LatticePosition([octave, 0, 0]).sum(PITCH_CLASS_POSITIONS[offset])
    }

    /// Batch positions, one per note, in input order.
    pub fn positions(
        ctx: &TuningContext,
        notes: &[NoteNumber],
    ) -> Vec<(NoteNumber, LatticePosition)> {
        notes
            .iter()
            .map(|&note| (note, Self::position(ctx, note)))
            .collect()
    }
}

impl TuningSystem for JustIntonation {
    fn ratio(&self, ctx: &TuningContext, note: NoteNumber) -> Result<f64, TuningError> {
        Ok(Self::position(ctx, note).ratio())
    }

    fn ratio_display(
        &self,
        ctx: &TuningContext,
        active_notes: &[NoteNumber],
    ) -> Result<String, TuningError> {
        let positions: Vec<LatticePosition> = active_notes
            .iter()
            .map(|&note| Self::position(ctx, note))
            .collect();
        Ok(display::render(&positions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: TuningContext = TuningContext {
        base_frequency: 261.63,
        base_note: 60,
    };

    #[test]
    fn base_note_is_unison() {
        assert_eq!(JustIntonation.ratio(&CTX, 60).unwrap(), 1.0);
        assert_eq!(JustIntonation::position(&CTX, 60), LatticePosition::ORIGIN);
    }

    #[test]
    fn classic_intervals() {
        assert!((JustIntonation.ratio(&CTX, 67).unwrap() - 1.5).abs() < 1e-12, "fifth is 3/2");
        assert!((JustIntonation.ratio(&CTX, 64).unwrap() - 1.25).abs() < 1e-12, "third is 5/4");
        assert_eq!(JustIntonation.ratio(&CTX, 72).unwrap(), 2.0, "octave doubles");
    }

    #[test]
    fn negative_semitones_fold_into_lower_octave() {
        // B below the base: major 7th down an octave, 15/16.
        let pos = JustIntonation::position(&CTX, 59);
        assert_eq!(pos, LatticePosition([-4, 1, 1]));
        assert!((JustIntonation.ratio(&CTX, 59).unwrap() - 15.0 / 16.0).abs() < 1e-12);
        // A full octave down halves exactly.
        assert_eq!(JustIntonation.ratio(&CTX, 48).unwrap(), 0.5);
    }

    #[test]
    fn octave_shift_only_moves_the_2_axis() {
        let fifth = JustIntonation::position(&CTX, 67);
        let fifth_up = JustIntonation::position(&CTX, 79);
        assert_eq!(fifth_up, fifth.sum(LatticePosition([1, 0, 0])));
    }

    #[test]
    fn frequency_uses_base_reference() {
        let freq = JustIntonation.frequency(&CTX, 67).unwrap();
        assert!((freq - 261.63 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn batch_positions_match_pointwise() {
        let batch = JustIntonation::positions(&CTX, &[60, 64, 67]);
        assert_eq!(batch.len(), 3);
        for (note, pos) in batch {
            assert_eq!(pos, JustIntonation::position(&CTX, note));
        }
    }

    #[test]
    fn major_triad_displays_4_5_6() {
        let display = JustIntonation.ratio_display(&CTX, &[60, 64, 67]).unwrap();
        assert_eq!(display, "4 : 5 : 6 (60)");
    }

    #[test]
    fn single_or_empty_set_displays_nothing() {
        assert_eq!(JustIntonation.ratio_display(&CTX, &[]).unwrap(), "");
        assert_eq!(JustIntonation.ratio_display(&CTX, &[60]).unwrap(), "");
    }

    #[test]
    fn table_ratios_are_the_classic_twelve() {
        let expected = [
            1.0,
            16.0 / 15.0,
            9.0 / 8.0,
            6.0 / 5.0,
            5.0 / 4.0,
            4.0 / 3.0,
            64.0 / 45.0,
            3.0 / 2.0,
            8.0 / 5.0,
            5.0 / 3.0,
            16.0 / 9.0,
            15.0 / 8.0,
        ];
        for (offset, &ratio) in expected.iter().enumerate() {
            let got = JustIntonation.ratio(&CTX, 60 + offset as NoteNumber).unwrap();
            assert!(
                (got - ratio).abs() < 1e-12,
                "offset {offset}: expected {ratio}, got {got}"
            );
        }
    }
}
