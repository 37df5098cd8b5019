//! Tuning coordinator: owns the three tuning systems, the selected
//! mode, and the single base reference they all measure against.

use super::auto::AutoTuner;
use super::display::ChordRatio;
use super::equal::EqualTemperament;
use super::just::JustIntonation;
use super::{NoteNumber, TuningContext, TuningMode, TuningSystem};
use crate::error::TuningError;
use crate::math::LatticePosition;
use log::warn;
use std::collections::HashMap;

/// Routes host queries to the selected tuning system.
///
/// The base reference lives here, once, and is passed by reference into
/// every system call. Changing it therefore affects all three systems
/// at the same moment, and a later mode switch sees consistent state.
#[derive(Debug, Clone)]
pub struct TuningCoordinator {
    ctx: TuningContext,
    mode: TuningMode,
    equal: EqualTemperament,
    just: JustIntonation,
    auto: AutoTuner,
}

impl TuningCoordinator {
    /// The original synth defaults to auto-tuning.
    pub fn new(base_frequency: f64, base_note: NoteNumber) -> Self {
        TuningCoordinator {
            ctx: TuningContext::new(base_frequency, base_note),
            mode: TuningMode::Auto,
            equal: EqualTemperament,
            just: JustIntonation,
            auto: AutoTuner::new(),
        }
    }

    pub fn mode(&self) -> TuningMode {
        self.mode
    }

    pub fn context(&self) -> &TuningContext {
        &self.ctx
    }

    pub fn set_mode(&mut self, mode: TuningMode) {
        self.mode = mode;
    }

    /// Parse and select a mode by its host-facing name. On an unknown
    /// name the previous mode stays selected.
    pub fn set_mode_str(&mut self, mode: &str) -> Result<(), TuningError> {
        self.mode = mode.parse()?;
        Ok(())
    }

    /// Update the base frequency. Non-positive values are ignored, since
    /// every ratio scales from this number.
    pub fn set_base_frequency(&mut self, frequency: f64) {
        if frequency > 0.0 {
            self.ctx.base_frequency = frequency;
        } else {
            warn!("Ignoring non-positive base frequency {frequency}");
        }
    }

    pub fn set_base_note(&mut self, note: NoteNumber) {
        self.ctx.base_note = note;
    }

    /// Frequency for every active note under the selected system.
    pub fn frequencies_for(
        &mut self,
        active_notes: &[NoteNumber],
    ) -> Result<HashMap<NoteNumber, f64>, TuningError> {
        let ctx = self.ctx;
        let system = self.system_mut();
        system.prepare(&ctx, active_notes);
        system.frequencies(&ctx, active_notes)
    }

    /// Integer chord-ratio string for the active notes; `""` when the
    /// selected system has none to show. Reflects the same lattice
    /// placement as `frequencies_for` on the same set.
    pub fn ratio_display_for(
        &mut self,
        active_notes: &[NoteNumber],
    ) -> Result<String, TuningError> {
        let ctx = self.ctx;
        let system = self.system_mut();
        system.prepare(&ctx, active_notes);
        system.ratio_display(&ctx, active_notes)
    }

    /// Structured form of the chord ratio, for hosts that want the
    /// integers rather than the rendered string. `None` when there is no
    /// chord or the system has no integer representation.
    pub fn chord_ratio_for(&mut self, active_notes: &[NoteNumber]) -> Option<ChordRatio> {
        if active_notes.len() <= 1 {
            return None;
        }
        let positions: Vec<LatticePosition> = match self.mode {
            TuningMode::Equal => return None,
            TuningMode::Just => active_notes
                .iter()
                .map(|&note| JustIntonation::position(&self.ctx, note))
                .collect(),
            TuningMode::Auto => {
                self.auto.recompute(&self.ctx, active_notes);
                self.auto.placements().iter().map(|&(_, pos)| pos).collect()
            }
        };
        ChordRatio::from_positions(&positions)
    }

    fn system_mut(&mut self) -> &mut dyn TuningSystem {
        match self.mode {
            TuningMode::Equal => &mut self.equal,
            TuningMode::Just => &mut self.just,
            TuningMode::Auto => &mut self.auto,
        }
    }
}

impl Default for TuningCoordinator {
    fn default() -> Self {
        let ctx = TuningContext::default();
        TuningCoordinator::new(ctx.base_frequency, ctx.base_note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator() -> TuningCoordinator {
        TuningCoordinator::new(261.63, 60)
    }

    #[test]
    fn defaults_to_auto_mode() {
        assert_eq!(coordinator().mode(), TuningMode::Auto);
    }

    #[test]
    fn unknown_mode_is_rejected_and_keeps_previous() {
        let mut c = coordinator();
        c.set_mode(TuningMode::Just);
        let err = c.set_mode_str("pythagorean").unwrap_err();
        assert_eq!(err, TuningError::UnknownMode("pythagorean".to_string()));
        assert_eq!(c.mode(), TuningMode::Just, "mode must be unchanged");
    }

    #[test]
    fn frequencies_cover_every_active_note() {
        let mut c = coordinator();
        let freqs = c.frequencies_for(&[60, 64, 67]).unwrap();
        assert_eq!(freqs.len(), 3);
        for note in [60, 64, 67] {
            assert!(freqs[&note] > 0.0);
        }
    }

    #[test]
    fn repeated_queries_are_idempotent() {
        let mut c = coordinator();
        let notes = [62, 69, 64];
        let first = c.frequencies_for(&notes).unwrap();
        let second = c.frequencies_for(&notes).unwrap();
        assert_eq!(first, second);
        let d1 = c.ratio_display_for(&notes).unwrap();
        let d2 = c.ratio_display_for(&notes).unwrap();
        assert_eq!(d1, d2);
    }

    #[test]
    fn display_and_frequencies_agree_on_placement() {
        let mut c = coordinator();
        let display = c.ratio_display_for(&[60, 64, 67]).unwrap();
        assert_eq!(display, "4 : 5 : 6 (60)");
        let freqs = c.frequencies_for(&[60, 64, 67]).unwrap();
        let ratio = freqs[&67] / freqs[&60];
        assert!((ratio - 1.5).abs() < 1e-12, "6/4 from the display is 3/2");
    }

    #[test]
    fn empty_and_single_note_sets_are_not_errors() {
        let mut c = coordinator();
        assert!(c.frequencies_for(&[]).unwrap().is_empty());
        assert_eq!(c.ratio_display_for(&[]).unwrap(), "");
        assert_eq!(c.ratio_display_for(&[60]).unwrap(), "");
        assert_eq!(c.chord_ratio_for(&[60]), None);
    }

    #[test]
    fn mode_switch_changes_tuning() {
        let mut c = coordinator();
        c.set_mode(TuningMode::Just);
        let just = c.frequencies_for(&[64]).unwrap()[&64];
        c.set_mode(TuningMode::Equal);
        let equal = c.frequencies_for(&[64]).unwrap()[&64];
        // 5/4 = 1.25 vs 2^(4/12) ~ 1.2599
        assert!((just / 261.63 - 1.25).abs() < 1e-9);
        assert!(equal > just, "equal-tempered third is sharper than just");
    }

    #[test]
    fn equal_mode_has_no_display() {
        let mut c = coordinator();
        c.set_mode(TuningMode::Equal);
        assert_eq!(c.ratio_display_for(&[60, 64, 67]).unwrap(), "");
        assert_eq!(c.chord_ratio_for(&[60, 64, 67]), None);
    }

    #[test]
    fn base_reference_propagates_across_mode_switches() {
        let mut c = coordinator();
        c.set_base_frequency(440.0);
        c.set_base_note(69);
        c.set_mode(TuningMode::Just);
        let just = c.frequencies_for(&[69]).unwrap()[&69];
        assert!((just - 440.0).abs() < 1e-9);
        c.set_mode(TuningMode::Equal);
        let equal = c.frequencies_for(&[81]).unwrap()[&81];
        assert!((equal - 880.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_base_frequency_is_ignored() {
        let mut c = coordinator();
        c.set_base_frequency(0.0);
        c.set_base_frequency(-100.0);
        assert!((c.context().base_frequency - 261.63).abs() < 1e-9);
    }

    #[test]
    fn chord_ratio_matches_rendered_display() {
        let mut c = coordinator();
        let ratio = c.chord_ratio_for(&[60, 64, 67]).unwrap();
        assert_eq!(ratio.terms, vec![4, 5, 6]);
        assert_eq!(ratio.to_string(), c.ratio_display_for(&[60, 64, 67]).unwrap());
    }

    #[test]
    fn auto_mode_strips_scaffold_from_frequencies() {
        let mut c = coordinator();
        let freqs = c.frequencies_for(&[64, 67]).unwrap();
        assert_eq!(freqs.len(), 2);
        assert!(!freqs.contains_key(&60), "base note was never requested");
        assert!((freqs[&67] / freqs[&64] - 1.2).abs() < 1e-12, "minor third between them");
    }
}
