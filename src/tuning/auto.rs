//! Adaptive auto-tuning: chords are placed onto the lattice by linking
//! each note to its harmonically nearest already-placed neighbor.
//!
//! Fixed just intonation measures every note against the base, which
//! makes some intervals inside a chord come out wolf (e.g. the fifth
//! D-A in C-based just intonation is 40/27). Musicians instead intonate
//! against what is already sounding, so this system greedily chains each
//! new note to whichever placed note gives the simplest interval.

use super::display;
use super::just::JustIntonation;
use super::{NoteNumber, TuningContext, TuningSystem};
use crate::error::TuningError;
use crate::math::LatticePosition;
use log::debug;

/// Auto-tuning system. Caches the placement of the last active-note set;
/// the cache is replaced wholesale on every [`AutoTuner::recompute`],
/// never patched in place.
#[derive(Debug, Clone, Default)]
pub struct AutoTuner {
    active_notes: Vec<NoteNumber>,
    placements: Vec<(NoteNumber, LatticePosition)>,
}

impl AutoTuner {
    pub fn new() -> Self {
        AutoTuner::default()
    }

    /// The note set supplied to the last `recompute`, in input order.
    pub fn active_notes(&self) -> &[NoteNumber] {
        &self.active_notes
    }

    /// Cached placements in placement order.
    pub fn placements(&self) -> &[(NoteNumber, LatticePosition)] {
        &self.placements
    }

    /// Cached position of `note`, if it was in the last recomputation.
    pub fn position(&self, note: NoteNumber) -> Option<LatticePosition> {
        self.placements
            .iter()
            .find(|&&(n, _)| n == note)
            .map(|&(_, pos)| pos)
    }

    /// Replace the cached placement with one computed for `notes`.
    pub fn recompute(&mut self, ctx: &TuningContext, notes: &[NoteNumber]) {
        self.active_notes = notes.to_vec();
        self.placements = Self::place_notes(ctx, notes);
        debug!(
            "auto-tune placed {} of {} active notes",
            self.placements.len(),
            notes.len()
        );
    }

    /// Greedy placement. The base note seeds the lattice at the origin;
    /// each round links the remaining note with the smallest harmonic
    /// distance to any comparison note, at the just-intonation interval
    /// between them. After the first real note is anchored the base
    /// stops being a comparison candidate, so later notes chain to notes
    /// that are actually sounding rather than to the silent reference.
    fn place_notes(
        ctx: &TuningContext,
        notes: &[NoteNumber],
    ) -> Vec<(NoteNumber, LatticePosition)> {
        let mut placements: Vec<(NoteNumber, LatticePosition)> = Vec::new();
        if notes.is_empty() {
            return placements;
        }

        placements.push((ctx.base_note, LatticePosition::ORIGIN));
        let mut to_compare = vec![(ctx.base_note, LatticePosition::ORIGIN)];
        let mut remaining: Vec<NoteNumber> = notes.to_vec();
        if let Some(i) = remaining.iter().position(|&n| n == ctx.base_note) {
            remaining.remove(i);
        }
        let mut base_removed = false;

        while !remaining.is_empty() {
            let (next, anchor, anchor_pos) = Self::best_link(ctx, &remaining, &to_compare);

            let semitones = next - anchor;
            let interval = JustIntonation::position(ctx, semitones + ctx.base_note);
            let position = anchor_pos.sum(interval);
            match placements.iter_mut().find(|(n, _)| *n == next) {
                Some(entry) => entry.1 = position,
                None => placements.push((next, position)),
            }

            if next != anchor && !base_removed {
                to_compare.retain(|&(n, _)| n != ctx.base_note);
                base_removed = true;
            }
            if let Some(i) = remaining.iter().position(|&n| n == next) {
                remaining.remove(i);
            }
            to_compare.push((next, position));
        }

        // The base was scaffolding if the caller never asked for it.
        if !notes.contains(&ctx.base_note) {
            placements.retain(|&(n, _)| n != ctx.base_note);
        }
        placements
    }

    /// Pick, over all (remaining, comparison) pairs, the pair whose
    /// semitone span is harmonically simplest. Ties keep the first pair
    /// encountered (remaining outer, comparison inner), so the result
    /// depends on input order. That is accepted behavior, not a
    /// canonical chord shape.
    fn best_link(
        ctx: &TuningContext,
        remaining: &[NoteNumber],
        to_compare: &[(NoteNumber, LatticePosition)],
    ) -> (NoteNumber, NoteNumber, LatticePosition) {
        let mut best = (remaining[0], to_compare[0].0, to_compare[0].1);
        let mut best_distance = i64::MAX;

        for &candidate in remaining {
            for &(anchor, anchor_pos) in to_compare {
                let diff = (candidate - anchor).abs();
                let distance = JustIntonation::position(ctx, diff + ctx.base_note).distance();
                if distance < best_distance {
                    best_distance = distance;
                    best = (candidate, anchor, anchor_pos);
                }
            }
        }
        best
    }
}

impl TuningSystem for AutoTuner {
    /// Ratio from the cached placement. Querying a note that was not in
    /// the last recomputation is a precondition violation and errors.
    fn ratio(&self, _ctx: &TuningContext, note: NoteNumber) -> Result<f64, TuningError> {
        self.position(note)
            .map(LatticePosition::ratio)
            .ok_or(TuningError::UntunedNote { note })
    }

    fn prepare(&mut self, ctx: &TuningContext, active_notes: &[NoteNumber]) {
        self.recompute(ctx, active_notes);
    }

    fn ratio_display(
        &self,
        _ctx: &TuningContext,
        active_notes: &[NoteNumber],
    ) -> Result<String, TuningError> {
        if active_notes.len() <= 1 {
            return Ok(String::new());
        }
        let positions: Vec<LatticePosition> =
            self.placements.iter().map(|&(_, pos)| pos).collect();
        Ok(display::render(&positions))
    }
}
