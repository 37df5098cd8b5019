//! Tuning systems: note-number to frequency-ratio conversion.
//!
//! Three systems share one capability contract. Equal temperament is the
//! closed-form 12-EDO formula, just intonation reads a fixed 5-limit
//! lattice table, and the auto-tuner places arbitrary chords onto the
//! lattice dynamically. All of them measure against a single shared
//! [`TuningContext`] owned by the coordinator, so switching systems
//! mid-session never desynchronizes the base reference.

pub mod auto;
pub mod coordinator;
pub mod display;
pub mod equal;
pub mod just;

use crate::error::TuningError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Integer note identifier, conventionally a MIDI note number.
/// The engine enforces no range.
pub type NoteNumber = i32;

/// Base reference every ratio is measured against. The base note always
/// sits at the lattice origin and has ratio 1 exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuningContext {
    /// Frequency of the base note in Hz. Must be positive.
    pub base_frequency: f64,
    /// Note number sounding at `base_frequency`.
    pub base_note: NoteNumber,
}

impl TuningContext {
    pub fn new(base_frequency: f64, base_note: NoteNumber) -> Self {
        TuningContext {
            base_frequency,
            base_note,
        }
    }
}

impl Default for TuningContext {
    /// Middle C at its just pitch relative to A4 = 440 Hz.
    fn default() -> Self {
        TuningContext::new(261.63, 60)
    }
}

/// Which tuning system the coordinator routes queries to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TuningMode {
    Equal,
    Just,
    Auto,
}

impl FromStr for TuningMode {
    type Err = TuningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" => Ok(TuningMode::Equal),
            "just" => Ok(TuningMode::Just),
            "auto" => Ok(TuningMode::Auto),
            other => Err(TuningError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for TuningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningMode::Equal => write!(f, "equal"),
            TuningMode::Just => write!(f, "just"),
            TuningMode::Auto => write!(f, "auto"),
        }
    }
}

/// Capability contract shared by all tuning systems.
///
/// Query flow is two-phase: `prepare` with the full active-note set,
/// then `ratio`/`frequency`/`frequencies` for individual lookups. For
/// the stateless systems `prepare` is a no-op; the auto-tuner uses it to
/// recompute its lattice placement, and querying a note it has not
/// placed is an error rather than a hidden recompute.
pub trait TuningSystem {
    /// Frequency ratio of `note` relative to the base reference.
    /// `ratio(ctx.base_note)` is exactly 1 in every implementation.
    fn ratio(&self, ctx: &TuningContext, note: NoteNumber) -> Result<f64, TuningError>;

    /// Recompute any cached state for a new active-note set.
    fn prepare(&mut self, _ctx: &TuningContext, _active_notes: &[NoteNumber]) {}

    /// Absolute frequency in Hz.
    fn frequency(&self, ctx: &TuningContext, note: NoteNumber) -> Result<f64, TuningError> {
        Ok(ctx.base_frequency * self.ratio(ctx, note)?)
    }

    /// Batch form of `frequency`; always point-wise identical to it.
    fn frequencies(
        &self,
        ctx: &TuningContext,
        notes: &[NoteNumber],
    ) -> Result<HashMap<NoteNumber, f64>, TuningError> {
        let mut frequencies = HashMap::with_capacity(notes.len());
        for &note in notes {
            frequencies.insert(note, self.frequency(ctx, note)?);
        }
        Ok(frequencies)
    }

    /// Human-readable integer chord ratio for the active notes, e.g.
    /// `"4 : 5 : 6 (60)"`. Empty for fewer than two notes, and empty for
    /// systems with no finite integer representation.
    fn ratio_display(
        &self,
        _ctx: &TuningContext,
        _active_notes: &[NoteNumber],
    ) -> Result<String, TuningError> {
        Ok(String::new())
    }
}
