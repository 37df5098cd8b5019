use crate::tuning::NoteNumber;
use std::fmt;

/// Errors surfaced by the tuning engine. All of them are recoverable:
/// the engine keeps its previous state and the host decides what to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuningError {
    /// A mode string other than "equal", "just" or "auto" was supplied.
    /// The active mode is left unchanged.
    UnknownMode(String),
    /// The auto-tuner was asked for a note that was absent from its last
    /// recomputation. Callers must prepare with the full active set first.
    UntunedNote { note: NoteNumber },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::UnknownMode(mode) => write!(f, "Unknown tuning mode '{mode}'"),
            TuningError::UntunedNote { note } => {
                write!(f, "Note {note} is not in the current tuning set")
            }
        }
    }
}

impl std::error::Error for TuningError {}
