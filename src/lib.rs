//! ChordLattice core: the tuning engine behind the ChordLattice synth.
//!
//! Pure Rust, no I/O. Hosts (audio layer, MIDI/keyboard adapters, UI)
//! feed the currently active note numbers in and get back per-note
//! frequencies plus an integer chord-ratio string for display. The same
//! code serves native hosts through the library API and the browser
//! through the WASM bindings below.

pub mod error;
pub mod math;
pub mod tuning;

pub use error::TuningError;
pub use math::{LatticePosition, PRIMES};
pub use tuning::coordinator::TuningCoordinator;
pub use tuning::display::ChordRatio;
pub use tuning::{NoteNumber, TuningContext, TuningMode, TuningSystem};

use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the chordlattice-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed tuning engine: a coordinator behind a JS-friendly API.
#[wasm_bindgen]
pub struct TuningEngine {
    coordinator: TuningCoordinator,
}

#[wasm_bindgen]
impl TuningEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(base_frequency: f64, base_note: i32) -> TuningEngine {
        TuningEngine {
            coordinator: TuningCoordinator::new(base_frequency, base_note),
        }
    }

    /// Switch the tuning system ("equal", "just" or "auto"). An unknown
    /// name is logged and the previous system stays active.
    pub fn set_tuning_mode(&mut self, mode: &str) {
        if let Err(e) = self.coordinator.set_mode_str(mode) {
            log::warn!("{e}");
        }
    }

    /// The active tuning system name.
    pub fn tuning_mode(&self) -> String {
        self.coordinator.mode().to_string()
    }

    pub fn set_base_frequency(&mut self, frequency: f64) {
        self.coordinator.set_base_frequency(frequency);
    }

    pub fn set_base_note(&mut self, note: i32) {
        self.coordinator.set_base_note(note);
    }

    /// Frequencies for the active notes, as a JS map of note -> Hz.
    pub fn frequencies_for(&mut self, active_notes: Vec<i32>) -> Result<JsValue, JsValue> {
        let frequencies = self
            .coordinator
            .frequencies_for(&active_notes)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        serde_wasm_bindgen::to_value(&frequencies).map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    /// Chord-ratio display string for the active notes ("" when the
    /// active system has none).
    pub fn ratio_display_for(&mut self, active_notes: Vec<i32>) -> Result<String, JsValue> {
        self.coordinator
            .ratio_display_for(&active_notes)
            .map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    /// Structured chord ratio, or JS `undefined` when there is none.
    pub fn chord_ratio_for(&mut self, active_notes: Vec<i32>) -> Result<JsValue, JsValue> {
        match self.coordinator.chord_ratio_for(&active_notes) {
            Some(ratio) => serde_wasm_bindgen::to_value(&ratio)
                .map_err(|e| JsValue::from_str(&format!("{e}"))),
            None => Ok(JsValue::UNDEFINED),
        }
    }
}
