//! Error types for the garden simulation engine.
//!
//! Rejected player actions (sowing an occupied cell, reaping an empty one)
//! are deliberately *not* errors — commands report them as a `false` return
//! and leave state untouched.

use thiserror::Error;

/// Errors surfaced by history and persistence operations.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Undo or redo was requested with nothing to restore.
    #[error("nothing to {action}")]
    EmptyHistory {
        /// Which operation was attempted ("undo" or "redo").
        action: &'static str,
    },

    /// A load was requested from a slot with no stored save.
    #[error("no saved game in slot {0}")]
    SlotEmpty(u8),

    /// An autosave restore was requested but no autosave exists.
    #[error("no autosave present")]
    NoAutosave,

    /// The slot number is outside the supported 1-3 range.
    #[error("invalid save slot {0} (slots are numbered 1-3)")]
    InvalidSlot(u8),

    /// The scenario document is missing a required section or field,
    /// or carries values no safe default exists for. Fatal at startup.
    #[error("malformed scenario: {0}")]
    MalformedScenario(String),

    /// A save file was written by an incompatible schema version.
    #[error("unsupported save version {0}")]
    UnsupportedSaveVersion(u8),

    /// A save file parsed but its contents are internally inconsistent.
    #[error("corrupt save data: {0}")]
    CorruptSave(String),

    /// Filesystem failure while reading or writing a save.
    #[error("save I/O failed")]
    Io(#[from] std::io::Error),

    /// Serialization failure while writing a save.
    #[error("save serialization failed")]
    Serde(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimulationError>;
