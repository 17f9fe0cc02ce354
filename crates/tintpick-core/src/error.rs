//! Error types for picker construction and configuration.
//!
//! Interaction paths never return these: navigation, hotkeys and sampling
//! report "nothing happened" through `Option` instead.

use thiserror::Error;

/// Configuration and palette errors.
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Palette entry '{0}' has no shades")]
    EmptyShades(String),
    #[error("Duplicate palette entry: {0}")]
    DuplicatePaletteEntry(String),
    #[error("Palette is empty")]
    EmptyPalette,
    #[error("Duplicate hotkey binding: {0:?}")]
    DuplicateHotkey(char),
    #[error("{bindings} hotkey bindings for {entries} palette entries")]
    HotkeyCountMismatch { bindings: usize, entries: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for picker construction.
pub type PickerResult<T> = Result<T, PickerError>;
