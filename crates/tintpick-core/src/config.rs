//! Picker configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::color::Color;
use crate::error::{PickerError, PickerResult};
use crate::palette::Palette;

/// Row width of every swatch grid in the picker.
pub const COLORS_PER_ROW: usize = 5;
/// Maximum number of custom colors offered.
pub const MAX_CUSTOM_COLORS: usize = 5;
/// Default active shade for stroke pickers.
pub const DEFAULT_STROKE_SHADE: usize = 4;
/// Default active shade for background pickers.
pub const DEFAULT_BACKGROUND_SHADE: usize = 1;
/// Offset of the eyedropper preview marker from the pointer.
pub const PREVIEW_OFFSET: f64 = 20.0;
/// Delay before refocusing the hex field after an eyedropper click.
pub const REFOCUS_DELAY_MS: u64 = 500;

/// Behavior settings for a picker instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Grid row width.
    pub colors_per_row: usize,
    /// Bound on the custom color list.
    pub max_custom_colors: usize,
    /// One key per base palette entry, in palette order.
    pub hotkeys: Vec<char>,
    /// Key that toggles the eyedropper.
    pub eyedropper_key: char,
    pub default_stroke_shade: usize,
    pub default_background_shade: usize,
    /// Color chosen when tabbing into the base colors with a non-palette color.
    pub fallback_color: Color,
    /// Eyedropper marker offset from the pointer, in client pixels.
    pub preview_offset: f64,
    pub refocus_delay_ms: u64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            colors_per_row: COLORS_PER_ROW,
            max_custom_colors: MAX_CUSTOM_COLORS,
            hotkeys: "qwertasdfgzxcvb".chars().collect(),
            eyedropper_key: 'i',
            default_stroke_shade: DEFAULT_STROKE_SHADE,
            default_background_shade: DEFAULT_BACKGROUND_SHADE,
            fallback_color: Color::from_rgb(0x1e, 0x1e, 0x1e),
            preview_offset: PREVIEW_OFFSET,
            refocus_delay_ms: REFOCUS_DELAY_MS,
        }
    }
}

impl PickerConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> PickerResult<Self> {
        let config: PickerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> PickerResult<()> {
        if self.colors_per_row == 0 {
            return Err(PickerError::InvalidConfig(
                "colors_per_row must be at least 1".to_string(),
            ));
        }
        if !self.preview_offset.is_finite() {
            return Err(PickerError::InvalidConfig(
                "preview_offset must be finite".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for &key in &self.hotkeys {
            if !seen.insert(key) {
                return Err(PickerError::DuplicateHotkey(key));
            }
        }
        if seen.contains(&self.eyedropper_key) {
            return Err(PickerError::DuplicateHotkey(self.eyedropper_key));
        }

        Ok(())
    }

    /// Check the config against the palette it will drive.
    pub fn validate_for(&self, palette: &Palette) -> PickerResult<()> {
        self.validate()?;
        if self.hotkeys.len() < palette.len() {
            log::warn!(
                "{} hotkeys for {} palette entries; trailing entries have no hotkey",
                self.hotkeys.len(),
                palette.len()
            );
        }
        if self.hotkeys.len() > palette.len() {
            return Err(PickerError::HotkeyCountMismatch {
                bindings: self.hotkeys.len(),
                entries: palette.len(),
            });
        }
        Ok(())
    }

    pub fn refocus_delay(&self) -> Duration {
        Duration::from_millis(self.refocus_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_default_palette() {
        let config = PickerConfig::default();
        assert!(config.validate_for(&Palette::default()).is_ok());
        assert_eq!(config.hotkeys.len(), 15);
        assert_eq!(config.refocus_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_from_json_partial() {
        let config = PickerConfig::from_json(r#"{"colors_per_row": 4, "eyedropper_key": "p"}"#).unwrap();
        assert_eq!(config.colors_per_row, 4);
        assert_eq!(config.eyedropper_key, 'p');
        assert_eq!(config.max_custom_colors, MAX_CUSTOM_COLORS);
    }

    #[test]
    fn test_rejects_zero_row_width() {
        let result = PickerConfig::from_json(r#"{"colors_per_row": 0}"#);
        assert!(matches!(result, Err(PickerError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_duplicate_hotkeys() {
        let result = PickerConfig::from_json(r#"{"hotkeys": ["q", "w", "q"]}"#);
        assert!(matches!(result, Err(PickerError::DuplicateHotkey('q'))));

        // The eyedropper key may not shadow a palette hotkey
        let result = PickerConfig::from_json(r#"{"eyedropper_key": "q"}"#);
        assert!(matches!(result, Err(PickerError::DuplicateHotkey('q'))));
    }

    #[test]
    fn test_too_many_hotkeys() {
        let palette = Palette::from_json(r##"{"a": "#000", "b": "#fff"}"##).unwrap();
        let config = PickerConfig {
            hotkeys: vec!['q', 'w', 'e'],
            ..Default::default()
        };
        assert!(matches!(
            config.validate_for(&palette),
            Err(PickerError::HotkeyCountMismatch { bindings: 3, entries: 2 })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            PickerConfig::from_json("{"),
            Err(PickerError::Serialization(_))
        ));
    }
}
