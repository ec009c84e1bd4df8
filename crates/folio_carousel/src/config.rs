//! Carousel tuning
//!
//! All values are feel, not correctness: changing them changes how the
//! carousel responds, never whether its invariants hold. Defaults reproduce
//! the production site.
//!
//! ```toml
//! drag_threshold_px = 150.0
//! swipe_debounce_ms = 300
//!
//! [visual]
//! base_spacing = 80.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Gesture and timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarouselConfig {
    /// Horizontal drag distance a swipe must exceed to commit (px)
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold_px: f32,
    /// Minimum gap between a commit and the next swipe commit (ms)
    #[serde(default = "default_swipe_debounce")]
    pub swipe_debounce_ms: u32,
    /// Minimum gap between a commit and the next wheel commit (ms)
    #[serde(default = "default_wheel_debounce")]
    pub wheel_debounce_ms: u32,
    /// Horizontal wheel delta a tick must exceed to commit
    #[serde(default = "default_wheel_threshold")]
    pub wheel_threshold: f32,
    /// Settle time after a commit during which gestures cannot commit (ms)
    #[serde(default = "default_cooldown")]
    pub transition_cooldown_ms: u32,
    #[serde(default)]
    pub visual: VisualConfig,
}

fn default_drag_threshold() -> f32 {
    150.0
}

fn default_swipe_debounce() -> u32 {
    300
}

fn default_wheel_debounce() -> u32 {
    400
}

fn default_wheel_threshold() -> f32 {
    50.0
}

fn default_cooldown() -> u32 {
    600
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: default_drag_threshold(),
            swipe_debounce_ms: default_swipe_debounce(),
            wheel_debounce_ms: default_wheel_debounce(),
            wheel_threshold: default_wheel_threshold(),
            transition_cooldown_ms: default_cooldown(),
            visual: VisualConfig::default(),
        }
    }
}

/// Stacked-card layout parameters consumed by the visual-state function
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisualConfig {
    /// Horizontal distance between neighboring cards (px)
    #[serde(default = "default_base_spacing")]
    pub base_spacing: f32,
    /// Vertical drop per step away from center (px)
    #[serde(default = "default_vertical_step")]
    pub vertical_step: f32,
    /// Scale lost per step away from center
    #[serde(default = "default_scale_step")]
    pub scale_step: f32,
    /// Smallest scale any card is drawn at
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
    /// Opacity of the immediate neighbors before the per-step falloff
    #[serde(default = "default_neighbor_opacity")]
    pub neighbor_opacity: f32,
    /// Opacity lost per step away from center
    #[serde(default = "default_opacity_step")]
    pub opacity_step: f32,
    /// Lowest opacity any off-center card is drawn at
    #[serde(default = "default_opacity_floor")]
    pub opacity_floor: f32,
    /// Fraction of the live drag delta applied to nearby cards
    #[serde(default = "default_drag_damping")]
    pub drag_damping: f32,
    /// Cards within this many steps of center follow the drag
    #[serde(default = "default_drag_influence")]
    pub drag_influence: u32,
    /// Y-axis rotation per step (degrees)
    #[serde(default = "default_rotation_step")]
    pub rotation_step_deg: f32,
}

fn default_base_spacing() -> f32 {
    80.0
}

fn default_vertical_step() -> f32 {
    10.0
}

fn default_scale_step() -> f32 {
    0.08
}

fn default_min_scale() -> f32 {
    0.85
}

fn default_neighbor_opacity() -> f32 {
    0.7
}

fn default_opacity_step() -> f32 {
    0.15
}

fn default_opacity_floor() -> f32 {
    0.3
}

fn default_drag_damping() -> f32 {
    0.3
}

fn default_drag_influence() -> u32 {
    2
}

fn default_rotation_step() -> f32 {
    -3.0
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            base_spacing: default_base_spacing(),
            vertical_step: default_vertical_step(),
            scale_step: default_scale_step(),
            min_scale: default_min_scale(),
            neighbor_opacity: default_neighbor_opacity(),
            opacity_step: default_opacity_step(),
            opacity_floor: default_opacity_floor(),
            drag_damping: default_drag_damping(),
            drag_influence: default_drag_influence(),
            rotation_step_deg: default_rotation_step(),
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a positive number, got {value}")))
    }
}

fn require_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a value in (0, 1], got {value}")))
    }
}

impl CarouselConfig {
    /// Parse from TOML and validate
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CarouselConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file and validate
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("drag_threshold_px", self.drag_threshold_px)?;
        require_positive("wheel_threshold", self.wheel_threshold)?;
        self.visual.validate()
    }
}

impl VisualConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("visual.base_spacing", self.base_spacing)?;
        require_unit("visual.min_scale", self.min_scale)?;
        require_unit("visual.neighbor_opacity", self.neighbor_opacity)?;
        require_unit("visual.opacity_floor", self.opacity_floor)?;

        if !(self.vertical_step.is_finite() && self.vertical_step >= 0.0) {
            return Err(invalid("visual.vertical_step", "expected a non-negative number"));
        }
        if !(self.scale_step.is_finite() && self.scale_step >= 0.0) {
            return Err(invalid("visual.scale_step", "expected a non-negative number"));
        }
        if !(self.opacity_step.is_finite() && self.opacity_step >= 0.0) {
            return Err(invalid("visual.opacity_step", "expected a non-negative number"));
        }
        if !(self.drag_damping.is_finite() && self.drag_damping >= 0.0) {
            return Err(invalid("visual.drag_damping", "expected a non-negative number"));
        }
        if !self.rotation_step_deg.is_finite() {
            return Err(invalid("visual.rotation_step_deg", "expected a finite number"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = CarouselConfig::from_toml_str("").unwrap();
        assert_eq!(config, CarouselConfig::default());
        assert_eq!(config.drag_threshold_px, 150.0);
        assert_eq!(config.swipe_debounce_ms, 300);
        assert_eq!(config.wheel_debounce_ms, 400);
        assert_eq!(config.wheel_threshold, 50.0);
        assert_eq!(config.transition_cooldown_ms, 600);
        assert_eq!(config.visual.base_spacing, 80.0);
    }

    #[test]
    fn test_partial_override() {
        let config = CarouselConfig::from_toml_str(
            r#"
            drag_threshold_px = 90.0

            [visual]
            min_scale = 0.92
            "#,
        )
        .unwrap();

        assert_eq!(config.drag_threshold_px, 90.0);
        assert_eq!(config.swipe_debounce_ms, 300);
        assert_eq!(config.visual.min_scale, 0.92);
        assert_eq!(config.visual.base_spacing, 80.0);
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let err = CarouselConfig::from_toml_str("drag_threshold_px = 0.0").unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "drag_threshold_px"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_min_scale_above_one() {
        let err = CarouselConfig::from_toml_str("[visual]\nmin_scale = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "visual.min_scale",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_keys_are_parse_errors() {
        let err = CarouselConfig::from_toml_str("drag_treshold = 10.0").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = CarouselConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(CarouselConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = CarouselConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
