//! Animation configuration.
//!
//! Every knob has the landing page's value as its default, so an empty
//! document (or `AnimationConfig::default()`) reproduces the stock timing.
//!
//! ```ignore
//! let config = AnimationConfig::from_toml_str(r#"
//!     count_duration_ms = 2000
//!     locale = "de"
//! "#)?;
//! ```

use num_format::Locale;
use serde::Deserialize;

use crate::error::{AnimateError, Result};

/// Timing and trigger settings shared by stat cards and reveals.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Length of the count-up ramp.
    pub count_duration_ms: i64,
    /// Intersection margin for stat cards (negative = deeper scroll-in).
    pub stat_margin_px: f32,
    /// Intersection margin for revealed cards.
    pub reveal_margin_px: f32,
    pub reveal_duration_ms: i64,
    /// Vertical distance a revealed card slides up from.
    pub reveal_offset_px: f32,
    /// Scale a revealed card grows from (1.0 = no zoom).
    pub reveal_scale_from: f32,
    /// Tilt about the x axis a revealed card starts at, in degrees.
    pub reveal_rotate_x_from: f32,
    /// Per-item delay in a staggered grid.
    pub stagger_step_ms: f64,
    /// Locale name (`en`, `de`, `en_IN`, ...) used to group plain counts.
    pub locale: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            count_duration_ms: 1500,
            stat_margin_px: -50.0,
            reveal_margin_px: -80.0,
            reveal_duration_ms: 600,
            reveal_offset_px: 20.0,
            reveal_scale_from: 1.0,
            reveal_rotate_x_from: 0.0,
            stagger_step_ms: 50.0,
            locale: "en".to_string(),
        }
    }
}

impl AnimationConfig {
    /// Parse a TOML document, filling missing keys with defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// The grouping locale named by `locale`.
    pub fn locale(&self) -> Result<Locale> {
        Locale::from_name(self.locale.as_str())
            .map_err(|_| AnimateError::UnknownLocale(self.locale.clone()))
    }

    /// Reject durations the animators would refuse anyway, and unknown locales.
    pub fn validate(&self) -> Result<()> {
        if self.count_duration_ms <= 0 {
            return Err(AnimateError::InvalidDuration(self.count_duration_ms));
        }
        if self.reveal_duration_ms <= 0 {
            return Err(AnimateError::InvalidDuration(self.reveal_duration_ms));
        }
        self.locale()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_timing() {
        let config = AnimationConfig::default();
        assert_eq!(config.count_duration_ms, 1500);
        assert_eq!(config.stat_margin_px, -50.0);
        assert_eq!(config.reveal_margin_px, -80.0);
        assert_eq!(config.locale().unwrap(), Locale::en);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = AnimationConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnimationConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AnimationConfig::from_toml_str(
            "count_duration_ms = 2000\nlocale = \"de\"\nstat_margin_px = 0.0\n",
        )
        .unwrap();
        assert_eq!(config.count_duration_ms, 2000);
        assert_eq!(config.locale().unwrap(), Locale::de);
        assert_eq!(config.stat_margin_px, 0.0);
        assert_eq!(config.reveal_duration_ms, 600);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = AnimationConfig::from_toml_str("speed = 3").unwrap_err();
        assert!(matches!(err, AnimateError::Config(_)));
    }

    #[test]
    fn test_unknown_locale_rejected() {
        let err = AnimationConfig::from_toml_str("locale = \"xx_NOPE\"").unwrap_err();
        assert!(matches!(err, AnimateError::UnknownLocale(ref name) if name == "xx_NOPE"));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = AnimationConfig::from_toml_str("count_duration_ms = 0").unwrap_err();
        assert!(matches!(err, AnimateError::InvalidDuration(0)));
    }
}
