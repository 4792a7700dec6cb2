//! Configuration for the bridge.
//!
//! ```
//! use canopy_bridge::config::{BridgeConfig, OverlayPolicy};
//!
//! // Default configuration
//! let config = BridgeConfig::default();
//! assert!(config.validate().is_ok());
//!
//! // Taller minimum overlay for large accessibility text sizes
//! let config = BridgeConfig {
//!     overlay: OverlayPolicy {
//!         min_height: 44.0,
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;

use crate::event_queue::DEFAULT_WARN_THRESHOLD;

/// Placement rules for the native text overlay, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPolicy {
    /// Added above and below the renderer's IME rect.
    pub vertical_padding: f32,
    /// Added left and right of the renderer's IME rect.
    pub horizontal_padding: f32,
    /// Smallest height the overlay is ever given.
    pub min_height: f32,
    /// Smallest width the overlay is ever given.
    pub min_width: f32,
    /// Height used when no IME rect is known.
    pub default_height: f32,
    /// Gap between the default placement and the safe-area edges.
    pub default_margin: f32,
}

impl Default for OverlayPolicy {
    fn default() -> Self {
        Self {
            vertical_padding: 2.0,
            horizontal_padding: 0.0,
            min_height: 30.0,
            min_width: 1.0,
            default_height: 44.0,
            default_margin: 8.0,
        }
    }
}

/// Configuration for the bridge.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Overlay placement rules.
    pub overlay: OverlayPolicy,
    /// Pending event count above which a stall warning is logged.
    ///
    /// Events are never dropped.
    pub queue_warn_threshold: usize,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Display refresh rate in Hz, used to predict the frame interval.
    pub max_refresh_rate: f32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            overlay: OverlayPolicy::default(),
            queue_warn_threshold: DEFAULT_WARN_THRESHOLD,
            log_filter: "error,canopy_bridge=info".to_string(),
            max_refresh_rate: 120.0,
        }
    }
}

impl BridgeConfig {
    /// Checks every numeric field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let policy = &self.overlay;
        non_negative("overlay.vertical_padding", policy.vertical_padding)?;
        non_negative("overlay.horizontal_padding", policy.horizontal_padding)?;
        non_negative("overlay.default_margin", policy.default_margin)?;
        positive("overlay.min_height", policy.min_height)?;
        positive("overlay.min_width", policy.min_width)?;
        positive("overlay.default_height", policy.default_height)?;
        positive("max_refresh_rate", self.max_refresh_rate)?;
        if self.queue_warn_threshold == 0 {
            return Err(ConfigError::ZeroQueueThreshold);
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

/// An invalid configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric field is out of range or not finite.
    InvalidValue {
        /// Field path.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// `queue_warn_threshold` is zero.
    ZeroQueueThreshold,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, value } => {
                write!(f, "invalid value {value} for {field}")
            }
            Self::ZeroQueueThreshold => write!(f, "queue_warn_threshold must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(BridgeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_negative_padding() {
        let config = BridgeConfig {
            overlay: OverlayPolicy {
                vertical_padding: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "overlay.vertical_padding",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_rejects_zero_min_height_and_refresh_rate() {
        let config = BridgeConfig {
            overlay: OverlayPolicy {
                min_height: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "overlay.min_height", .. })
        ));

        let config = BridgeConfig {
            max_refresh_rate: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_queue_threshold() {
        let config = BridgeConfig {
            queue_warn_threshold: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroQueueThreshold));
    }
}
