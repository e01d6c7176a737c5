//! Scale configuration read from environment variables.
//!
//! Two independent sources exist. [`ScaleConfig`] is the primary one and may
//! carry either a ratio or a target DPI. [`EmulatedScaling`] is the older
//! single-variable switch that the free conversion functions use.

use crate::scale::{approx_eq, Converter};

/// The DPI that corresponds to a scale ratio of 1.0.
pub const BASE_DPI: f64 = 96.0;

/// Environment variable names, in lookup priority order.
pub mod vars {
    /// Absolute scale ratio.
    pub const SCALE_FACTOR: &str = "HIDPI_SCALE_FACTOR";
    /// Target DPI, converted to a ratio against [`super::BASE_DPI`].
    pub const SCALE_DPI: &str = "HIDPI_SCALE_DPI";
    /// Alternate spelling of [`SCALE_FACTOR`].
    pub const DEVICE_PIXEL_RATIO: &str = "HIDPI_DEVICE_PIXEL_RATIO";
    /// Alternate spelling of [`SCALE_DPI`].
    pub const TARGET_DPI: &str = "HIDPI_TARGET_DPI";
    /// Enables emulated scaling with its own factor.
    pub const EMULATED_SCALE_FACTOR: &str = "HIDPI_EMULATED_SCALE_FACTOR";
}

/// `(variable, is_dpi)` pairs in priority order.
const SOURCES: [(&str, bool); 4] = [
    (vars::SCALE_FACTOR, false),
    (vars::SCALE_DPI, true),
    (vars::DEVICE_PIXEL_RATIO, false),
    (vars::TARGET_DPI, true),
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("The value is empty.")]
    Empty,

    #[error("The value {0:?} is not a number.")]
    Unparsable(String),

    #[error("The value {0} is not finite.")]
    NonFinite(f64),

    #[error("The value {0} is not greater than zero.")]
    NonPositive(f64),
}

/// Parses a scale value. Surrounding whitespace is ignored; anything that is
/// not a finite, strictly positive number is rejected.
pub fn parse_factor(raw: &str) -> Result<f64, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| ConfigError::Unparsable(trimmed.to_owned()))?;

    if !value.is_finite() {
        return Err(ConfigError::NonFinite(value));
    }

    if value <= 0.0 {
        return Err(ConfigError::NonPositive(value));
    }

    Ok(value)
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// The primary scale configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleConfig {
    /// The configured value. A ratio, or a target DPI when `scale_dpi` is set.
    pub factor: f64,
    pub scale_dpi: bool,
    pub is_factor_mode: bool,
    /// Whether [`Self::ratio`] differs from 1.0.
    pub active: bool,
    /// The variable the value was read from, if any.
    pub source: Option<&'static str>,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            factor: 1.0,
            scale_dpi: false,
            is_factor_mode: true,
            active: false,
            source: None,
        }
    }
}

impl ScaleConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    /// Reads the configuration through `lookup`, trying each source in
    /// priority order. The first valid value wins.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        for (name, is_dpi) in SOURCES {
            let Some(raw) = lookup(name) else {
                continue;
            };

            match parse_factor(&raw) {
                Ok(value) => {
                    let config = if is_dpi {
                        Self::with_dpi(value)
                    } else {
                        Self::with_factor(value)
                    };

                    tracing::debug!(
                        "scale configuration from {}: factor {} (dpi: {})",
                        name,
                        value,
                        is_dpi
                    );

                    return Self {
                        source: Some(name),
                        ..config
                    };
                }
                Err(e) => {
                    tracing::debug!("ignoring {}: {}", name, e);
                }
            }
        }

        Self::default()
    }

    /// A configuration with an absolute ratio. `factor` must be positive.
    pub(crate) fn with_factor(factor: f64) -> Self {
        debug_assert!(factor > 0.0);

        Self {
            factor,
            scale_dpi: false,
            is_factor_mode: true,
            active: !approx_eq(factor, 1.0),
            source: None,
        }
    }

    /// A configuration targeting `dpi`. `dpi` must be positive.
    pub(crate) fn with_dpi(dpi: f64) -> Self {
        debug_assert!(dpi > 0.0);

        Self {
            factor: dpi,
            scale_dpi: true,
            is_factor_mode: false,
            active: !approx_eq(dpi / BASE_DPI, 1.0),
            source: None,
        }
    }

    /// The effective multiplier.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.scale_dpi {
            self.factor / BASE_DPI
        } else {
            self.factor
        }
    }
}

/// Emulated high-DPI scaling, switched on by a single variable.
///
/// Any valid value turns scaling on, including 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmulatedScaling {
    scaled: bool,
    factor: f64,
}

impl Default for EmulatedScaling {
    fn default() -> Self {
        Self {
            scaled: false,
            factor: 1.0,
        }
    }
}

impl EmulatedScaling {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let Some(raw) = lookup(vars::EMULATED_SCALE_FACTOR) else {
            return Self::default();
        };

        match parse_factor(&raw) {
            Ok(factor) => {
                tracing::debug!("emulated scaling enabled: factor {}", factor);
                Self {
                    scaled: true,
                    factor,
                }
            }
            Err(e) => {
                tracing::debug!("ignoring {}: {}", vars::EMULATED_SCALE_FACTOR, e);
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn is_scaled(&self) -> bool {
        self.scaled
    }

    /// The scale factor, or 1.0 when scaling is off.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.factor
    }

    /// A converter that scales whenever emulation is on, even at 1.0.
    #[must_use]
    pub fn converter(&self) -> Converter {
        Converter::with_flag(self.scaled, self.factor)
    }
}
