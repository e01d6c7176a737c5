//! Process-wide high-DPI scaling state and factor resolution.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use lazy_static::lazy_static;
use parking_lot::RwLock;

use crate::{
    config::{EmulatedScaling, ScaleConfig},
    desktop::{Desktop, WindowId},
    scale::{approx_eq, Converter, Scalable},
};

lazy_static! {
    static ref GLOBAL_SCALING: HighDpiScaling = HighDpiScaling::from_env();
    static ref EMULATED: EmulatedScaling = EmulatedScaling::from_env();
}

#[derive(Debug, thiserror::Error)]
pub enum ScalingError {
    #[error("The scale factor {0} is not a finite number greater than zero.")]
    InvalidFactor(f64),

    #[error("The window {0:?} does not exist.")]
    UnknownWindow(WindowId),
}

/// Scale factor state shared by every window.
///
/// The configuration is a snapshot behind a read-write lock. It only changes
/// through [`Self::set_factor`], which is expected to run while no windows
/// exist. Each change bumps [`Self::generation`].
pub struct HighDpiScaling {
    config: RwLock<ScaleConfig>,
    per_window_active: AtomicBool,
    generation: AtomicU64,
}

impl HighDpiScaling {
    #[must_use]
    pub fn new(config: ScaleConfig) -> Self {
        Self {
            config: RwLock::new(config),
            per_window_active: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ScaleConfig::from_env())
    }

    /// The process-wide instance, read from the environment on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_SCALING
    }

    #[must_use]
    pub fn config(&self) -> ScaleConfig {
        *self.config.read()
    }

    /// The global scale ratio.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.config.read().ratio()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.config.read().active
    }

    /// Whether any window has been given its own factor. Never resets.
    #[must_use]
    pub fn is_per_window_active(&self) -> bool {
        self.per_window_active.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Replaces the global factor with an absolute ratio and updates every
    /// screen. Returns `false` if the same ratio was already configured in
    /// factor mode. A DPI-mode configuration is always replaced.
    ///
    /// Changing the factor while windows exist is logged but still applied.
    #[tracing::instrument(skip(self, desktop))]
    pub fn set_factor(&self, desktop: &mut Desktop, factor: f64) -> Result<bool, ScalingError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ScalingError::InvalidFactor(factor));
        }

        let config = {
            let mut current = self.config.write();
            if current.is_factor_mode && approx_eq(current.factor, factor) {
                return Ok(false);
            }

            if desktop.has_windows() {
                tracing::warn!("scale factor changed while windows exist; existing windows keep stale geometry");
            }

            *current = ScaleConfig::with_factor(factor);
            self.generation.fetch_add(1, Ordering::AcqRel);
            *current
        };

        tracing::info!("scale factor set to {}", factor);

        for (_, screen) in desktop.screens_mut() {
            screen.update_high_dpi_scaling(&config);
        }

        Ok(true)
    }

    /// Gives `window` its own factor, multiplied with the global one.
    ///
    /// The first call switches every window to per-window resolution for the
    /// rest of the process, including windows without an override.
    pub fn set_window_factor(
        &self,
        desktop: &mut Desktop,
        window: WindowId,
        factor: f64,
    ) -> Result<(), ScalingError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ScalingError::InvalidFactor(factor));
        }

        let target = desktop
            .window_mut(window)
            .ok_or(ScalingError::UnknownWindow(window))?;

        if !self.per_window_active.swap(true, Ordering::AcqRel) {
            tracing::debug!("per-window scale factors enabled");
        }

        target.set_scale_override(factor);
        self.generation.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    /// The scale factor for `window`, or the global factor if `window` is
    /// `None` or no longer exists.
    #[must_use]
    pub fn factor_for(&self, desktop: &Desktop, window: Option<WindowId>) -> f64 {
        let config = self.config();

        let Some(window) = window.and_then(|id| desktop.window(id)) else {
            return config.ratio();
        };

        if self.is_per_window_active() {
            config.ratio() * window.scale_override().unwrap_or(1.0)
        } else if config.is_factor_mode {
            config.ratio()
        } else {
            config.ratio() / window.device_pixel_ratio()
        }
    }

    /// A converter for the global factor.
    #[must_use]
    pub fn converter(&self) -> Converter {
        let config = self.config();
        Converter::with_flag(config.active, config.ratio())
    }

    /// A converter for the factor that applies to `window`.
    #[must_use]
    pub fn converter_for(&self, desktop: &Desktop, window: Option<WindowId>) -> Converter {
        Converter::new(self.factor_for(desktop, window))
    }
}

impl Default for HighDpiScaling {
    fn default() -> Self {
        Self::new(ScaleConfig::default())
    }
}

impl std::fmt::Debug for HighDpiScaling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighDpiScaling")
            .field("config", &self.config())
            .field("per_window_active", &self.is_per_window_active())
            .field("generation", &self.generation())
            .finish()
    }
}

/// The emulated scaling settings, read from the environment on first use.
#[must_use]
pub fn emulated() -> EmulatedScaling {
    *EMULATED
}

/// Whether emulated scaling is enabled.
#[must_use]
pub fn is_scaled() -> bool {
    EMULATED.is_scaled()
}

/// The emulated scale factor, 1.0 if emulated scaling is off.
#[must_use]
pub fn scale_factor() -> f64 {
    EMULATED.scale_factor()
}

fn emulated_converter() -> Converter {
    EMULATED.converter()
}

/// Converts `value` from logical to device pixels with the emulated factor.
#[must_use]
pub fn to_device_pixels<T: Scalable>(value: T) -> T {
    emulated_converter().to_device_pixels(value)
}

/// Converts `value` from device to logical pixels with the emulated factor.
#[must_use]
pub fn to_device_independent_pixels<T: Scalable>(value: T) -> T {
    emulated_converter().to_device_independent_pixels(value)
}
