//! The windows and screens that scale factors are resolved against.

use std::borrow::Cow;

use slotmap::{new_key_type, SlotMap};

use crate::config::{ScaleConfig, BASE_DPI};

new_key_type! {
    /// Identifies a window within a [`Desktop`].
    pub struct WindowId;

    /// Identifies a screen within a [`Desktop`].
    pub struct ScreenId;
}

/// The platform side of a window, present once the window has been realized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformWindow {
    pub device_pixel_ratio: f64,
}

impl Default for PlatformWindow {
    fn default() -> Self {
        Self {
            device_pixel_ratio: 1.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Window {
    pub title: Cow<'static, str>,
    scale_override: Option<f64>,
    platform: Option<PlatformWindow>,
}

impl Window {
    pub fn new(title: impl Into<Cow<'static, str>>) -> Self {
        Self {
            title: title.into(),
            scale_override: None,
            platform: None,
        }
    }

    #[must_use]
    pub fn with_platform(mut self, platform: PlatformWindow) -> Self {
        self.platform = Some(platform);
        self
    }

    #[must_use]
    pub fn platform(&self) -> Option<&PlatformWindow> {
        self.platform.as_ref()
    }

    pub fn set_platform(&mut self, platform: Option<PlatformWindow>) {
        self.platform = platform;
    }

    /// The device pixel ratio reported by the platform window, or 1.0 if the
    /// window has not been realized or reports a ratio that is not a positive
    /// finite number.
    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.platform
            .map(|p| p.device_pixel_ratio)
            .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
            .unwrap_or(1.0)
    }

    #[must_use]
    pub fn scale_override(&self) -> Option<f64> {
        self.scale_override
    }

    pub(crate) fn set_scale_override(&mut self, factor: f64) {
        self.scale_override = Some(factor);
    }
}

#[derive(Clone, Debug)]
pub struct Screen {
    pub name: Cow<'static, str>,
    logical_dpi: f64,
    scale_factor: f64,
}

impl Screen {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self::with_dpi(name, BASE_DPI)
    }

    /// A screen with the given logical DPI. Values that are not a positive
    /// finite number are replaced with [`BASE_DPI`].
    pub fn with_dpi(name: impl Into<Cow<'static, str>>, logical_dpi: f64) -> Self {
        let name = name.into();
        let logical_dpi = if logical_dpi.is_finite() && logical_dpi > 0.0 {
            logical_dpi
        } else {
            tracing::warn!(
                "screen {}: invalid logical dpi {}, using {}",
                name,
                logical_dpi,
                BASE_DPI
            );
            BASE_DPI
        };

        Self {
            name,
            logical_dpi,
            scale_factor: 1.0,
        }
    }

    #[must_use]
    pub fn logical_dpi(&self) -> f64 {
        self.logical_dpi
    }

    /// The scale factor computed by the last call to
    /// [`Self::update_high_dpi_scaling`].
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    #[must_use]
    pub fn scaled_dpi(&self) -> f64 {
        self.logical_dpi * self.scale_factor
    }

    /// Recomputes the screen's scale factor. A DPI target is measured against
    /// this screen's own logical DPI.
    pub fn update_high_dpi_scaling(&mut self, config: &ScaleConfig) {
        self.scale_factor = if config.scale_dpi {
            config.factor / self.logical_dpi
        } else {
            config.factor
        };

        tracing::debug!(
            "screen {}: scale factor {} ({} dpi)",
            self.name,
            self.scale_factor,
            self.scaled_dpi()
        );
    }
}

/// The set of live windows and screens.
#[derive(Default)]
pub struct Desktop {
    windows: SlotMap<WindowId, Window>,
    screens: SlotMap<ScreenId, Screen>,
}

impl Desktop {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_window(&mut self, window: Window) -> WindowId {
        self.windows.insert(window)
    }

    pub fn remove_window(&mut self, id: WindowId) -> Option<Window> {
        self.windows.remove(id)
    }

    #[must_use]
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(id)
    }

    #[must_use]
    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(id)
    }

    #[must_use]
    pub fn has_windows(&self) -> bool {
        !self.windows.is_empty()
    }

    pub fn windows(&self) -> impl Iterator<Item = (WindowId, &Window)> {
        self.windows.iter()
    }

    /// Adds a screen, initializing its scaling from `config`.
    pub fn add_screen(&mut self, mut screen: Screen, config: &ScaleConfig) -> ScreenId {
        screen.update_high_dpi_scaling(config);
        self.screens.insert(screen)
    }

    pub fn remove_screen(&mut self, id: ScreenId) -> Option<Screen> {
        self.screens.remove(id)
    }

    #[must_use]
    pub fn screen(&self, id: ScreenId) -> Option<&Screen> {
        self.screens.get(id)
    }

    pub fn screens(&self) -> impl Iterator<Item = (ScreenId, &Screen)> {
        self.screens.iter()
    }

    pub fn screens_mut(&mut self) -> impl Iterator<Item = (ScreenId, &mut Screen)> {
        self.screens.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_pixel_ratio_defaults_to_one() {
        let mut window = Window::new("main");
        assert_eq!(window.device_pixel_ratio(), 1.0);
        assert!(window.platform().is_none());

        window.set_platform(Some(PlatformWindow {
            device_pixel_ratio: 2.0,
        }));
        assert_eq!(window.device_pixel_ratio(), 2.0);
    }

    #[test]
    fn invalid_device_pixel_ratio_falls_back() {
        for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let window = Window::new("w").with_platform(PlatformWindow {
                device_pixel_ratio: bad,
            });
            assert_eq!(window.device_pixel_ratio(), 1.0, "{bad}");
        }
    }

    #[test]
    fn invalid_logical_dpi_falls_back() {
        for bad in [0.0, -72.0, f64::NAN] {
            let mut screen = Screen::with_dpi("s", bad);
            assert_eq!(screen.logical_dpi(), BASE_DPI);

            screen.update_high_dpi_scaling(&ScaleConfig::with_dpi(192.0));
            assert_eq!(screen.scale_factor(), 2.0);
        }
    }

    #[test]
    fn window_lifetime() {
        let mut desktop = Desktop::new();
        assert!(!desktop.has_windows());

        let id = desktop.add_window(Window::new("a"));
        assert!(desktop.has_windows());
        assert_eq!(desktop.window(id).map(|w| w.title.as_ref()), Some("a"));

        desktop.remove_window(id);
        assert!(!desktop.has_windows());
        assert!(desktop.window(id).is_none());
    }

    #[test]
    fn screen_scaling() {
        let mut desktop = Desktop::new();
        let ratio = desktop.add_screen(Screen::new("a"), &ScaleConfig::with_factor(1.5));
        assert_eq!(desktop.screen(ratio).map(Screen::scale_factor), Some(1.5));

        // a DPI target is relative to each screen
        let config = ScaleConfig::with_dpi(144.0);
        let normal = desktop.add_screen(Screen::new("b"), &config);
        let dense = desktop.add_screen(Screen::with_dpi("c", 72.0), &config);
        assert_eq!(desktop.screen(normal).map(Screen::scale_factor), Some(1.5));
        assert_eq!(desktop.screen(dense).map(Screen::scale_factor), Some(2.0));
        assert_eq!(desktop.screen(dense).map(Screen::scaled_dpi), Some(144.0));
    }
}
