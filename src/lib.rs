//! High-DPI scaling for platforms without native support.
//!
//! The toolkit works in logical, device-independent pixels. The display works
//! in device pixels. The two are related by a scale factor configured through
//! environment variables (see [`config::vars`]); setting it to 2.0 makes the
//! toolkit see half of the device geometry.
//!
//! Integer factors work best. Non-integer factors round integer geometry and
//! may produce off-by-one glitches.

pub mod config;
pub mod desktop;
pub mod geometry;
pub mod region;
pub mod scale;
pub mod scaling;

pub use config::{ConfigError, EmulatedScaling, ScaleConfig};
pub use desktop::{Desktop, PlatformWindow, Screen, ScreenId, Window, WindowId};
pub use geometry::{Margins, Point, Rect, Size, Unit};
pub use region::Region;
pub use scale::{Converter, Scalable};
pub use scaling::{
    is_scaled, scale_factor, to_device_independent_pixels, to_device_pixels, HighDpiScaling,
    ScalingError,
};
