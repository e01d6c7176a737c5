use hidpi::{
    config::vars, Desktop, HighDpiScaling, Margins, PlatformWindow, Point, Rect, Region, Screen,
    Size, Window,
};

#[cfg(feature = "profile")]
use tracing_subscriber::layer::SubscriberExt;

fn main() {
    #[cfg(feature = "profile")]
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(tracing_tracy::TracyLayer::new()),
    )
    .expect("set up the subscriber");

    #[cfg(not(feature = "profile"))]
    tracing_subscriber::fmt::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let scaling = HighDpiScaling::global();
    let config = scaling.config();

    println!(
        "{}: {}",
        config.source.unwrap_or("default"),
        config.factor
    );
    println!(
        "ratio {} (dpi mode: {}, active: {})",
        config.ratio(),
        config.scale_dpi,
        config.active
    );
    println!(
        "emulated ({}): scaled {}, factor {}",
        vars::EMULATED_SCALE_FACTOR,
        hidpi::is_scaled(),
        hidpi::scale_factor()
    );

    let mut desktop = Desktop::new();
    desktop.add_screen(Screen::new("primary"), &config);
    desktop.add_screen(Screen::with_dpi("secondary", 144.0), &config);

    for (_, screen) in desktop.screens() {
        println!(
            "screen {}: factor {}, {} dpi",
            screen.name,
            screen.scale_factor(),
            screen.scaled_dpi()
        );
    }

    let window = desktop.add_window(
        Window::new("demo").with_platform(PlatformWindow {
            device_pixel_ratio: 2.0,
        }),
    );

    let converter = scaling.converter_for(&desktop, Some(window));
    println!("window factor {}", converter.factor());

    let rect = Rect::<i32>::new((10, 20), (300, 200));
    println!("{:?} -> {:?}", rect, converter.to_device_pixels(rect));

    let point = Point::<f64>::new(12.5, 7.25);
    println!("{:?} -> {:?}", point, converter.to_device_pixels(point));

    let size = Size::<i32>::new(640, 480);
    println!("{:?} -> {:?}", size, converter.to_device_independent_pixels(size));

    let margins = Margins::<i32>::uniform(4);
    println!("{:?} -> {:?}", margins, converter.to_device_pixels(margins));

    let region: Region = [
        Rect::new((0, 0), (100, 100)),
        Rect::new((50, 50), (100, 100)),
    ]
    .into_iter()
    .collect();
    let device = converter.to_device_pixels(region.clone());
    println!("region area {} -> {}", region.area(), device.area());
}
