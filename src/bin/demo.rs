//! Widget gallery: a searchable list, a form grid and world-placed controls

use anyhow::Result;
use glam::Vec2;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use frame_ui::app::{App, AppConfig, FrameDriver, Placement};
use frame_ui::camera::Camera;
use frame_ui::draw::{MonospaceMetrics, TextStyle, color};
use frame_ui::fuzzy::SubsequenceFilter;
use frame_ui::widgets::{Button, CircularPad, MultiBox, RollingList, Slider, TextBox, Widget};

const FRUITS: &[&str] = &[
    "apple", "apricot", "banana", "blackberry", "blueberry", "cherry", "coconut", "fig",
    "grape", "grapefruit", "kiwi", "lemon", "lime", "mango", "melon", "nectarine", "orange",
    "papaya", "peach", "pear", "pineapple", "plum", "raspberry", "strawberry",
];

fn build_driver(config: &AppConfig) -> FrameDriver {
    let resolution = Vec2::new(config.window.width as f32, config.window.height as f32);
    let timing = &config.timing;
    let (text_threshold, text_interval) = timing.text_repeat();
    let (list_threshold, list_interval) = timing.list_repeat();

    let mut driver = FrameDriver::new()
        .with_camera(Camera::from_config(resolution, &config.camera))
        .with_quit_on_escape(true);

    driver.register(
        "search",
        Placement::Screen,
        Box::new(
            TextBox::new(Vec2::new(20.0, 20.0), Vec2::new(200.0, 30.0))
                .with_placeholder("search")
                .with_auto_size(true)
                .with_repeat(text_threshold, text_interval)
                .with_blink_period(timing.blink_period()),
        ),
    );
    driver.register(
        "fruits",
        Placement::Screen,
        Box::new(
            RollingList::new(
                Vec2::new(20.0, 60.0),
                200.0,
                FRUITS.iter().map(|fruit| fruit.to_string()).collect(),
                TextStyle::new(20.0),
                &MonospaceMetrics,
            )
            .with_repeat(list_threshold, list_interval),
        ),
    );

    let cell = TextBox::new(Vec2::ZERO, Vec2::new(90.0, 30.0))
        .with_placeholder("")
        .with_repeat(text_threshold, text_interval)
        .with_blink_period(timing.blink_period());
    driver.register(
        "form",
        Placement::Screen,
        Box::new(MultiBox::with_template(
            Vec2::new(280.0, 20.0),
            Vec2::new(90.0, 30.0),
            (3, 2),
            &cell,
        )),
    );

    driver.register(
        "confirm",
        Placement::World,
        Box::new(
            Button::new(Vec2::new(-60.0, -140.0), Vec2::new(120.0, 50.0), color::INDIAN_RED)
                .with_label("confirm"),
        ),
    );
    driver.register(
        "volume",
        Placement::World,
        Box::new(Slider::new(Vec2::new(0.0, -40.0), Vec2::new(200.0, 10.0), (0.0, 10.0), 1.0)),
    );
    driver.register(
        "stick",
        Placement::World,
        Box::new(CircularPad::new(
            Vec2::new(0.0, 80.0),
            50.0,
            color::SKY_BLUE,
            color::WHEAT,
        )),
    );
    driver
}

/// Wires widgets together once they updated
fn on_frame(driver: &mut FrameDriver) {
    // The form always holds a focused cell, so it hides while the search
    // box takes the keyboard
    let searching = driver
        .widget::<TextBox>("search")
        .is_some_and(TextBox::is_selected);
    if let Some(form) = driver.widget_mut::<MultiBox>("form")
        && form.visible() == searching
    {
        form.set_visible(!searching);
    }

    let query = driver
        .widget::<TextBox>("search")
        .filter(|search| search.text_changed())
        .map(|search| search.text().to_string());
    if let Some(query) = query
        && let Some(fruits) = driver.widget_mut::<RollingList>("fruits")
    {
        fruits.update_words(&query, &SubsequenceFilter);
    }

    if let Some(fruits) = driver.widget::<RollingList>("fruits")
        && fruits.confirm_selection()
    {
        info!(fruit = ?fruits.selected_text(), "Fruit picked");
    }

    if driver
        .widget::<Button>("confirm")
        .is_some_and(Button::is_released)
        && let Some(form) = driver.widget::<MultiBox>("form")
    {
        info!(complete = form.valid_input(), texts = ?form.texts(), "Form submitted");
    }

    if let Some(volume) = driver.widget::<Slider>("volume")
        && volume.changed()
    {
        info!(volume = volume.value(), "Volume changed");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load_from_env().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using default configuration");
        AppConfig::builtin("release")
    });

    let driver = build_driver(&config);
    App::new(config, driver).with_hook(on_frame).run()?;
    Ok(())
}
