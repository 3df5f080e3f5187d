//! End-to-end frame scenarios through the public API

use std::time::Duration;

use frame_ui::app::{FrameDriver, Placement};
use frame_ui::camera::{AxisLimits, Camera};
use frame_ui::draw::{DrawList, MonospaceMetrics, TextStyle};
use frame_ui::fuzzy::SubsequenceFilter;
use frame_ui::input::{Control, InputSnapshot, KeyCode, KeyStatus, PointerSample, RawEvent};
use frame_ui::widgets::{MultiBox, RollingList, Slider, Widget};
use glam::Vec2;

const FRAME: Duration = Duration::from_millis(16);
const AWAY: Vec2 = Vec2::new(1000.0, 1000.0);

fn tick(driver: &mut FrameDriver, events: Vec<RawEvent>, at: Vec2) -> bool {
    driver
        .tick(events, PointerSample::at(at), FRAME, &MonospaceMetrics)
        .running
}

fn tap(driver: &mut FrameDriver, key: KeyCode) {
    tick(driver, vec![RawEvent::KeyDown(key)], AWAY);
    tick(driver, vec![RawEvent::KeyUp(key)], AWAY);
}

#[test]
fn test_escape_lifecycle() {
    let mut input = InputSnapshot::new();
    let mut frame = |events: Vec<RawEvent>| {
        assert!(input.refresh(events, PointerSample::at(Vec2::ZERO)));
        input.status(Control::Escape)
    };

    assert_eq!(frame(vec![RawEvent::KeyDown(KeyCode::Escape)]), KeyStatus::Pressed);
    assert_eq!(frame(vec![]), KeyStatus::Down);
    assert_eq!(frame(vec![RawEvent::KeyUp(KeyCode::Escape)]), KeyStatus::Released);
    assert_eq!(frame(vec![]), KeyStatus::Up);
}

#[test]
fn test_quit_stops_before_later_events() {
    let mut input = InputSnapshot::new();
    let running = input.refresh(
        vec![RawEvent::Quit, RawEvent::KeyDown(KeyCode::Space)],
        PointerSample::at(Vec2::ZERO),
    );
    assert!(!running);
    assert_eq!(input.status(Control::Space), KeyStatus::Up);
}

#[test]
fn test_camera_zoom_keeps_anchor() {
    let mut camera = Camera::new(Vec2::new(800.0, 600.0)).with_position(Vec2::ZERO);
    let anchor = Vec2::new(400.0, 300.0);
    let world = camera.screen_to_world(anchor);

    camera.zoom(1.0, anchor);

    assert!((camera.scale() - 2f32.powf(0.25)).abs() < 1e-5);
    assert!((camera.world_to_screen(world) - anchor).length() < 1e-3);
    assert!(camera.changed());
}

#[test]
fn test_camera_moves_stay_inside_limits() {
    let limits = AxisLimits {
        left: Some(-100.0),
        right: Some(100.0),
        top: Some(-100.0),
        bottom: Some(100.0),
    };
    let mut camera = Camera::new(Vec2::new(100.0, 100.0)).with_limits(limits);
    for delta in [
        Vec2::new(500.0, 0.0),
        Vec2::new(-37.5, 12.0),
        Vec2::new(-900.0, -900.0),
        Vec2::new(60.0, 250.0),
    ] {
        camera.move_by(delta);
        let (left_top, right_bottom) = (camera.left_top(), camera.right_bottom());
        assert!(left_top.x >= -100.0 && left_top.y >= -100.0);
        assert!(right_bottom.x <= 100.0 + 1e-4 && right_bottom.y <= 100.0 + 1e-4);
    }
}

#[test]
fn test_slider_drag_snaps_half_away_from_zero() {
    let mut driver = FrameDriver::new();
    // Track spans x in [100, 200]
    driver.register(
        "slider",
        Placement::Screen,
        Box::new(Slider::new(
            Vec2::new(150.0, 50.0),
            Vec2::new(100.0, 10.0),
            (0.0, 10.0),
            2.0,
        )),
    );

    tick(&mut driver, vec![RawEvent::MouseDown(1)], Vec2::new(153.0, 50.0));
    let slider = driver.widget::<Slider>("slider").unwrap();
    assert!((slider.raw() - 0.53).abs() < 1e-4);
    assert_eq!(slider.value(), 6.0);
}

#[test]
fn test_multi_box_keeps_one_selection() {
    let mut driver = FrameDriver::new();
    driver.register(
        "form",
        Placement::Screen,
        Box::new(MultiBox::new(Vec2::ZERO, Vec2::new(100.0, 30.0), (2, 2))),
    );

    let mut path = Vec::new();
    for _ in 0..4 {
        tap(&mut driver, KeyCode::Tab);
        path.push(driver.widget::<MultiBox>("form").unwrap().selected());
    }
    assert_eq!(path, [(1, 0), (0, 1), (1, 1), (1, 1)]);

    tick(&mut driver, vec![RawEvent::TextInput("42".into())], AWAY);
    let form = driver.widget::<MultiBox>("form").unwrap();
    assert_eq!(form.text(1, 1), "42");
    let selected = (0..2)
        .flat_map(|x| (0..2).map(move |y| (x, y)))
        .filter(|&(x, y)| form.cell(x, y).is_selected())
        .count();
    assert_eq!(selected, 1);
}

#[test]
fn test_rolling_list_search_navigate_confirm() {
    let words = ["apple", "banana", "grape", "apricot"]
        .map(String::from)
        .to_vec();
    let mut driver = FrameDriver::new();
    driver.register(
        "list",
        Placement::Screen,
        Box::new(RollingList::new(
            Vec2::ZERO,
            100.0,
            words,
            TextStyle::new(20.0),
            &MonospaceMetrics,
        )),
    );
    driver
        .widget_mut::<RollingList>("list")
        .unwrap()
        .update_words("ap", &SubsequenceFilter);
    assert_eq!(
        driver.widget::<RollingList>("list").unwrap().words(),
        ["apple", "apricot", "grape"]
    );

    tap(&mut driver, KeyCode::Down);
    assert_eq!(
        driver.widget::<RollingList>("list").unwrap().selected_text(),
        Some("apple")
    );

    let second_row = Vec2::new(10.0, 30.0);
    tick(&mut driver, vec![RawEvent::MouseDown(1)], second_row);
    tick(&mut driver, vec![RawEvent::MouseUp(1)], second_row);
    tick(&mut driver, vec![RawEvent::MouseDown(1)], second_row);
    let list = driver.widget::<RollingList>("list").unwrap();
    assert_eq!(list.selected_text(), Some("apricot"));
    assert!(list.confirm_selection());
}

#[test]
fn test_driver_redraw_and_quit() {
    let mut driver = FrameDriver::new()
        .with_camera(Camera::new(Vec2::new(800.0, 600.0)))
        .with_quit_on_escape(true);
    driver.register(
        "slider",
        Placement::World,
        Box::new(Slider::new(Vec2::ZERO, Vec2::new(100.0, 10.0), (0.0, 1.0), 0.1)),
    );

    let first = driver.tick(vec![], PointerSample::at(AWAY), FRAME, &MonospaceMetrics);
    assert!(first.running && first.redraw);
    let idle = driver.tick(vec![], PointerSample::at(AWAY), FRAME, &MonospaceMetrics);
    assert!(!idle.redraw);

    // Wheel zoom moves the camera, so world widgets need a redraw
    let zoomed = driver.tick(
        vec![RawEvent::MouseWheel(1.0)],
        PointerSample::at(Vec2::new(400.0, 300.0)),
        FRAME,
        &MonospaceMetrics,
    );
    assert!(zoomed.redraw);

    let mut list = DrawList::new();
    driver.draw(&mut list);
    assert!(!list.is_empty());
    let slider = driver.widget::<Slider>("slider").unwrap();
    assert!(!slider.changed());

    assert!(!tick(&mut driver, vec![RawEvent::KeyDown(KeyCode::Escape)], AWAY));
}
