//! Registry behavior driven through the headless backend

use simple_window::backend::{HeadlessBackend, HeadlessControl};
use simple_window::config::{MIN_HEIGHT, MIN_WIDTH};
use simple_window::prelude::*;
use std::path::PathBuf;

fn setup() -> (WindowManager<HeadlessBackend>, HeadlessControl) {
    simple_window::logging::init_for_tests();
    let backend = HeadlessBackend::new();
    let control = backend.control();
    (WindowManager::with_backend(backend), control)
}

#[test]
fn show_creates_window_with_configured_properties() {
    let (mut windows, control) = setup();
    windows.initialize(
        "main",
        WindowConfig::new()
            .with_size(640, 480)
            .with_position(20, 30)
            .with_title_bar_color(Rgb::new(10, 20, 30))
            .with_resizable(false)
            .with_top_most(true),
    );

    windows.show("main", None).unwrap();

    let state = control.state("main").unwrap();
    assert_eq!(state.size, (640, 480));
    assert_eq!(state.position, (20, 30));
    assert_eq!(state.title_bar_color, Some(Rgb::new(10, 20, 30)));
    assert!(!state.resizable);
    assert!(state.top_most);
    assert!(state.foreground);
    assert_eq!(windows.open_state("main").unwrap(), OpenState::Open);
    assert_eq!(control.poll_count(), 1);
}

#[test]
fn show_without_size_uses_minimum_defaults() {
    let (mut windows, control) = setup();
    windows.initialize("tiny", WindowConfig::new().with_foreground(false));
    windows.show("tiny", None).unwrap();

    let state = control.state("tiny").unwrap();
    assert_eq!(state.size, (MIN_WIDTH, MIN_HEIGHT));
    assert_eq!(state.position, (0, 0));
    assert!(!state.foreground);
}

#[test]
fn show_stretches_frame_to_client_area() {
    let (mut windows, control) = setup();
    windows.initialize("video", WindowConfig::new().with_size(320, 240));

    let frame = Frame::solid(64, 48, [1, 2, 3]).unwrap();
    windows.show("video", Some(&frame)).unwrap();
    windows.show("video", Some(&frame)).unwrap();

    let state = control.state("video").unwrap();
    assert_eq!(state.frames_presented, 2);
    assert_eq!(state.last_frame, Some((320, 240)));
}

#[test]
fn minimized_window_skips_frames_but_polls() {
    let (mut windows, control) = setup();
    windows.initialize("video", WindowConfig::new().with_minimized(true));

    let frame = Frame::solid(8, 8, [0, 0, 0]).unwrap();
    windows.show("video", Some(&frame)).unwrap();

    assert!(windows.minimized("video").unwrap());
    assert_eq!(control.state("video").unwrap().frames_presented, 0);
    assert_eq!(control.poll_count(), 1);

    control.set_user_minimized("video", false);
    windows.show("video", Some(&frame)).unwrap();
    assert_eq!(control.state("video").unwrap().frames_presented, 1);
}

#[test]
fn user_close_keeps_window_closed() {
    let (mut windows, control) = setup();
    windows.initialize("main", WindowConfig::new());
    windows.show("main", None).unwrap();

    control.request_close("main");
    windows.show("main", None).unwrap();

    assert_eq!(windows.open_state("main").unwrap(), OpenState::ClosedByUser);
    assert!(!control.state("main").unwrap().alive);

    windows.show("main", None).unwrap();
    assert_eq!(control.created_count(), 1);
    assert_eq!(windows.open_state("main").unwrap(), OpenState::ClosedByUser);
}

#[test]
fn undestroyable_window_is_recreated_after_user_close() {
    let (mut windows, control) = setup();
    windows.initialize(
        "hud",
        WindowConfig::new().with_size(400, 300).with_undestroyable(true),
    );
    windows.show("hud", None).unwrap();
    windows.set_title_bar_color("hud", Rgb::new(200, 0, 0)).unwrap();

    control.request_close("hud");
    windows.show("hud", None).unwrap();

    assert_eq!(control.created_count(), 2);
    assert_eq!(windows.open_state("hud").unwrap(), OpenState::Open);
    let state = control.state("hud").unwrap();
    assert!(state.alive);
    assert!(!state.close_requested);
    assert_eq!(state.size, (400, 300));
    assert_eq!(state.title_bar_color, Some(Rgb::new(200, 0, 0)));
}

#[test]
fn close_by_code_reopens_on_next_show() {
    let (mut windows, control) = setup();
    windows.initialize("main", WindowConfig::new());
    windows.show("main", None).unwrap();

    windows.close("main").unwrap();
    assert_eq!(windows.open_state("main").unwrap(), OpenState::ClosedByCode);
    assert_eq!(windows.handle("main").unwrap(), None);

    windows.show("main", None).unwrap();
    assert_eq!(control.created_count(), 2);
    assert!(windows.handle("main").unwrap().is_some());
}

#[test]
fn set_open_toggles_window() {
    let (mut windows, control) = setup();
    windows.initialize("main", WindowConfig::new());

    windows.set_open("main", true).unwrap();
    windows.set_open("main", true).unwrap();
    assert_eq!(control.created_count(), 1);

    windows.set_open("main", false).unwrap();
    assert!(!control.state("main").unwrap().alive);
    assert_eq!(windows.open_state("main").unwrap(), OpenState::ClosedByCode);
}

#[test]
fn set_size_keeps_missing_axis_and_clamps() {
    let (mut windows, control) = setup();
    windows.initialize("main", WindowConfig::new().with_size(500, 400));
    windows.show("main", None).unwrap();

    windows.set_size("main", Some(800), None).unwrap();
    assert_eq!(control.state("main").unwrap().size, (800, 400));

    windows.set_size("main", None, Some(10)).unwrap();
    assert_eq!(windows.size("main").unwrap(), (800, MIN_HEIGHT));

    windows.set_size("main", Some(3), Some(3)).unwrap();
    assert_eq!(windows.size("main").unwrap(), (MIN_WIDTH, MIN_HEIGHT));
}

#[test]
fn setters_on_closed_window_apply_at_creation() {
    let (mut windows, control) = setup();
    windows.initialize("main", WindowConfig::new());

    windows.set_size("main", Some(1024), Some(768)).unwrap();
    windows.set_position("main", Some(-50), None).unwrap();
    windows.set_resizable("main", false).unwrap();
    windows.set_top_most("main", true).unwrap();
    assert_eq!(windows.size("main").unwrap(), (1024, 768));
    assert_eq!(windows.position("main").unwrap(), (-50, 0));

    windows.show("main", None).unwrap();
    let state = control.state("main").unwrap();
    assert_eq!(state.size, (1024, 768));
    assert_eq!(state.position, (-50, 0));
    assert!(!state.resizable);
    assert!(state.top_most);
}

#[test]
fn position_tracks_live_window() {
    let (mut windows, _control) = setup();
    windows.initialize("main", WindowConfig::new().with_position(5, 5));
    windows.show("main", None).unwrap();

    windows.set_position("main", None, Some(90)).unwrap();
    assert_eq!(windows.position("main").unwrap(), (5, 90));
}

#[test]
fn title_bar_color_is_clamped() {
    let (mut windows, control) = setup();
    windows.initialize("main", WindowConfig::new());
    windows.show("main", None).unwrap();

    windows.set_title_bar_color("main", (-10_i32, 128, 999)).unwrap();
    assert_eq!(windows.title_bar_color("main").unwrap(), Rgb::new(0, 128, 255));
    assert_eq!(
        control.state("main").unwrap().title_bar_color,
        Some(Rgb::new(0, 128, 255))
    );
}

#[test]
fn foreground_follows_raise_and_lower() {
    let (mut windows, control) = setup();
    windows.initialize("a", WindowConfig::new());
    windows.initialize("b", WindowConfig::new());
    windows.show("a", None).unwrap();
    windows.show("b", None).unwrap();

    assert!(windows.foreground("b").unwrap());
    assert!(!windows.foreground("a").unwrap());

    windows.set_foreground("a", true).unwrap();
    assert!(windows.foreground("a").unwrap());
    assert!(!windows.foreground("b").unwrap());

    windows.set_foreground("a", false).unwrap();
    assert!(!windows.foreground("a").unwrap());

    control.defocus_all();
    windows.close("b").unwrap();
    assert!(!windows.foreground("b").unwrap());
}

#[test]
fn minimize_and_restore() {
    let (mut windows, control) = setup();
    windows.initialize("main", WindowConfig::new());
    assert!(!windows.minimized("main").unwrap());

    windows.show("main", None).unwrap();
    windows.set_minimized("main", true).unwrap();
    assert!(control.state("main").unwrap().minimized);
    assert!(windows.minimized("main").unwrap());

    windows.set_minimized("main", false).unwrap();
    assert!(!windows.minimized("main").unwrap());
}

#[test]
fn undestroyable_flag_round_trips() {
    let (mut windows, _control) = setup();
    windows.initialize("main", WindowConfig::new());
    assert!(!windows.undestroyable("main").unwrap());
    windows.set_undestroyable("main", true).unwrap();
    assert!(windows.undestroyable("main").unwrap());
}

#[test]
fn set_icon_validates_path() {
    let (mut windows, control) = setup();
    windows.initialize("main", WindowConfig::new());
    windows.show("main", None).unwrap();

    let missing = windows.set_icon("main", "does/not/exist.ico");
    assert!(matches!(missing, Err(WindowError::InvalidIcon { .. })));

    let dir = std::env::temp_dir().join(format!("simple_window_tests_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let not_ico = dir.join("icon.bmp");
    std::fs::write(&not_ico, b"bmp").unwrap();
    assert!(windows.set_icon("main", &not_ico).is_err());
    assert_eq!(windows.icon("main").unwrap(), PathBuf::new());

    let ico = dir.join("app.ico");
    std::fs::write(&ico, b"headless backend does not decode").unwrap();
    windows.set_icon("main", &ico).unwrap();
    assert_eq!(windows.icon("main").unwrap(), ico);
    assert_eq!(control.state("main").unwrap().icon, Some(ico));

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn layout_registers_each_window_once() {
    let (mut windows, _control) = setup();
    let layout: LayoutConfig = toml::from_str(
        r#"
        [windows.left]
        x = 0
        [windows.right]
        x = 400
        undestroyable = true
        "#,
    )
    .unwrap();

    assert_eq!(windows.initialize_layout(&layout), 2);
    assert_eq!(windows.initialize_layout(&layout), 0);
    assert_eq!(windows.names(), vec!["left", "right"]);
    assert!(windows.undestroyable("right").unwrap());
}

#[test]
fn remove_destroys_and_forgets() {
    let (mut windows, control) = setup();
    windows.initialize("main", WindowConfig::new().with_size(300, 300));
    windows.show("main", None).unwrap();

    let config = windows.remove("main").unwrap();
    assert_eq!(config.width, Some(300));
    assert!(!windows.contains("main"));
    assert!(!control.state("main").unwrap().alive);
    assert!(windows.initialize("main", WindowConfig::new()));
}

#[test]
fn set_size_while_minimized_keeps_stored_axis() {
    let (mut windows, control) = setup();
    windows.initialize("main", WindowConfig::new().with_size(500, 400));
    windows.show("main", None).unwrap();

    windows.set_minimized("main", true).unwrap();
    assert_eq!(windows.size("main").unwrap(), (0, 0));
    windows.set_size("main", Some(800), None).unwrap();
    assert_eq!(control.state("main").unwrap().size, (800, 400));

    control.set_user_minimized("main", true);
    windows.set_size("main", None, Some(600)).unwrap();
    assert_eq!(control.state("main").unwrap().size, (800, 600));

    windows.set_minimized("main", false).unwrap();
    assert_eq!(windows.size("main").unwrap(), (800, 600));
}

#[test]
fn set_position_while_minimized_keeps_stored_axis() {
    let (mut windows, control) = setup();
    windows.initialize("main", WindowConfig::new().with_position(40, 60));
    windows.show("main", None).unwrap();

    control.set_user_minimized("main", true);
    assert_eq!(windows.position("main").unwrap(), (-32000, -32000));
    windows.set_position("main", None, Some(90)).unwrap();

    control.set_user_minimized("main", false);
    assert_eq!(windows.position("main").unwrap(), (40, 90));
    assert_eq!(windows.config("main").unwrap().x, Some(40));
}

#[test]
fn raise_uses_topmost_band_for_top_most_windows() {
    let (mut windows, control) = setup();
    windows.initialize("overlay", WindowConfig::new().with_top_most(true));
    windows.initialize("plain", WindowConfig::new());
    windows.show("overlay", None).unwrap();
    windows.show("plain", None).unwrap();

    assert_eq!(control.state("overlay").unwrap().raised_top_most, Some(true));
    assert_eq!(control.state("plain").unwrap().raised_top_most, Some(false));

    windows.set_top_most("plain", true).unwrap();
    windows.set_foreground("plain", true).unwrap();
    assert_eq!(control.state("plain").unwrap().raised_top_most, Some(true));

    windows.set_top_most("overlay", false).unwrap();
    windows.set_foreground("overlay", true).unwrap();
    assert_eq!(control.state("overlay").unwrap().raised_top_most, Some(false));
}

#[test]
fn user_closed_window_reopens_once_made_undestroyable() {
    let (mut windows, control) = setup();
    windows.initialize("main", WindowConfig::new());
    windows.show("main", None).unwrap();

    control.request_close("main");
    windows.show("main", None).unwrap();
    assert_eq!(windows.open_state("main").unwrap(), OpenState::ClosedByUser);

    windows.set_undestroyable("main", true).unwrap();
    windows.show("main", None).unwrap();

    assert_eq!(windows.open_state("main").unwrap(), OpenState::Open);
    assert_eq!(control.created_count(), 2);
    assert!(control.state("main").unwrap().alive);
}

#[test]
fn set_foreground_false_on_closed_window_skips_raise_at_creation() {
    let (mut windows, control) = setup();
    windows.initialize("main", WindowConfig::new());
    windows.set_foreground("main", false).unwrap();
    assert_eq!(control.created_count(), 0);

    windows.show("main", None).unwrap();

    let state = control.state("main").unwrap();
    assert!(!state.foreground);
    assert_eq!(state.raised_top_most, None);
    assert!(!windows.foreground("main").unwrap());
}
