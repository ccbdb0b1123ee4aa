//! Window demo application
//!
//! Opens the windows listed in a layout file, streams an animated gradient
//! into each one and cycles their title-bar colors. Exits when every window
//! has been closed by the user, or after the time limit when some of them are
//! undestroyable.
//!
//! Usage: `window_demo [layout.toml|layout.ron] [seconds]`

use simple_window::prelude::*;
use std::time::{Duration, Instant};
use thiserror::Error;

const DEFAULT_LAYOUT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/windows.toml");
const DEFAULT_SECONDS: u64 = 30;
const FRAME_WIDTH: u32 = 256;
const FRAME_HEIGHT: u32 = 144;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Error, Debug)]
enum DemoError {
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    #[error("Config error: {0}")]
    Config(#[from] simple_window::ConfigError),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

struct DemoApp {
    windows: WindowManager,
    names: Vec<String>,
    start_time: Instant,
    time_limit: Duration,
}

impl DemoApp {
    fn new(layout: &LayoutConfig, time_limit: Duration) -> Result<Self, DemoError> {
        log::info!("Creating window demo...");
        let mut windows = WindowManager::new()?;
        let added = windows.initialize_layout(layout);
        log::info!("Registered {} windows", added);

        let names = windows.names().into_iter().map(str::to_string).collect();
        Ok(Self {
            windows,
            names,
            start_time: Instant::now(),
            time_limit,
        })
    }

    fn run(&mut self) -> Result<(), DemoError> {
        log::info!("Starting main loop...");
        let mut frame_index: u32 = 0;

        while self.start_time.elapsed() < self.time_limit {
            let frame = gradient_frame(frame_index)?;
            let mut any_open = false;

            for name in &self.names {
                if frame_index % 30 == 0 {
                    self.windows.set_title_bar_color(name, cycle_color(frame_index / 30))?;
                }
                self.windows.show(name, Some(&frame))?;
                any_open |= self.windows.open_state(name)? != OpenState::ClosedByUser;
            }

            if !any_open {
                log::info!("All windows closed by the user");
                break;
            }

            frame_index = frame_index.wrapping_add(1);
            std::thread::sleep(FRAME_INTERVAL);
        }

        log::info!("Demo finished after {} frames", frame_index);
        Ok(())
    }
}

/// BGR gradient that scrolls one pixel per frame
fn gradient_frame(frame_index: u32) -> Result<Frame, WindowError> {
    let mut data = Vec::with_capacity((FRAME_WIDTH * FRAME_HEIGHT * 3) as usize);
    for y in 0..FRAME_HEIGHT {
        for x in 0..FRAME_WIDTH {
            let shifted = (x + frame_index) % FRAME_WIDTH;
            data.push((shifted * 255 / FRAME_WIDTH) as u8);
            data.push((y * 255 / FRAME_HEIGHT) as u8);
            data.push(128);
        }
    }
    Frame::from_bgr(FRAME_WIDTH, FRAME_HEIGHT, data)
}

fn cycle_color(step: u32) -> Rgb {
    const PALETTE: [Rgb; 4] = [
        Rgb::new(24, 24, 32),
        Rgb::new(120, 20, 20),
        Rgb::new(20, 100, 40),
        Rgb::new(30, 60, 140),
    ];
    PALETTE[step as usize % PALETTE.len()]
}

fn load_layout(path: Option<&str>) -> Result<LayoutConfig, DemoError> {
    match path {
        Some(path) => Ok(LayoutConfig::load_from_file(path)?),
        None if std::path::Path::new(DEFAULT_LAYOUT).exists() => {
            Ok(LayoutConfig::load_from_file(DEFAULT_LAYOUT)?)
        }
        None => {
            log::warn!("No layout file found, using a single default window");
            let mut layout = LayoutConfig::default();
            layout
                .windows
                .insert("demo".to_string(), WindowConfig::new().with_size(640, 360));
            Ok(layout)
        }
    }
}

fn main() -> Result<(), DemoError> {
    simple_window::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let layout = load_layout(args.first().map(String::as_str))?;
    let seconds = match args.get(1) {
        Some(value) => value
            .parse()
            .map_err(|_| DemoError::Argument(format!("'{value}' is not a number of seconds")))?,
        None => DEFAULT_SECONDS,
    };

    let mut app = DemoApp::new(&layout, Duration::from_secs(seconds))?;
    app.run()?;

    log::info!("Window demo shutdown complete");
    Ok(())
}
