//! In-memory backend
//!
//! Records every property change instead of touching a display. Tests keep a
//! [`HeadlessControl`] to inspect window state and to play the user's part
//! (closing or minimizing a window).

use super::{Backend, NativeHandle, NativeWindow};
use crate::color::Rgb;
use crate::config::WindowConfig;
use crate::error::{WindowError, WindowResult};
use crate::frame::Frame;
use crate::icon::validate_icon_path;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Where Windows parks the client area of a minimized window
pub const MINIMIZED_POSITION: (i32, i32) = (-32000, -32000);

/// Last known state of a headless window
///
/// While `minimized` is set the window reports an empty client area at
/// [`MINIMIZED_POSITION`], as an iconic Win32 window does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessState {
    /// Client size
    pub size: (u32, u32),
    /// Client position
    pub position: (i32, i32),
    /// User resizing allowed
    pub resizable: bool,
    /// Floating above other windows
    pub top_most: bool,
    /// Band of the last raise: `Some(true)` for the topmost band
    pub raised_top_most: Option<bool>,
    /// Last caption color applied
    pub title_bar_color: Option<Rgb>,
    /// Last icon applied
    pub icon: Option<PathBuf>,
    /// Minimized
    pub minimized: bool,
    /// Holds the foreground
    pub foreground: bool,
    /// The simulated user clicked the close button
    pub close_requested: bool,
    /// Number of successful presents
    pub frames_presented: usize,
    /// Dimensions of the last presented frame
    pub last_frame: Option<(u32, u32)>,
    /// Fake OS handle
    pub handle: isize,
    /// False once the window value has been dropped
    pub alive: bool,
}

#[derive(Default)]
struct Shared {
    windows: HashMap<String, HeadlessState>,
    created: usize,
    polls: usize,
    fail_creation: bool,
}

/// Shared view into a [`HeadlessBackend`]
#[derive(Clone, Default)]
pub struct HeadlessControl {
    shared: Rc<RefCell<Shared>>,
}

impl HeadlessControl {
    /// Snapshot of the most recent window with this title
    pub fn state(&self, name: &str) -> Option<HeadlessState> {
        self.shared.borrow().windows.get(name).cloned()
    }

    /// Act as the user pressing the close button
    pub fn request_close(&self, name: &str) {
        self.with_window(name, |state| state.close_requested = true);
    }

    /// Act as the user minimizing or restoring the window
    pub fn set_user_minimized(&self, name: &str, minimized: bool) {
        self.with_window(name, |state| state.minimized = minimized);
    }

    /// Act as the user moving focus to another application
    pub fn defocus_all(&self) {
        for state in self.shared.borrow_mut().windows.values_mut() {
            state.foreground = false;
        }
    }

    /// Make subsequent window creation fail
    pub fn set_fail_creation(&self, fail: bool) {
        self.shared.borrow_mut().fail_creation = fail;
    }

    /// Windows created so far
    pub fn created_count(&self) -> usize {
        self.shared.borrow().created
    }

    /// Event polls so far
    pub fn poll_count(&self) -> usize {
        self.shared.borrow().polls
    }

    fn with_window(&self, name: &str, f: impl FnOnce(&mut HeadlessState)) {
        if let Some(state) = self.shared.borrow_mut().windows.get_mut(name) {
            f(state);
        }
    }
}

/// Backend that never opens a real window
#[derive(Default)]
pub struct HeadlessBackend {
    control: HeadlessControl,
}

impl HeadlessBackend {
    /// Create a backend with no windows
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for inspecting the windows this backend creates
    pub fn control(&self) -> HeadlessControl {
        self.control.clone()
    }
}

impl Backend for HeadlessBackend {
    type Window = HeadlessWindow;

    fn create_window(&mut self, name: &str, config: &WindowConfig) -> WindowResult<HeadlessWindow> {
        let mut shared = self.control.shared.borrow_mut();
        if shared.fail_creation {
            return Err(WindowError::CreationFailed(name.to_string()));
        }
        shared.created += 1;
        let handle = 0x1000 + shared.created as isize;

        shared.windows.insert(
            name.to_string(),
            HeadlessState {
                size: config.resolved_size(),
                position: config.resolved_position(),
                resizable: config.resizable,
                top_most: config.top_most,
                raised_top_most: None,
                title_bar_color: None,
                icon: None,
                minimized: false,
                foreground: false,
                close_requested: false,
                frames_presented: 0,
                last_frame: None,
                handle,
                alive: true,
            },
        );

        Ok(HeadlessWindow {
            name: name.to_string(),
            handle,
            control: self.control.clone(),
        })
    }

    fn poll_events(&mut self) {
        self.control.shared.borrow_mut().polls += 1;
    }
}

/// Window created by [`HeadlessBackend`]
pub struct HeadlessWindow {
    name: String,
    handle: isize,
    control: HeadlessControl,
}

impl HeadlessWindow {
    fn read<T>(&self, f: impl FnOnce(&HeadlessState) -> T) -> T {
        let shared = self.control.shared.borrow();
        // The entry is only replaced by a newer window with the same name
        let state = &shared.windows[&self.name];
        f(state)
    }

    fn write(&self, f: impl FnOnce(&mut HeadlessState)) {
        let mut shared = self.control.shared.borrow_mut();
        if let Some(state) = shared.windows.get_mut(&self.name) {
            if state.handle == self.handle {
                f(state);
            }
        }
    }
}

impl NativeWindow for HeadlessWindow {
    fn should_close(&self) -> bool {
        self.read(|s| s.close_requested)
    }

    fn client_size(&self) -> (u32, u32) {
        self.read(|s| if s.minimized { (0, 0) } else { s.size })
    }

    fn client_position(&self) -> (i32, i32) {
        self.read(|s| {
            if s.minimized {
                MINIMIZED_POSITION
            } else {
                s.position
            }
        })
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.write(|s| s.size = (width, height));
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.write(|s| s.position = (x, y));
    }

    fn set_resizable(&mut self, resizable: bool) {
        self.write(|s| s.resizable = resizable);
    }

    fn set_top_most(&mut self, top_most: bool) {
        self.write(|s| s.top_most = top_most);
    }

    fn set_title_bar_color(&mut self, color: Rgb) -> WindowResult<()> {
        self.write(|s| s.title_bar_color = Some(color));
        Ok(())
    }

    fn set_icon(&mut self, path: &Path) -> WindowResult<()> {
        validate_icon_path(path)?;
        self.write(|s| s.icon = Some(path.to_path_buf()));
        Ok(())
    }

    fn raise(&mut self, top_most: bool) -> WindowResult<()> {
        self.control.defocus_all();
        self.write(|s| {
            s.foreground = true;
            s.raised_top_most = Some(top_most);
        });
        Ok(())
    }

    fn lower(&mut self) -> WindowResult<()> {
        self.write(|s| s.foreground = false);
        Ok(())
    }

    fn is_foreground(&self) -> bool {
        self.read(|s| s.foreground)
    }

    fn set_minimized(&mut self, minimized: bool) {
        self.write(|s| s.minimized = minimized);
    }

    fn is_minimized(&self) -> bool {
        self.read(|s| s.minimized)
    }

    fn present(&mut self, frame: &Frame) -> WindowResult<()> {
        let size = self.client_size();
        if (frame.width(), frame.height()) != size {
            return Err(WindowError::InvalidFrame(format!(
                "{}x{} frame presented to {}x{} client area",
                frame.width(),
                frame.height(),
                size.0,
                size.1
            )));
        }
        self.write(|s| {
            s.frames_presented += 1;
            s.last_frame = Some((frame.width(), frame.height()));
        });
        Ok(())
    }

    fn handle(&self) -> Option<NativeHandle> {
        Some(NativeHandle(self.handle))
    }
}

impl Drop for HeadlessWindow {
    fn drop(&mut self) {
        self.write(|s| s.alive = false);
    }
}
