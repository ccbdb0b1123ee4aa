//! Registry of named windows
//!
//! [`WindowManager`] maps a window name to its configuration, its open state
//! and, while open, the native window. Windows are registered with
//! [`WindowManager::initialize`] and only created the first time they are
//! shown (or opened with [`WindowManager::set_open`]).
//!
//! Every property setter stores the new value and, when the window is open,
//! passes it straight to the native window. Failures of those native calls are
//! logged and swallowed so a frame loop never stops over a cosmetic call.
//! Only misuse (unknown names, invalid icons) is returned as an error.
//!
//! ```rust,no_run
//! use simple_window::prelude::*;
//!
//! let mut windows = WindowManager::new()?;
//! windows.initialize("preview", WindowConfig::new().with_size(640, 360));
//!
//! let frame = Frame::solid(320, 180, [40, 40, 40])?;
//! while windows.open_state("preview")? != OpenState::ClosedByUser {
//!     windows.show("preview", Some(&frame))?;
//! }
//! # Ok::<(), WindowError>(())
//! ```

use crate::backend::{Backend, GlfwBackend, NativeHandle, NativeWindow};
use crate::color::Rgb;
use crate::config::{LayoutConfig, WindowConfig, MIN_HEIGHT, MIN_WIDTH};
use crate::error::{WindowError, WindowResult};
use crate::frame::Frame;
use crate::icon::validate_icon_path;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Whether a registered window currently exists, and who closed it if not
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenState {
    /// The native window exists
    Open,
    /// Never opened, or closed through the API; the next `show` reopens it
    ClosedByCode,
    /// Closed by the user; stays closed unless the window is undestroyable
    ClosedByUser,
}

struct WindowRecord<W> {
    config: WindowConfig,
    open: OpenState,
    native: Option<W>,
}

impl<W: NativeWindow> WindowRecord<W> {
    /// The window while it is open and not minimized
    ///
    /// Minimized windows report an empty client rect parked off screen, so
    /// their live geometry is not worth keeping.
    fn restored_native(&self) -> Option<&W> {
        self.native.as_ref().filter(|native| !native.is_minimized())
    }

    fn kept_size(&self) -> (u32, u32) {
        self.restored_native()
            .map_or_else(|| self.config.resolved_size(), NativeWindow::client_size)
    }

    fn kept_position(&self) -> (i32, i32) {
        self.restored_native()
            .map_or_else(|| self.config.resolved_position(), NativeWindow::client_position)
    }
}

/// Named top-level windows over a [`Backend`]
pub struct WindowManager<B: Backend = GlfwBackend> {
    backend: B,
    windows: HashMap<String, WindowRecord<B::Window>>,
}

impl WindowManager<GlfwBackend> {
    /// Create a registry backed by GLFW
    pub fn new() -> WindowResult<Self> {
        Ok(Self::with_backend(GlfwBackend::new()?))
    }
}

impl<B: Backend> WindowManager<B> {
    /// Create a registry over any backend
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            windows: HashMap::new(),
        }
    }

    /// The underlying backend
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Register a window without creating it
    ///
    /// Returns `false` when the name is already taken; the existing window is
    /// left untouched.
    pub fn initialize(&mut self, name: &str, config: WindowConfig) -> bool {
        if self.windows.contains_key(name) {
            if !config.no_warnings {
                log::warn!("The window '{}' already exists, not creating a new window", name);
            }
            return false;
        }

        log::debug!("Registered window '{}'", name);
        self.windows.insert(
            name.to_string(),
            WindowRecord {
                config,
                open: OpenState::ClosedByCode,
                native: None,
            },
        );
        true
    }

    /// Register every window of a layout, returning how many were new
    pub fn initialize_layout(&mut self, layout: &LayoutConfig) -> usize {
        let mut added = 0;
        for (name, config) in &layout.windows {
            if self.initialize(name, config.clone()) {
                added += 1;
            }
        }
        added
    }

    /// Whether a window with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.windows.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.windows.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Destroy a window and forget it, returning its last configuration
    pub fn remove(&mut self, name: &str) -> WindowResult<WindowConfig> {
        let record = self
            .windows
            .remove(name)
            .ok_or_else(|| WindowError::UnknownWindow(name.to_string()))?;
        log::debug!("Removed window '{}'", name);
        Ok(record.config)
    }

    /// Current configuration of a window
    pub fn config(&self, name: &str) -> WindowResult<&WindowConfig> {
        Ok(&self.record(name)?.config)
    }

    /// Process pending events without drawing
    pub fn poll_events(&mut self) {
        self.backend.poll_events();
    }

    /// Display a window, optionally replacing its contents with `frame`
    ///
    /// A window closed by code is (re)created. A window the user closed stays
    /// closed unless it is undestroyable, in which case it is recreated with its
    /// last configuration. The frame is stretched to the client area; it is
    /// skipped while the window is minimized. Events are polled on every call.
    pub fn show(&mut self, name: &str, frame: Option<&Frame>) -> WindowResult<()> {
        let (open, undestroyable) = {
            let record = self.record(name)?;
            (record.open, record.config.undestroyable)
        };
        match open {
            OpenState::Open => {}
            OpenState::ClosedByCode => self.open_window(name)?,
            OpenState::ClosedByUser if undestroyable => self.open_window(name)?,
            OpenState::ClosedByUser => return Ok(()),
        }

        let record = lookup_mut(&mut self.windows, name)?;
        if record.native.as_ref().is_some_and(NativeWindow::should_close) {
            record.native = None;
            if record.config.undestroyable {
                log::info!("Window '{}' was closed but is undestroyable, recreating", name);
                self.open_window(name)?;
            } else {
                log::info!("Window '{}' was closed by the user", name);
                record.open = OpenState::ClosedByUser;
                return Ok(());
            }
        }

        if let Some(frame) = frame {
            let WindowRecord { config, native, .. } = lookup_mut(&mut self.windows, name)?;
            if let Some(native) = native.as_mut() {
                let (width, height) = native.client_size();
                if !native.is_minimized() && width > 0 && height > 0 {
                    let result = frame.fit(width, height).and_then(|fitted| native.present(&fitted));
                    suppress(name, config, "present", result);
                }
            }
        }

        self.backend.poll_events();
        Ok(())
    }

    /// Destroy the native window; the next `show` creates it again
    pub fn close(&mut self, name: &str) -> WindowResult<()> {
        let record = lookup_mut(&mut self.windows, name)?;
        if record.native.take().is_some() {
            log::info!("Closed window '{}'", name);
        }
        record.open = OpenState::ClosedByCode;
        Ok(())
    }

    /// Open or close a window
    pub fn set_open(&mut self, name: &str, open: bool) -> WindowResult<()> {
        let is_open = self.record(name)?.open == OpenState::Open;
        match (open, is_open) {
            (true, false) => self.open_window(name),
            (false, true) => self.close(name),
            _ => Ok(()),
        }
    }

    /// Whether the window is open, closed by code or closed by the user
    pub fn open_state(&self, name: &str) -> WindowResult<OpenState> {
        Ok(self.record(name)?.open)
    }

    /// Resize the client area
    ///
    /// `None` keeps that dimension. The result is clamped to at least
    /// [`MIN_WIDTH`] x [`MIN_HEIGHT`]. A closed window uses the size when it
    /// is next created. While minimized, a kept dimension comes from the
    /// stored size rather than the empty client area.
    pub fn set_size(&mut self, name: &str, width: Option<u32>, height: Option<u32>) -> WindowResult<()> {
        let record = lookup_mut(&mut self.windows, name)?;
        let (current_width, current_height) = record.kept_size();
        let width = width.unwrap_or(current_width).max(MIN_WIDTH);
        let height = height.unwrap_or(current_height).max(MIN_HEIGHT);

        record.config.width = Some(width);
        record.config.height = Some(height);
        if let Some(native) = record.native.as_mut() {
            native.set_size(width, height);
        }
        Ok(())
    }

    /// Client size: live when open, configured otherwise
    pub fn size(&self, name: &str) -> WindowResult<(u32, u32)> {
        let record = self.record(name)?;
        Ok(record
            .native
            .as_ref()
            .map_or_else(|| record.config.resolved_size(), NativeWindow::client_size))
    }

    /// Move the client area; `None` keeps that coordinate
    pub fn set_position(&mut self, name: &str, x: Option<i32>, y: Option<i32>) -> WindowResult<()> {
        let record = lookup_mut(&mut self.windows, name)?;
        let (current_x, current_y) = record.kept_position();
        let x = x.unwrap_or(current_x);
        let y = y.unwrap_or(current_y);

        record.config.x = Some(x);
        record.config.y = Some(y);
        if let Some(native) = record.native.as_mut() {
            native.set_position(x, y);
        }
        Ok(())
    }

    /// Top-left of the client area: live when open, configured otherwise
    pub fn position(&self, name: &str) -> WindowResult<(i32, i32)> {
        let record = self.record(name)?;
        Ok(record
            .native
            .as_ref()
            .map_or_else(|| record.config.resolved_position(), NativeWindow::client_position))
    }

    /// Color the title bar
    pub fn set_title_bar_color(&mut self, name: &str, color: impl Into<Rgb>) -> WindowResult<()> {
        let WindowRecord { config, native, .. } = lookup_mut(&mut self.windows, name)?;
        config.title_bar_color = color.into();
        if let Some(native) = native.as_mut() {
            suppress(name, config, "title-bar color", native.set_title_bar_color(config.title_bar_color));
        }
        Ok(())
    }

    /// Configured title-bar color
    pub fn title_bar_color(&self, name: &str) -> WindowResult<Rgb> {
        Ok(self.record(name)?.config.title_bar_color)
    }

    /// Allow or forbid user resizing
    pub fn set_resizable(&mut self, name: &str, resizable: bool) -> WindowResult<()> {
        let record = lookup_mut(&mut self.windows, name)?;
        record.config.resizable = resizable;
        if let Some(native) = record.native.as_mut() {
            native.set_resizable(resizable);
        }
        Ok(())
    }

    /// Whether the user can resize the window
    pub fn resizable(&self, name: &str) -> WindowResult<bool> {
        Ok(self.record(name)?.config.resizable)
    }

    /// Keep the window above normal windows
    pub fn set_top_most(&mut self, name: &str, top_most: bool) -> WindowResult<()> {
        let record = lookup_mut(&mut self.windows, name)?;
        record.config.top_most = top_most;
        if let Some(native) = record.native.as_mut() {
            native.set_top_most(top_most);
        }
        Ok(())
    }

    /// Whether the window floats above normal windows
    pub fn top_most(&self, name: &str) -> WindowResult<bool> {
        Ok(self.record(name)?.config.top_most)
    }

    /// Raise the window to the front or send it to the back
    ///
    /// Raising a top-most window keeps it in the topmost band; sending it to
    /// the back ignores top-most. A closed window only records whether it
    /// should be raised when next created.
    pub fn set_foreground(&mut self, name: &str, foreground: bool) -> WindowResult<()> {
        let WindowRecord { config, native, .. } = lookup_mut(&mut self.windows, name)?;
        config.foreground = foreground;
        if let Some(native) = native.as_mut() {
            let result = if foreground {
                native.raise(config.top_most)
            } else {
                native.lower()
            };
            suppress(name, config, "foreground", result);
        }
        Ok(())
    }

    /// Whether the window is open and holds the foreground
    pub fn foreground(&self, name: &str) -> WindowResult<bool> {
        Ok(self
            .record(name)?
            .native
            .as_ref()
            .is_some_and(NativeWindow::is_foreground))
    }

    /// Minimize or restore; a closed window is created minimized when set
    pub fn set_minimized(&mut self, name: &str, minimized: bool) -> WindowResult<()> {
        let record = lookup_mut(&mut self.windows, name)?;
        record.config.minimized = minimized;
        if let Some(native) = record.native.as_mut() {
            native.set_minimized(minimized);
        }
        Ok(())
    }

    /// Whether the window is open and minimized
    pub fn minimized(&self, name: &str) -> WindowResult<bool> {
        Ok(self
            .record(name)?
            .native
            .as_ref()
            .is_some_and(NativeWindow::is_minimized))
    }

    /// Recreate the window whenever the user closes it
    pub fn set_undestroyable(&mut self, name: &str, undestroyable: bool) -> WindowResult<()> {
        lookup_mut(&mut self.windows, name)?.config.undestroyable = undestroyable;
        Ok(())
    }

    /// Whether the window is recreated after a user close
    pub fn undestroyable(&self, name: &str) -> WindowResult<bool> {
        Ok(self.record(name)?.config.undestroyable)
    }

    /// Use a `.ico` file as the window icon
    ///
    /// The path must exist and end in `.ico`; an invalid path leaves the
    /// current icon in place and returns [`WindowError::InvalidIcon`].
    pub fn set_icon(&mut self, name: &str, path: impl AsRef<Path>) -> WindowResult<()> {
        let path = path.as_ref();
        let WindowRecord { config, native, .. } = lookup_mut(&mut self.windows, name)?;
        validate_icon_path(path)?;

        config.icon = path.to_path_buf();
        if let Some(native) = native.as_mut() {
            suppress(name, config, "icon", native.set_icon(path));
        }
        Ok(())
    }

    /// Configured icon path, empty for the default icon
    pub fn icon(&self, name: &str) -> WindowResult<PathBuf> {
        Ok(self.record(name)?.config.icon.clone())
    }

    /// OS handle of an open window
    pub fn handle(&self, name: &str) -> WindowResult<Option<NativeHandle>> {
        Ok(self.record(name)?.native.as_ref().and_then(NativeWindow::handle))
    }

    fn record(&self, name: &str) -> WindowResult<&WindowRecord<B::Window>> {
        self.windows
            .get(name)
            .ok_or_else(|| WindowError::UnknownWindow(name.to_string()))
    }

    /// Create the native window and apply every stored property
    fn open_window(&mut self, name: &str) -> WindowResult<()> {
        let record = lookup_mut(&mut self.windows, name)?;
        record.native = None;
        record.open = OpenState::ClosedByCode;

        let mut native = self.backend.create_window(name, &record.config)?;

        let config = &mut record.config;
        let (width, height) = config.resolved_size();
        let (x, y) = config.resolved_position();
        *config = config.clone().with_size(width, height).with_position(x, y);

        suppress(name, config, "title-bar color", native.set_title_bar_color(config.title_bar_color));
        if !config.icon.as_os_str().is_empty() {
            suppress(name, config, "icon", native.set_icon(&config.icon));
        }
        if config.foreground {
            suppress(name, config, "foreground", native.raise(config.top_most));
        }
        if config.minimized {
            native.set_minimized(true);
        }

        record.native = Some(native);
        record.open = OpenState::Open;
        log::info!("Opened window '{}' ({}x{} at {}, {})", name, width, height, x, y);
        Ok(())
    }
}

fn lookup_mut<'a, W>(
    windows: &'a mut HashMap<String, WindowRecord<W>>,
    name: &str,
) -> WindowResult<&'a mut WindowRecord<W>> {
    windows
        .get_mut(name)
        .ok_or_else(|| WindowError::UnknownWindow(name.to_string()))
}

/// Log a failed native call instead of propagating it
fn suppress(name: &str, config: &WindowConfig, operation: &str, result: WindowResult<()>) {
    match result {
        Ok(()) => {}
        Err(WindowError::Unsupported(what)) => {
            log::debug!("Window '{}': {} skipped, {} is unsupported", name, operation, what);
        }
        Err(e) if config.no_warnings => {
            log::debug!("Window '{}': {} failed: {}", name, operation, e);
        }
        Err(e) => log::warn!("Window '{}': {} failed: {}", name, operation, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;

    fn manager() -> WindowManager<HeadlessBackend> {
        WindowManager::with_backend(HeadlessBackend::new())
    }

    #[test]
    fn test_initialize_rejects_duplicates() {
        let mut windows = manager();
        assert!(windows.initialize("a", WindowConfig::new().with_size(300, 200)));
        assert!(!windows.initialize("a", WindowConfig::new().with_size(10, 10)));
        assert_eq!(windows.size("a").unwrap(), (300, 200));
    }

    #[test]
    fn test_duplicate_keeps_silent_original() {
        let mut windows = manager();
        assert!(windows.initialize("a", WindowConfig::new().with_no_warnings(true)));
        assert!(!windows.initialize("a", WindowConfig::new()));
        assert!(windows.config("a").unwrap().no_warnings);
    }

    #[test]
    fn test_unknown_window_errors() {
        let mut windows = manager();
        assert!(matches!(windows.show("nope", None), Err(WindowError::UnknownWindow(_))));
        assert!(matches!(windows.size("nope"), Err(WindowError::UnknownWindow(_))));
        assert!(matches!(windows.remove("nope"), Err(WindowError::UnknownWindow(_))));
    }

    #[test]
    fn test_initialize_does_not_create() {
        let mut windows = manager();
        let control = windows.backend().control();
        windows.initialize("a", WindowConfig::new());
        assert_eq!(control.created_count(), 0);
        assert_eq!(windows.open_state("a").unwrap(), OpenState::ClosedByCode);
        assert_eq!(windows.handle("a").unwrap(), None);
    }

    #[test]
    fn test_open_resolves_defaults_into_config() {
        let mut windows = manager();
        windows.initialize("a", WindowConfig::new());
        windows.set_open("a", true).unwrap();

        let config = windows.config("a").unwrap();
        assert_eq!((config.width, config.height), (Some(MIN_WIDTH), Some(MIN_HEIGHT)));
        assert_eq!((config.x, config.y), (Some(0), Some(0)));
    }

    #[test]
    fn test_failed_creation_leaves_window_closed() {
        let mut windows = manager();
        let control = windows.backend().control();
        control.set_fail_creation(true);
        windows.initialize("a", WindowConfig::new());

        assert!(matches!(windows.show("a", None), Err(WindowError::CreationFailed(_))));
        assert_eq!(windows.open_state("a").unwrap(), OpenState::ClosedByCode);

        control.set_fail_creation(false);
        windows.show("a", None).unwrap();
        assert_eq!(windows.open_state("a").unwrap(), OpenState::Open);
    }
}
