//! Window backends
//!
//! The registry in [`crate::manager`] only talks to these two traits. Each
//! backend decides which toolkit and OS calls sit behind them.
//!
//! ```text
//! WindowManager ──uses──▶ Backend ──creates──▶ NativeWindow
//!                           │
//!                           ├── GlfwBackend      (GLFW + Win32 DWM/GDI)
//!                           └── HeadlessBackend  (in-memory, for tests)
//! ```

pub mod glfw_backend;
pub mod headless;

pub use glfw_backend::{GlfwBackend, GlfwWindow};
pub use headless::{HeadlessBackend, HeadlessControl, HeadlessWindow};

use crate::color::Rgb;
use crate::config::WindowConfig;
use crate::error::WindowResult;
use crate::frame::Frame;
use std::path::Path;

/// Opaque OS window handle (an `HWND` on Windows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(pub isize);

/// Creates native windows and pumps their event queue
pub trait Backend {
    /// Window type produced by this backend
    type Window: NativeWindow;

    /// Create a visible window titled `name` from `config`
    ///
    /// Only size, position, resizability and top-most are applied here; the
    /// registry applies the remaining properties through [`NativeWindow`].
    fn create_window(&mut self, name: &str, config: &WindowConfig) -> WindowResult<Self::Window>;

    /// Process pending events for every window
    fn poll_events(&mut self);
}

/// A live top-level window
///
/// Dropping the value destroys the window.
pub trait NativeWindow {
    /// Whether the user has asked the window to close
    fn should_close(&self) -> bool;

    /// Client area size in pixels
    fn client_size(&self) -> (u32, u32);

    /// Screen coordinates of the client area's top-left corner
    fn client_position(&self) -> (i32, i32);

    /// Resize the client area
    fn set_size(&mut self, width: u32, height: u32);

    /// Move the client area
    fn set_position(&mut self, x: i32, y: i32);

    /// Allow or forbid user resizing
    fn set_resizable(&mut self, resizable: bool);

    /// Keep the window above normal windows
    fn set_top_most(&mut self, top_most: bool);

    /// Color the title bar through the compositor
    fn set_title_bar_color(&mut self, color: Rgb) -> WindowResult<()>;

    /// Replace the title-bar and taskbar icon with a `.ico` file
    fn set_icon(&mut self, path: &Path) -> WindowResult<()>;

    /// Bring the window to the top of the z-order
    ///
    /// With `top_most` the window is placed in the topmost band.
    fn raise(&mut self, top_most: bool) -> WindowResult<()>;

    /// Send the window to the bottom of the z-order
    fn lower(&mut self) -> WindowResult<()>;

    /// Whether this window currently has the foreground
    fn is_foreground(&self) -> bool;

    /// Minimize or restore
    fn set_minimized(&mut self, minimized: bool);

    /// Whether the window is minimized
    fn is_minimized(&self) -> bool;

    /// Blit a frame that already matches [`Self::client_size`]
    fn present(&mut self, frame: &Frame) -> WindowResult<()>;

    /// OS handle, when the platform exposes one
    fn handle(&self) -> Option<NativeHandle>;
}
