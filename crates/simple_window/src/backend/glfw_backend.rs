//! Window management using GLFW
//!
//! Windows are created without a client API; pixels reach the client area
//! through GDI, so no OpenGL or Vulkan context is ever made current.

use super::{Backend, NativeHandle, NativeWindow};
use crate::color::Rgb;
use crate::config::WindowConfig;
use crate::error::{WindowError, WindowResult};
use crate::frame::Frame;
use crate::icon::load_icon;
use crate::platform;
use glfw::{ClientApiHint, PixelImage, WindowHint, WindowMode};
use std::path::Path;

/// Owns the GLFW library instance
///
/// GLFW is single-threaded; the backend and every window it creates must stay
/// on the thread that called [`GlfwBackend::new`].
pub struct GlfwBackend {
    glfw: glfw::Glfw,
}

impl GlfwBackend {
    /// Initialize GLFW
    pub fn new() -> WindowResult<Self> {
        let glfw = glfw::init(glfw::log_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;
        log::info!("GLFW initialized");
        Ok(Self { glfw })
    }
}

impl Backend for GlfwBackend {
    type Window = GlfwWindow;

    fn create_window(&mut self, name: &str, config: &WindowConfig) -> WindowResult<GlfwWindow> {
        let (width, height) = config.resolved_size();
        let (x, y) = config.resolved_position();

        self.glfw.default_window_hints();
        self.glfw.window_hint(WindowHint::ClientApi(ClientApiHint::NoApi));
        self.glfw.window_hint(WindowHint::Resizable(config.resizable));
        self.glfw.window_hint(WindowHint::Floating(config.top_most));

        let (mut window, events) = self
            .glfw
            .create_window(width, height, name, WindowMode::Windowed)
            .ok_or_else(|| WindowError::CreationFailed(name.to_string()))?;
        window.set_pos(x, y);

        log::debug!("Created GLFW window '{}' {}x{} at ({}, {})", name, width, height, x, y);

        Ok(GlfwWindow {
            window,
            _events: events,
        })
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
    }
}

/// GLFW window wrapper; destroyed on drop
pub struct GlfwWindow {
    window: glfw::PWindow,
    // No polling is enabled, the receiver only has to outlive the window
    _events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl NativeWindow for GlfwWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn client_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn client_position(&self) -> (i32, i32) {
        self.window.get_pos()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.window.set_size(width as i32, height as i32);
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.window.set_pos(x, y);
    }

    fn set_resizable(&mut self, resizable: bool) {
        self.window.set_resizable(resizable);
    }

    fn set_top_most(&mut self, top_most: bool) {
        self.window.set_floating(top_most);
    }

    fn set_title_bar_color(&mut self, color: Rgb) -> WindowResult<()> {
        platform::set_caption_color(&self.window, color)
    }

    fn set_icon(&mut self, path: &Path) -> WindowResult<()> {
        let icon = load_icon(path)?;
        self.window.set_icon_from_pixels(vec![PixelImage {
            width: icon.width,
            height: icon.height,
            pixels: icon.packed_pixels(),
        }]);
        Ok(())
    }

    fn raise(&mut self, top_most: bool) -> WindowResult<()> {
        platform::raise(&mut self.window, top_most)
    }

    fn lower(&mut self) -> WindowResult<()> {
        platform::lower(&self.window)
    }

    fn is_foreground(&self) -> bool {
        platform::is_foreground(&self.window)
    }

    fn set_minimized(&mut self, minimized: bool) {
        if minimized {
            self.window.iconify();
        } else {
            self.window.restore();
        }
    }

    fn is_minimized(&self) -> bool {
        self.window.is_iconified()
    }

    fn present(&mut self, frame: &Frame) -> WindowResult<()> {
        platform::blit(&self.window, &frame.to_dib())
    }

    fn handle(&self) -> Option<NativeHandle> {
        platform::native_handle(&self.window)
    }
}
