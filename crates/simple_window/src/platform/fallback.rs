//! Non-Windows stand-ins
//!
//! GLFW covers focus; the DWM and GDI parts have no portable equivalent.

use crate::backend::NativeHandle;
use crate::color::Rgb;
use crate::error::{WindowError, WindowResult};
use crate::frame::Dib;

pub(crate) fn set_caption_color(_window: &glfw::Window, _color: Rgb) -> WindowResult<()> {
    Err(WindowError::Unsupported("title-bar color"))
}

pub(crate) fn raise(window: &mut glfw::Window, _top_most: bool) -> WindowResult<()> {
    window.focus();
    Ok(())
}

pub(crate) fn lower(_window: &glfw::Window) -> WindowResult<()> {
    Err(WindowError::Unsupported("sending a window to the back"))
}

pub(crate) fn is_foreground(window: &glfw::Window) -> bool {
    window.is_focused()
}

pub(crate) const fn native_handle(_window: &glfw::Window) -> Option<NativeHandle> {
    None
}

pub(crate) fn blit(_window: &glfw::Window, _dib: &Dib) -> WindowResult<()> {
    Err(WindowError::Unsupported("frame blitting"))
}
