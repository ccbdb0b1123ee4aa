//! Compositor and GDI calls that GLFW does not expose
//!
//! Windows gets the real implementation. Elsewhere the calls degrade to GLFW
//! equivalents where one exists and report [`crate::WindowError::Unsupported`]
//! otherwise.

#[cfg(target_os = "windows")]
mod win32;
#[cfg(target_os = "windows")]
pub(crate) use win32::{blit, is_foreground, lower, native_handle, raise, set_caption_color};

#[cfg(not(target_os = "windows"))]
mod fallback;
#[cfg(not(target_os = "windows"))]
pub(crate) use fallback::{blit, is_foreground, lower, native_handle, raise, set_caption_color};
