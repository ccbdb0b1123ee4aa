//! Error types shared by the window registry and its backends

use std::path::PathBuf;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// No window has been registered under this name
    #[error("Unknown window '{0}'")]
    UnknownWindow(String),

    /// The windowing toolkit could not be initialized
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// The toolkit refused to create the window
    #[error("Window creation failed for '{0}'")]
    CreationFailed(String),

    /// Icon path is missing or not an `.ico` file
    #[error("Invalid icon {path:?}: {reason}")]
    InvalidIcon {
        /// Offending path
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Pixel buffer does not match its declared dimensions
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// Reading a file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or resizing failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// An operating system call reported failure
    #[error("Platform call {call} failed: {message}")]
    Platform {
        /// Name of the native function
        call: &'static str,
        /// Error text reported by the OS
        message: String,
    },

    /// The operation needs a compositor this platform does not have
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
}

/// Result alias used throughout the crate
pub type WindowResult<T> = Result<T, WindowError>;
