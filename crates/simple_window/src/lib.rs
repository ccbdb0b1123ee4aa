//! # Simple Window
//!
//! Named top-level windows with a handful of tracked properties and a
//! per-frame pixel blit.
//!
//! ## Features
//!
//! - **Registry by name**: register windows up front, create them lazily on first show
//! - **Window properties**: size, position, title-bar color, resizability,
//!   always-on-top, icon, minimized and foreground state
//! - **Frame blitting**: BGR, BGRA or gray buffers stretched to the client area
//! - **Undestroyable windows**: recreated whenever the user closes them
//! - **Layouts**: window sets loaded from TOML or RON files
//!
//! Title-bar color, z-order and blitting go through the Win32 compositor and
//! GDI; other platforms create windows but report those calls as unsupported.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use simple_window::prelude::*;
//!
//! fn main() -> Result<(), WindowError> {
//!     simple_window::logging::init();
//!
//!     let mut windows = WindowManager::new()?;
//!     windows.initialize(
//!         "camera",
//!         WindowConfig::new()
//!             .with_size(640, 480)
//!             .with_title_bar_color(Rgb::new(20, 20, 20))
//!             .with_top_most(true),
//!     );
//!
//!     let frame = Frame::solid(64, 48, [0, 128, 255])?;
//!     while windows.open_state("camera")? != OpenState::ClosedByUser {
//!         windows.show("camera", Some(&frame))?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod backend;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod icon;
pub mod logging;
pub mod manager;

mod platform;

pub use backend::{Backend, NativeHandle, NativeWindow};
pub use color::Rgb;
pub use config::{Config, ConfigError, LayoutConfig, WindowConfig};
pub use error::{WindowError, WindowResult};
pub use frame::{Frame, PixelFormat};
pub use manager::{OpenState, WindowManager};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        backend::{GlfwBackend, HeadlessBackend},
        color::Rgb,
        config::{Config, LayoutConfig, WindowConfig},
        error::{WindowError, WindowResult},
        frame::{Frame, PixelFormat},
        manager::{OpenState, WindowManager},
    };
}
