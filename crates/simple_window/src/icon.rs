//! Window icon loading
//!
//! Icons are `.ico` files decoded with the image crate. The decoder picks the
//! largest entry and the toolkit scales it for the title bar and taskbar.

use crate::error::{WindowError, WindowResult};
use std::path::Path;

/// Decoded icon pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// RGBA bytes, top row first
    pub rgba: Vec<u8>,
}

impl IconImage {
    /// Pixels packed as little-endian `u32`s, the byte order GLFW reads
    pub fn packed_pixels(&self) -> Vec<u32> {
        self.rgba
            .chunks_exact(4)
            .map(|p| u32::from_le_bytes([p[0], p[1], p[2], p[3]]))
            .collect()
    }
}

/// Check that `path` names an existing `.ico` file
pub fn validate_icon_path(path: &Path) -> WindowResult<()> {
    let invalid = |reason: &str| WindowError::InvalidIcon {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let is_ico = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ico"));
    if !is_ico {
        return Err(invalid("icon must be a .ico file"));
    }
    if !path.is_file() {
        return Err(invalid("icon file does not exist"));
    }
    Ok(())
}

/// Validate and decode an icon file
pub fn load_icon(path: &Path) -> WindowResult<IconImage> {
    validate_icon_path(path)?;

    let bytes = std::fs::read(path)?;
    let rgba = image::load_from_memory_with_format(&bytes, image::ImageFormat::Ico)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("Loaded icon {}x{} from {:?}", width, height, path);

    Ok(IconImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::path::PathBuf;

    fn temp_path(file: &str) -> PathBuf {
        std::env::temp_dir().join(format!("simple_window_icon_{}_{file}", std::process::id()))
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let path = temp_path("icon.png");
        std::fs::write(&path, b"not an icon").unwrap();
        let err = validate_icon_path(&path).unwrap_err();
        assert!(matches!(err, WindowError::InvalidIcon { .. }));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_rejects_missing_file() {
        let err = validate_icon_path(Path::new("definitely/missing/app.ico")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_loads_ico_file() {
        let path = temp_path("app.ICO");
        let image = ImageBuffer::from_pixel(16, 16, Rgba([255u8, 0, 0, 255]));
        image.save_with_format(&path, image::ImageFormat::Ico).unwrap();

        let icon = load_icon(&path).unwrap();
        assert_eq!((icon.width, icon.height), (16, 16));
        assert_eq!(&icon.rgba[..4], &[255, 0, 0, 255]);
        assert_eq!(icon.packed_pixels()[0], 0xFF00_00FF);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_garbage_ico_fails_to_decode() {
        let path = temp_path("broken.ico");
        std::fs::write(&path, b"garbage").unwrap();
        assert!(matches!(load_icon(&path), Err(WindowError::Image(_))));
        std::fs::remove_file(path).ok();
    }
}
