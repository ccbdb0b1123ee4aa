//! Raw pixel frames and their device-independent bitmap form
//!
//! A [`Frame`] is what callers hand to `WindowManager::show`. Before it reaches
//! the window it is stretched to the client area with [`Frame::fit`] and packed
//! into a [`Dib`], the layout GDI expects for `StretchDIBits`.

use crate::error::{WindowError, WindowResult};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Luma, Rgb as RgbPixel, Rgba};

/// Channel layout of a [`Frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 3 bytes per pixel, blue first
    Bgr,
    /// 4 bytes per pixel, blue first, alpha last (alpha is ignored on screen)
    Bgra,
    /// 1 byte per pixel
    Gray,
}

impl PixelFormat {
    /// Bytes per pixel
    pub const fn channels(self) -> usize {
        match self {
            Self::Bgr => 3,
            Self::Bgra => 4,
            Self::Gray => 1,
        }
    }
}

/// Owned, tightly packed pixel buffer, top row first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap raw bytes, checking they match the declared dimensions
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> WindowResult<Self> {
        if width == 0 || height == 0 {
            return Err(WindowError::InvalidFrame(format!(
                "frame must not be empty ({width}x{height})"
            )));
        }
        let expected = width as usize * height as usize * format.channels();
        if data.len() != expected {
            return Err(WindowError::InvalidFrame(format!(
                "{width}x{height} {format:?} needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self { width, height, format, data })
    }

    /// BGR frame
    pub fn from_bgr(width: u32, height: u32, data: Vec<u8>) -> WindowResult<Self> {
        Self::new(width, height, PixelFormat::Bgr, data)
    }

    /// BGRA frame
    pub fn from_bgra(width: u32, height: u32, data: Vec<u8>) -> WindowResult<Self> {
        Self::new(width, height, PixelFormat::Bgra, data)
    }

    /// Single-channel frame
    pub fn from_gray(width: u32, height: u32, data: Vec<u8>) -> WindowResult<Self> {
        Self::new(width, height, PixelFormat::Gray, data)
    }

    /// RGB frame, reordered to BGR
    pub fn from_rgb(width: u32, height: u32, mut data: Vec<u8>) -> WindowResult<Self> {
        for pixel in data.chunks_exact_mut(3) {
            pixel.swap(0, 2);
        }
        Self::from_bgr(width, height, data)
    }

    /// Convert a decoded image, keeping alpha when it has one
    pub fn from_image(image: &DynamicImage) -> WindowResult<Self> {
        if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            let (width, height) = rgba.dimensions();
            let mut data = rgba.into_raw();
            for pixel in data.chunks_exact_mut(4) {
                pixel.swap(0, 2);
            }
            Self::from_bgra(width, height, data)
        } else {
            let rgb = image.to_rgb8();
            let (width, height) = rgb.dimensions();
            Self::from_rgb(width, height, rgb.into_raw())
        }
    }

    /// Frame filled with one BGR color
    pub fn solid(width: u32, height: u32, bgr: [u8; 3]) -> WindowResult<Self> {
        let pixels = width as usize * height as usize;
        let data = bgr.iter().copied().cycle().take(pixels * 3).collect();
        Self::from_bgr(width, height, data)
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw bytes, top row first
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Stretch to exactly `width` x `height` with bilinear filtering
    pub fn fit(&self, width: u32, height: u32) -> WindowResult<Self> {
        if width == 0 || height == 0 {
            return Err(WindowError::InvalidFrame(format!(
                "cannot fit frame into {width}x{height}"
            )));
        }
        if (width, height) == (self.width, self.height) {
            return Ok(self.clone());
        }

        let data = match self.format {
            PixelFormat::Bgr => resize_raw::<RgbPixel<u8>>(self, width, height)?,
            PixelFormat::Bgra => resize_raw::<Rgba<u8>>(self, width, height)?,
            PixelFormat::Gray => resize_raw::<Luma<u8>>(self, width, height)?,
        };
        Self::new(width, height, self.format, data)
    }

    /// Pack into a top-down device-independent bitmap
    ///
    /// Rows are padded to 4-byte strides. Gray frames are expanded to 24-bit BGR.
    pub fn to_dib(&self) -> Dib {
        let bit_count: u16 = match self.format {
            PixelFormat::Bgra => 32,
            PixelFormat::Bgr | PixelFormat::Gray => 24,
        };
        let out_channels = usize::from(bit_count / 8);
        let row_bytes = self.width as usize * out_channels;
        let stride = (row_bytes + 3) & !3;
        let in_row = self.width as usize * self.format.channels();

        let mut pixels = vec![0u8; stride * self.height as usize];
        for (src, dst) in self.data.chunks_exact(in_row).zip(pixels.chunks_exact_mut(stride)) {
            match self.format {
                PixelFormat::Gray => {
                    for (value, out) in src.iter().zip(dst.chunks_exact_mut(3)) {
                        out.fill(*value);
                    }
                }
                PixelFormat::Bgr | PixelFormat::Bgra => dst[..row_bytes].copy_from_slice(src),
            }
        }

        Dib {
            header: DibHeader {
                width: self.width as i32,
                // Negative height marks a top-down bitmap
                height: -(self.height as i32),
                bit_count,
                size_image: pixels.len() as u32,
            },
            stride,
            pixels,
        }
    }
}

fn resize_raw<P>(frame: &Frame, width: u32, height: u32) -> WindowResult<Vec<u8>>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    let source: ImageBuffer<P, &[u8]> =
        ImageBuffer::from_raw(frame.width, frame.height, frame.data.as_slice()).ok_or_else(|| {
            WindowError::InvalidFrame("buffer smaller than its dimensions".to_string())
        })?;
    Ok(imageops::resize(&source, width, height, FilterType::Triangle).into_raw())
}

/// The fields of a `BITMAPINFOHEADER` that vary per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DibHeader {
    /// `biWidth`
    pub width: i32,
    /// `biHeight`, negative for top-down rows
    pub height: i32,
    /// `biBitCount`
    pub bit_count: u16,
    /// `biSizeImage`
    pub size_image: u32,
}

/// Device-independent bitmap ready for a GDI blit
#[derive(Debug, Clone)]
pub struct Dib {
    /// Header values
    pub header: DibHeader,
    /// Bytes per row including padding
    pub stride: usize,
    /// Row data, top row first
    pub pixels: Vec<u8>,
}

impl Dib {
    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.header.width.unsigned_abs()
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.header.height.unsigned_abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_wrong_length() {
        let err = Frame::from_bgr(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(err, WindowError::InvalidFrame(_)));
        assert!(Frame::from_gray(0, 5, Vec::new()).is_err());
    }

    #[test]
    fn test_from_rgb_swaps_to_bgr() {
        let frame = Frame::from_rgb(1, 1, vec![10, 20, 30]).unwrap();
        assert_eq!(frame.data(), &[30, 20, 10]);
        assert_eq!(frame.format(), PixelFormat::Bgr);
    }

    #[test]
    fn test_from_image_keeps_alpha() {
        let image = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(2, 1, Rgba([1, 2, 3, 4])));
        let frame = Frame::from_image(&image).unwrap();
        assert_eq!(frame.format(), PixelFormat::Bgra);
        assert_eq!(frame.data(), &[3, 2, 1, 4, 3, 2, 1, 4]);
    }

    #[test]
    fn test_fit_same_size_is_identity() {
        let frame = Frame::solid(4, 3, [1, 2, 3]).unwrap();
        assert_eq!(frame.fit(4, 3).unwrap(), frame);
    }

    #[test]
    fn test_fit_scales_solid_color() {
        let frame = Frame::solid(2, 2, [200, 100, 50]).unwrap();
        let fitted = frame.fit(7, 5).unwrap();
        assert_eq!((fitted.width(), fitted.height()), (7, 5));
        assert_eq!(fitted.data().len(), 7 * 5 * 3);
        assert!(fitted.data().chunks_exact(3).all(|p| p == [200, 100, 50]));
    }

    #[test]
    fn test_fit_rejects_empty_target() {
        let frame = Frame::solid(2, 2, [0, 0, 0]).unwrap();
        assert!(frame.fit(0, 10).is_err());
    }

    #[test]
    fn test_dib_pads_rows_to_four_bytes() {
        // 3 px * 3 bytes = 9 bytes per row, padded to 12
        let data: Vec<u8> = (0..18).collect();
        let dib = Frame::from_bgr(3, 2, data).unwrap().to_dib();
        assert_eq!(dib.stride, 12);
        assert_eq!(dib.header.bit_count, 24);
        assert_eq!(dib.header.height, -2);
        assert_eq!(dib.header.size_image, 24);
        assert_eq!(&dib.pixels[0..9], &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&dib.pixels[9..12], &[0, 0, 0]);
        assert_eq!(&dib.pixels[12..21], &[9, 10, 11, 12, 13, 14, 15, 16, 17]);
        assert_eq!((dib.width(), dib.height()), (3, 2));
    }

    #[test]
    fn test_dib_expands_gray() {
        let dib = Frame::from_gray(2, 1, vec![7, 9]).unwrap().to_dib();
        assert_eq!(dib.header.bit_count, 24);
        assert_eq!(dib.stride, 8);
        assert_eq!(&dib.pixels[..6], &[7, 7, 7, 9, 9, 9]);
    }

    #[test]
    fn test_dib_bgra_is_unpadded() {
        let dib = Frame::from_bgra(3, 1, vec![1; 12]).unwrap().to_dib();
        assert_eq!(dib.header.bit_count, 32);
        assert_eq!(dib.stride, 12);
        assert_eq!(dib.pixels, vec![1; 12]);
    }
}
