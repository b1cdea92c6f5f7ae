//! Cursor bitmaps
//!
//! Custom cursors arrive as a [`Surface`] in one of several pixel layouts and
//! are handed to the platform as 32-bit ARGB.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::error::{CursorError, Result};

/// Pixel layout of a surface.
///
/// Names give the channel order of each pixel as laid out in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// a, r, g, b
    Argb8888,
    /// r, g, b, a
    Rgba8888,
    /// a, b, g, r
    Abgr8888,
    /// b, g, r, a
    Bgra8888,
    /// r, g, b (opaque)
    Rgb888,
    /// b, g, r (opaque)
    Bgr888,
    /// 8-bit palette index
    Index8,
}

impl PixelFormat {
    /// Bytes per pixel
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Argb8888 | Self::Rgba8888 | Self::Abgr8888 | Self::Bgra8888 => 4,
            Self::Rgb888 | Self::Bgr888 => 3,
            Self::Index8 => 1,
        }
    }

    /// Decode one pixel into packed `0xAARRGGBB`
    fn to_argb(self, px: &[u8]) -> Option<u32> {
        let (a, r, g, b) = match self {
            Self::Argb8888 => (px[0], px[1], px[2], px[3]),
            Self::Rgba8888 => (px[3], px[0], px[1], px[2]),
            Self::Abgr8888 => (px[0], px[3], px[2], px[1]),
            Self::Bgra8888 => (px[3], px[2], px[1], px[0]),
            Self::Rgb888 => (0xFF, px[0], px[1], px[2]),
            Self::Bgr888 => (0xFF, px[2], px[1], px[0]),
            // No palette attached
            Self::Index8 => return None,
        };
        Some(u32::from_be_bytes([a, r, g, b]))
    }
}

/// A bitmap handed in by the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pitch: usize,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl Surface {
    /// Create a tightly packed surface
    pub fn new(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Result<Self> {
        let pitch = width as usize * format.bytes_per_pixel();
        Self::with_pitch(width, height, pitch, format, pixels)
    }

    /// Create a surface whose rows are `pitch` bytes apart
    pub fn with_pitch(
        width: u32,
        height: u32,
        pitch: usize,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        let row_bytes = width as usize * format.bytes_per_pixel();
        if pitch < row_bytes {
            return Err(CursorError::InvalidSurface(format!(
                "pitch {} shorter than row of {} bytes",
                pitch, row_bytes
            )));
        }

        let required = match height {
            0 => 0,
            h => pitch * (h as usize - 1) + row_bytes,
        };
        if pixels.len() < required {
            return Err(CursorError::InvalidSurface(format!(
                "{}x{} {:?} needs {} bytes, got {}",
                width,
                height,
                format,
                required,
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            pitch,
            format,
            pixels,
        })
    }

    /// Create a zero-filled surface (fully transparent for formats with alpha)
    pub fn blank(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(format.bytes_per_pixel()))
            .ok_or_else(|| CursorError::OutOfMemory(format!("{}x{} surface", width, height)))?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|e| CursorError::OutOfMemory(e.to_string()))?;
        pixels.resize(len, 0);

        Self::new(width, height, format, pixels)
    }

    /// Wrap a decoded RGBA image
    pub fn from_rgba_image(image: &image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            pitch: width as usize * 4,
            format: PixelFormat::Rgba8888,
            pixels: image.as_raw().clone(),
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel layout
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Convert to packed ARGB8888
    pub fn to_argb8888(&self) -> Result<ArgbImage> {
        if self.format == PixelFormat::Index8 {
            return Err(CursorError::UnsupportedFormat(self.format));
        }

        let count = self.width as usize * self.height as usize;
        let mut out = Vec::new();
        out.try_reserve_exact(count)
            .map_err(|e| CursorError::OutOfMemory(e.to_string()))?;

        let bpp = self.format.bytes_per_pixel();
        for row in 0..self.height as usize {
            let start = row * self.pitch;
            let line = &self.pixels[start..start + self.width as usize * bpp];
            for px in line.chunks_exact(bpp) {
                let argb = self
                    .format
                    .to_argb(px)
                    .ok_or(CursorError::UnsupportedFormat(self.format))?;
                out.push(argb);
            }
        }

        trace!(
            "Converted {}x{} {:?} surface to ARGB8888",
            self.width,
            self.height,
            self.format
        );

        Ok(ArgbImage {
            width: self.width,
            height: self.height,
            pixels: out,
        })
    }
}

/// Cursor image in the platform's pixel format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgbImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major packed `0xAARRGGBB` pixels
    pub pixels: Vec<u32>,
}

impl ArgbImage {
    /// True when every pixel has zero alpha
    pub fn is_fully_transparent(&self) -> bool {
        self.pixels.iter().all(|px| px >> 24 == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_orders() {
        let cases = [
            (PixelFormat::Argb8888, vec![0x80, 0x11, 0x22, 0x33]),
            (PixelFormat::Rgba8888, vec![0x11, 0x22, 0x33, 0x80]),
            (PixelFormat::Abgr8888, vec![0x80, 0x33, 0x22, 0x11]),
            (PixelFormat::Bgra8888, vec![0x33, 0x22, 0x11, 0x80]),
        ];

        for (format, bytes) in cases {
            let surface = Surface::new(1, 1, format, bytes).unwrap();
            let image = surface.to_argb8888().unwrap();
            assert_eq!(image.pixels, vec![0x8011_2233], "{:?}", format);
        }
    }

    #[test]
    fn test_opaque_formats() {
        let rgb = Surface::new(1, 1, PixelFormat::Rgb888, vec![1, 2, 3]).unwrap();
        assert_eq!(rgb.to_argb8888().unwrap().pixels, vec![0xFF01_0203]);

        let bgr = Surface::new(1, 1, PixelFormat::Bgr888, vec![3, 2, 1]).unwrap();
        assert_eq!(bgr.to_argb8888().unwrap().pixels, vec![0xFF01_0203]);
    }

    #[test]
    fn test_pitch_padding_is_skipped() {
        // 1x2 RGB with 2 bytes of padding per row
        let pixels = vec![1, 2, 3, 0xEE, 0xEE, 4, 5, 6];
        let surface = Surface::with_pitch(1, 2, 5, PixelFormat::Rgb888, pixels).unwrap();
        let image = surface.to_argb8888().unwrap();
        assert_eq!(image.pixels, vec![0xFF01_0203, 0xFF04_0506]);
    }

    #[test]
    fn test_index8_is_unconvertible() {
        let surface = Surface::new(2, 2, PixelFormat::Index8, vec![0; 4]).unwrap();
        assert!(matches!(
            surface.to_argb8888(),
            Err(CursorError::UnsupportedFormat(PixelFormat::Index8))
        ));
    }

    #[test]
    fn test_short_buffer_rejected() {
        let result = Surface::new(4, 4, PixelFormat::Rgba8888, vec![0; 10]);
        assert!(matches!(result, Err(CursorError::InvalidSurface(_))));

        let result = Surface::with_pitch(4, 1, 8, PixelFormat::Rgba8888, vec![0; 16]);
        assert!(matches!(result, Err(CursorError::InvalidSurface(_))));
    }

    #[test]
    fn test_blank_is_transparent() {
        let surface = Surface::blank(1, 1, PixelFormat::Argb8888).unwrap();
        let image = surface.to_argb8888().unwrap();
        assert_eq!((image.width, image.height), (1, 1));
        assert!(image.is_fully_transparent());
    }

    #[test]
    fn test_from_rgba_image() {
        let img = image::RgbaImage::from_pixel(2, 1, image::Rgba([10, 20, 30, 255]));
        let surface = Surface::from_rgba_image(&img);
        assert_eq!(surface.format(), PixelFormat::Rgba8888);
        assert_eq!(
            surface.to_argb8888().unwrap().pixels,
            vec![0xFF0A_141E, 0xFF0A_141E]
        );
    }
}
