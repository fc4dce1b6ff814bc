// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Pixel buffers and their persistence as .jpeg images.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use image::{codecs::jpeg::JpegEncoder, ExtendedColorType, ImageResult};

use crate::error::LabError;

/// Extension of the files written by `write_jpeg`.
pub const IMAGE_EXTENSION: &str = "jpeg";
/// Largest width or height the JPEG format can store.
pub const MAX_DIMENSION: usize = u16::MAX as usize;
const JPEG_QUALITY: u8 = 90;

/// 32 bit ARGB color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Color(u32);

impl Color {
    pub fn from_argb(argb: u32) -> Self {
        Color(argb)
    }

    pub fn argb(&self) -> u32 {
        self.0
    }

    pub fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> [u8; 3] {
        let [_, r, g, b] = self.0.to_be_bytes();
        [r, g, b]
    }
}

/// Fixed size grid of colors, stored row major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Panics if the pixel count cannot be allocated.
    pub fn new(width: usize, height: usize) -> Self {
        let len = width
            .checked_mul(height)
            .filter(|&len| len <= isize::MAX as usize / std::mem::size_of::<Color>());
        assert!(len.is_some(), "pixel buffer of {width}x{height} is too large");
        PixelBuffer {
            width,
            height,
            pixels: vec![Color::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Panics if (x, y) lies outside the buffer.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x] = color;
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x]
    }

    /// All pixels in row major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Interleaved 8 bit RGB channels, alpha dropped.
    fn rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|pixel| pixel.rgb()).collect()
    }
}

/// Write a 24-bit color .jpeg image from a pixel buffer.
/// The alpha channel is dropped.
/// Useful for visually checking for patterns in generator output.
pub fn write_jpeg(file_path: &Path, image: &PixelBuffer) -> Result<(), LabError> {
    let file = File::create(file_path).map_err(LabError::io(file_path))?;
    let mut writer = BufWriter::new(file);
    encode_jpeg(&mut writer, image).map_err(LabError::encode(file_path))?;
    writer.flush().map_err(LabError::io(file_path))
}

fn encode_jpeg(writer: &mut impl Write, image: &PixelBuffer) -> ImageResult<()> {
    let mut encoder = JpegEncoder::new_with_quality(writer, JPEG_QUALITY);
    // Dimensions above u16::MAX are rejected by the encoder itself.
    let width = u32::try_from(image.width).unwrap_or(u32::MAX);
    let height = u32::try_from(image.height).unwrap_or(u32::MAX);
    encoder.encode(&image.rgb_bytes(), width, height, ExtendedColorType::Rgb8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_are_row_major() {
        let mut img = PixelBuffer::new(3, 2);
        img.set_pixel(2, 0, Color::from_argb(1));
        img.set_pixel(0, 1, Color::from_argb(2));
        assert_eq!(img.pixels()[2], Color::from_argb(1));
        assert_eq!(img.pixels()[3], Color::from_argb(2));
        assert_eq!(img.pixel(0, 1), Color::from_argb(2));
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_pixel_panics() {
        let mut img = PixelBuffer::new(2, 2);
        img.set_pixel(2, 0, Color::default());
    }

    #[test]
    #[should_panic(expected = "too large")]
    fn oversized_buffer_is_rejected_before_allocating() {
        PixelBuffer::new(3_000_000_000, 3_000_000_000);
    }

    #[test]
    fn rgb_bytes_drop_alpha() {
        let mut img = PixelBuffer::new(2, 1);
        img.set_pixel(0, 0, Color::from_argb(0xff010203));
        img.set_pixel(1, 0, Color::from_argb(0x00a0b0c0));
        assert_eq!(img.rgb_bytes(), vec![1, 2, 3, 0xa0, 0xb0, 0xc0]);
    }

    #[test]
    fn jpeg_encoding_has_markers() {
        let mut img = PixelBuffer::new(8, 8);
        img.set_pixel(3, 4, Color::from_argb(0xffff0000));
        let mut out = Vec::new();
        encode_jpeg(&mut out, &img).unwrap();
        assert_eq!(&out[..2], &[0xff, 0xd8]);
        assert_eq!(&out[out.len() - 2..], &[0xff, 0xd9]);
    }

    #[test]
    fn jpeg_rejects_dimensions_beyond_format_limit() {
        let img = PixelBuffer::new(MAX_DIMENSION + 1, 1);
        let mut out = Vec::new();
        assert!(encode_jpeg(&mut out, &img).is_err());
    }
}
