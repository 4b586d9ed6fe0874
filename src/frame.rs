//! Adapting a sketch framebuffer to the network's input layout.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, RgbaImage};
use tract_core::prelude::*;

use crate::errors::{LabelingError, LabelingResult};

/// Pixel layout of a [`Frame`] buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// A borrowed view over one framebuffer coming out of the host sketch.
///
/// The buffer is row-major, top-left origin, `width * height *
/// bytes_per_pixel` bytes. Nothing is copied until the frame is turned into
/// a tensor.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pixels: &'a [u8],
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl<'a> Frame<'a> {
    pub fn new(
        pixels: &'a [u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> LabelingResult<Frame<'a>> {
        if width == 0 || height == 0 {
            return Err(LabelingError::InvalidArgument(format!(
                "frame has no pixels ({width}x{height})"
            )));
        }
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(LabelingError::InvalidArgument(format!(
                "frame buffer holds {} bytes, {}x{} {:?} needs {}",
                pixels.len(),
                width,
                height,
                format,
                expected
            )));
        }
        Ok(Frame { pixels, width, height, format })
    }

    pub fn rgb8(pixels: &'a [u8], width: u32, height: u32) -> LabelingResult<Frame<'a>> {
        Frame::new(pixels, width, height, PixelFormat::Rgb8)
    }

    pub fn rgba8(pixels: &'a [u8], width: u32, height: u32) -> LabelingResult<Frame<'a>> {
        Frame::new(pixels, width, height, PixelFormat::Rgba8)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn to_rgb_image(&self) -> LabelingResult<RgbImage> {
        let pixels = self.pixels.to_vec();
        let image = match self.format {
            PixelFormat::Rgb8 => RgbImage::from_raw(self.width, self.height, pixels),
            PixelFormat::Rgba8 => RgbaImage::from_raw(self.width, self.height, pixels)
                .map(|rgba| DynamicImage::ImageRgba8(rgba).to_rgb8()),
        };
        image.ok_or_else(|| {
            LabelingError::InvalidArgument("frame buffer does not fit its dimensions".to_string())
        })
    }

    /// Resizes the frame to `side`×`side` and lays it out as the
    /// `[1, side, side, 3]` NHWC f32 tensor the network takes. Channel
    /// values stay in `[0, 255]`; range mapping belongs to the
    /// normalization graph.
    pub fn to_tensor(&self, side: u32) -> LabelingResult<Tensor> {
        let rgb = self.to_rgb_image()?;
        let resized = if rgb.dimensions() == (side, side) {
            rgb
        } else {
            imageops::resize(&rgb, side, side, FilterType::Triangle)
        };
        let side = side as usize;
        let tensor: Tensor =
            tract_ndarray::Array4::from_shape_fn((1, side, side, 3), |(_, y, x, c)| {
                resized[(x as u32, y as u32)][c] as f32
            })
            .into();
        Ok(tensor)
    }
}
