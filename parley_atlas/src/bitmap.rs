// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rasterized glyph bitmaps and their padded RGBA expansion.

use alloc::vec;
use alloc::vec::Vec;

use crate::AtlasError;

/// Pixel layout of a [`Bitmap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BitmapFormat {
    /// One coverage byte per pixel. Expanded to white with the coverage as alpha.
    Alpha,
    /// Four bytes per pixel, straight RGBA.
    Rgba,
}

impl BitmapFormat {
    /// Bytes used by one pixel.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Alpha => 1,
            Self::Rgba => 4,
        }
    }
}

/// A tightly packed, row-major glyph bitmap as produced by a
/// [`Rasterizer`](crate::Rasterizer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    format: BitmapFormat,
    data: Vec<u8>,
}

impl Bitmap {
    /// Wraps pixel data, checking that its length matches the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        format: BitmapFormat,
        data: Vec<u8>,
    ) -> Result<Self, AtlasError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(format.bytes_per_pixel()));
        if expected != Some(data.len()) {
            return Err(AtlasError::InvalidBitmap {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// A bitmap with no pixels, as produced for whitespace.
    pub const fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            format: BitmapFormat::Alpha,
            data: Vec::new(),
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel layout.
    #[inline]
    pub fn format(&self) -> BitmapFormat {
        self.format
    }

    /// Raw pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns `true` if the bitmap covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGBA value of the pixel at `(x, y)`.
    fn rgba_at(&self, x: usize, y: usize) -> [u8; 4] {
        let index = y * self.width as usize + x;
        match self.format {
            BitmapFormat::Alpha => [255, 255, 255, self.data[index]],
            BitmapFormat::Rgba => bytemuck::cast_slice::<u8, [u8; 4]>(&self.data)[index],
        }
    }

    /// Expands the bitmap to RGBA8 with a `padding` pixel border on every side.
    ///
    /// Border pixels repeat the color of the nearest edge pixel with zero alpha, so
    /// bilinear filtering at the glyph edge fades to the glyph's own color instead of
    /// to black.
    pub(crate) fn to_padded_rgba(&self, padding: u32) -> Vec<u8> {
        let pad = padding as usize;
        let width = self.width as usize;
        let height = self.height as usize;
        let padded_width = width + 2 * pad;
        let padded_height = height + 2 * pad;

        let mut pixels = vec![[0_u8; 4]; padded_width * padded_height];
        if self.is_empty() {
            return bytemuck::cast_slice(&pixels).to_vec();
        }

        for (py, row) in pixels.chunks_exact_mut(padded_width).enumerate() {
            let y = py.saturating_sub(pad).min(height - 1);
            let inside_y = (pad..pad + height).contains(&py);
            for (px, pixel) in row.iter_mut().enumerate() {
                let x = px.saturating_sub(pad).min(width - 1);
                let inside = inside_y && (pad..pad + width).contains(&px);
                let [r, g, b, a] = self.rgba_at(x, y);
                *pixel = [r, g, b, if inside { a } else { 0 }];
            }
        }

        bytemuck::cast_slice(&pixels).to_vec()
    }
}
