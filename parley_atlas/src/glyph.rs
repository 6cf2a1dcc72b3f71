// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cached glyph record.

use crate::{RasterizedGlyph, Rect};

/// Extra advance in pixels added to glyphs whose bold style is synthesized.
pub const EMBOLDEN_WEIGHT: f32 = 1.0;

/// Render and metric information for one glyph at one size and style.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Glyph {
    /// Horizontal pen movement, including bold compensation.
    pub advance: f32,
    /// Ink bounding box relative to the pen origin, y pointing down.
    pub bounds: Rect<f32>,
    /// Location of the ink inside the page surface, padding excluded.
    pub texture_rect: Rect<u32>,
    /// Left side-bearing hinting delta, in 1/64 pixel units.
    pub lsb_delta: i32,
    /// Right side-bearing hinting delta, in 1/64 pixel units.
    pub rsb_delta: i32,
}

impl Glyph {
    /// A glyph that draws nothing and does not move the pen.
    pub const EMPTY: Self = Self {
        advance: 0.0,
        bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
        texture_rect: Rect::new(0, 0, 0, 0),
        lsb_delta: 0,
        rsb_delta: 0,
    };

    /// Builds the glyph record from rasterizer output, without a texture location.
    pub(crate) fn from_raster(raster: &RasterizedGlyph, bold: bool) -> Self {
        let advance = raster.advance + if bold { EMBOLDEN_WEIGHT } else { 0.0 };
        let bitmap = &raster.bitmap;
        let bounds = if bitmap.is_empty() {
            Rect::default()
        } else {
            Rect::new(
                raster.left as f32,
                -(raster.top as f32),
                bitmap.width() as f32,
                bitmap.height() as f32,
            )
        };
        Self {
            advance,
            bounds,
            texture_rect: Rect::default(),
            lsb_delta: raster.lsb_delta,
            rsb_delta: raster.rsb_delta,
        }
    }

    /// Whether the glyph has pixels in its page surface.
    #[inline]
    pub fn has_texture(&self) -> bool {
        !self.texture_rect.is_empty()
    }
}
