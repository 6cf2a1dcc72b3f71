// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rasterizer interface consumed by [`Font`](crate::Font).

use alloc::string::String;

use crate::Bitmap;

/// A glyph bitmap together with the metrics reported by the rasterizer.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterizedGlyph {
    /// Rendered pixels. May be empty (whitespace).
    pub bitmap: Bitmap,
    /// Horizontal distance from the pen origin to the left edge of the bitmap.
    pub left: i32,
    /// Vertical distance from the baseline up to the top edge of the bitmap.
    pub top: i32,
    /// Horizontal pen movement in pixels, before any bold compensation.
    pub advance: f32,
    /// Left side-bearing hinting delta, in 1/64 pixel units.
    pub lsb_delta: i32,
    /// Right side-bearing hinting delta, in 1/64 pixel units.
    pub rsb_delta: i32,
}

/// Face-wide metrics at the current pixel size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FaceMetrics {
    /// Recommended distance between two baselines.
    pub line_spacing: f32,
    /// Distance from the baseline down to the underline.
    pub underline_position: f32,
    /// Thickness of the underline.
    pub underline_thickness: f32,
}

/// Descriptive information about a face.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontInfo {
    /// Family name, empty if the face does not name one.
    pub family: String,
}

/// A source of glyph bitmaps and metrics for one font face.
///
/// Implementations are stateful: [`set_pixel_size`](Self::set_pixel_size) selects the
/// size used by every following call. A face may be shared by several
/// [`Font`](crate::Font) values, so the font selects the size before each query.
pub trait Rasterizer {
    /// Selects the pixel size used by the following calls.
    ///
    /// Returns `false` if the face cannot be used at this size.
    fn set_pixel_size(&mut self, pixel_size: u32) -> bool;

    /// Maps a character to the face's glyph index. `0` means the face has no glyph
    /// for it.
    ///
    /// Glyph caches key on the low 31 bits of the index, so indices must stay below
    /// `2^31` to remain distinct.
    fn glyph_index(&self, codepoint: char) -> u32;

    /// Renders a glyph at the current pixel size.
    ///
    /// `outline_thickness` is the stroke radius in pixels; `0.0` renders the filled
    /// glyph. Returns `None` if the glyph cannot be rendered.
    fn load_glyph(
        &mut self,
        codepoint: char,
        bold: bool,
        outline_thickness: f32,
    ) -> Option<RasterizedGlyph>;

    /// Pair kerning between two glyph indices at the current pixel size.
    ///
    /// Scalable faces report 1/64 pixel units, non-scalable faces whole pixels.
    fn kerning(&self, first: u32, second: u32) -> (i32, i32);

    /// Face metrics at the current pixel size.
    fn face_metrics(&self) -> FaceMetrics;

    /// Whether the face is an outline (scalable) face.
    fn is_scalable(&self) -> bool {
        true
    }

    /// Descriptive information about the face.
    fn info(&self) -> FontInfo {
        FontInfo::default()
    }
}
