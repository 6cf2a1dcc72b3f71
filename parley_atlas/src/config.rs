// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atlas configuration.

/// Tuning knobs for page surfaces and the row allocator.
///
/// The defaults reproduce the packing behavior the crate was designed around and
/// should rarely need changing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AtlasConfig {
    /// Side length in pixels of a freshly created page surface.
    ///
    /// Clamped to the backend's maximum surface size and to at least 1.
    pub initial_size: u32,
    /// Transparent border in pixels reserved on each side of a glyph bitmap.
    pub padding: u32,
    /// Smallest `glyph height / row height` ratio for which an existing row is
    /// reused. Glyphs taller than the row are never placed in it.
    pub min_row_ratio: f32,
    /// Extra height, in percent of the glyph cell, given to a newly created row.
    pub row_slack_percent: u32,
    /// Whether page surfaces are sampled with bilinear filtering.
    pub smooth: bool,
}

impl AtlasConfig {
    /// Default side length of a new page surface.
    pub const DEFAULT_INITIAL_SIZE: u32 = 128;
    /// Default glyph padding.
    pub const DEFAULT_PADDING: u32 = 2;
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            initial_size: Self::DEFAULT_INITIAL_SIZE,
            padding: Self::DEFAULT_PADDING,
            min_row_ratio: 0.7,
            row_slack_percent: 10,
            smooth: true,
        }
    }
}
