// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Failures while placing a glyph into a page.
///
/// These never escape a [`Font`](crate::Font): the font logs them and stores a
/// glyph with an empty texture rectangle instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum AtlasError {
    /// Growing the page surface to fit the cell would exceed the backend's maximum
    /// surface size.
    ///
    /// No cell is reserved in that case. The glyph is stored with an empty
    /// texture rectangle and zero bounds rather than pointing at a placeholder
    /// region of the surface, so renderers skip it while layout keeps its advance.
    CapacityExceeded {
        /// Requested cell size, padding included.
        requested: [u32; 2],
        /// Surface size when the allocation gave up.
        surface: [u32; 2],
        /// Maximum surface side length reported by the backend.
        max: u32,
    },
    /// The rasterizer produced pixel data that does not match its dimensions.
    InvalidBitmap {
        /// Reported bitmap width.
        width: u32,
        /// Reported bitmap height.
        height: u32,
        /// Length of the pixel data in bytes.
        len: usize,
    },
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                surface,
                max,
            } => write!(
                f,
                "cannot fit a {}x{} glyph cell: surface is {}x{} and the maximum size is {max}",
                requested[0], requested[1], surface[0], surface[1]
            ),
            Self::InvalidBitmap { width, height, len } => write!(
                f,
                "bitmap of {width}x{height} pixels has {len} bytes of pixel data"
            ),
        }
    }
}

impl core::error::Error for AtlasError {}
