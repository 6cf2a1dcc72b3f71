// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory RGBA8 graphics backend.
//!
//! Useful for headless rendering, for uploading atlas pages to a GPU in bulk, and
//! for tests.

use alloc::vec;
use alloc::vec::Vec;

use crate::{GraphicsBackend, Rect};

/// Color of pixels that have never been written: white with zero alpha.
const CLEAR: [u8; 4] = [255, 255, 255, 0];

/// A [`GraphicsBackend`] storing surfaces in main memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CpuBackend {
    max_surface_size: u32,
}

impl CpuBackend {
    /// Default maximum surface side length.
    pub const DEFAULT_MAX_SURFACE_SIZE: u32 = 8192;

    /// Creates a backend with the default maximum surface size.
    pub fn new() -> Self {
        Self::with_max_surface_size(Self::DEFAULT_MAX_SURFACE_SIZE)
    }

    /// Creates a backend whose surfaces never exceed `max_surface_size` on either side.
    pub fn with_max_surface_size(max_surface_size: u32) -> Self {
        Self { max_surface_size }
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// An RGBA8 surface owned by a [`CpuBackend`].
#[derive(Clone, PartialEq, Eq)]
pub struct CpuSurface {
    width: u32,
    height: u32,
    smooth: bool,
    pixels: Vec<[u8; 4]>,
}

impl CpuSurface {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            smooth: false,
            pixels: vec![CLEAR; width as usize * height as usize],
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

    /// Whether the surface is flagged for bilinear filtering.
    #[inline]
    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    /// All pixels as tightly packed RGBA8 rows.
    #[inline]
    pub fn data(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// The pixel at `(x, y)`, or `None` if it lies outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Copies `region` out as tightly packed RGBA8 rows.
    ///
    /// Returns `None` if the region is not fully inside the surface.
    pub fn read_region(&self, region: Rect<u32>) -> Option<Vec<u8>> {
        if region.right() > self.width || region.bottom() > self.height {
            return None;
        }
        let stride = self.width as usize;
        let mut out = Vec::with_capacity(region.width as usize * region.height as usize * 4);
        for y in region.y..region.bottom() {
            let start = y as usize * stride + region.x as usize;
            let row = &self.pixels[start..start + region.width as usize];
            out.extend_from_slice(bytemuck::cast_slice(row));
        }
        Some(out)
    }
}

impl core::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("smooth", &self.smooth)
            .finish_non_exhaustive()
    }
}

impl GraphicsBackend for CpuBackend {
    type Surface = CpuSurface;

    fn create_surface(&mut self, width: u32, height: u32) -> Self::Surface {
        CpuSurface::new(width, height)
    }

    fn resize_surface(&mut self, surface: &mut Self::Surface, width: u32, height: u32) {
        let mut resized = CpuSurface::new(width, height);
        resized.smooth = surface.smooth;
        let copy_width = surface.width.min(width) as usize;
        for y in 0..surface.height.min(height) as usize {
            let src = y * surface.width as usize;
            let dst = y * width as usize;
            resized.pixels[dst..dst + copy_width]
                .copy_from_slice(&surface.pixels[src..src + copy_width]);
        }
        *surface = resized;
    }

    fn write_region(&mut self, surface: &mut Self::Surface, region: Rect<u32>, pixels: &[u8]) {
        debug_assert_eq!(
            pixels.len(),
            region.width as usize * region.height as usize * 4,
            "pixel data does not match the region size"
        );
        if region.is_empty() {
            return;
        }
        if region.right() > surface.width || region.bottom() > surface.height {
            log::warn!(
                "ignoring write to {region:?} outside a {}x{} surface",
                surface.width,
                surface.height
            );
            return;
        }
        let src: &[[u8; 4]] = bytemuck::cast_slice(pixels);
        let stride = surface.width as usize;
        for (row, y) in src.chunks_exact(region.width as usize).zip(region.y..) {
            let start = y as usize * stride + region.x as usize;
            surface.pixels[start..start + row.len()].copy_from_slice(row);
        }
    }

    fn max_surface_size(&self) -> u32 {
        self.max_surface_size
    }

    fn set_smooth(&mut self, surface: &mut Self::Surface, smooth: bool) {
        surface.smooth = smooth;
    }
}
