// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The graphics backend interface consumed by [`Page`](crate::Page).

use crate::Rect;

/// Creates and updates the GPU-resident (or otherwise external) surfaces backing
/// atlas pages.
///
/// All surfaces store RGBA8 pixels. Calls are synchronous and happen on the thread
/// that owns the graphics context.
pub trait GraphicsBackend {
    /// Handle to a single surface.
    type Surface;

    /// Creates a surface of the given size, filled with transparent pixels.
    fn create_surface(&mut self, width: u32, height: u32) -> Self::Surface;

    /// Grows a surface to the given size, keeping the existing pixels at their
    /// current coordinates.
    fn resize_surface(&mut self, surface: &mut Self::Surface, width: u32, height: u32);

    /// Overwrites `region` with tightly packed RGBA8 `pixels`.
    fn write_region(&mut self, surface: &mut Self::Surface, region: Rect<u32>, pixels: &[u8]);

    /// Largest side length a surface may have.
    fn max_surface_size(&self) -> u32;

    /// Enables or disables bilinear filtering when sampling the surface.
    fn set_smooth(&mut self, surface: &mut Self::Surface, smooth: bool) {
        let _ = (surface, smooth);
    }
}
