// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row-based packing of glyph cells into a growable surface.
//!
//! The surface is split into horizontal rows. Each row has a fixed height chosen
//! when it is created and is filled left to right. A new cell goes into the row
//! whose height fits it most tightly (within the configured ratio window); if no
//! row fits, a new row is opened below the last one, doubling the surface as often
//! as needed. Rows never move, so placed cells stay valid across growth.

use alloc::vec::Vec;

use crate::{AtlasConfig, AtlasError, GraphicsBackend, Rect};

/// A horizontal strip of a page surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Offset of the row from the top of the surface.
    pub top: u32,
    /// Height of the row, fixed at creation.
    pub height: u32,
    /// Horizontal space already used, growing as cells are appended.
    pub width: u32,
}

/// Places glyph cells into rows of a surface and grows the surface on demand.
#[derive(Clone, Debug)]
pub struct RowAllocator {
    rows: Vec<Row>,
    next_row_top: u32,
    width: u32,
    height: u32,
    min_row_ratio: f32,
    row_slack_percent: u32,
}

impl RowAllocator {
    /// Creates an allocator for an empty surface of the given size.
    pub fn new(width: u32, height: u32, config: &AtlasConfig) -> Self {
        Self {
            rows: Vec::new(),
            next_row_top: 0,
            width,
            height,
            min_row_ratio: config.min_row_ratio,
            row_slack_percent: config.row_slack_percent,
        }
    }

    /// Current surface size as `[width, height]`.
    #[inline]
    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }

    /// Rows in creation order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Top offset at which the next row will be created.
    #[inline]
    pub fn next_row_top(&self) -> u32 {
        self.next_row_top
    }

    /// Reserves a `width` x `height` cell and returns its location in the surface.
    ///
    /// The surface is resized through `backend` when no existing row can take the cell.
    /// On failure the allocator and surface keep every cell placed so far.
    pub fn allocate<B: GraphicsBackend>(
        &mut self,
        backend: &mut B,
        surface: &mut B::Surface,
        width: u32,
        height: u32,
    ) -> Result<Rect<u32>, AtlasError> {
        let index = match self.best_row(width, height) {
            Some(index) => index,
            None => self.push_row(backend, surface, width, height)?,
        };

        let row = &mut self.rows[index];
        let rect = Rect::new(row.width, row.top, width, height);
        row.width += width;
        Ok(rect)
    }

    /// Finds the existing row with the tightest vertical fit that still has room.
    ///
    /// Ties keep the row created first.
    fn best_row(&self, width: u32, height: u32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, row) in self.rows.iter().enumerate() {
            let ratio = height as f32 / row.height as f32;
            if ratio < self.min_row_ratio || ratio > 1.0 {
                continue;
            }
            if width > self.width - row.width {
                continue;
            }
            if best.is_some_and(|(_, best_ratio)| ratio <= best_ratio) {
                continue;
            }
            best = Some((index, ratio));
        }
        best.map(|(index, _)| index)
    }

    /// Opens a new row for a cell, growing the surface until it fits.
    fn push_row<B: GraphicsBackend>(
        &mut self,
        backend: &mut B,
        surface: &mut B::Surface,
        width: u32,
        height: u32,
    ) -> Result<usize, AtlasError> {
        let row_height = height.saturating_add(height.saturating_mul(self.row_slack_percent) / 100);
        let max = backend.max_surface_size();

        while self.next_row_top.saturating_add(row_height) >= self.height || width >= self.width {
            let doubled = (self.width.checked_mul(2), self.height.checked_mul(2));
            let (new_width, new_height) = match doubled {
                (Some(w), Some(h)) if w <= max && h <= max && w > self.width => (w, h),
                _ => {
                    return Err(AtlasError::CapacityExceeded {
                        requested: [width, height],
                        surface: [self.width, self.height],
                        max,
                    });
                }
            };
            log::debug!(
                "growing atlas surface from {}x{} to {new_width}x{new_height}",
                self.width,
                self.height
            );
            backend.resize_surface(surface, new_width, new_height);
            self.width = new_width;
            self.height = new_height;
        }

        self.rows.push(Row {
            top: self.next_row_top,
            height: row_height,
            width: 0,
        });
        self.next_row_top += row_height;
        Ok(self.rows.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{Row, RowAllocator};
    use crate::{AtlasConfig, AtlasError, GraphicsBackend, Rect};
    use alloc::vec::Vec;

    /// Tracks surface sizes without storing pixels.
    struct SizeBackend {
        max: u32,
        resizes: Vec<[u32; 2]>,
    }

    impl SizeBackend {
        fn new(max: u32) -> Self {
            Self {
                max,
                resizes: Vec::new(),
            }
        }
    }

    impl GraphicsBackend for SizeBackend {
        type Surface = [u32; 2];

        fn create_surface(&mut self, width: u32, height: u32) -> Self::Surface {
            [width, height]
        }

        fn resize_surface(&mut self, surface: &mut Self::Surface, width: u32, height: u32) {
            *surface = [width, height];
            self.resizes.push([width, height]);
        }

        fn write_region(&mut self, _: &mut Self::Surface, _: Rect<u32>, _: &[u8]) {}

        fn max_surface_size(&self) -> u32 {
            self.max
        }
    }

    fn allocator(size: u32) -> (SizeBackend, [u32; 2], RowAllocator) {
        let mut backend = SizeBackend::new(4096);
        let surface = backend.create_surface(size, size);
        (backend, surface, RowAllocator::new(size, size, &AtlasConfig::default()))
    }

    #[test]
    fn reuses_rows_and_opens_new_ones() {
        let (mut backend, mut surface, mut rows) = allocator(128);

        let a = rows.allocate(&mut backend, &mut surface, 24, 28).unwrap();
        let b = rows.allocate(&mut backend, &mut surface, 24, 28).unwrap();
        assert_eq!(a, Rect::new(0, 0, 24, 28));
        assert_eq!(b, Rect::new(24, 0, 24, 28));
        assert_eq!(
            rows.rows(),
            [Row {
                top: 0,
                height: 30,
                width: 48
            }]
        );

        // Too tall for the first row: a second row is opened right below it,
        // which needs a bigger surface.
        let c = rows.allocate(&mut backend, &mut surface, 9, 104).unwrap();
        assert_eq!(c, Rect::new(0, 30, 9, 104));
        assert_eq!(rows.rows()[1].height, 114);
        assert_eq!(rows.next_row_top(), 144);
        assert_eq!(surface, [256, 256]);
    }

    #[test]
    fn short_glyphs_do_not_reuse_tall_rows() {
        let (mut backend, mut surface, mut rows) = allocator(128);
        rows.allocate(&mut backend, &mut surface, 10, 40).unwrap();
        // 27 / 44 is below the 0.7 ratio floor.
        let rect = rows.allocate(&mut backend, &mut surface, 10, 27).unwrap();
        assert_eq!(rect.y, 44);
        assert_eq!(rows.rows().len(), 2);
    }

    #[test]
    fn prefers_the_tightest_row() {
        // Rows of height 44 and 33, created in both orders.
        for heights in [[40, 30], [30, 40]] {
            let (mut backend, mut surface, mut rows) = allocator(256);
            for height in heights {
                rows.allocate(&mut backend, &mut surface, 10, height).unwrap();
            }
            assert_eq!(rows.rows().len(), 2);
            let tight = rows.rows().iter().find(|row| row.height == 33).unwrap().top;

            // 31 fits both rows; 31 / 33 beats 31 / 44.
            let rect = rows.allocate(&mut backend, &mut surface, 10, 31).unwrap();
            assert_eq!(rect.y, tight, "heights {heights:?}");
        }
    }

    #[test]
    fn equal_ratios_keep_the_first_row() {
        let (mut backend, mut surface, mut rows) = allocator(128);
        rows.allocate(&mut backend, &mut surface, 100, 20).unwrap();
        // Does not fit beside the first cell, so it opens a second row of the same height.
        let second = rows.allocate(&mut backend, &mut surface, 100, 20).unwrap();
        assert_eq!(second.y, 22);

        let rect = rows.allocate(&mut backend, &mut surface, 10, 20).unwrap();
        assert_eq!(rect, Rect::new(100, 0, 10, 20));
    }

    #[test]
    fn wide_cells_grow_the_surface() {
        let (mut backend, mut surface, mut rows) = allocator(16);
        let rect = rows.allocate(&mut backend, &mut surface, 40, 5).unwrap();
        assert_eq!(rect, Rect::new(0, 0, 40, 5));
        assert_eq!(backend.resizes, [[32, 32], [64, 64]]);
        assert_eq!(rows.size(), [64, 64]);
    }

    #[test]
    fn growth_beyond_the_maximum_fails() {
        let mut backend = SizeBackend::new(4);
        let mut surface = backend.create_surface(4, 4);
        let mut rows = RowAllocator::new(4, 4, &AtlasConfig::default());

        let err = rows.allocate(&mut backend, &mut surface, 5, 5).unwrap_err();
        assert_eq!(
            err,
            AtlasError::CapacityExceeded {
                requested: [5, 5],
                surface: [4, 4],
                max: 4
            }
        );
        assert!(rows.rows().is_empty());
        assert!(backend.resizes.is_empty());
    }

    #[test]
    fn growth_keeps_placed_cells() {
        let (mut backend, mut surface, mut rows) = allocator(64);
        let mut placed = Vec::new();
        let mut last_size = rows.size();
        for i in 0..40_u32 {
            let size = 8 + (i * 7) % 23;
            placed.push(rows.allocate(&mut backend, &mut surface, size, size).unwrap());
            let current = rows.size();
            assert!(current[0] >= last_size[0] && current[1] >= last_size[1]);
            assert!(current[0].is_power_of_two() && current[1].is_power_of_two());
            last_size = current;
        }
        for (i, a) in placed.iter().enumerate() {
            assert!(a.right() <= last_size[0] && a.bottom() <= last_size[1]);
            for b in &placed[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }
}
