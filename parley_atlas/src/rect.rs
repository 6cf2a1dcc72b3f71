// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned rectangles.

use core::ops::{Add, Sub};

/// An axis-aligned rectangle given by its top-left corner and its size.
///
/// `Rect<u32>` describes regions of a page surface, `Rect<f32>` describes glyph
/// bounds relative to the pen origin (y pointing down).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect<T> {
    /// Left edge.
    pub x: T,
    /// Top edge.
    pub y: T,
    /// Horizontal extent.
    pub width: T,
    /// Vertical extent.
    pub height: T,
}

impl<T> Rect<T> {
    /// Creates a rectangle from its top-left corner and its size.
    #[inline]
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T: Copy + Add<Output = T>> Rect<T> {
    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> T {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> T {
        self.y + self.height
    }
}

impl<T: Copy + Default + PartialOrd> Rect<T> {
    /// Returns `true` if the rectangle covers no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > T::default() && self.height > T::default())
    }
}

impl<T: Copy + Default + PartialOrd + Add<Output = T>> Rect<T> {
    /// Returns `true` if both rectangles share at least one interior point.
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

impl<T: Copy + Add<Output = T> + Sub<Output = T>> Rect<T> {
    /// Shrinks the rectangle by `amount` on every side.
    ///
    /// The caller must ensure the rectangle is at least `2 * amount` wide and high.
    #[inline]
    pub fn inset(self, amount: T) -> Self {
        Self {
            x: self.x + amount,
            y: self.y + amount,
            width: self.width - amount - amount,
            height: self.height - amount - amount,
        }
    }

    /// Grows the rectangle by `amount` on every side.
    #[inline]
    pub fn outset(self, amount: T) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount + amount,
            height: self.height + amount + amount,
        }
    }
}
