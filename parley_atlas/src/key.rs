// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph cache key.

/// Unique identifier for a cached glyph within a [`Page`](crate::Page).
///
/// The key packs the outline thickness (as raw `f32` bits) into the upper 32 bits,
/// the bold flag into bit 31 and the glyph index within the face into the remaining
/// bits. The pixel size is not part of the key because every pixel size has its own
/// page.
///
/// Outline thickness is compared by bit pattern: `0.0` and `-0.0` are distinct keys,
/// and callers must pass the same `f32` to hit the same entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphKey(u64);

const BOLD_BIT: u64 = 1 << 31;
const INDEX_MASK: u64 = BOLD_BIT - 1;

impl GlyphKey {
    /// Creates a key for the given style and glyph index.
    ///
    /// Only the low 31 bits of `glyph_index` are kept; OpenType faces use at most 16.
    #[inline]
    pub fn new(outline_thickness: f32, bold: bool, glyph_index: u32) -> Self {
        let thickness = u64::from(outline_thickness.to_bits()) << 32;
        let bold = if bold { BOLD_BIT } else { 0 };
        Self(thickness | bold | (u64::from(glyph_index) & INDEX_MASK))
    }

    /// Returns the packed 64-bit value.
    #[inline]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Outline thickness this key was built with.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the thickness occupies the upper 32 bits"
    )]
    #[inline]
    pub fn outline_thickness(self) -> f32 {
        f32::from_bits((self.0 >> 32) as u32)
    }

    /// Whether this key refers to the bold variant.
    #[inline]
    pub const fn is_bold(self) -> bool {
        self.0 & BOLD_BIT != 0
    }

    /// Glyph index within the face.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the index is masked to 31 bits"
    )]
    #[inline]
    pub const fn glyph_index(self) -> u32 {
        (self.0 & INDEX_MASK) as u32
    }
}
