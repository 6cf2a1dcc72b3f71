// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley Atlas rasterizes glyphs on demand and packs the bitmaps into growable texture atlases.
//!
//! A [`Font`] owns one [`Page`] per requested pixel size. Each page holds a single
//! backend surface, a [`RowAllocator`] that packs glyph cells into horizontal rows,
//! and a [`GlyphCache`] mapping [`GlyphKey`]s to stored [`Glyph`]s. On a cache miss
//! the glyph is rasterized through a [`Rasterizer`], placed by the row allocator
//! (growing the surface by powers of two when needed), padded and uploaded through a
//! [`GraphicsBackend`].
//!
//! Failures never cross the [`Font`] boundary. A glyph that cannot be rasterized or
//! placed degrades to a glyph with an empty texture rectangle, and the failure is
//! reported through the [`log`] facade.
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//! - `cpu` (enabled by default): An in-memory RGBA8 [`GraphicsBackend`],
//!   see [`backends::cpu`].
//! - `swash` (enabled by default): A [`Rasterizer`] built on Swash,
//!   see [`backends::swash`].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("parley_atlas requires either the `std` or `libm` feature to be enabled");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use core_maths as _;

extern crate alloc;

mod backend;
mod bitmap;
mod config;
mod error;
mod font;
mod glyph;
mod key;
mod page;
mod raster;
mod rect;
mod rows;

pub mod backends;

#[cfg(all(test, feature = "cpu"))]
mod tests;

pub use backend::GraphicsBackend;
pub use bitmap::{Bitmap, BitmapFormat};
pub use config::AtlasConfig;
pub use error::AtlasError;
pub use font::Font;
pub use glyph::{EMBOLDEN_WEIGHT, Glyph};
pub use key::GlyphKey;
pub use page::{GlyphCache, Page};
pub use raster::{FaceMetrics, FontInfo, RasterizedGlyph, Rasterizer};
pub use rect::Rect;
pub use rows::{Row, RowAllocator};
