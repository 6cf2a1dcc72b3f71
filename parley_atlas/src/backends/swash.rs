// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Rasterizer`] built on Swash.
//!
//! All rasterizers on a thread share one Swash [`ScaleContext`]. It is created with
//! the first [`SwashRasterizer`] and released when the last one is dropped.
//!
//! Pair kerning comes from the face's legacy `kern` table, read with `read-fonts`.
//! Pairs that are only kerned through GPOS report zero, as do the hinting
//! side-bearing deltas, which Swash does not expose.

use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use read_fonts::TableProvider as _;
use read_fonts::tables::kern::SubtableKind;
use read_fonts::types::GlyphId;
use swash::scale::image::Content;
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::{Format, Stroke};
use swash::{CacheKey, FontDataRef, FontRef, StringId};

use crate::{Bitmap, BitmapFormat, FaceMetrics, FontInfo, RasterizedGlyph, Rasterizer};

/// Sub-pixel units per pixel reported by [`Rasterizer::kerning`].
const UNITS_PER_PIXEL: f32 = 64.0;

/// Faux bold strength in pixels.
const EMBOLDEN_STRENGTH: f32 = 1.0;

/// Glyph sources in order of preference.
const SOURCES: &[Source] = &[
    Source::ColorOutline(0),
    Source::ColorBitmap(StrikeWith::BestFit),
    Source::Outline,
    Source::Bitmap(StrikeWith::BestFit),
];

thread_local! {
    static SCALER_LIBRARY: RefCell<Weak<RefCell<ScalerLibrary>>> = const { RefCell::new(Weak::new()) };
}

/// The per-thread Swash state shared by every [`SwashRasterizer`].
struct ScalerLibrary {
    context: ScaleContext,
}

impl ScalerLibrary {
    /// Returns the library for this thread, creating it if no rasterizer holds it.
    fn shared() -> Rc<RefCell<Self>> {
        SCALER_LIBRARY.with(|slot| {
            if let Some(library) = slot.borrow().upgrade() {
                return library;
            }
            log::debug!("creating shared glyph scaler");
            let library = Rc::new(RefCell::new(Self {
                context: ScaleContext::new(),
            }));
            *slot.borrow_mut() = Rc::downgrade(&library);
            library
        })
    }
}

impl Drop for ScalerLibrary {
    fn drop(&mut self) {
        log::debug!("releasing shared glyph scaler");
    }
}

/// Errors from loading font data into a [`SwashRasterizer`].
#[derive(Debug)]
#[non_exhaustive]
pub enum FontLoadError {
    /// The font file could not be read.
    Io(std::io::Error),
    /// The data is not a font or font collection.
    InvalidData,
    /// The collection has no font at the requested index.
    NoSuchIndex {
        /// Requested index.
        index: usize,
        /// Number of fonts in the collection.
        count: usize,
    },
}

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read font file: {err}"),
            Self::InvalidData => f.write_str("data is not a supported font format"),
            Self::NoSuchIndex { index, count } => {
                write!(f, "font index {index} out of range for a collection of {count}")
            }
        }
    }
}

impl std::error::Error for FontLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FontLoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// A face rendered with Swash.
pub struct SwashRasterizer {
    data: Arc<[u8]>,
    index: u32,
    offset: u32,
    key: CacheKey,
    pixel_size: f32,
    library: Rc<RefCell<ScalerLibrary>>,
}

impl SwashRasterizer {
    /// Loads the face at `index` from font or font collection bytes.
    pub fn from_bytes(data: impl Into<Arc<[u8]>>, index: usize) -> Result<Self, FontLoadError> {
        let data = data.into();
        let (font_index, offset, key) = {
            let collection = FontDataRef::new(&data).ok_or(FontLoadError::InvalidData)?;
            let no_such_index = FontLoadError::NoSuchIndex {
                index,
                count: collection.len(),
            };
            let font_index = u32::try_from(index).ok();
            match (font_index, collection.get(index)) {
                (Some(font_index), Some(font)) => (font_index, font.offset, font.key),
                _ => return Err(no_such_index),
            }
        };
        Ok(Self {
            data,
            index: font_index,
            offset,
            key,
            pixel_size: 0.0,
            library: ScalerLibrary::shared(),
        })
    }

    /// Reads a font file and loads the face at `index`.
    pub fn from_file(path: impl AsRef<Path>, index: usize) -> Result<Self, FontLoadError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data, index)
    }

    fn font(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }

    /// Sum of the horizontal `kern` subtable adjustments for a pair, in font units.
    fn kern_table_pair(&self, first: GlyphId, second: GlyphId) -> Option<i32> {
        let font = read_fonts::FontRef::from_index(&self.data, self.index).ok()?;
        let kern = font.kern().ok()?;
        let mut total = None;
        for subtable in kern.subtables().filter_map(Result::ok) {
            if !subtable.is_horizontal() || subtable.is_cross_stream() || subtable.is_variable() {
                continue;
            }
            let value = match subtable.kind() {
                Ok(SubtableKind::Format0(pairs)) => pairs.kerning(first, second),
                Ok(SubtableKind::Format2(classes)) => classes.kerning(first, second),
                Ok(SubtableKind::Format3(classes)) => classes.kerning(first, second),
                _ => None,
            };
            if let Some(value) = value {
                *total.get_or_insert(0) += value;
            }
        }
        total
    }
}

impl Rasterizer for SwashRasterizer {
    fn set_pixel_size(&mut self, pixel_size: u32) -> bool {
        if pixel_size == 0 {
            log::warn!("cannot select a pixel size of 0");
            return false;
        }
        self.pixel_size = pixel_size as f32;
        true
    }

    fn glyph_index(&self, codepoint: char) -> u32 {
        u32::from(self.font().charmap().map(codepoint))
    }

    fn load_glyph(
        &mut self,
        codepoint: char,
        bold: bool,
        outline_thickness: f32,
    ) -> Option<RasterizedGlyph> {
        let font = self.font();
        let glyph_id = font.charmap().map(codepoint);
        let advance = font
            .glyph_metrics(&[])
            .scale(self.pixel_size)
            .advance_width(glyph_id)
            .round();

        let mut library = self.library.borrow_mut();
        let mut scaler = library
            .context
            .builder(font)
            .size(self.pixel_size)
            .hint(true)
            .build();

        let mut render = Render::new(SOURCES);
        render.format(Format::Alpha);
        if bold {
            render.embolden(EMBOLDEN_STRENGTH);
        }
        if outline_thickness != 0.0 {
            render.style(Stroke::new(outline_thickness.abs() * 2.0));
        }
        let Some(image) = render.render(&mut scaler, glyph_id) else {
            log::debug!("swash could not render {codepoint:?}");
            return None;
        };

        let format = match image.content {
            Content::Mask => BitmapFormat::Alpha,
            Content::SubpixelMask | Content::Color => BitmapFormat::Rgba,
        };
        let placement = image.placement;
        let bitmap = match Bitmap::new(placement.width, placement.height, format, image.data) {
            Ok(bitmap) => bitmap,
            Err(err) => {
                log::warn!("discarding glyph {codepoint:?}: {err}");
                return None;
            }
        };

        Some(RasterizedGlyph {
            bitmap,
            left: placement.left,
            top: placement.top,
            advance,
            lsb_delta: 0,
            rsb_delta: 0,
        })
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "kerning values are far below i32::MAX in 1/64 pixels"
    )]
    fn kerning(&self, first: u32, second: u32) -> (i32, i32) {
        let Some(units) = self.kern_table_pair(GlyphId::new(first), GlyphId::new(second)) else {
            return (0, 0);
        };
        let units_per_em = self.font().metrics(&[]).units_per_em;
        if units_per_em == 0 {
            return (0, 0);
        }
        let scale = self.pixel_size * UNITS_PER_PIXEL / f32::from(units_per_em);
        ((units as f32 * scale).round() as i32, 0)
    }

    fn face_metrics(&self) -> FaceMetrics {
        let metrics = self.font().metrics(&[]).scale(self.pixel_size);
        let underline_thickness = if metrics.stroke_size > 0.0 {
            metrics.stroke_size
        } else {
            self.pixel_size / 14.0
        };
        // The offset locates the top of the underline; report its center.
        FaceMetrics {
            line_spacing: metrics.ascent + metrics.descent + metrics.leading,
            underline_position: metrics.stroke_size / 2.0 - metrics.underline_offset,
            underline_thickness,
        }
    }

    fn info(&self) -> FontInfo {
        let family = self
            .font()
            .localized_strings()
            .find_by_id(StringId::Family, None)
            .map(|name| name.chars().collect::<String>())
            .unwrap_or_default();
        FontInfo { family }
    }
}

impl fmt::Debug for SwashRasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwashRasterizer")
            .field("len", &self.data.len())
            .field("offset", &self.offset)
            .field("pixel_size", &self.pixel_size)
            .finish_non_exhaustive()
    }
}
