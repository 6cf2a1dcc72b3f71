// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fonts: a shared rasterizer face plus one atlas page per pixel size.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt::{Debug, Formatter};
use hashbrown::HashMap;

#[cfg(not(feature = "std"))]
use core_maths::CoreFloat as _;

use crate::{
    AtlasConfig, FaceMetrics, FontInfo, Glyph, GlyphKey, GraphicsBackend, Page, Rasterizer,
};

/// Sub-pixel units per pixel in kerning and side-bearing deltas.
const UNITS_PER_PIXEL: f32 = 64.0;

/// A font face with lazily populated glyph atlases.
///
/// Glyphs are requested with [`glyph`](Self::glyph) and rasterized on first use into
/// the [`Page`] for their pixel size. Pages and glyphs live as long as the font.
///
/// A font without a rasterizer (see [`Font::new`]) answers every query with a zero
/// or empty value.
///
/// Cloning a font shares its rasterizer face. Each clone builds its own pages, so
/// glyphs are never shared between clones. Fonts are meant for single-threaded use;
/// share them across threads only behind external synchronization.
pub struct Font<R, B: GraphicsBackend> {
    face: Option<Rc<RefCell<R>>>,
    backend: B,
    config: AtlasConfig,
    pages: HashMap<u32, Page<B::Surface>>,
}

impl<R: Rasterizer, B: GraphicsBackend> Font<R, B> {
    /// Creates a font without a face.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, AtlasConfig::default())
    }

    /// Creates a font without a face, using `config` for its pages.
    pub fn with_config(backend: B, config: AtlasConfig) -> Self {
        Self {
            face: None,
            backend,
            config,
            pages: HashMap::new(),
        }
    }

    /// Creates a font drawing its glyphs with `rasterizer`.
    pub fn from_rasterizer(rasterizer: R, backend: B) -> Self {
        Self::from_rasterizer_with_config(rasterizer, backend, AtlasConfig::default())
    }

    /// Creates a font drawing its glyphs with `rasterizer`, using `config` for its pages.
    pub fn from_rasterizer_with_config(rasterizer: R, backend: B, config: AtlasConfig) -> Self {
        Self {
            face: Some(Rc::new(RefCell::new(rasterizer))),
            ..Self::with_config(backend, config)
        }
    }

    /// Whether the font has a face to draw with.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.face.is_some()
    }

    /// Descriptive information about the face.
    pub fn info(&self) -> FontInfo {
        self.face
            .as_ref()
            .map(|face| face.borrow().info())
            .unwrap_or_default()
    }

    /// Returns the glyph for a character at the given size and style.
    ///
    /// The glyph is rasterized and packed into the page for `pixel_size` on first
    /// request; later requests with the same arguments return the stored glyph.
    /// A glyph that cannot be rasterized or placed comes back without a texture
    /// rectangle.
    pub fn glyph(
        &mut self,
        codepoint: char,
        pixel_size: u32,
        bold: bool,
        outline_thickness: f32,
    ) -> &Glyph {
        let Some(face) = &self.face else {
            return &Glyph::EMPTY;
        };
        let key = GlyphKey::new(outline_thickness, bold, face.borrow().glyph_index(codepoint));
        let page = page_entry(&mut self.pages, &mut self.backend, &self.config, pixel_size);
        page.glyph_or_insert_with(&mut self.backend, key, || {
            let mut face = face.borrow_mut();
            if !face.set_pixel_size(pixel_size) {
                log::warn!("failed to select pixel size {pixel_size}");
                return None;
            }
            let raster = face.load_glyph(codepoint, bold, outline_thickness);
            if raster.is_none() {
                log::debug!("failed to rasterize {codepoint:?} at {pixel_size}px");
            }
            raster
        })
    }

    /// Horizontal offset to apply between two characters, in pixels.
    ///
    /// Combines the face's pair kerning with the hinting side-bearing deltas of both
    /// glyphs. Returns `0.0` if either character is NUL.
    pub fn kerning(&mut self, first: char, second: char, pixel_size: u32, bold: bool) -> f32 {
        if first == '\0' || second == '\0' {
            return 0.0;
        }
        let Some(face) = self.face.clone() else {
            return 0.0;
        };
        let (first_index, second_index) = {
            let mut face = face.borrow_mut();
            if !face.set_pixel_size(pixel_size) {
                return 0.0;
            }
            (face.glyph_index(first), face.glyph_index(second))
        };

        let first_rsb_delta = self.glyph(first, pixel_size, bold, 0.0).rsb_delta as f32;
        let second_lsb_delta = self.glyph(second, pixel_size, bold, 0.0).lsb_delta as f32;

        let face = face.borrow();
        let (dx, _) = face.kerning(first_index, second_index);
        if !face.is_scalable() {
            return dx as f32;
        }
        ((second_lsb_delta - first_rsb_delta + dx as f32 + UNITS_PER_PIXEL / 2.0) / UNITS_PER_PIXEL)
            .floor()
    }

    /// Whether the face has a glyph for `codepoint`.
    pub fn has_glyph(&self, codepoint: char) -> bool {
        self.face
            .as_ref()
            .is_some_and(|face| face.borrow().glyph_index(codepoint) != 0)
    }

    /// Recommended distance between two baselines at `pixel_size`.
    pub fn line_spacing(&self, pixel_size: u32) -> f32 {
        self.face_metrics(pixel_size)
            .map_or(0.0, |metrics| metrics.line_spacing)
    }

    /// Distance from the baseline down to the underline at `pixel_size`.
    pub fn underline_position(&self, pixel_size: u32) -> f32 {
        self.face_metrics(pixel_size)
            .map_or(0.0, |metrics| metrics.underline_position)
    }

    /// Underline thickness at `pixel_size`.
    pub fn underline_thickness(&self, pixel_size: u32) -> f32 {
        self.face_metrics(pixel_size)
            .map_or(0.0, |metrics| metrics.underline_thickness)
    }

    fn face_metrics(&self, pixel_size: u32) -> Option<FaceMetrics> {
        let mut face = self.face.as_ref()?.borrow_mut();
        if !face.set_pixel_size(pixel_size) {
            return None;
        }
        Some(face.face_metrics())
    }

    /// The atlas surface for `pixel_size`, creating its page if needed.
    pub fn surface(&mut self, pixel_size: u32) -> &B::Surface {
        page_entry(&mut self.pages, &mut self.backend, &self.config, pixel_size).surface()
    }

    /// The page for `pixel_size`, if any glyph or surface was requested at that size.
    pub fn page(&self, pixel_size: u32) -> Option<&Page<B::Surface>> {
        self.pages.get(&pixel_size)
    }

    /// Number of pages created so far.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Enables or disables bilinear filtering on every page surface, present and future.
    pub fn set_smooth(&mut self, smooth: bool) {
        self.config.smooth = smooth;
        for page in self.pages.values_mut() {
            page.set_smooth(&mut self.backend, smooth);
        }
    }

    /// Whether page surfaces are sampled with bilinear filtering.
    #[inline]
    pub fn is_smooth(&self) -> bool {
        self.config.smooth
    }

    /// The graphics backend owning the page surfaces.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

fn page_entry<'a, B: GraphicsBackend>(
    pages: &'a mut HashMap<u32, Page<B::Surface>>,
    backend: &mut B,
    config: &AtlasConfig,
    pixel_size: u32,
) -> &'a mut Page<B::Surface> {
    pages
        .entry(pixel_size)
        .or_insert_with(|| Page::new(backend, config))
}

impl<R: Rasterizer, B: GraphicsBackend + Default> Default for Font<R, B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<R, B: GraphicsBackend + Clone> Clone for Font<R, B> {
    fn clone(&self) -> Self {
        Self {
            face: self.face.clone(),
            backend: self.backend.clone(),
            config: self.config,
            pages: HashMap::new(),
        }
    }
}

impl<R, B: GraphicsBackend> Debug for Font<R, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Font")
            .field("open", &self.face.is_some())
            .field("config", &self.config)
            .field("pages", &self.pages.len())
            .finish_non_exhaustive()
    }
}
