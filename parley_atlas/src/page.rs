// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atlas pages: one surface, one row allocator and one glyph cache per pixel size.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::{AtlasConfig, Glyph, GlyphKey, GraphicsBackend, RasterizedGlyph, Rect, RowAllocator};

/// Glyph storage for a single page.
///
/// Glyphs live in an append-only arena indexed by a key map, so a stored glyph
/// never moves once inserted and entries are only dropped with the page.
#[derive(Clone, Default)]
pub struct GlyphCache {
    glyphs: Vec<Glyph>,
    index: HashMap<GlyphKey, u32>,
    hits: u64,
    misses: u64,
}

impl GlyphCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a glyph without touching the statistics.
    pub fn get(&self, key: GlyphKey) -> Option<&Glyph> {
        let slot = *self.index.get(&key)?;
        self.glyphs.get(slot as usize)
    }

    /// Returns the glyph stored for `key`, computing and storing it with `make` on a
    /// miss. `make` is not called on a hit.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "a page cannot hold more than u32::MAX glyphs"
    )]
    pub fn get_or_insert_with(&mut self, key: GlyphKey, make: impl FnOnce() -> Glyph) -> &Glyph {
        let slot = match self.index.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                *entry.get()
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                log::trace!("glyph cache miss for {key:?}");
                let slot = self.glyphs.len() as u32;
                self.glyphs.push(make());
                *entry.insert(slot)
            }
        };
        &self.glyphs[slot as usize]
    }

    /// Number of cached glyphs.
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the cache holds no glyphs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Number of lookups answered from the cache.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that had to compute the glyph.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Iterates over all cached glyphs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.glyphs.iter()
    }
}

impl Debug for GlyphCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlyphCache")
            .field("len", &self.glyphs.len())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish_non_exhaustive()
    }
}

/// The atlas for a single pixel size.
pub struct Page<S> {
    surface: S,
    rows: RowAllocator,
    glyphs: GlyphCache,
    padding: u32,
    smooth: bool,
}

impl<S> Page<S> {
    /// Creates a page with a fresh surface from `backend`.
    pub fn new<B>(backend: &mut B, config: &AtlasConfig) -> Self
    where
        B: GraphicsBackend<Surface = S>,
    {
        let size = config.initial_size.min(backend.max_surface_size()).max(1);
        let mut surface = backend.create_surface(size, size);
        backend.set_smooth(&mut surface, config.smooth);
        log::debug!("created atlas page with a {size}x{size} surface");
        Self {
            surface,
            rows: RowAllocator::new(size, size, config),
            glyphs: GlyphCache::new(),
            padding: config.padding,
            smooth: config.smooth,
        }
    }

    /// The surface holding this page's glyphs.
    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Current surface size as `[width, height]`.
    #[inline]
    pub fn size(&self) -> [u32; 2] {
        self.rows.size()
    }

    /// The row allocator placing this page's glyphs.
    #[inline]
    pub fn rows(&self) -> &RowAllocator {
        &self.rows
    }

    /// The glyphs stored in this page.
    #[inline]
    pub fn glyphs(&self) -> &GlyphCache {
        &self.glyphs
    }

    /// Padding reserved around every glyph in this page.
    #[inline]
    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Whether the surface is sampled with bilinear filtering.
    #[inline]
    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    pub(crate) fn set_smooth<B>(&mut self, backend: &mut B, smooth: bool)
    where
        B: GraphicsBackend<Surface = S>,
    {
        if self.smooth != smooth {
            self.smooth = smooth;
            backend.set_smooth(&mut self.surface, smooth);
        }
    }

    /// Returns the glyph for `key`, rasterizing and placing it on a miss.
    ///
    /// `rasterize` is only called on a miss. A `None` result is cached as
    /// [`Glyph::EMPTY`] so failing glyphs are not retried.
    pub fn glyph_or_insert_with<B, F>(
        &mut self,
        backend: &mut B,
        key: GlyphKey,
        rasterize: F,
    ) -> &Glyph
    where
        B: GraphicsBackend<Surface = S>,
        F: FnOnce() -> Option<RasterizedGlyph>,
    {
        let Self {
            surface,
            rows,
            glyphs,
            padding,
            ..
        } = self;
        glyphs.get_or_insert_with(key, || match rasterize() {
            Some(raster) => place(backend, surface, rows, *padding, &raster, key.is_bold()),
            None => Glyph::EMPTY,
        })
    }
}

/// Builds the glyph record for `raster` and uploads its padded pixels.
fn place<B: GraphicsBackend>(
    backend: &mut B,
    surface: &mut B::Surface,
    rows: &mut RowAllocator,
    padding: u32,
    raster: &RasterizedGlyph,
    bold: bool,
) -> Glyph {
    let mut glyph = Glyph::from_raster(raster, bold);
    let bitmap = &raster.bitmap;
    if bitmap.is_empty() {
        return glyph;
    }

    let cell_width = bitmap.width().saturating_add(2 * padding);
    let cell_height = bitmap.height().saturating_add(2 * padding);
    let cell = match rows.allocate(backend, surface, cell_width, cell_height) {
        Ok(cell) => cell,
        Err(err) => {
            log::warn!("failed to add a glyph to the atlas: {err}");
            glyph.bounds = Rect::default();
            return glyph;
        }
    };

    let pixels = bitmap.to_padded_rgba(padding);
    backend.write_region(surface, cell, &pixels);
    glyph.texture_rect = cell.inset(padding);
    glyph
}

impl<S> Debug for Page<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Page")
            .field("size", &self.rows.size())
            .field("rows", &self.rows.rows().len())
            .field("glyphs", &self.glyphs)
            .field("smooth", &self.smooth)
            .finish_non_exhaustive()
    }
}
