// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared test fixtures.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::backends::cpu::{CpuBackend, CpuSurface};
use crate::{
    Bitmap, BitmapFormat, FaceMetrics, Font, FontInfo, Glyph, RasterizedGlyph, Rasterizer, Rect,
};

/// A font over a [`StubRasterizer`] and the CPU backend.
pub(crate) type StubFont = Font<StubRasterizer, CpuBackend>;

#[derive(Copy, Clone, Debug)]
struct StubGlyph {
    index: u32,
    width: u32,
    height: u32,
    advance: f32,
    lsb_delta: i32,
    rsb_delta: i32,
}

/// A rasterizer serving fixed-size coverage bitmaps and counting its work.
#[derive(Clone, Debug)]
pub(crate) struct StubRasterizer {
    glyphs: HashMap<char, StubGlyph>,
    kerning: HashMap<(u32, u32), i32>,
    loads: Rc<Cell<usize>>,
    pixel_size: u32,
    scalable: bool,
}

impl StubRasterizer {
    pub(crate) fn new() -> Self {
        Self {
            glyphs: HashMap::new(),
            kerning: HashMap::new(),
            loads: Rc::new(Cell::new(0)),
            pixel_size: 0,
            scalable: true,
        }
    }

    /// Adds a glyph whose bitmap is `width` x `height` pixels.
    pub(crate) fn with_glyph(self, codepoint: char, width: u32, height: u32) -> Self {
        self.with_deltas(codepoint, width, height, 0, 0)
    }

    /// Adds a glyph with explicit side-bearing deltas.
    pub(crate) fn with_deltas(
        mut self,
        codepoint: char,
        width: u32,
        height: u32,
        lsb_delta: i32,
        rsb_delta: i32,
    ) -> Self {
        let index = self.glyphs.len() as u32 + 1;
        self.glyphs.insert(
            codepoint,
            StubGlyph {
                index,
                width,
                height,
                advance: width as f32 + 2.0,
                lsb_delta,
                rsb_delta,
            },
        );
        self
    }

    /// Sets the raw pair kerning, in 1/64 pixel units, between two characters.
    pub(crate) fn with_kerning(mut self, first: char, second: char, dx: i32) -> Self {
        let index = |c: char| self.glyphs[&c].index;
        let pair = (index(first), index(second));
        self.kerning.insert(pair, dx);
        self
    }

    pub(crate) fn non_scalable(mut self) -> Self {
        self.scalable = false;
        self
    }

    /// Counter of `load_glyph` calls, shared with every clone.
    pub(crate) fn loads(&self) -> Rc<Cell<usize>> {
        self.loads.clone()
    }
}

/// Coverage value written for every pixel of the glyph with `index`.
pub(crate) fn coverage(index: u32) -> u8 {
    (100 + index % 100) as u8
}

impl Rasterizer for StubRasterizer {
    fn set_pixel_size(&mut self, pixel_size: u32) -> bool {
        self.pixel_size = pixel_size;
        pixel_size != 0
    }

    fn glyph_index(&self, codepoint: char) -> u32 {
        self.glyphs.get(&codepoint).map_or(0, |glyph| glyph.index)
    }

    fn load_glyph(
        &mut self,
        codepoint: char,
        _bold: bool,
        _outline_thickness: f32,
    ) -> Option<RasterizedGlyph> {
        self.loads.set(self.loads.get() + 1);
        let glyph = self.glyphs.get(&codepoint)?;
        let len = (glyph.width * glyph.height) as usize;
        let bitmap = Bitmap::new(
            glyph.width,
            glyph.height,
            BitmapFormat::Alpha,
            vec![coverage(glyph.index); len],
        )
        .ok()?;
        Some(RasterizedGlyph {
            bitmap,
            left: 1,
            top: glyph.height as i32,
            advance: glyph.advance,
            lsb_delta: glyph.lsb_delta,
            rsb_delta: glyph.rsb_delta,
        })
    }

    fn kerning(&self, first: u32, second: u32) -> (i32, i32) {
        (self.kerning.get(&(first, second)).copied().unwrap_or(0), 0)
    }

    fn face_metrics(&self) -> FaceMetrics {
        let size = self.pixel_size as f32;
        FaceMetrics {
            line_spacing: size * 1.25,
            underline_position: size / 10.0,
            underline_thickness: size / 14.0,
        }
    }

    fn is_scalable(&self) -> bool {
        self.scalable
    }

    fn info(&self) -> FontInfo {
        FontInfo {
            family: "Stub Sans".into(),
        }
    }
}

/// Asserts that no two glyph cells (padding included) overlap and that every cell
/// lies inside the surface.
pub(crate) fn assert_disjoint(glyphs: &[Glyph], padding: u32, surface: &CpuSurface) {
    let cells: Vec<Rect<u32>> = glyphs
        .iter()
        .filter(|glyph| glyph.has_texture())
        .map(|glyph| glyph.texture_rect.outset(padding))
        .collect();
    for (i, a) in cells.iter().enumerate() {
        assert!(
            a.right() <= surface.width() && a.bottom() <= surface.height(),
            "{a:?} is outside the surface"
        );
        for b in &cells[i + 1..] {
            assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
        }
    }
}

/// A small deterministic generator for glyph sizes.
pub(crate) struct Lcg(u64);

impl Lcg {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns a value in `range`.
    pub(crate) fn next_in(&mut self, range: std::ops::Range<u32>) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        range.start + ((self.0 >> 33) as u32) % (range.end - range.start)
    }
}

std::thread_local! {
    static CAPTURED: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Records every log message on the thread that emitted it, so parallel tests do
/// not see each other's output.
struct CaptureLogger;

static LOGGER: CaptureLogger = CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        CAPTURED.with(|captured| {
            captured
                .borrow_mut()
                .push((record.level(), record.args().to_string()));
        });
    }

    fn flush(&self) {}
}

/// Runs `f` and returns its result with the warnings it logged.
pub(crate) fn with_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    // Only the first caller installs the logger; the others find it in place.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log::LevelFilter::Trace);
    CAPTURED.with(|captured| captured.borrow_mut().clear());
    let value = f();
    let warnings = CAPTURED.with(|captured| {
        captured
            .borrow_mut()
            .drain(..)
            .filter(|(level, _)| *level == log::Level::Warn)
            .map(|(_, message)| message)
            .collect()
    });
    (value, warnings)
}
