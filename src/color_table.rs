//! Distinct-color collection.
//!
//! Entries live in an arena in first-seen order and are addressed by
//! [`ColorHandle`]. The lookup map only stores handles, so assigning the
//! final palette index touches exactly one place.

extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use imgref::ImgRef;
use rgb::RGBA8;

use crate::error::RecolorError;
use crate::oklab::{OKLab, srgb_to_oklab};
use crate::pixel::{SourcePixel, opaque};

/// Hard ceiling on distinct colors: indices must fit in two 8-bit channels.
pub const MAX_COLORS: usize = 65536;

/// Stable position of an entry in the table's arena (insertion order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorHandle(u32);

impl ColorHandle {
    #[inline]
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

/// One distinct color of the sprite.
#[derive(Debug, Clone)]
pub struct ColorEntry {
    rgba: RGBA8,
    lab: OKLab,
    index: u16,
}

impl ColorEntry {
    /// The palette key: 8-bit color with alpha forced opaque.
    pub fn rgba(&self) -> RGBA8 {
        self.rgba
    }

    pub fn lab(&self) -> OKLab {
        self.lab
    }

    /// Final palette index. Meaningless until [`ColorTable::assign_order`] has run.
    pub fn index(&self) -> u16 {
        self.index
    }
}

#[inline]
fn pack_key(key: RGBA8) -> u32 {
    u32::from_be_bytes([key.r, key.g, key.b, key.a])
}

/// Set of distinct palette keys in a sprite.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    entries: Vec<ColorEntry>,
    lookup: BTreeMap<u32, ColorHandle>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan an image once, row-major, collecting every distinct palette key.
    ///
    /// Fails as soon as the distinct count would exceed [`MAX_COLORS`].
    pub fn from_image<P: SourcePixel>(image: ImgRef<'_, P>) -> Result<Self, RecolorError> {
        let mut table = Self::new();
        for row in image.rows() {
            for &pixel in row {
                table.insert(pixel.palette_key())?;
            }
        }
        Ok(table)
    }

    /// Add a color (alpha is ignored), returning the handle of the new or existing entry.
    pub fn insert(&mut self, color: RGBA8) -> Result<ColorHandle, RecolorError> {
        let key = opaque(color);
        let packed = pack_key(key);
        if let Some(&handle) = self.lookup.get(&packed) {
            return Ok(handle);
        }
        if self.entries.len() >= MAX_COLORS {
            return Err(RecolorError::TooManyColors { limit: MAX_COLORS });
        }

        let handle = ColorHandle(self.entries.len() as u32);
        self.entries.push(ColorEntry {
            rgba: key,
            lab: srgb_to_oklab(key.r, key.g, key.b),
            index: 0,
        });
        self.lookup.insert(packed, handle);
        Ok(handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    /// All handles, in first-seen order.
    pub fn handles(&self) -> impl Iterator<Item = ColorHandle> + '_ {
        (0..self.entries.len()).map(|i| ColorHandle(i as u32))
    }

    pub fn entry(&self, handle: ColorHandle) -> &ColorEntry {
        &self.entries[handle.get()]
    }

    /// Handle for a color, matched on its palette key.
    pub fn handle_of(&self, color: RGBA8) -> Option<ColorHandle> {
        self.lookup.get(&pack_key(opaque(color))).copied()
    }

    /// Final palette index for a color, matched on its palette key.
    pub fn index_of(&self, color: RGBA8) -> Option<u16> {
        self.handle_of(color).map(|h| self.entry(h).index)
    }

    /// Give each entry its position in `order` as its palette index.
    ///
    /// `order` must name every handle exactly once.
    pub fn assign_order(&mut self, order: &[ColorHandle]) {
        debug_assert_eq!(order.len(), self.entries.len());
        for (position, handle) in order.iter().enumerate() {
            self.entries[handle.get()].index = position as u16;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgref::ImgVec;

    #[test]
    fn first_seen_order() {
        let pixels = vec![
            RGBA8::new(0, 0, 255, 255),
            RGBA8::new(255, 0, 0, 255),
            RGBA8::new(0, 0, 255, 255),
            RGBA8::new(0, 255, 0, 255),
        ];
        let img = ImgVec::new(pixels, 2, 2);
        let table = ColorTable::from_image(img.as_ref()).unwrap();
        let colors: Vec<RGBA8> = table.entries().iter().map(|e| e.rgba()).collect();
        assert_eq!(
            colors,
            vec![
                RGBA8::new(0, 0, 255, 255),
                RGBA8::new(255, 0, 0, 255),
                RGBA8::new(0, 255, 0, 255),
            ]
        );
    }

    #[test]
    fn alpha_is_not_part_of_key() {
        let mut table = ColorTable::new();
        let a = table.insert(RGBA8::new(9, 9, 9, 0)).unwrap();
        let b = table.insert(RGBA8::new(9, 9, 9, 255)).unwrap();
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);
        assert_eq!(table.entry(a).rgba().a, 255);
    }

    #[test]
    fn assign_order_sets_indices() {
        let mut table = ColorTable::new();
        let h0 = table.insert(RGBA8::new(1, 0, 0, 255)).unwrap();
        let h1 = table.insert(RGBA8::new(2, 0, 0, 255)).unwrap();
        let h2 = table.insert(RGBA8::new(3, 0, 0, 255)).unwrap();
        table.assign_order(&[h2, h0, h1]);
        assert_eq!(table.index_of(RGBA8::new(3, 0, 0, 7)), Some(0));
        assert_eq!(table.index_of(RGBA8::new(1, 0, 0, 255)), Some(1));
        assert_eq!(table.index_of(RGBA8::new(2, 0, 0, 255)), Some(2));
        assert_eq!(table.index_of(RGBA8::new(4, 0, 0, 255)), None);
    }

    fn every_rg_pair(extra: usize) -> ImgVec<RGBA8> {
        let mut pixels = Vec::with_capacity(MAX_COLORS + extra);
        for g in 0..=255u8 {
            for r in 0..=255u8 {
                pixels.push(RGBA8::new(r, g, 0, 255));
            }
        }
        for i in 0..extra {
            pixels.push(RGBA8::new(i as u8, 0, 1, 255));
        }
        let width = pixels.len();
        ImgVec::new(pixels, width, 1)
    }

    #[test]
    fn exactly_max_colors_is_accepted() {
        let img = every_rg_pair(0);
        let table = ColorTable::from_image(img.as_ref()).unwrap();
        assert_eq!(table.len(), MAX_COLORS);
    }

    #[test]
    fn one_over_max_colors_fails() {
        let img = every_rg_pair(1);
        let err = ColorTable::from_image(img.as_ref()).unwrap_err();
        assert!(matches!(err, RecolorError::TooManyColors { limit: MAX_COLORS }));
    }
}
