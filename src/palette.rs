extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use imgref::ImgVec;
use rgb::RGBA8;

use crate::color_table::{ColorHandle, ColorTable};
use crate::error::RecolorError;
use crate::layout::PaletteDimensions;

/// The sorted palette: colors in index order plus the texture layout that holds them.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<RGBA8>,
    dimensions: PaletteDimensions,
}

impl Palette {
    /// Collect the table's colors in `order` (palette-index order).
    pub fn from_order(table: &ColorTable, order: &[ColorHandle]) -> Self {
        let colors: Vec<RGBA8> = order.iter().map(|&h| table.entry(h).rgba()).collect();
        let dimensions = PaletteDimensions::for_count(colors.len());
        Self { colors, dimensions }
    }

    /// Colors in index order, alpha opaque.
    pub fn colors(&self) -> &[RGBA8] {
        &self.colors
    }

    pub fn dimensions(&self) -> PaletteDimensions {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn into_colors(self) -> Vec<RGBA8> {
        self.colors
    }

    /// Lay the colors out row-major in a `dimensions`-sized texture.
    /// Texels past the last color stay transparent black.
    pub fn texture(&self) -> Result<ImgVec<RGBA8>, RecolorError> {
        let PaletteDimensions { width, height } = self.dimensions;
        let (width, height) = (width as usize, height as usize);
        let capacity = width * height;
        if self.colors.len() > capacity {
            return Err(RecolorError::PaletteOverflow {
                count: self.colors.len(),
                capacity,
            });
        }

        let mut texels = vec![RGBA8::new(0, 0, 0, 0); capacity];
        let (mut x, mut y) = (0, 0);
        for &color in &self.colors {
            texels[y * width + x] = color;
            x += 1;
            if x == width {
                x = 0;
                y += 1;
            }
        }

        Ok(ImgVec::new(texels, width, height))
    }
}
