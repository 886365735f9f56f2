#![forbid(unsafe_code)]

//! Palette-indexed sprites for runtime recoloring.
//!
//! [`generate`] takes an authored sprite and produces a reference image whose
//! red/green channels hold an index into the sprite's own palette, plus that
//! palette in index order (and optionally as a texture). A shader that looks
//! the index up in a different palette recolors the sprite.
//!
//! Palette indices follow a greedy perceptual tour through the sprite's
//! colors, so neighboring entries look alike.

extern crate alloc;

pub mod color_table;
pub mod encode;
pub mod error;
pub mod layout;
pub mod oklab;
pub mod palette;
pub mod params;
pub mod pixel;
pub mod sort;

pub use color_table::{ColorTable, MAX_COLORS};
pub use error::RecolorError;
pub use imgref::{ImgRef, ImgVec};
pub use layout::{PaletteDimensions, palette_dimensions};
pub use params::ParamFormat;
pub use pixel::{Premultiplied, SourcePixel};

use alloc::vec::Vec;
use rgb::RGBA8;

/// Historical cap on palette size when colors are fed to a shader as
/// individual parameters rather than a texture.
pub const PARAMETER_COLOR_LIMIT: usize = 256;

/// Configuration for [`generate`].
#[derive(Debug, Clone)]
pub struct RecolorConfig {
    /// Produce a palette texture, and encode indices as texel-center coordinates into it.
    /// When false, indices are written as raw bytes and only the color list is produced.
    pub palette_texture: bool,
    /// Maximum palette size when `palette_texture` is false. `None` means only
    /// [`MAX_COLORS`] applies.
    pub parameter_limit: Option<usize>,
}

impl Default for RecolorConfig {
    fn default() -> Self {
        Self {
            palette_texture: true,
            parameter_limit: None,
        }
    }
}

impl RecolorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palette_texture(mut self, enabled: bool) -> Self {
        self.palette_texture = enabled;
        self
    }

    /// Enforce a palette size limit for parameter-only output, e.g. [`PARAMETER_COLOR_LIMIT`].
    pub fn parameter_limit(mut self, limit: usize) -> Self {
        self.parameter_limit = Some(limit);
        self
    }
}

/// Output of [`generate`].
#[derive(Debug)]
pub struct RecolorResult {
    reference: ImgVec<RGBA8>,
    palette: crate::palette::Palette,
    texture: Option<ImgVec<RGBA8>>,
}

impl RecolorResult {
    /// The index-encoded sprite, same size as the input.
    pub fn reference(&self) -> &ImgVec<RGBA8> {
        &self.reference
    }

    /// Palette colors in index order.
    pub fn palette(&self) -> &[RGBA8] {
        self.palette.colors()
    }

    /// Number of distinct colors.
    pub fn palette_len(&self) -> usize {
        self.palette.len()
    }

    /// Texture layout for the palette. Reported even when no texture was requested.
    pub fn dimensions(&self) -> PaletteDimensions {
        self.palette.dimensions()
    }

    /// The palette texture, if requested.
    pub fn palette_texture(&self) -> Option<&ImgVec<RGBA8>> {
        self.texture.as_ref()
    }

    /// Palette index stored in a reference pixel.
    pub fn index_at(&self, x: usize, y: usize) -> usize {
        let p = self.reference[(x, y)];
        if self.texture.is_some() {
            self.dimensions().index_from_texel(p.r, p.g)
        } else {
            layout::index_from_raw(p.r, p.g) as usize
        }
    }

    pub fn into_parts(self) -> (ImgVec<RGBA8>, Vec<RGBA8>, PaletteDimensions, Option<ImgVec<RGBA8>>) {
        let dimensions = self.palette.dimensions();
        (self.reference, self.palette.into_colors(), dimensions, self.texture)
    }
}

/// Build the reference sprite and its palette.
///
/// Nothing is produced unless every requested output is.
pub fn generate<P: SourcePixel>(
    image: ImgRef<'_, P>,
    config: &RecolorConfig,
) -> Result<RecolorResult, RecolorError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(RecolorError::ZeroDimension);
    }

    // 1. Distinct colors, in first-seen order
    let mut table = ColorTable::from_image(image)?;
    log::debug!(
        "{}x{} sprite has {} distinct colors",
        image.width(),
        image.height(),
        table.len()
    );

    if !config.palette_texture {
        if let Some(limit) = config.parameter_limit {
            if table.len() > limit {
                return Err(RecolorError::TooManyColorsForParameters {
                    count: table.len(),
                    limit,
                });
            }
        }
    }

    // 2. Perceptual ordering assigns the palette indices
    let order = sort::sort_table(&mut table)?;

    // 3. Palette and its layout
    let palette = crate::palette::Palette::from_order(&table, &order);
    let dims = palette.dimensions();
    log::debug!("palette layout {}x{}", dims.width, dims.height);

    let texture = if config.palette_texture {
        Some(palette.texture()?)
    } else {
        None
    };

    // 4. Index-encoded sprite
    let reference = encode::encode_indices(image, &table, texture.as_ref().map(|_| dims))?;

    Ok(RecolorResult {
        reference,
        palette,
        texture,
    })
}

/// [`generate`] over a flat row-major RGBA buffer.
pub fn generate_rgba(
    pixels: &[RGBA8],
    width: usize,
    height: usize,
    config: &RecolorConfig,
) -> Result<RecolorResult, RecolorError> {
    validate_inputs(pixels.len(), width, height)?;
    generate(ImgRef::new(pixels, width, height), config)
}

fn validate_inputs(pixel_count: usize, width: usize, height: usize) -> Result<(), RecolorError> {
    if width == 0 || height == 0 {
        return Err(RecolorError::ZeroDimension);
    }
    if pixel_count != width * height {
        return Err(RecolorError::DimensionMismatch {
            len: pixel_count,
            width,
            height,
        });
    }
    Ok(())
}
