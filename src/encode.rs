extern crate alloc;
use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};
use rgb::RGBA8;

use crate::color_table::ColorTable;
use crate::error::RecolorError;
use crate::layout::{PaletteDimensions, raw_coords};
use crate::pixel::SourcePixel;

/// Rewrite every pixel as its palette index.
///
/// Red carries the low index byte, green the high byte, blue is zero and
/// alpha is the pixel's own alpha. With `texture` set, red and green are
/// rescaled to texel-center coordinates for a palette of those dimensions;
/// otherwise they hold the raw index bytes.
///
/// `table` must already have its final indices assigned.
pub fn encode_indices<P: SourcePixel>(
    image: ImgRef<'_, P>,
    table: &ColorTable,
    texture: Option<PaletteDimensions>,
) -> Result<ImgVec<RGBA8>, RecolorError> {
    let (width, height) = (image.width(), image.height());
    let mut out = Vec::with_capacity(width * height);

    for (y, row) in image.rows().enumerate() {
        for (x, &pixel) in row.iter().enumerate() {
            let rgba = pixel.to_rgba8();
            let index = table
                .index_of(rgba)
                .ok_or(RecolorError::UnmappedPixel { x, y })?;

            let (red, green) = match texture {
                Some(dims) => dims.texel_coords(index),
                None => raw_coords(index),
            };
            out.push(RGBA8::new(red, green, 0, rgba.a));
        }
    }

    Ok(ImgVec::new(out, width, height))
}
