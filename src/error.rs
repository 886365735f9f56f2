use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecolorError {
    #[error("image dimensions cannot be zero")]
    ZeroDimension,

    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("sprite contains more than {limit} distinct colors")]
    TooManyColors { limit: usize },

    #[error("sprite has {count} distinct colors, parameter output is limited to {limit}")]
    TooManyColorsForParameters { count: usize, limit: usize },

    #[error("perceptual sort placed {placed} of {total} colors before running out of candidates")]
    SortInvariant { placed: usize, total: usize },

    #[error("pixel at ({x}, {y}) has no palette entry")]
    UnmappedPixel { x: usize, y: usize },

    #[error("{count} palette colors do not fit in {capacity} texels")]
    PaletteOverflow { count: usize, capacity: usize },
}
