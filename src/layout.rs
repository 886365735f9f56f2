//! Palette texture dimensions and the coordinates that address them.
//!
//! A palette index is split across two 8-bit channels: the low byte is the
//! column, the high byte the row. Rows are at most 256 texels wide, so for
//! every layout produced here `index % width` is the column and
//! `index / width` the row.

/// Widest palette row, in texels.
pub const MAX_WIDTH: u32 = 256;

/// Size of a palette texture. `width * height` is always at least the color count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteDimensions {
    pub width: u32,
    pub height: u32,
}

impl PaletteDimensions {
    /// Power-of-two-biased layout for `count` colors.
    ///
    /// Up to 128 colors fit in a single row of the next power of two; up to
    /// 256 in one full row; beyond that rows are 256 wide and the row count is
    /// rounded up to a power of two.
    pub fn for_count(count: usize) -> Self {
        let count = count as u32;
        if count > MAX_WIDTH {
            Self {
                width: MAX_WIDTH,
                height: count.div_ceil(MAX_WIDTH).next_power_of_two(),
            }
        } else if count > MAX_WIDTH / 2 {
            Self {
                width: MAX_WIDTH,
                height: 1,
            }
        } else {
            Self {
                width: count.next_power_of_two(),
                height: 1,
            }
        }
    }

    pub fn capacity(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Coordinate byte stride per texel along each axis: 256 / dimension.
    #[inline]
    fn steps(self) -> (u32, u32) {
        (256 / self.width, 256 / self.height)
    }

    /// Index bytes rescaled to land on the center of its texel,
    /// `raw * step + step / 2` per axis.
    pub fn texel_coords(self, index: u16) -> (u8, u8) {
        let (x, y) = raw_coords(index);
        let (step_x, step_y) = self.steps();
        let scale = |raw: u8, step: u32| (raw as u32 * step + step / 2) as u8;
        (scale(x, step_x), scale(y, step_y))
    }

    /// Inverse of [`texel_coords`](Self::texel_coords).
    pub fn index_from_texel(self, red: u8, green: u8) -> usize {
        let (step_x, step_y) = self.steps();
        let x = red as u32 / step_x;
        let y = green as u32 / step_y;
        (y * self.width + x) as usize
    }
}

/// Palette layout for `count` colors.
pub fn palette_dimensions(count: usize) -> PaletteDimensions {
    PaletteDimensions::for_count(count)
}

/// Index split into (low byte, high byte).
#[inline]
pub fn raw_coords(index: u16) -> (u8, u8) {
    ((index & 0xff) as u8, (index >> 8) as u8)
}

/// Inverse of [`raw_coords`].
#[inline]
pub fn index_from_raw(red: u8, green: u8) -> u16 {
    (green as u16) << 8 | red as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_table() {
        let cases = [
            (3, 4, 1),
            (12, 16, 1),
            (32, 32, 1),
            (122, 128, 1),
            (200, 256, 1),
            (256, 256, 1),
            (257, 256, 2),
            (530, 256, 4),
            (1700, 256, 8),
        ];
        for (count, width, height) in cases {
            assert_eq!(
                palette_dimensions(count),
                PaletteDimensions { width, height },
                "layout for {count} colors"
            );
        }
    }

    #[test]
    fn layout_edges() {
        assert_eq!(palette_dimensions(1), PaletteDimensions { width: 1, height: 1 });
        assert_eq!(palette_dimensions(128), PaletteDimensions { width: 128, height: 1 });
        assert_eq!(palette_dimensions(129), PaletteDimensions { width: 256, height: 1 });
        assert_eq!(palette_dimensions(512), PaletteDimensions { width: 256, height: 2 });
        assert_eq!(palette_dimensions(513), PaletteDimensions { width: 256, height: 4 });
        assert_eq!(
            palette_dimensions(65536),
            PaletteDimensions { width: 256, height: 256 }
        );
    }

    #[test]
    fn capacity_always_fits() {
        for count in 1..=4096 {
            let dims = palette_dimensions(count);
            assert!(dims.capacity() >= count, "{count} colors in {dims:?}");
        }
    }

    #[test]
    fn raw_coords_split_bytes() {
        assert_eq!(raw_coords(0), (0, 0));
        assert_eq!(raw_coords(255), (255, 0));
        assert_eq!(raw_coords(256), (0, 1));
        assert_eq!(raw_coords(0xabcd), (0xcd, 0xab));
        assert_eq!(index_from_raw(0xcd, 0xab), 0xabcd);
    }

    #[test]
    fn texel_coords_are_centered() {
        let dims = palette_dimensions(3); // 4 x 1
        assert_eq!(dims.texel_coords(0), (32, 128));
        assert_eq!(dims.texel_coords(1), (96, 128));
        assert_eq!(dims.texel_coords(3), (224, 128));

        let dims = palette_dimensions(300); // 256 x 2
        assert_eq!(dims.texel_coords(5), (5, 64));
        assert_eq!(dims.texel_coords(300), (44, 192));
    }

    #[test]
    fn texel_coords_decode() {
        for count in [1usize, 3, 12, 129, 256, 257, 530, 1700] {
            let dims = palette_dimensions(count);
            for index in 0..count as u16 {
                let (r, g) = dims.texel_coords(index);
                assert_eq!(dims.index_from_texel(r, g), index as usize, "{dims:?}");
            }
        }
    }
}
