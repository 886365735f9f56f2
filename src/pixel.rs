//! Canonical 8-bit pixel values.
//!
//! Every decoded pixel is reduced to straight (non-premultiplied) 8-bit RGBA
//! before it is deduplicated or encoded, whatever precision it arrived in.

use rgb::{RGB, RGBA, RGBA8};

/// A decoded pixel that can be reduced to straight-alpha 8-bit RGBA.
pub trait SourcePixel: Copy {
    /// Straight-alpha 8-bit RGBA, channels rescaled with rounding.
    fn to_rgba8(self) -> RGBA8;

    /// The deduplication key: [`to_rgba8`](Self::to_rgba8) with alpha forced opaque,
    /// so pixels that differ only in transparency share a palette entry.
    #[inline]
    fn palette_key(self) -> RGBA8 {
        opaque(self.to_rgba8())
    }
}

/// Wrapper for alpha-premultiplied pixels; alpha is divided back out on conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Premultiplied<P>(pub P);

/// Force alpha to 255.
#[inline]
pub fn opaque(p: RGBA8) -> RGBA8 {
    RGBA8 { a: 255, ..p }
}

/// round(c * 255 / 65535)
#[inline]
fn narrow(c: u16) -> u8 {
    ((c as u32 * 255 + 32767) / 65535) as u8
}

/// round(c * max / a), clamped to max. Fully transparent colors have no recoverable value.
#[inline]
fn unpremultiply(c: u32, a: u32, max: u32) -> u32 {
    if a == 0 {
        return 0;
    }
    ((c * max + a / 2) / a).min(max)
}

impl SourcePixel for RGBA<u8> {
    #[inline]
    fn to_rgba8(self) -> RGBA8 {
        self
    }
}

impl SourcePixel for RGB<u8> {
    #[inline]
    fn to_rgba8(self) -> RGBA8 {
        RGBA8::new(self.r, self.g, self.b, 255)
    }
}

impl SourcePixel for RGBA<u16> {
    #[inline]
    fn to_rgba8(self) -> RGBA8 {
        RGBA8::new(narrow(self.r), narrow(self.g), narrow(self.b), narrow(self.a))
    }
}

impl SourcePixel for RGB<u16> {
    #[inline]
    fn to_rgba8(self) -> RGBA8 {
        RGBA8::new(narrow(self.r), narrow(self.g), narrow(self.b), 255)
    }
}

impl SourcePixel for Premultiplied<RGBA<u8>> {
    fn to_rgba8(self) -> RGBA8 {
        let p = self.0;
        let a = p.a as u32;
        let straight = |c: u8| unpremultiply(c as u32, a, 255) as u8;
        RGBA8::new(straight(p.r), straight(p.g), straight(p.b), p.a)
    }
}

impl SourcePixel for Premultiplied<RGBA<u16>> {
    fn to_rgba8(self) -> RGBA8 {
        let p = self.0;
        let a = p.a as u32;
        let straight = |c: u16| narrow(unpremultiply(c as u32, a, 65535) as u16);
        RGBA8::new(straight(p.r), straight(p.g), straight(p.b), narrow(p.a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_bit_passes_through() {
        let p = RGBA8::new(12, 34, 56, 78);
        assert_eq!(p.to_rgba8(), p);
        assert_eq!(p.palette_key(), RGBA8::new(12, 34, 56, 255));
    }

    #[test]
    fn rgb_is_opaque() {
        let p = RGB::<u8>::new(1, 2, 3);
        assert_eq!(p.to_rgba8(), RGBA8::new(1, 2, 3, 255));
    }

    #[test]
    fn sixteen_bit_rounds() {
        assert_eq!(narrow(0), 0);
        assert_eq!(narrow(65535), 255);
        // 257 * n is exactly n in 8-bit
        assert_eq!(narrow(257 * 100), 100);
        // 128.5 in 8-bit terms sits between 33024 and 33025
        assert_eq!(narrow(33024), 128);
        assert_eq!(narrow(33025), 129);
        let p = RGBA::<u16>::new(65535, 0, 257 * 7, 32896);
        assert_eq!(p.to_rgba8(), RGBA8::new(255, 0, 7, 128));
    }

    #[test]
    fn premultiplied_alpha_is_divided_out() {
        // 50% alpha red, premultiplied
        let p = Premultiplied(RGBA::<u8>::new(128, 0, 0, 128));
        assert_eq!(p.to_rgba8(), RGBA8::new(255, 0, 0, 128));
        assert_eq!(p.palette_key(), RGBA8::new(255, 0, 0, 255));

        let p16 = Premultiplied(RGBA::<u16>::new(32768, 0, 16384, 32768));
        assert_eq!(p16.to_rgba8(), RGBA8::new(255, 0, 128, 128));
    }

    #[test]
    fn premultiplied_transparent_is_black() {
        let p = Premultiplied(RGBA::<u8>::new(0, 0, 0, 0));
        assert_eq!(p.to_rgba8(), RGBA8::new(0, 0, 0, 0));
        assert_eq!(p.palette_key(), RGBA8::new(0, 0, 0, 255));
    }

    #[test]
    fn alpha_only_difference_shares_key() {
        let a = RGBA8::new(10, 20, 30, 0);
        let b = RGBA8::new(10, 20, 30, 200);
        assert_eq!(a.palette_key(), b.palette_key());
    }
}
