//! Palette colors as shader-parameter text.
//!
//! One line per color, channels in R, G, B, A order, separated by `", "`.

extern crate alloc;
use alloc::string::String;
use core::fmt::{self, Write};

use rgb::RGBA8;

/// How channel values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamFormat {
    /// Integers 0–255.
    #[default]
    Bytes,
    /// Normalized 0.0–1.0 with six decimals.
    Floats,
}

/// Write one line per color to `out`.
pub fn write_params<W: Write>(out: &mut W, colors: &[RGBA8], format: ParamFormat) -> fmt::Result {
    for c in colors {
        match format {
            ParamFormat::Bytes => writeln!(out, "{}, {}, {}, {}", c.r, c.g, c.b, c.a)?,
            ParamFormat::Floats => {
                let f = |v: u8| v as f32 / 255.0;
                writeln!(out, "{:.6}, {:.6}, {:.6}, {:.6}", f(c.r), f(c.g), f(c.b), f(c.a))?
            }
        }
    }
    Ok(())
}

pub fn format_params(colors: &[RGBA8], format: ParamFormat) -> String {
    let mut s = String::with_capacity(colors.len() * 24);
    // Writing to a String cannot fail
    let _ = write_params(&mut s, colors, format);
    s
}
