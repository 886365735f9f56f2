//! Turn a sprite into a palette-indexed template plus its palette.
//!
//! Usage:
//!   cargo run --example recolor_sprite --release -- <input.png> [template.png] [palette.png] [params.txt]
//!
//! Template and palette default to `<input>_template.png` and `<input>_palette.png`
//! next to the input. Without a params file, palettes under 256 colors are printed to stdout.

use std::path::Path;

use zenrecolor::{ImgVec, ParamFormat, RecolorConfig, params};

fn save_rgba(img: &ImgVec<rgb::RGBA8>, path: &str) {
    let bytes: Vec<u8> = img.buf().iter().flat_map(|p| [p.r, p.g, p.b, p.a]).collect();
    image::RgbaImage::from_raw(img.width() as u32, img.height() as u32, bytes)
        .unwrap()
        .save(path)
        .unwrap();
}

fn sibling(input: &str, suffix: &str) -> String {
    let path = Path::new(input);
    let name = path.file_name().unwrap().to_string_lossy();
    path.with_file_name(format!("{name}_{suffix}.png"))
        .to_string_lossy()
        .into_owned()
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let input = args
        .get(1)
        .expect("usage: recolor_sprite <input> [template.png] [palette.png] [params.txt]");
    let template_path = args.get(2).cloned().unwrap_or_else(|| sibling(input, "template"));
    let palette_path = args.get(3).cloned().unwrap_or_else(|| sibling(input, "palette"));
    let params_path = args.get(4);

    // Decode at 16 bits so wide sources are narrowed by the library, not the codec
    let img = image::open(input).unwrap().to_rgba16();
    let (w, h) = (img.width() as usize, img.height() as usize);
    let pixels: Vec<rgb::RGBA<u16>> = img
        .pixels()
        .map(|p| rgb::RGBA::new(p.0[0], p.0[1], p.0[2], p.0[3]))
        .collect();

    let result = match zenrecolor::generate(ImgVec::new(pixels, w, h).as_ref(), &RecolorConfig::new()) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(9);
        }
    };

    save_rgba(result.reference(), &template_path);
    if let Some(texture) = result.palette_texture() {
        save_rgba(texture, &palette_path);
    }

    let dims = result.dimensions();
    eprintln!("Completed successfully");
    eprintln!("  Sprite template: {template_path}");
    eprintln!("  Palette texture: {palette_path} ({}x{})", dims.width, dims.height);
    eprintln!("  Colors: {}", result.palette_len());

    let text = params::format_params(result.palette(), ParamFormat::Floats);
    if let Some(path) = params_path {
        std::fs::write(path, text).unwrap();
        eprintln!("  Shader params: {path}");
    } else if result.palette_len() < 256 {
        print!("{text}");
    }
}
