use std::io::Cursor;

use anyhow::Context;

use crate::foundation::{
    core::Framebuffer,
    error::{ModulatorError, ModulatorResult},
};

/// Decode encoded image bytes into a premultiplied BGRA8 frame.
pub fn decode_image(bytes: &[u8]) -> ModulatorResult<Framebuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut pixels = rgba.into_raw();
    rgba_straight_to_bgra_premul_in_place(&mut pixels);
    Framebuffer::from_raw(width, height, width as usize * 4, pixels)
}

/// Encode a premultiplied BGRA8 frame as a straight-alpha RGBA PNG.
pub fn encode_png(frame: &Framebuffer) -> ModulatorResult<Vec<u8>> {
    let src = frame.as_source()?;
    let mut rgba = Vec::with_capacity(frame.width as usize * frame.height as usize * 4);
    for y in 0..src.height() {
        for x in 0..src.width() {
            let [b, g, r, a] = src.pixel(x, y);
            rgba.extend_from_slice(&[unpremul(r, a), unpremul(g, a), unpremul(b, a), a]);
        }
    }

    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
        .ok_or_else(|| ModulatorError::invalid_input("rgba buffer does not match frame size"))?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out)
}

fn rgba_straight_to_bgra_premul_in_place(px: &mut [u8]) {
    for p in px.chunks_exact_mut(4) {
        let a = u16::from(p[3]);
        if a == 0 {
            p[0] = 0;
            p[1] = 0;
            p[2] = 0;
            continue;
        }
        let r = ((u16::from(p[0]) * a + 127) / 255) as u8;
        let g = ((u16::from(p[1]) * a + 127) / 255) as u8;
        let b = ((u16::from(p[2]) * a + 127) / 255) as u8;
        p[0] = b;
        p[1] = g;
        p[2] = r;
    }
}

fn unpremul(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
