use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_swizzles_to_bgra_and_premultiplies() {
    let frame = decode_image(&png_bytes(1, 1, vec![100, 50, 200, 128])).unwrap();
    assert_eq!((frame.width, frame.height, frame.stride), (1, 1, 4));
    assert_eq!(
        frame.pixels,
        vec![
            ((200u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((100u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_clears_color_of_transparent_pixels() {
    let frame = decode_image(&png_bytes(1, 1, vec![10, 20, 30, 0])).unwrap();
    assert_eq!(frame.pixels, vec![0, 0, 0, 0]);
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn encode_then_decode_keeps_opaque_pixels() {
    let frame = Framebuffer::from_raw(2, 1, 8, vec![255, 255, 255, 255, 0, 0, 0, 255]).unwrap();
    let back = decode_image(&encode_png(&frame).unwrap()).unwrap();
    assert_eq!(back, frame);
}

#[test]
fn encode_writes_straight_rgba() {
    let frame = Framebuffer::from_raw(1, 1, 4, vec![64, 32, 16, 128]).unwrap();
    let png = encode_png(&frame).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    // b=64,g=32,r=16 at a=128 -> straight r=32, g=64, b=128 (rounded).
    assert_eq!(img.into_raw(), vec![32, 64, 128, 128]);
}
