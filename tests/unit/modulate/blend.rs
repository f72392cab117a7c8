use super::*;

fn blender(white: u8, black: u8, premultiply: bool) -> PixelBlender {
    let p = ParameterSet {
        opacity_white: white,
        opacity_black: black,
        ..ParameterSet::default()
    };
    PixelBlender::new(&p, premultiply)
}

#[test]
fn scale_alpha_truncates() {
    assert_eq!(scale_alpha(255, 255), 255);
    assert_eq!(scale_alpha(255, 0), 0);
    assert_eq!(scale_alpha(128, 128), 64); // 16384 / 255 = 64.25
    assert_eq!(scale_alpha(254, 1), 0);
    assert_eq!(scale_alpha(100, 200), 78); // 20000 / 255 = 78.43
}

#[test]
fn opacity_law_holds_for_all_alphas() {
    let b = blender(200, 37, false);
    for a in 0..=255u8 {
        let white = b.blend(true, a);
        let black = b.blend(false, a);
        assert_eq!(u32::from(white[3]), u32::from(a) * 200 / 255);
        assert_eq!(u32::from(black[3]), u32::from(a) * 37 / 255);
        assert_eq!(&black[..3], &[0, 0, 0]);
    }
}

#[test]
fn white_channels_are_not_premultiplied_by_default() {
    let b = blender(128, 255, false);
    assert_eq!(b.blend(true, 255), [255, 255, 255, 128]);
}

#[test]
fn premultiply_scales_white_channels_by_output_alpha() {
    let b = blender(128, 255, true);
    assert_eq!(b.blend(true, 255), [128, 128, 128, 128]);
    assert_eq!(b.blend(false, 90), [0, 0, 0, 90]);
}
