use crate::params::settings::ParameterSet;

/// `floor(src_alpha * opacity / 255)`.
#[inline]
pub fn scale_alpha(src_alpha: u8, opacity: u8) -> u8 {
    ((u32::from(src_alpha) * u32::from(opacity)) / 255) as u8
}

/// Turns a paint decision and the source alpha into an output BGRA pixel.
///
/// By default the white color channels stay at 255 whatever the output alpha, so a partially
/// transparent white pixel is not a valid premultiplied value. `premultiply` scales them by the
/// new alpha instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBlender {
    opacity_white: u8,
    opacity_black: u8,
    premultiply: bool,
}

impl PixelBlender {
    /// Blender for one frame's opacities.
    pub fn new(params: &ParameterSet, premultiply: bool) -> Self {
        Self {
            opacity_white: params.opacity_white,
            opacity_black: params.opacity_black,
            premultiply,
        }
    }

    /// Output pixel for a decision.
    #[inline]
    pub fn blend(&self, paint_white: bool, src_alpha: u8) -> [u8; 4] {
        if paint_white {
            let a = scale_alpha(src_alpha, self.opacity_white);
            let c = if self.premultiply { a } else { 255 };
            [c, c, c, a]
        } else {
            [0, 0, 0, scale_alpha(src_alpha, self.opacity_black)]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modulate/blend.rs"]
mod tests;
