//! Modulator turns a raster image into a black/white scan-line rendering.
//!
//! Pixels are walked along rows or columns in one of four directions. Each pixel's darkness (or
//! brightness, when inverted) is added to an ink counter; whenever the counter reaches a
//! threshold a white line of fixed width starts. Lines come in bundles of `drawing_count`,
//! separated by `interval_count` skipped crossings.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: [`ModulatorSettings`] (raw host values) -> [`ParameterSet`] (clamped, integral)
//! 2. **Scan**: [`DirectionalScanner`] splits the frame into independent scanlines
//! 3. **Modulate**: one [`LineModulator`] per scanline produces paint decisions
//! 4. **Blend**: [`PixelBlender`] maps decisions and source alpha to output pixels
//!
//! [`FrameProcessor`] runs steps 2-4 over a [`PixelSource`], sequentially or on a rayon pool.
//! [`ModulatorSession`] adds buffer reuse and keeps the last good frame when a frame fails.
//!
//! Frames are **premultiplied BGRA8** on both sides.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod modulate;
mod params;
mod session;

pub use assets::decode::{decode_image, encode_png};
pub use foundation::core::{BYTES_PER_PIXEL, Framebuffer, PixelSource, tight_stride};
pub use foundation::error::{ModulatorError, ModulatorResult};
pub use modulate::blend::{PixelBlender, scale_alpha};
pub use modulate::frame::{FrameProcessor, ProcessOptions, process};
pub use modulate::line::{LineModulator, ScanlineState, luminance};
pub use modulate::scanner::DirectionalScanner;
pub use params::direction::Direction;
pub use params::settings::{
    COUNT_MAX, LINE_WIDTH_MAX, ModulatorSettings, ParameterSet, SCALE_MAX, SCALE_MIN,
    THRESHOLD_MAX,
};
pub use session::ModulatorSession;
