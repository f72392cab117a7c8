use crate::foundation::error::{ModulatorError, ModulatorResult};

/// Bytes per BGRA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Owned premultiplied BGRA8 pixel buffer.
///
/// Channel order is `(B, G, R, A)`. Rows start every `stride` bytes; frames produced by this
/// crate are always tightly packed (`stride == width * 4`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Distance in bytes between the starts of two consecutive rows.
    pub stride: usize,
    /// Raw BGRA8 bytes.
    pub pixels: Vec<u8>,
}

impl Framebuffer {
    /// Allocate a zeroed (fully transparent), tightly packed frame.
    pub fn new(width: u32, height: u32) -> ModulatorResult<Self> {
        if width == 0 || height == 0 {
            return Err(ModulatorError::invalid_input("frame dimensions must be non-zero"));
        }
        let stride = tight_stride(width)?;
        let len = stride
            .checked_mul(height as usize)
            .ok_or_else(|| ModulatorError::invalid_input("frame size overflow"))?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|e| {
            ModulatorError::transient(format!("allocate {len} byte frame: {e}"))
        })?;
        pixels.resize(len, 0);

        Ok(Self {
            width,
            height,
            stride,
            pixels,
        })
    }

    /// Wrap caller-provided bytes, validating the geometry once.
    pub fn from_raw(
        width: u32,
        height: u32,
        stride: usize,
        pixels: Vec<u8>,
    ) -> ModulatorResult<Self> {
        validate_geometry(width, height, stride, pixels.len())?;
        Ok(Self {
            width,
            height,
            stride,
            pixels,
        })
    }

    /// Borrow this frame as a read-only [`PixelSource`].
    pub fn as_source(&self) -> ModulatorResult<PixelSource<'_>> {
        PixelSource::new(self.width, self.height, self.stride, &self.pixels)
    }

    /// Whether this frame is `width x height`.
    pub fn same_size(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }

    /// BGRA bytes at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = pixel_offset(self.stride, x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Left/right mirror image, tightly packed.
    pub fn mirrored_horizontal(&self) -> ModulatorResult<Self> {
        let w = self.width;
        self.remap(|x, y| (w - 1 - x, y))
    }

    /// Top/bottom mirror image, tightly packed.
    pub fn mirrored_vertical(&self) -> ModulatorResult<Self> {
        let h = self.height;
        self.remap(|x, y| (x, h - 1 - y))
    }

    fn remap(&self, from: impl Fn(u32, u32) -> (u32, u32)) -> ModulatorResult<Self> {
        validate_geometry(self.width, self.height, self.stride, self.pixels.len())?;
        let mut out = Self::new(self.width, self.height)?;
        for y in 0..self.height {
            for x in 0..self.width {
                let (sx, sy) = from(x, y);
                let idx = pixel_offset(out.stride, x, y);
                out.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&self.pixel(sx, sy));
            }
        }
        Ok(out)
    }
}

/// Read-only view over a premultiplied BGRA8 frame supplied by the caller.
///
/// The geometry is validated on construction, so per-pixel reads only index.
#[derive(Clone, Copy, Debug)]
pub struct PixelSource<'a> {
    width: u32,
    height: u32,
    stride: usize,
    pixels: &'a [u8],
}

impl<'a> PixelSource<'a> {
    /// Validate and wrap a borrowed pixel buffer.
    ///
    /// Fails with [`ModulatorError::InvalidInput`] when a dimension is zero, when
    /// `stride < width * 4`, or when `pixels` is too short for the declared rows.
    pub fn new(
        width: u32,
        height: u32,
        stride: usize,
        pixels: &'a [u8],
    ) -> ModulatorResult<Self> {
        validate_geometry(width, height, stride, pixels.len())?;
        Ok(Self {
            width,
            height,
            stride,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row pitch in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// BGRA bytes at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height, "pixel ({x},{y}) out of range");
        let idx = pixel_offset(self.stride, x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }
}

/// Tightly packed row pitch for `width` pixels.
pub fn tight_stride(width: u32) -> ModulatorResult<usize> {
    (width as usize)
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or_else(|| ModulatorError::invalid_input("frame row size overflow"))
}

#[inline]
pub(crate) fn pixel_offset(stride: usize, x: u32, y: u32) -> usize {
    (y as usize) * stride + (x as usize) * BYTES_PER_PIXEL
}

fn validate_geometry(width: u32, height: u32, stride: usize, len: usize) -> ModulatorResult<()> {
    if width == 0 || height == 0 {
        return Err(ModulatorError::invalid_input(format!(
            "frame dimensions must be non-zero (got {width}x{height})"
        )));
    }
    let row_bytes = tight_stride(width)?;
    if stride < row_bytes {
        return Err(ModulatorError::invalid_input(format!(
            "stride {stride} is smaller than width*4 ({row_bytes})"
        )));
    }
    let required = stride
        .checked_mul(height as usize - 1)
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or_else(|| ModulatorError::invalid_input("frame size overflow"))?;
    if len < required {
        return Err(ModulatorError::invalid_input(format!(
            "pixel buffer holds {len} bytes, {required} needed for {width}x{height} stride {stride}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
