use rayon::prelude::*;

use crate::{
    foundation::{
        core::{BYTES_PER_PIXEL, Framebuffer, PixelSource, pixel_offset, tight_stride},
        error::{ModulatorError, ModulatorResult},
    },
    modulate::{
        blend::PixelBlender,
        line::{LineModulator, luminance},
        scanner::DirectionalScanner,
    },
    params::settings::ParameterSet,
};

/// Frame processing configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Process scanlines concurrently on a rayon pool.
    pub parallel: bool,
    /// Worker count for a dedicated pool. `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Scale white color channels by the output alpha.
    pub premultiply_output: bool,
}

/// Drives the line modulator over every scanline of a frame.
///
/// Scanlines share no state, so the parallel path partitions them across workers and produces
/// output identical to the sequential one.
pub struct FrameProcessor {
    opts: ProcessOptions,
    pool: Option<rayon::ThreadPool>,
}

impl Default for FrameProcessor {
    fn default() -> Self {
        Self {
            opts: ProcessOptions::default(),
            pool: None,
        }
    }
}

impl std::fmt::Debug for FrameProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameProcessor")
            .field("opts", &self.opts)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl FrameProcessor {
    /// Build a processor. A dedicated pool is created only for `parallel` with explicit `threads`.
    pub fn new(opts: ProcessOptions) -> ModulatorResult<Self> {
        let pool = match (opts.parallel, opts.threads) {
            (true, Some(n)) => Some(build_thread_pool(n)?),
            (false, Some(n)) => {
                tracing::debug!(threads = n, "'threads' has no effect without 'parallel'");
                None
            }
            _ => None,
        };
        Ok(Self { opts, pool })
    }

    /// Active options.
    pub fn options(&self) -> &ProcessOptions {
        &self.opts
    }

    /// Process `source` into a newly allocated, tightly packed frame.
    pub fn process(
        &self,
        source: &PixelSource<'_>,
        params: &ParameterSet,
    ) -> ModulatorResult<Framebuffer> {
        let mut dst = Framebuffer::new(source.width(), source.height())?;
        self.process_into(source, params, &mut dst)?;
        Ok(dst)
    }

    /// Process `source` into an existing frame of the same size.
    ///
    /// `dst` is checked before anything is written; on error it is left untouched. Parameter
    /// values are used as given; range clamping belongs to [`ModulatorSettings::resolve`].
    ///
    /// [`ModulatorSettings::resolve`]: crate::ModulatorSettings::resolve
    #[tracing::instrument(
        skip_all,
        fields(
            width = source.width(),
            height = source.height(),
            direction = %params.direction,
        )
    )]
    pub fn process_into(
        &self,
        source: &PixelSource<'_>,
        params: &ParameterSet,
        dst: &mut Framebuffer,
    ) -> ModulatorResult<()> {
        let (w, h) = (source.width(), source.height());
        let stride = tight_stride(w)?;
        if !dst.same_size(w, h) || dst.stride != stride || dst.pixels.len() != stride * h as usize
        {
            return Err(ModulatorError::invalid_input(format!(
                "destination {}x{} (stride {}) does not match tightly packed {w}x{h} source",
                dst.width, dst.height, dst.stride
            )));
        }

        let scale = params.scale;
        if !scale.is_finite() {
            return Err(ModulatorError::invalid_input(format!("scale must be finite (got {scale})")));
        }

        let ctx = ScanContext {
            source,
            scanner: DirectionalScanner::new(params.direction, w, h),
            params,
            blender: PixelBlender::new(params, self.opts.premultiply_output),
        };
        tracing::debug!(
            scanlines = ctx.scanner.scanline_count(),
            positions = ctx.scanner.position_count(),
            parallel = self.opts.parallel,
            "modulating frame"
        );

        if !self.opts.parallel {
            ctx.run_sequential(dst);
            return Ok(());
        }
        match &self.pool {
            Some(pool) => pool.install(|| ctx.run_parallel(dst)),
            None => ctx.run_parallel(dst),
        }
    }
}

/// Process `source` sequentially with default options.
pub fn process(source: &PixelSource<'_>, params: &ParameterSet) -> ModulatorResult<Framebuffer> {
    FrameProcessor::default().process(source, params)
}

struct ScanContext<'a, 's> {
    source: &'a PixelSource<'s>,
    scanner: DirectionalScanner,
    params: &'a ParameterSet,
    blender: PixelBlender,
}

impl ScanContext<'_, '_> {
    fn modulate_scanline(&self, scanline: u32, mut emit: impl FnMut(u32, u32, [u8; 4])) {
        let mut line = LineModulator::new(self.params);
        for (x, y) in self.scanner.positions(scanline) {
            let px = self.source.pixel(x, y);
            let white = line.step(luminance(px));
            emit(x, y, self.blender.blend(white, px[3]));
        }
    }

    fn run_sequential(&self, dst: &mut Framebuffer) {
        let stride = dst.stride;
        let out = &mut dst.pixels;
        for scanline in 0..self.scanner.scanline_count() {
            self.modulate_scanline(scanline, |x, y, px| {
                let idx = pixel_offset(stride, x, y);
                out[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&px);
            });
        }
    }

    fn run_parallel(&self, dst: &mut Framebuffer) -> ModulatorResult<()> {
        let stride = dst.stride;
        if self.scanner.direction().is_horizontal() {
            // Rows are contiguous: every worker owns its destination row.
            dst.pixels
                .par_chunks_exact_mut(stride)
                .enumerate()
                .for_each(|(y, row)| {
                    self.modulate_scanline(y as u32, |x, _, px| {
                        let idx = x as usize * BYTES_PER_PIXEL;
                        row[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&px);
                    });
                });
            return Ok(());
        }

        // Columns are strided in `dst`; modulate them into a column-major scratch and scatter.
        let column_bytes = self.scanner.position_count() as usize * BYTES_PER_PIXEL;
        let len = dst.pixels.len();
        let mut scratch: Vec<u8> = Vec::new();
        scratch.try_reserve_exact(len).map_err(|e| {
            ModulatorError::transient(format!("allocate {len} byte column scratch: {e}"))
        })?;
        scratch.resize(len, 0);

        scratch
            .par_chunks_exact_mut(column_bytes)
            .enumerate()
            .for_each(|(x, col)| {
                self.modulate_scanline(x as u32, |_, y, px| {
                    let idx = y as usize * BYTES_PER_PIXEL;
                    col[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&px);
                });
            });
        for (x, col) in scratch.chunks_exact(column_bytes).enumerate() {
            for (y, px) in col.chunks_exact(BYTES_PER_PIXEL).enumerate() {
                let idx = pixel_offset(stride, x as u32, y as u32);
                dst.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(px);
            }
        }
        Ok(())
    }
}

fn build_thread_pool(threads: usize) -> ModulatorResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(ModulatorError::validation(
            "processing 'threads' must be >= 1 when set",
        ));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| ModulatorError::transient(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/modulate/frame.rs"]
mod tests;
