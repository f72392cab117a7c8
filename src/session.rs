use crate::{
    foundation::{
        core::{Framebuffer, PixelSource},
        error::ModulatorResult,
    },
    modulate::frame::{FrameProcessor, ProcessOptions},
    params::settings::ParameterSet,
};

/// Frame-to-frame host state around a [`FrameProcessor`].
///
/// Keeps the last successful output and a scratch frame that is reused while the input size
/// stays the same. A frame is written to the scratch buffer and only swapped in on success, so a
/// failed frame leaves the previous output in place.
#[derive(Debug)]
pub struct ModulatorSession {
    processor: FrameProcessor,
    output: Option<Framebuffer>,
    scratch: Option<Framebuffer>,
    frames_rendered: u64,
    frames_failed: u64,
}

impl ModulatorSession {
    /// Session with its own processor.
    pub fn new(opts: ProcessOptions) -> ModulatorResult<Self> {
        Ok(Self::with_processor(FrameProcessor::new(opts)?))
    }

    /// Session around an existing processor.
    pub fn with_processor(processor: FrameProcessor) -> Self {
        Self {
            processor,
            output: None,
            scratch: None,
            frames_rendered: 0,
            frames_failed: 0,
        }
    }

    /// Validate and process one caller-owned frame, returning the new output.
    ///
    /// On error (including a malformed `source`) the previous output stays available through
    /// [`Self::last_output`].
    pub fn render(
        &mut self,
        source: &Framebuffer,
        params: &ParameterSet,
    ) -> ModulatorResult<&Framebuffer> {
        self.render_checked(source.as_source(), params)
    }

    /// Process one already validated frame view.
    pub fn render_source(
        &mut self,
        source: &PixelSource<'_>,
        params: &ParameterSet,
    ) -> ModulatorResult<&Framebuffer> {
        self.render_checked(Ok(*source), params)
    }

    fn render_checked(
        &mut self,
        source: ModulatorResult<PixelSource<'_>>,
        params: &ParameterSet,
    ) -> ModulatorResult<&Framebuffer> {
        let frame = match source.and_then(|src| self.produce(&src, params)) {
            Ok(frame) => frame,
            Err(err) => {
                self.frames_failed += 1;
                tracing::warn!(
                    error = %err,
                    recoverable = err.is_recoverable(),
                    has_previous = self.output.is_some(),
                    "modulator frame failed; keeping previous output"
                );
                return Err(err);
            }
        };

        // Previous output becomes the next scratch buffer.
        self.scratch = self.output.take();
        self.frames_rendered += 1;
        let out: &Framebuffer = self.output.insert(frame);
        Ok(out)
    }

    fn produce(
        &mut self,
        source: &PixelSource<'_>,
        params: &ParameterSet,
    ) -> ModulatorResult<Framebuffer> {
        let (w, h) = (source.width(), source.height());
        let mut dst = match self.scratch.take() {
            Some(frame) if frame.same_size(w, h) => frame,
            _ => {
                tracing::debug!(width = w, height = h, "allocating scratch frame");
                Framebuffer::new(w, h)?
            }
        };
        if let Err(err) = self.processor.process_into(source, params, &mut dst) {
            self.scratch = Some(dst);
            return Err(err);
        }
        Ok(dst)
    }

    /// Last successful output, if any.
    pub fn last_output(&self) -> Option<&Framebuffer> {
        self.output.as_ref()
    }

    /// Give up ownership of the last successful output.
    pub fn take_output(&mut self) -> Option<Framebuffer> {
        self.output.take()
    }

    /// Frames that produced output.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Frames that failed and kept the previous output.
    pub fn frames_failed(&self) -> u64 {
        self.frames_failed
    }

    /// Underlying processor.
    pub fn processor(&self) -> &FrameProcessor {
        &self.processor
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
