use crate::params::settings::ParameterSet;

/// Unweighted mean of the B, G and R bytes of a BGRA pixel. Alpha is ignored.
#[inline]
pub fn luminance(px: [u8; 4]) -> f64 {
    (f64::from(px[0]) + f64::from(px[1]) + f64::from(px[2])) / 3.0
}

/// Mutable counters of one scanline. Created fresh for every scanline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScanlineState {
    /// Ink collected since the last threshold crossing.
    pub ink_accumulator: f64,
    /// White pixels still to emit for the current line.
    pub draw_remaining: u32,
    /// Lines left in the current bundle.
    pub drawing_remaining: u32,
    /// Crossings still to skip before the next bundle.
    pub interval_remaining: u32,
}

/// Per-scanline modulation: turns a stream of luminance samples into paint decisions.
///
/// Every threshold crossing either consumes one interval tick or starts a white run of
/// `line_width` pixels. After `drawing_count` runs the bundle pauses for `interval_count`
/// crossings; with `interval_count == 0` the budget is never refilled.
#[derive(Clone, Debug)]
pub struct LineModulator {
    scale: f64,
    threshold: f64,
    drawing_count: u32,
    interval_count: u32,
    line_width: u32,
    invert: bool,
    state: ScanlineState,
}

impl LineModulator {
    /// Modulator in its scanline-start state.
    pub fn new(params: &ParameterSet) -> Self {
        Self {
            scale: f64::from(params.scale),
            threshold: f64::from(params.threshold),
            drawing_count: params.drawing_count,
            interval_count: params.interval_count,
            line_width: params.line_width,
            invert: params.invert,
            state: Self::initial_state(params.drawing_count),
        }
    }

    fn initial_state(drawing_count: u32) -> ScanlineState {
        ScanlineState {
            drawing_remaining: drawing_count,
            ..ScanlineState::default()
        }
    }

    /// Return to the scanline-start state.
    pub fn reset(&mut self) {
        self.state = Self::initial_state(self.drawing_count);
    }

    /// Current counters.
    pub fn state(&self) -> &ScanlineState {
        &self.state
    }

    /// Feed one sample in scan order. Returns `true` when the pixel is painted white.
    #[inline]
    pub fn step(&mut self, luminance: f64) -> bool {
        let st = &mut self.state;

        st.ink_accumulator += if self.invert {
            luminance / self.scale
        } else {
            (255.0 - luminance) / self.scale
        };

        if st.ink_accumulator >= self.threshold {
            st.ink_accumulator = 0.0;
            if st.interval_remaining > 0 {
                st.interval_remaining -= 1;
            } else if st.drawing_remaining > 0 {
                st.draw_remaining = self.line_width;
                st.drawing_remaining -= 1;
                if st.drawing_remaining == 0 && self.interval_count > 0 {
                    st.interval_remaining = self.interval_count;
                    st.drawing_remaining = self.drawing_count;
                }
            }
        }

        if st.draw_remaining > 0 {
            st.draw_remaining -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modulate/line.rs"]
mod tests;
