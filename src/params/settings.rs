use crate::{
    foundation::error::{ModulatorError, ModulatorResult},
    params::direction::Direction,
};

/// Lower bound of [`ParameterSet::scale`].
pub const SCALE_MIN: f32 = 0.25;
/// Upper bound of [`ParameterSet::scale`].
pub const SCALE_MAX: f32 = 100.0;
/// Upper bound shared by the drawing and interval counts.
pub const COUNT_MAX: u32 = 100;
/// Upper bound of [`ParameterSet::line_width`].
pub const LINE_WIDTH_MAX: u32 = 20;
/// Upper bound of [`ParameterSet::threshold`].
pub const THRESHOLD_MAX: u32 = 255;

/// Plain per-frame parameter values consumed by the frame processor.
///
/// Values are expected inside their documented ranges; [`ModulatorSettings::resolve`] produces
/// them that way. The frame processor uses the values as given and only rejects a non-finite
/// `scale`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterSet {
    /// Divisor applied to every luminance sample, `0.25..=100`. Larger values space lines further.
    pub scale: f32,
    /// Lines per bundle, `1..=100`.
    pub drawing_count: u32,
    /// Threshold crossings skipped between bundles, `0..=100`.
    pub interval_count: u32,
    /// Width in pixels of every white run, `1..=20`.
    pub line_width: u32,
    /// Ink level that triggers a crossing, `0..=255`.
    pub threshold: u32,
    /// Alpha scale for white pixels.
    pub opacity_white: u8,
    /// Alpha scale for black pixels.
    pub opacity_black: u8,
    /// Scan direction.
    pub direction: Direction,
    /// Accumulate brightness instead of darkness.
    pub invert: bool,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            scale: 5.0,
            drawing_count: 10,
            interval_count: 2,
            line_width: 2,
            threshold: 255,
            opacity_white: 255,
            opacity_black: 255,
            direction: Direction::LeftToRight,
            invert: false,
        }
    }
}

impl ParameterSet {
    /// Copy with every numeric field forced into its range. A NaN `scale` stays NaN.
    pub fn clamped(self) -> Self {
        Self {
            scale: self.scale.clamp(SCALE_MIN, SCALE_MAX),
            drawing_count: self.drawing_count.clamp(1, COUNT_MAX),
            interval_count: self.interval_count.min(COUNT_MAX),
            line_width: self.line_width.clamp(1, LINE_WIDTH_MAX),
            threshold: self.threshold.min(THRESHOLD_MAX),
            ..self
        }
    }
}

/// Host-side parameter record, as read from a settings file or slider values.
///
/// Numeric fields are raw `f64` slider values. [`ModulatorSettings::resolve`] turns them into a
/// [`ParameterSet`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModulatorSettings {
    /// Luminance divisor.
    pub scale: f64,
    /// Lines per bundle.
    pub drawing_count: f64,
    /// Crossings skipped between bundles.
    pub interval_count: f64,
    /// Line width in pixels.
    pub line_width: f64,
    /// Crossing threshold.
    pub threshold: f64,
    /// White alpha scale.
    pub opacity_white: f64,
    /// Black alpha scale.
    pub opacity_black: f64,
    /// Scan direction.
    pub direction: Direction,
    /// Accumulate brightness instead of darkness.
    pub invert: bool,
}

impl Default for ModulatorSettings {
    fn default() -> Self {
        let p = ParameterSet::default();
        Self {
            scale: f64::from(p.scale),
            drawing_count: f64::from(p.drawing_count),
            interval_count: f64::from(p.interval_count),
            line_width: f64::from(p.line_width),
            threshold: f64::from(p.threshold),
            opacity_white: f64::from(p.opacity_white),
            opacity_black: f64::from(p.opacity_black),
            direction: p.direction,
            invert: p.invert,
        }
    }
}

impl ModulatorSettings {
    /// Parse settings JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> ModulatorResult<Self> {
        serde_json::from_str(s).map_err(|e| ModulatorError::serde(format!("settings json: {e}")))
    }

    /// Clamp every value into range and truncate the integer-valued ones toward zero.
    pub fn resolve(&self) -> ModulatorResult<ParameterSet> {
        let scale = finite("scale", self.scale)?.clamp(f64::from(SCALE_MIN), f64::from(SCALE_MAX));
        Ok(ParameterSet {
            scale: scale as f32,
            drawing_count: count("drawing_count", self.drawing_count, 1, COUNT_MAX)?,
            interval_count: count("interval_count", self.interval_count, 0, COUNT_MAX)?,
            line_width: count("line_width", self.line_width, 1, LINE_WIDTH_MAX)?,
            threshold: count("threshold", self.threshold, 0, THRESHOLD_MAX)?,
            opacity_white: count("opacity_white", self.opacity_white, 0, 255)? as u8,
            opacity_black: count("opacity_black", self.opacity_black, 0, 255)? as u8,
            direction: self.direction,
            invert: self.invert,
        })
    }
}

fn finite(name: &str, v: f64) -> ModulatorResult<f64> {
    if !v.is_finite() {
        return Err(ModulatorError::validation(format!("parameter '{name}' must be finite")));
    }
    Ok(v)
}

fn count(name: &str, v: f64, min: u32, max: u32) -> ModulatorResult<u32> {
    let v = finite(name, v)?.clamp(f64::from(min), f64::from(max));
    Ok(v.trunc() as u32)
}

#[cfg(test)]
#[path = "../../tests/unit/params/settings.rs"]
mod tests;
