use std::{fmt, str::FromStr};

use crate::foundation::error::{ModulatorError, ModulatorResult};

/// Scan direction of the modulation.
///
/// Horizontal directions treat every row as one scanline, vertical directions every column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Rows, scanned `x = 0..width`.
    #[default]
    #[serde(alias = "ltr")]
    LeftToRight,
    /// Rows, scanned `x = width-1..=0`.
    #[serde(alias = "rtl")]
    RightToLeft,
    /// Columns, scanned `y = 0..height`.
    #[serde(alias = "ttb")]
    TopToBottom,
    /// Columns, scanned `y = height-1..=0`.
    #[serde(alias = "btt")]
    BottomToTop,
}

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Direction; 4] = [
        Direction::LeftToRight,
        Direction::RightToLeft,
        Direction::TopToBottom,
        Direction::BottomToTop,
    ];

    /// Parse a direction name. Case-insensitive; accepts `left_to_right`, `lefttoright`, `ltr`
    /// and the equivalents for the other three directions.
    pub fn parse(s: &str) -> ModulatorResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left_to_right" | "lefttoright" | "left-to-right" | "ltr" => Ok(Self::LeftToRight),
            "right_to_left" | "righttoleft" | "right-to-left" | "rtl" => Ok(Self::RightToLeft),
            "top_to_bottom" | "toptobottom" | "top-to-bottom" | "ttb" => Ok(Self::TopToBottom),
            "bottom_to_top" | "bottomtotop" | "bottom-to-top" | "btt" => Ok(Self::BottomToTop),
            other => Err(ModulatorError::validation(format!("unknown direction '{other}'"))),
        }
    }

    /// Rows are scanlines.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LeftToRight | Self::RightToLeft)
    }

    /// Positions are visited from the far edge toward the origin.
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::RightToLeft | Self::BottomToTop)
    }

    /// Canonical snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftToRight => "left_to_right",
            Self::RightToLeft => "right_to_left",
            Self::TopToBottom => "top_to_bottom",
            Self::BottomToTop => "bottom_to_top",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ModulatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/direction.rs"]
mod tests;
