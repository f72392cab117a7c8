use crate::params::direction::Direction;

/// Maps `(scanline, position)` pairs to pixel coordinates for one direction.
///
/// Horizontal directions use one scanline per row, vertical directions one per column. Reverse
/// directions visit the same pixels as their forward counterpart in mirrored order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionalScanner {
    direction: Direction,
    width: u32,
    height: u32,
}

impl DirectionalScanner {
    /// Scanner over a `width x height` frame.
    pub fn new(direction: Direction, width: u32, height: u32) -> Self {
        Self {
            direction,
            width,
            height,
        }
    }

    /// Scan direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of independent scanlines.
    pub fn scanline_count(&self) -> u32 {
        if self.direction.is_horizontal() {
            self.height
        } else {
            self.width
        }
    }

    /// Number of positions along every scanline.
    pub fn position_count(&self) -> u32 {
        if self.direction.is_horizontal() {
            self.width
        } else {
            self.height
        }
    }

    /// Pixel `(x, y)` visited at `position` of `scanline`.
    ///
    /// Panics if either index is out of range; callers iterate the counts above.
    #[inline]
    pub fn coordinate_at(&self, scanline: u32, position: u32) -> (u32, u32) {
        assert!(
            scanline < self.scanline_count() && position < self.position_count(),
            "scanner index ({scanline},{position}) out of range for {}x{} {}",
            self.width,
            self.height,
            self.direction
        );
        let along = if self.direction.is_reverse() {
            self.position_count() - 1 - position
        } else {
            position
        };
        if self.direction.is_horizontal() {
            (along, scanline)
        } else {
            (scanline, along)
        }
    }

    /// Coordinates of one scanline in traversal order.
    pub fn positions(&self, scanline: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.position_count()).map(move |p| self.coordinate_at(scanline, p))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modulate/scanner.rs"]
mod tests;
