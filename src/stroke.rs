use egui::Pos2;

use crate::tool::Brush;

/// The gesture currently being drawn.
///
/// Only the last point is needed to extend the line; the rest of the path
/// lives on in the canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveStroke {
    origin: Pos2,
    last_point: Pos2,
    point_count: usize,
    brush: Brush,
}

impl ActiveStroke {
    // The brush is fixed here so tool changes mid-stroke wait for the next one
    pub fn new(origin: Pos2, brush: Brush) -> Self {
        Self {
            origin,
            last_point: origin,
            point_count: 1,
            brush,
        }
    }

    /// Record `point` and return the segment that leads to it
    pub fn advance(&mut self, point: Pos2) -> (Pos2, Pos2) {
        let from = self.last_point;
        self.last_point = point;
        self.point_count += 1;
        (from, point)
    }

    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    pub fn last_point(&self) -> Pos2 {
        self.last_point
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }
}
