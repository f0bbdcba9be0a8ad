//! Perspective projection onto terminal cells.

use glam::Vec3;
use ratatui::layout::Rect;

/// Closest depth that is still drawn.
const NEAR: f32 = 0.5;

/// A point projected onto the terminal grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Column, relative to the area's left edge.
    pub col: f32,
    /// Row, relative to the area's top edge.
    pub row: f32,
    /// Distance from the camera along its view axis.
    pub depth: f32,
    /// Rows covered by one world unit at this depth.
    pub rows_per_unit: f32,
}

/// Camera on the z axis looking toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Height of a terminal cell divided by its width.
    pub cell_aspect: f32,
    /// Half width of the world at the origin that must stay on screen.
    pub min_half_width: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 22.0),
            fov_y: 45f32.to_radians(),
            cell_aspect: 2.0,
            min_half_width: 14.0,
        }
    }
}

impl Camera {
    /// Rows covered by one world unit at `depth` in a viewport of `area`.
    ///
    /// Follows the vertical field of view, shrinking when the terminal is
    /// too narrow to keep `min_half_width` visible.
    pub fn rows_per_unit(&self, depth: f32, area: Rect) -> f32 {
        let vertical = (area.height as f32 / 2.0) / (depth * (self.fov_y / 2.0).tan());
        let half_width_at_depth = self.min_half_width * depth / self.position.z;
        let horizontal = (area.width as f32 / 2.0) / (half_width_at_depth * self.cell_aspect);
        vertical.min(horizontal)
    }

    /// Project a world point, `None` when it is behind the near plane.
    pub fn project(&self, point: Vec3, area: Rect) -> Option<Projected> {
        let depth = self.position.z - point.z;
        if depth < NEAR {
            return None;
        }
        let rows_per_unit = self.rows_per_unit(depth, area);
        let rel = point - self.position;
        Some(Projected {
            col: area.width as f32 / 2.0 + rel.x * rows_per_unit * self.cell_aspect,
            row: area.height as f32 / 2.0 - rel.y * rows_per_unit,
            depth,
            rows_per_unit,
        })
    }
}
