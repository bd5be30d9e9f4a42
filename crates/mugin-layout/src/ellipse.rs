//! Node ellipses and their boundary.

use crate::config::LayoutConfig;
use crate::geom::{Point, Vector, direction, point};
use mugin_core::NodeGeometry;

/// Margin between a node's drawn ellipse and the end of a link touching it.
pub fn correct_radius(node: &NodeGeometry, has_arrow: bool, config: &LayoutConfig) -> f64 {
    let mut margin = config.base_margin;
    if has_arrow {
        margin += config.arrow_margin;
    }
    if !node.fixed {
        margin += config.free_margin;
    }
    margin
}

/// Axis-aligned ellipse with semi-axes `a` (x) and `b` (y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub a: f64,
    pub b: f64,
}

impl Ellipse {
    pub fn new(center: Point, a: f64, b: f64) -> Self {
        Self { center, a, b }
    }

    /// The node's ellipse grown by `margin` on both axes.
    pub fn around(node: &NodeGeometry, margin: f64) -> Self {
        Self::new(point(node.x, node.y), node.rx + margin, node.ry + margin)
    }

    /// Distance from the center to the boundary along `angle`.
    pub fn radius_at(&self, angle: f64) -> f64 {
        let denom = (self.b * angle.cos()).hypot(self.a * angle.sin());
        if denom == 0.0 {
            return 0.0;
        }
        self.a * self.b / denom
    }

    /// Offset from the center to the boundary along `angle`.
    pub fn boundary_offset(&self, angle: f64) -> Vector {
        direction(angle) * self.radius_at(angle)
    }

    pub fn boundary_point(&self, angle: f64) -> Point {
        self.center + self.boundary_offset(angle)
    }

    /// `((x - cx) / a)^2 + ((y - cy) / b)^2`: below 1 inside, 1 on the boundary.
    pub fn normalized_distance(&self, p: Point) -> f64 {
        if self.a <= 0.0 || self.b <= 0.0 {
            return f64::INFINITY;
        }
        let d = p - self.center;
        (d.x / self.a).powi(2) + (d.y / self.b).powi(2)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.normalized_distance(p) <= 1.0
    }
}
