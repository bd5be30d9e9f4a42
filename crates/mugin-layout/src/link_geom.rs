//! Trimmed link geometry.
//!
//! A link is drawn between points on the boundaries of its endpoint ellipses, not between
//! their centers. Directed links that share a node pair are drawn as arcs; both ends of such
//! an arc are rotated off the center line by half the angular spread so the arc leaves and
//! enters the ellipses along its own tangent.

use crate::config::LayoutConfig;
use crate::ellipse::{Ellipse, correct_radius};
use crate::geom::{Point, point};
use mugin_core::{Flow, Link, NodeGeometry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Line,
    Arc,
}

impl EdgeKind {
    /// Arcs only for directed links with parallel companions.
    pub fn for_link(flow: Flow, weight: u32) -> Self {
        if flow == Flow::Inform && weight > 1 {
            EdgeKind::Arc
        } else {
            EdgeKind::Line
        }
    }
}

/// Which ends of a link carry an arrowhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArrowEnds {
    pub start: bool,
    pub end: bool,
}

impl ArrowEnds {
    pub fn for_flow(flow: Flow) -> Self {
        match flow {
            Flow::Inform => Self {
                start: false,
                end: true,
            },
            Flow::Connect => Self {
                start: true,
                end: true,
            },
        }
    }
}

/// Trimmed endpoints plus the residual vector and arc radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkGeometry {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub dx: f64,
    pub dy: f64,
    pub dr: f64,
}

/// Computes the trimmed geometry of a link from `source` to `target`.
pub fn correct_link(
    source: &NodeGeometry,
    target: &NodeGeometry,
    flow: Flow,
    weight: u32,
    config: &LayoutConfig,
) -> LinkGeometry {
    let arrows = ArrowEnds::for_flow(flow);
    let theta = (target.y - source.y).atan2(target.x - source.x);
    let half = match EdgeKind::for_link(flow, weight) {
        EdgeKind::Arc => config.spread() / 2.0,
        EdgeKind::Line => 0.0,
    };

    let from = Ellipse::around(source, correct_radius(source, arrows.start, config));
    let to = Ellipse::around(target, correct_radius(target, arrows.end, config));

    let start = from.boundary_point(theta - half);
    let end = to.center - to.boundary_offset(theta + half);

    let d = end - start;
    LinkGeometry {
        x0: start.x,
        y0: start.y,
        x1: end.x,
        y1: end.y,
        dx: d.x,
        dy: d.y,
        dr: config.arc_factor * d.length(),
    }
}

impl LinkGeometry {
    /// Geometry of a graph link whose endpoints have already been resolved.
    pub fn of(
        link: &Link,
        source: &NodeGeometry,
        target: &NodeGeometry,
        config: &LayoutConfig,
    ) -> Self {
        correct_link(source, target, link.flow, link.weight(), config)
    }

    pub fn start(&self) -> Point {
        point(self.x0, self.y0)
    }

    pub fn end(&self) -> Point {
        point(self.x1, self.y1)
    }

    pub fn chord_length(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}
