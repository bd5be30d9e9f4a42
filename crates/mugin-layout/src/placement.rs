//! Seed positions and pinning.

use crate::geom::{Point, point};
use crate::{Error, Result};
use mugin_core::Graph;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 500.0,
        }
    }
}

impl Viewport {
    pub fn center(&self) -> Point {
        point(self.width / 2.0, self.height / 2.0)
    }
}

/// Spreads the unpinned nodes over the ellipse inscribed in `viewport`, in node order.
/// Pinned nodes keep their position.
pub fn place_on_ring(graph: &mut Graph, viewport: &Viewport) {
    let n = graph.node_count();
    if n == 0 {
        return;
    }
    for (j, (_, geometry)) in graph.geometries_mut().enumerate() {
        if geometry.fixed {
            continue;
        }
        let angle = j as f64 * TAU / n as f64;
        geometry.x = (1.0 + angle.sin()) * viewport.width / 2.0;
        geometry.y = (1.0 + angle.cos()) * viewport.height / 2.0;
    }
}

/// Pins the node at `index` to the viewport center and releases every other node.
pub fn pin_at_center(graph: &mut Graph, index: usize, viewport: &Viewport) -> Result<()> {
    if index >= graph.node_count() {
        return Err(Error::NoSuchNode { index });
    }
    let center = viewport.center();
    for (i, (_, geometry)) in graph.geometries_mut().enumerate() {
        geometry.fixed = i == index;
        if i == index {
            geometry.x = center.x;
            geometry.y = center.y;
        }
    }
    tracing::debug!(index, x = center.x, y = center.y, "pinned node at center");
    Ok(())
}
