//! Drawable output: one shape per node, one per link, in graph order.

use crate::config::LayoutConfig;
use crate::ellipse::Ellipse;
use crate::geom::point;
use crate::link_geom::{ArrowEnds, EdgeKind, LinkGeometry};
use crate::path::edge_path;
use crate::placement::Viewport;
use crate::{Error, Result};
use mugin_core::record::PLACEHOLDER_REFERENCE;
use mugin_core::{Graph, Link};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeShape {
    pub index: usize,
    pub name: String,
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub fixed: bool,
}

impl NodeShape {
    pub fn ellipse(&self) -> Ellipse {
        Ellipse::new(point(self.cx, self.cy), self.rx, self.ry)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeShape {
    pub index: usize,
    /// Node index of the source.
    pub source: usize,
    /// Node index of the target.
    pub target: usize,
    pub kind: EdgeKind,
    pub arrows: ArrowEnds,
    pub path: String,
    pub class: String,
    pub geometry: LinkGeometry,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub viewport: Viewport,
    pub nodes: Vec<NodeShape>,
    pub edges: Vec<EdgeShape>,
}

impl Scene {
    /// Index of the topmost node whose ellipse contains `(x, y)`. Later nodes draw on top.
    pub fn node_at(&self, x: f64, y: f64) -> Option<usize> {
        let p = point(x, y);
        self.nodes
            .iter()
            .rev()
            .find(|n| n.ellipse().contains(p))
            .map(|n| n.index)
    }

    pub fn edge(&self, index: usize) -> Option<&EdgeShape> {
        self.edges.get(index)
    }

    /// Applies per-link flags from `Graph::link_visibility`. Links without a flag stay visible.
    pub fn apply_visibility(&mut self, flags: &[bool]) {
        for edge in &mut self.edges {
            edge.visible = flags.get(edge.index).copied().unwrap_or(true);
        }
    }

    pub fn visible_edges(&self) -> impl Iterator<Item = &EdgeShape> {
        self.edges.iter().filter(|e| e.visible)
    }

    /// Extent of all node ellipses.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.nodes.iter().flat_map(|n| {
            [(n.cx - n.rx, n.cy - n.ry), (n.cx + n.rx, n.cy + n.ry)]
        }))
    }
}

/// Style classes of a link: its type, plus `new` for placeholder-referenced links or `old`
/// for tooled ones.
pub fn edge_class(link: &Link) -> String {
    let mut class = format!("link {}", link.kind.as_str().to_ascii_lowercase());
    if link.reference.iter().any(|r| r.text == PLACEHOLDER_REFERENCE) {
        class.push_str(" new");
    } else if !link.tools.is_empty() {
        class.push_str(" old");
    }
    class
}

pub fn render(graph: &Graph, config: &LayoutConfig) -> Result<Scene> {
    let nodes = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, n)| NodeShape {
            index,
            name: n.name().to_string(),
            cx: n.geometry.x,
            cy: n.geometry.y,
            rx: n.geometry.rx,
            ry: n.geometry.ry,
            fixed: n.geometry.fixed,
        })
        .collect();

    let mut edges = Vec::with_capacity(graph.link_count());
    for (index, link) in graph.links().iter().enumerate() {
        let endpoint = |id| {
            graph
                .index_of(id)
                .ok_or(Error::MissingEndpoint { link: index })
        };
        let source = endpoint(link.source)?;
        let target = endpoint(link.target)?;
        let geometry = LinkGeometry::of(
            link,
            &graph.nodes()[source].geometry,
            &graph.nodes()[target].geometry,
            config,
        );
        let kind = EdgeKind::for_link(link.flow, link.weight());
        edges.push(EdgeShape {
            index,
            source,
            target,
            kind,
            arrows: ArrowEnds::for_flow(link.flow),
            path: edge_path(&geometry, kind),
            class: edge_class(link),
            geometry,
            visible: true,
        });
    }

    tracing::trace!(nodes = graph.node_count(), edges = edges.len(), "rendered scene");
    Ok(Scene {
        viewport: config.viewport,
        nodes,
        edges,
    })
}
