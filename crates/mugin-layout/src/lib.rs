#![forbid(unsafe_code)]

//! Headless layout geometry for a [`mugin_core::Graph`].
//!
//! Nothing here draws. The crate sizes node ellipses from their labels, seeds positions, trims
//! every link so it starts and ends on the node boundaries (with room for arrowheads), fans
//! parallel directed links into arcs, and packages the result as a [`Scene`] that any renderer
//! can consume.

pub mod config;
pub mod ellipse;
pub mod geom;
pub mod link_geom;
pub mod path;
pub mod placement;
pub mod scene;
pub mod text;
pub mod view;

pub use config::LayoutConfig;
pub use link_geom::{ArrowEnds, EdgeKind, LinkGeometry, correct_link};
pub use path::{edge_path, patharc, pathline};
pub use placement::{Viewport, pin_at_center, place_on_ring};
pub use scene::{Bounds, EdgeShape, NodeShape, Scene, render};
pub use text::{DeterministicTextMeasurer, TextMeasurer, size_nodes};
pub use view::{GraphView, SceneView};

use mugin_core::Graph;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("link {link} references a node that is not in the graph")]
    MissingEndpoint { link: usize },
    #[error("no node at index {index}")]
    NoSuchNode { index: usize },
    #[error("no link at index {index}")]
    NoSuchLink { index: usize },
    #[error(transparent)]
    Core(#[from] mugin_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub config: LayoutConfig,
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            config: LayoutConfig::default(),
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Sizes every node from its label and seeds unpinned nodes on the viewport ring.
pub fn prepare(graph: &mut Graph, options: &LayoutOptions) {
    size_nodes(graph, options.text_measurer.as_ref(), &options.config);
    place_on_ring(graph, &options.config.viewport);
}

/// [`prepare`] followed by [`render`].
pub fn layout(graph: &mut Graph, options: &LayoutOptions) -> Result<Scene> {
    prepare(graph, options);
    render(graph, &options.config)
}
