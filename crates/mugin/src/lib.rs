#![forbid(unsafe_code)]

//! `mugin` models the MuG information network: which scientific data types are connected by
//! documented workflows, with the references, tools and pilot projects behind each link.
//!
//! # Features
//!
//! - `layout`: enable headless edge geometry and scene output (`mugin::layout`)

pub use mugin_core::*;

#[cfg(feature = "layout")]
pub mod layout {
    pub use mugin_layout::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use mugin_layout::view::{GraphView, LinkHandler, NodeHandler, SceneView};
    pub use mugin_layout::{
        EdgeKind, EdgeShape, LayoutConfig, LayoutOptions, LinkGeometry, NodeShape, Scene,
        Viewport, correct_link, patharc, pathline, prepare, render,
    };

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Graph(#[from] mugin_core::Error),
        #[error(transparent)]
        Layout(#[from] mugin_layout::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Imports a JSON graph document, sizes and seeds its nodes, and renders it.
    ///
    /// Records rejected during import are reported alongside the scene; they do not fail the
    /// call.
    pub fn scene_from_json(
        text: &str,
        options: &LayoutOptions,
    ) -> Result<(crate::Graph, crate::ImportReport, Scene)> {
        let (mut graph, report) = crate::Graph::from_json(text)?;
        let scene = mugin_layout::layout(&mut graph, options)?;
        Ok((graph, report, scene))
    }

    /// Renders only the links that satisfy `criteria`; the rest stay in the scene, hidden.
    pub fn render_filtered(
        graph: &crate::Graph,
        config: &LayoutConfig,
        criteria: &[crate::Criterion<'_>],
        negate: bool,
    ) -> Result<Scene> {
        let mut scene = render(graph, config)?;
        scene.apply_visibility(&graph.link_visibility(criteria, negate));
        Ok(scene)
    }
}
