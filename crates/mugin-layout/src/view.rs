//! Click routing between a renderer and the graph.

use crate::placement::pin_at_center;
use crate::scene::{Scene, render};
use crate::{Error, LayoutOptions, Result};
use mugin_core::{Graph, Link, Node};

pub type NodeHandler<'a> = Box<dyn FnMut(&Node, usize) + 'a>;
pub type LinkHandler<'a> = Box<dyn FnMut(&Link, usize) + 'a>;

/// What a UI layer needs from the layout side: somewhere to register click handlers, and a
/// scene to draw.
pub trait GraphView<'a> {
    fn on_node_click(&mut self, handler: NodeHandler<'a>);
    fn on_link_click(&mut self, handler: LinkHandler<'a>);
    fn render(&self, graph: &Graph) -> Result<Scene>;
}

#[derive(Default)]
pub struct SceneView<'a> {
    options: LayoutOptions,
    node_handlers: Vec<NodeHandler<'a>>,
    link_handlers: Vec<LinkHandler<'a>>,
}

impl<'a> SceneView<'a> {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            node_handlers: Vec::new(),
            link_handlers: Vec::new(),
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Sizes and seeds `graph` with this view's options.
    pub fn prepare(&self, graph: &mut Graph) {
        crate::prepare(graph, &self.options);
    }

    /// Calls every node handler, in registration order.
    pub fn click_node(&mut self, graph: &Graph, index: usize) -> Result<()> {
        let node = graph.node(index).ok_or(Error::NoSuchNode { index })?;
        for handler in &mut self.node_handlers {
            handler(node, index);
        }
        Ok(())
    }

    pub fn click_link(&mut self, graph: &Graph, index: usize) -> Result<()> {
        let link = graph.link(index).ok_or(Error::NoSuchLink { index })?;
        for handler in &mut self.link_handlers {
            handler(link, index);
        }
        Ok(())
    }

    /// Pins the node at the viewport center, releases the others, then reports the click.
    pub fn shift_click_node(&mut self, graph: &mut Graph, index: usize) -> Result<()> {
        pin_at_center(graph, index, &self.options.config.viewport)?;
        self.click_node(graph, index)
    }

    /// Hit-tests `(x, y)` against `scene` and clicks the node found there, if any.
    pub fn click_at(
        &mut self,
        graph: &Graph,
        scene: &Scene,
        x: f64,
        y: f64,
    ) -> Result<Option<usize>> {
        match scene.node_at(x, y) {
            Some(index) => {
                self.click_node(graph, index)?;
                Ok(Some(index))
            }
            None => Ok(None),
        }
    }
}

impl<'a> GraphView<'a> for SceneView<'a> {
    fn on_node_click(&mut self, handler: NodeHandler<'a>) {
        self.node_handlers.push(handler);
    }

    fn on_link_click(&mut self, handler: LinkHandler<'a>) {
        self.link_handlers.push(handler);
    }

    fn render(&self, graph: &Graph) -> Result<Scene> {
        render(graph, &self.options.config)
    }
}

impl std::fmt::Debug for SceneView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneView")
            .field("options", &self.options)
            .field("node_handlers", &self.node_handlers.len())
            .field("link_handlers", &self.link_handlers.len())
            .finish()
    }
}
