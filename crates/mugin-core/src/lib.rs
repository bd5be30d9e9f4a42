#![forbid(unsafe_code)]

//! Graph model of the MuG information network.
//!
//! Nodes are scientific data types; links are documented workflows between them, annotated
//! with references, tools, notes and the pilot projects they apply to. The [`Graph`] owns both
//! collections and keeps three things consistent under every edit:
//! - node names are unique, and links only point at nodes that exist
//! - no two links share ordered endpoints and flow
//! - every link's `weight` equals the number of links between the same two nodes
//!
//! Geometry lives in `mugin-layout`; this crate has no notion of rendering.

pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod ids;
pub mod interchange;
pub mod merge;
pub mod model;
pub mod record;

pub use config::GraphConfig;
pub use error::{Error, Result};
pub use filter::{Criterion, LinkPredicate};
pub use graph::Graph;
pub use ids::{PairIds, node_pair_ids};
pub use interchange::{ImportReport, RecordKind, Rejected};
pub use merge::Mergeable;
pub use model::{Flow, HyperLink, Link, LinkType, Node, NodeGeometry, NodeId, Pilot};
pub use record::{FlowSpec, GraphDocument, HyperLinkField, LinkRecord, NodeRecord, NodeRef};

#[cfg(test)]
mod tests;
