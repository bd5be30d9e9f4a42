//! The authoritative node/link collection.
//!
//! Both collections keep insertion order. Nodes are addressed by name (unique), by position, or
//! by their stable [`NodeId`]; links are addressed by position. Every mutation either succeeds
//! completely or leaves the graph untouched.

use crate::config::GraphConfig;
use crate::error::{Error, Result};
use crate::ids::PairIds;
use crate::merge::Mergeable;
use crate::model::{Flow, Link, Node, NodeGeometry, NodeId};
use crate::record::{FlowSpec, HyperLinkField, LinkRecord, NodeRecord, NodeRef};
use rustc_hash::FxBuildHasher;
use serde_json::{Map, Value};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Result of planning a bucket rewrite: the weight every member should carry afterwards, and
/// the members (by link index) that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BucketPlan {
    weight: u32,
    members: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    config: GraphConfig,

    nodes: Vec<Node>,
    node_index: HashMap<String, usize>,
    id_index: HashMap<NodeId, usize>,
    next_id: u32,

    links: Vec<Link>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn link(&self, index: usize) -> Option<&Link> {
        self.links.get(index)
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.node_index.get(name).copied()
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.node_index(name).map(|idx| &self.nodes[idx])
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.id_index.get(&id).copied()
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    /// Name of the node with the given id, or its id rendered as text when it is gone.
    pub fn node_label(&self, id: NodeId) -> String {
        self.node_by_id(id)
            .map(|n| n.name().to_string())
            .unwrap_or_else(|| id.to_string())
    }

    /// Layout-owned geometry of a node. Names and ids are not reachable from here.
    pub fn geometry_mut(&mut self, index: usize) -> Option<&mut NodeGeometry> {
        self.nodes.get_mut(index).map(|n| &mut n.geometry)
    }

    pub fn geometries_mut(&mut self) -> impl Iterator<Item = (&str, &mut NodeGeometry)> {
        self.nodes
            .iter_mut()
            .map(|n| (n.name.as_str(), &mut n.geometry))
    }

    /// Resolves a reference to an existing node without creating anything.
    ///
    /// A name that is not in the graph yields `Ok(None)`; a dangling index or id is an error
    /// because nothing could ever create it implicitly.
    pub fn lookup(&self, node: &NodeRef) -> Result<Option<NodeId>> {
        match node {
            NodeRef::ByName(name) => Ok(self.node_by_name(name).map(Node::id)),
            NodeRef::ByIndex(index) => self
                .nodes
                .get(*index)
                .map(|n| Some(n.id))
                .ok_or_else(|| Error::not_found(node.to_string())),
            NodeRef::ById(id) => {
                if self.id_index.contains_key(id) {
                    Ok(Some(*id))
                } else {
                    Err(Error::not_found(node.to_string()))
                }
            }
        }
    }

    fn lookup_existing(&self, node: &NodeRef) -> Result<NodeId> {
        self.lookup(node)?
            .ok_or_else(|| Error::not_found(node.to_string()))
    }

    /// Resolves a reference, creating the node when it is named and absent.
    fn ensure_node(&mut self, node: &NodeRef) -> Result<NodeId> {
        match node {
            NodeRef::ByName(name) => {
                let idx = self.add_node(NodeRecord::named(name.clone()))?;
                Ok(self.nodes[idx].id)
            }
            _ => self.lookup_existing(node),
        }
    }

    /// Adds a node, or returns the index of the node that already has this name.
    pub fn add_node(&mut self, record: NodeRecord) -> Result<usize> {
        let name = match record.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(Error::InvalidInput { field: "name" }),
        };
        if let Some(&idx) = self.node_index.get(&name) {
            return Ok(idx);
        }

        let id = NodeId::new(self.next_id);
        self.next_id += 1;

        let mut node = Node::new(id, name);
        node.description = record.description;
        if let Some(x) = record.x {
            node.geometry.x = x;
        }
        if let Some(y) = record.y {
            node.geometry.y = y;
        }
        if let Some(fixed) = record.fixed {
            node.geometry.fixed = fixed;
        }

        let idx = self.nodes.len();
        tracing::debug!(name = %node.name, index = idx, id = %id, "added node");
        self.node_index.insert(node.name.clone(), idx);
        self.id_index.insert(id, idx);
        self.nodes.push(node);
        Ok(idx)
    }

    pub fn add_node_named(&mut self, name: impl Into<String>) -> Result<usize> {
        self.add_node(NodeRecord::named(name))
    }

    /// Adds a link, creating named endpoints on demand.
    ///
    /// Fails without touching the graph when an endpoint is missing, when an identical link
    /// (same ordered endpoints, same flow) exists, or when the endpoint pair already carries
    /// the maximum number of parallel links.
    pub fn add_link(&mut self, record: LinkRecord) -> Result<usize> {
        let source = record
            .source
            .clone()
            .ok_or(Error::InvalidInput { field: "source" })?;
        let target = record
            .target
            .clone()
            .ok_or(Error::InvalidInput { field: "target" })?;
        if matches!(&source, NodeRef::ByName(name) if name.is_empty()) {
            return Err(Error::InvalidInput { field: "source" });
        }
        if matches!(&target, NodeRef::ByName(name) if name.is_empty()) {
            return Err(Error::InvalidInput { field: "target" });
        }
        let flow_spec = record.flow.unwrap_or_default();

        // A conflict needs both endpoints to exist already, so check before creating any node.
        if let (Some(s), Some(t)) = (self.lookup(&source)?, self.lookup(&target)?) {
            let (flow, s, t) = flow_spec.normalize(s, t);
            self.plan_bucket(&Link::new(s, t, flow), false, None)?;
        }

        let s = self.ensure_node(&source)?;
        let t = self.ensure_node(&target)?;
        let (flow, s, t) = flow_spec.normalize(s, t);

        let provenance = record.provenance();
        let mut link = Link::new(s, t, flow);
        link.kind = record.resolved_kind(&provenance);
        link.pilot = record.pilot.unwrap_or_default();
        link.description = record.description;
        link.notes = record.notes;
        link.reference = provenance.reference;
        link.tools = provenance.tools;
        link.links = provenance.links;

        let weight = self.rebalance(&link, false)?;
        link.set_weight(weight);

        let idx = self.links.len();
        tracing::debug!(
            source = %self.node_label(s),
            target = %self.node_label(t),
            %flow,
            weight,
            index = idx,
            "added link"
        );
        self.links.push(link);
        Ok(idx)
    }

    /// Index of the link with exactly these endpoints and flow.
    pub fn find_link(&self, source: NodeId, target: NodeId, flow: Flow) -> Option<usize> {
        self.links
            .iter()
            .position(|l| l.source == source && l.target == target && l.flow == flow)
    }

    /// Indices of every link sharing the unordered endpoint pair of the link at `index`
    /// (including itself).
    pub fn bucket(&self, index: usize) -> Vec<usize> {
        let Some(link) = self.links.get(index) else {
            return Vec::new();
        };
        let ids = link.pair_ids();
        self.links
            .iter()
            .enumerate()
            .filter(|(_, l)| l.pair_ids().same_bucket(&ids))
            .map(|(i, _)| i)
            .collect()
    }

    /// Weight `link`'s bucket would carry after an insertion (`del == false`) or a removal
    /// (`del == true`). Nothing is written.
    ///
    /// For an insertion, a link identical to `link` already in the graph is a duplicate and a
    /// bucket at the cap is full. For a removal, `link` is expected to be gone already, so the
    /// weight is the number of remaining members (`0` once the bucket is empty).
    pub fn calculate_weights(&self, link: &Link, del: bool) -> Result<u32> {
        self.plan_bucket(link, del, None).map(|plan| plan.weight)
    }

    /// Plans and writes the bucket weight. Only valid right before inserting `link` or right
    /// after removing it.
    fn rebalance(&mut self, link: &Link, del: bool) -> Result<u32> {
        let plan = self.plan_bucket(link, del, None)?;
        self.apply_bucket(&plan);
        Ok(plan.weight)
    }

    fn plan_bucket(&self, link: &Link, del: bool, skip: Option<usize>) -> Result<BucketPlan> {
        let ids = link.pair_ids();
        let mut members = Vec::new();
        for (i, other) in self.links.iter().enumerate() {
            if Some(i) == skip {
                continue;
            }
            let other_ids = other.pair_ids();
            if !other_ids.same_bucket(&ids) {
                continue;
            }
            if !del && other_ids.directed == ids.directed && other.flow == link.flow {
                return Err(Error::DuplicateEntity {
                    from: self.node_label(link.source),
                    to: self.node_label(link.target),
                    flow: link.flow,
                });
            }
            members.push(i);
        }

        // Members share one weight equal to the bucket size, so counting them is the same as
        // stepping their common weight up or down by one.
        let weight = if del {
            members.len() as u32
        } else {
            members.len() as u32 + 1
        };
        if !del && self.config.exceeds_cap(weight) {
            return Err(Error::CapacityExceeded {
                from: self.node_label(link.source),
                to: self.node_label(link.target),
                max: self.config.max_weight,
            });
        }
        Ok(BucketPlan { weight, members })
    }

    fn apply_bucket(&mut self, plan: &BucketPlan) {
        for &i in &plan.members {
            self.links[i].set_weight(plan.weight);
        }
        tracing::trace!(weight = plan.weight, members = ?plan.members, "rewrote bucket weights");
    }

    /// Removes the link at `index` and rebalances its former bucket.
    pub fn del_link(&mut self, index: usize) -> Result<usize> {
        if index >= self.links.len() {
            return Err(Error::not_found(format!("link at index {index}")));
        }
        let link = self.links.remove(index);
        self.rebalance(&link, true)?;
        tracing::debug!(
            source = %self.node_label(link.source),
            target = %self.node_label(link.target),
            flow = %link.flow,
            index,
            "removed link"
        );
        Ok(index)
    }

    /// Removes a node and every link incident to it. Returns the node's former index.
    pub fn del_node(&mut self, node: impl Into<NodeRef>) -> Result<usize> {
        let node = node.into();
        let id = self.lookup_existing(&node)?;
        let idx = self.id_index[&id];

        while let Some(i) = self.links.iter().position(|l| l.touches(id)) {
            self.del_link(i)?;
        }

        let removed = self.nodes.remove(idx);
        self.node_index.remove(&removed.name);
        self.id_index.remove(&id);
        for (i, n) in self.nodes.iter().enumerate().skip(idx) {
            if let Some(v) = self.node_index.get_mut(n.name.as_str()) {
                *v = i;
            }
            if let Some(v) = self.id_index.get_mut(&n.id) {
                *v = i;
            }
        }
        tracing::debug!(name = %removed.name, index = idx, "removed node");
        Ok(idx)
    }

    /// Deep-merges `patch` into the node at `index`. Renames must stay unique.
    pub fn update_node(&mut self, index: usize, patch: &Value) -> Result<()> {
        let node = self
            .nodes
            .get(index)
            .ok_or_else(|| Error::not_found(format!("node at index {index}")))?;
        let merged = node.merged(patch)?;
        if merged.name.is_empty() {
            return Err(Error::InvalidInput { field: "name" });
        }
        if merged.name != node.name {
            if self.node_index.contains_key(&merged.name) {
                return Err(Error::DuplicateNode { name: merged.name });
            }
            let old = self.nodes[index].name.clone();
            self.node_index.remove(&old);
            self.node_index.insert(merged.name.clone(), index);
            tracing::debug!(from = %old, to = %merged.name, "renamed node");
        }
        self.nodes[index] = merged;
        Ok(())
    }

    /// Deep-merges `patch` into the link at `index`.
    ///
    /// `source`/`target` may be given as names or indices of existing nodes, `flow` accepts the
    /// reversed marker, and `weight` is ignored. `reference`/`tools`/`links` accept the same
    /// `;`-separated text as [`Graph::add_link`] and replace the stored lists. When the endpoints
    /// or the flow change, the duplicate and capacity rules are re-checked and both affected
    /// buckets are rebalanced.
    pub fn update_link(&mut self, index: usize, patch: &Value) -> Result<()> {
        let current = self
            .links
            .get(index)
            .ok_or_else(|| Error::not_found(format!("link at index {index}")))?;
        let mut patch = patch.clone();
        let Some(fields) = patch.as_object_mut() else {
            return Err(Error::InvalidInput { field: "patch" });
        };
        fields.remove("weight");

        let source = match fields.remove("source") {
            Some(v) => self.lookup_existing(&serde_json::from_value::<NodeRef>(v)?)?,
            None => current.source,
        };
        let target = match fields.remove("target") {
            Some(v) => self.lookup_existing(&serde_json::from_value::<NodeRef>(v)?)?,
            None => current.target,
        };
        let (flow, source, target) = match fields.remove("flow") {
            Some(v) => serde_json::from_value::<FlowSpec>(v)?.normalize(source, target),
            None => (current.flow, source, target),
        };
        normalize_provenance(fields)?;

        let mut candidate = current.merged(&patch)?;
        candidate.source = source;
        candidate.target = target;
        candidate.flow = flow;

        let moved = (source, target, flow) != (current.source, current.target, current.flow);
        if !moved {
            self.links[index] = candidate;
            return Ok(());
        }

        let joined = self.plan_bucket(&candidate, false, Some(index))?;
        let left = self.plan_bucket(current, true, Some(index))?;
        self.apply_bucket(&left);
        self.apply_bucket(&joined);
        candidate.set_weight(joined.weight);
        tracing::debug!(
            index,
            source = %self.node_label(source),
            target = %self.node_label(target),
            %flow,
            weight = joined.weight,
            "moved link"
        );
        self.links[index] = candidate;
        Ok(())
    }

    /// Pair ids of the link at `index`.
    pub fn pair_ids(&self, index: usize) -> Option<PairIds> {
        self.links.get(index).map(Link::pair_ids)
    }
}

/// Rewrites text provenance fields of a link patch into hyperlink arrays, pairing text
/// references with the patch's own `links` the way [`LinkRecord::provenance`] does.
fn normalize_provenance(fields: &mut Map<String, Value>) -> Result<()> {
    let record = LinkRecord {
        reference: take_hyperlinks(fields, "reference")?,
        tools: take_hyperlinks(fields, "tools")?,
        links: take_hyperlinks(fields, "links")?,
        ..Default::default()
    };
    let provenance = record.provenance();
    for (key, present, list) in [
        ("reference", record.reference.is_some(), provenance.reference),
        ("tools", record.tools.is_some(), provenance.tools),
        ("links", record.links.is_some(), provenance.links),
    ] {
        if present {
            fields.insert(key.to_string(), serde_json::to_value(list)?);
        }
    }
    Ok(())
}

fn take_hyperlinks(fields: &mut Map<String, Value>, key: &str) -> Result<Option<HyperLinkField>> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => Ok(Some(serde_json::from_value(v)?)),
    }
}
