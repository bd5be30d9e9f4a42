//! Input/output records: the portable shape of nodes and links before they are resolved against
//! a graph (and after they are exported from one).

use crate::model::{Flow, HyperLink, LinkType, NodeId, Pilot, RawCode};
use serde::{Deserialize, Serialize, Serializer};

/// Placeholder reference used for links whose evidence has not been collected yet.
pub const PLACEHOLDER_REFERENCE: &str = "XXX";

/// How a link names one of its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    /// By node name; the node is created on demand.
    ByName(String),
    /// By current position in the node list.
    ByIndex(usize),
    /// By stable id.
    #[serde(skip)]
    ById(NodeId),
}

impl From<&str> for NodeRef {
    fn from(name: &str) -> Self {
        NodeRef::ByName(name.to_string())
    }
}

impl From<String> for NodeRef {
    fn from(name: String) -> Self {
        NodeRef::ByName(name)
    }
}

impl From<usize> for NodeRef {
    fn from(index: usize) -> Self {
        NodeRef::ByIndex(index)
    }
}

impl From<NodeId> for NodeRef {
    fn from(id: NodeId) -> Self {
        NodeRef::ById(id)
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRef::ByName(name) => write!(f, "node {name:?}"),
            NodeRef::ByIndex(index) => write!(f, "node at index {index}"),
            NodeRef::ById(id) => write!(f, "node {id}"),
        }
    }
}

/// Flow as supplied by a caller: either a flow, or the request to reverse the endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCode")]
pub enum FlowSpec {
    Flow(Flow),
    /// `-1` / `<-`: swap source and target, then use [`Flow::Inform`].
    Reversed,
}

impl FlowSpec {
    pub const REVERSED_CODE: i64 = -1;

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "<-" | "-1" => Some(FlowSpec::Reversed),
            t if t.eq_ignore_ascii_case("reversed") => Some(FlowSpec::Reversed),
            t => Flow::parse(t).map(FlowSpec::Flow),
        }
    }

    /// Applies the flow to a `(source, target)` pair, swapping it when reversed.
    pub fn normalize<T>(self, source: T, target: T) -> (Flow, T, T) {
        match self {
            FlowSpec::Flow(flow) => (flow, source, target),
            FlowSpec::Reversed => (Flow::Inform, target, source),
        }
    }
}

impl Default for FlowSpec {
    fn default() -> Self {
        FlowSpec::Flow(Flow::default())
    }
}

impl From<Flow> for FlowSpec {
    fn from(flow: Flow) -> Self {
        FlowSpec::Flow(flow)
    }
}

impl TryFrom<RawCode> for FlowSpec {
    type Error = String;

    fn try_from(raw: RawCode) -> Result<Self, Self::Error> {
        match raw {
            RawCode::Int(FlowSpec::REVERSED_CODE) => Ok(FlowSpec::Reversed),
            RawCode::Int(code) => Flow::from_code(code)
                .map(FlowSpec::Flow)
                .ok_or_else(|| format!("unknown flow code {code}")),
            RawCode::Text(text) => {
                FlowSpec::parse(&text).ok_or_else(|| format!("unknown flow {text:?}"))
            }
        }
    }
}

impl Serialize for FlowSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlowSpec::Flow(flow) => flow.serialize(serializer),
            FlowSpec::Reversed => serializer.serialize_i64(FlowSpec::REVERSED_CODE),
        }
    }
}

/// A hyperlink list supplied either structured or as `;`-separated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HyperLinkField {
    Text(String),
    List(Vec<HyperLink>),
}

impl HyperLinkField {
    /// Splits `;`-separated text into trimmed, non-empty items.
    pub fn split_items(text: &str) -> Vec<String> {
        text.split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Every entry as a hyperlink; bare text items are promoted to `{text: s, link: s}`.
    pub fn into_hyperlinks(self) -> Vec<HyperLink> {
        match self {
            HyperLinkField::Text(text) => Self::split_items(&text)
                .into_iter()
                .map(HyperLink::new)
                .collect(),
            HyperLinkField::List(list) => list,
        }
    }
}

impl From<Vec<HyperLink>> for HyperLinkField {
    fn from(list: Vec<HyperLink>) -> Self {
        HyperLinkField::List(list)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<bool>,
}

impl NodeRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<NodeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<NodeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<FlowSpec>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<LinkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<HyperLinkField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<HyperLinkField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HyperLinkField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pilot: Option<Pilot>,
}

/// Normalized provenance lists of a link record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    pub reference: Vec<HyperLink>,
    pub tools: Vec<HyperLink>,
    pub links: Vec<HyperLink>,
}

impl LinkRecord {
    pub fn between(source: impl Into<NodeRef>, target: impl Into<NodeRef>) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            ..Default::default()
        }
    }

    pub fn with_flow(mut self, flow: impl Into<FlowSpec>) -> Self {
        self.flow = Some(flow.into());
        self
    }

    pub fn with_kind(mut self, kind: LinkType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_pilot(mut self, pilot: Pilot) -> Self {
        self.pilot = Some(pilot);
        self
    }

    /// Builds the reference/tools/links lists.
    ///
    /// Text references pair positionally with the entries of `links`; `links` entries beyond
    /// the number of references stay in `links` as standalone hyperlinks.
    pub fn provenance(&self) -> Provenance {
        let mut urls = self
            .links
            .clone()
            .map(HyperLinkField::into_hyperlinks)
            .unwrap_or_default();

        let reference = match &self.reference {
            None => Vec::new(),
            Some(HyperLinkField::List(list)) => list.clone(),
            Some(HyperLinkField::Text(text)) => {
                let items = HyperLinkField::split_items(text);
                let paired = items.len().min(urls.len());
                let mut consumed = urls.drain(..paired);
                items
                    .into_iter()
                    .map(|text| match consumed.next().and_then(|h| h.link) {
                        Some(link) => HyperLink::with_text(text, link),
                        None => HyperLink::text_only(text),
                    })
                    .collect()
            }
        };

        Provenance {
            reference,
            tools: self
                .tools
                .clone()
                .map(HyperLinkField::into_hyperlinks)
                .unwrap_or_default(),
            links: urls,
        }
    }

    /// The explicit type, or one inferred from the provenance: tools mean DONE, no evidence
    /// (or only the placeholder reference) means MAYBE, anything else TODO.
    pub fn resolved_kind(&self, provenance: &Provenance) -> LinkType {
        if let Some(kind) = self.kind {
            return kind;
        }
        if !provenance.tools.is_empty() {
            return LinkType::Done;
        }
        let unreferenced = provenance
            .reference
            .iter()
            .all(|r| r.text == PLACEHOLDER_REFERENCE);
        if unreferenced {
            LinkType::Maybe
        } else {
            LinkType::Todo
        }
    }
}

/// Whole-graph interchange document: nodes first, so links can name them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub links: Vec<LinkRecord>,
}
