//! Entity records: nodes, links and the hyperlinks that annotate them.

use crate::ids::PairIds;
use crate::merge::Mergeable;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Default half-axes of a node ellipse before its label has been measured.
pub const DEFAULT_RX: f64 = 30.0;
pub const DEFAULT_RY: f64 = 30.0;

/// Stable node identity. Indices shift when nodes are deleted; ids never do.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Integer-or-text scalar, used to accept both `1` and `"->"` style encodings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawCode {
    Int(i64),
    Text(String),
}

/// Relationship kind of a link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawCode")]
pub enum Flow {
    /// Directed: the source informs the target (`->`).
    #[default]
    Inform,
    /// Bidirectional, symmetric use (`<->`).
    Connect,
}

impl Flow {
    pub fn code(self) -> i64 {
        match self {
            Flow::Inform => 1,
            Flow::Connect => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Flow::Inform),
            2 => Some(Flow::Connect),
            _ => None,
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "->" | "1" => Some(Flow::Inform),
            "<->" | "2" => Some(Flow::Connect),
            t if t.eq_ignore_ascii_case("inform") => Some(Flow::Inform),
            t if t.eq_ignore_ascii_case("connect") => Some(Flow::Connect),
            _ => None,
        }
    }

    pub fn is_directed(self) -> bool {
        self == Flow::Inform
    }
}

impl TryFrom<RawCode> for Flow {
    type Error = String;

    fn try_from(raw: RawCode) -> Result<Self, Self::Error> {
        match raw {
            RawCode::Int(code) => {
                Flow::from_code(code).ok_or_else(|| format!("unknown flow code {code}"))
            }
            RawCode::Text(text) => {
                Flow::parse(&text).ok_or_else(|| format!("unknown flow {text:?}"))
            }
        }
    }
}

impl Serialize for Flow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Flow::Inform => "inform",
            Flow::Connect => "connect",
        })
    }
}

/// Maturity of the evidence behind a link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawCode")]
pub enum LinkType {
    /// Tooled: a working pipeline exists.
    Done,
    /// Evidenced in the literature but without tools.
    #[default]
    Todo,
    /// Speculative.
    Maybe,
}

impl LinkType {
    pub const ALL: [LinkType; 3] = [LinkType::Done, LinkType::Todo, LinkType::Maybe];

    pub fn as_str(self) -> &'static str {
        match self {
            LinkType::Done => "DONE",
            LinkType::Todo => "TODO",
            LinkType::Maybe => "MAYBE",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        LinkType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(text))
            .or_else(|| text.parse::<i64>().ok().and_then(LinkType::from_code))
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(LinkType::Done),
            2 => Some(LinkType::Todo),
            3 => Some(LinkType::Maybe),
            _ => None,
        }
    }
}

impl TryFrom<RawCode> for LinkType {
    type Error = String;

    fn try_from(raw: RawCode) -> Result<Self, Self::Error> {
        match raw {
            RawCode::Int(code) => {
                LinkType::from_code(code).ok_or_else(|| format!("unknown link type code {code}"))
            }
            RawCode::Text(text) => {
                LinkType::parse(&text).ok_or_else(|| format!("unknown link type {text:?}"))
            }
        }
    }
}

impl Serialize for LinkType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bitmask of the pilot projects a link applies to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Pilot(u32);

impl Pilot {
    pub const NONE: Pilot = Pilot(0);
    pub const PILOT_1: Pilot = Pilot(1);
    pub const PILOT_2: Pilot = Pilot(2);
    pub const PILOT_3: Pilot = Pilot(4);

    /// Named flags, in bit order.
    pub const NAMED: [(&'static str, Pilot); 3] = [
        ("pilot1", Pilot::PILOT_1),
        ("pilot2", Pilot::PILOT_2),
        ("pilot3", Pilot::PILOT_3),
    ];

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Pilot) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: Pilot) -> bool {
        self.0 & other.0 != 0
    }

    /// Parses either a decimal bitmask (`"3"`) or flag names joined by `|`, `,` or spaces
    /// (`"pilot1|pilot2"`).
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Some(Pilot::NONE);
        }
        if let Ok(bits) = text.parse::<u32>() {
            return Some(Pilot(bits));
        }
        let mut out = Pilot::NONE;
        for part in text
            .split(|c: char| c == '|' || c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
        {
            let (_, flag) = Pilot::NAMED
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(part))?;
            out = out | *flag;
        }
        Some(out)
    }

    pub fn names(self) -> Vec<&'static str> {
        Pilot::NAMED
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect()
    }
}

impl std::ops::BitOr for Pilot {
    type Output = Pilot;

    fn bitor(self, rhs: Pilot) -> Pilot {
        Pilot(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Pilot {
    fn bitor_assign(&mut self, rhs: Pilot) {
        self.0 |= rhs.0;
    }
}

/// A citation or URL reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHyperLink")]
pub struct HyperLink {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawHyperLink {
    Bare(String),
    Full {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        link: Option<String>,
    },
}

impl TryFrom<RawHyperLink> for HyperLink {
    type Error = &'static str;

    fn try_from(raw: RawHyperLink) -> Result<Self, Self::Error> {
        match raw {
            RawHyperLink::Bare(url) => Ok(HyperLink::new(url)),
            RawHyperLink::Full { text, link } => match (text, link) {
                (Some(text), link) => Ok(HyperLink { text, link }),
                (None, Some(link)) => Ok(HyperLink::new(link)),
                (None, None) => Err("hyperlink needs `text` or `link`"),
            },
        }
    }
}

impl HyperLink {
    /// A hyperlink whose text is its URL.
    pub fn new(link: impl Into<String>) -> Self {
        let link = link.into();
        Self {
            text: link.clone(),
            link: Some(link),
        }
    }

    pub fn with_text(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
        }
    }

    /// A citation without a URL.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
        }
    }
}

/// Position and visual extent of a node. Owned by layout, never by graph bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeGeometry {
    pub x: f64,
    pub y: f64,
    pub rx: f64,
    pub ry: f64,
    /// Pinned by a drag or by programmatic placement.
    pub fixed: bool,
}

impl Default for NodeGeometry {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rx: DEFAULT_RX,
            ry: DEFAULT_RY,
            fixed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(skip)]
    pub(crate) id: NodeId,
    pub(crate) name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub geometry: NodeGeometry,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String) -> Self {
        Self {
            id,
            name,
            description: None,
            geometry: NodeGeometry::default(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Mergeable for Node {
    fn carry_over(&self, merged: &mut Self) {
        merged.id = self.id;
    }
}

fn initial_weight() -> u32 {
    1
}

/// A documented workflow between two nodes.
///
/// `weight` is maintained by [`Graph`](crate::Graph): it is the number of links sharing this
/// link's unordered endpoint pair and cannot be set by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub flow: Flow,
    #[serde(rename = "type", default)]
    pub kind: LinkType,
    #[serde(default)]
    pub pilot: Pilot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub reference: Vec<HyperLink>,
    #[serde(default)]
    pub tools: Vec<HyperLink>,
    #[serde(default)]
    pub links: Vec<HyperLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip, default = "initial_weight")]
    weight: u32,
}

impl Link {
    pub fn new(source: NodeId, target: NodeId, flow: Flow) -> Self {
        Self {
            source,
            target,
            flow,
            kind: LinkType::default(),
            pilot: Pilot::NONE,
            description: None,
            reference: Vec::new(),
            tools: Vec::new(),
            links: Vec::new(),
            notes: None,
            weight: initial_weight(),
        }
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub(crate) fn set_weight(&mut self, weight: u32) {
        self.weight = weight;
    }

    pub fn pair_ids(&self) -> PairIds {
        PairIds::of(self.source, self.target)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

impl Mergeable for Link {
    fn carry_over(&self, merged: &mut Self) {
        merged.weight = self.weight;
    }
}
