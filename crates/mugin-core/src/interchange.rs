//! Bulk import (JSON documents, delimited link tables) and JSON export.

use crate::config::GraphConfig;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::model::{LinkType, Pilot};
use crate::record::{FlowSpec, GraphDocument, HyperLinkField, LinkRecord, NodeRecord, NodeRef};
use serde::Deserialize;
use std::io::Read;

/// Which part of an import a rejected record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Node,
    Link,
}

#[derive(Debug)]
pub struct Rejected {
    pub kind: RecordKind,
    /// Position of the record in its section of the input.
    pub position: usize,
    pub error: Error,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub nodes_added: usize,
    pub links_added: usize,
    pub rejected: Vec<Rejected>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    fn reject(&mut self, kind: RecordKind, position: usize, error: Error) {
        tracing::warn!(?kind, position, %error, "rejected record during import");
        self.rejected.push(Rejected {
            kind,
            position,
            error,
        });
    }
}

/// One row of a delimited link table. Column names follow the legacy spreadsheet
/// (`data1`/`data2`) or the JSON field names (`source`/`target`).
#[derive(Debug, Clone, Default, Deserialize)]
struct DelimitedRow {
    #[serde(default)]
    data1: Option<String>,
    #[serde(default)]
    data2: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    flow: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    tools: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    links: Option<String>,
    #[serde(default)]
    pilot: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Empty cells are absent; anything else must parse.
fn parse_field<T>(
    value: Option<String>,
    field: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    match non_empty(value) {
        Some(text) => parse(&text).map(Some).ok_or(Error::InvalidInput { field }),
        None => Ok(None),
    }
}

impl DelimitedRow {
    fn into_record(self) -> Result<LinkRecord> {
        let flow = parse_field(self.flow, "flow", FlowSpec::parse)?;
        let kind = parse_field(self.kind, "type", LinkType::parse)?;
        let pilot = parse_field(self.pilot, "pilot", Pilot::parse)?;
        Ok(LinkRecord {
            source: non_empty(self.data1.or(self.source)).map(NodeRef::ByName),
            target: non_empty(self.data2.or(self.target)).map(NodeRef::ByName),
            flow,
            kind,
            description: non_empty(self.description),
            reference: non_empty(self.reference).map(HyperLinkField::Text),
            tools: non_empty(self.tools).map(HyperLinkField::Text),
            notes: non_empty(self.notes),
            links: non_empty(self.links).map(HyperLinkField::Text),
            pilot,
        })
    }
}

impl Graph {
    /// Adds every node, then every link, of `document`. Records that fail are reported and
    /// skipped; the rest of the document is still imported.
    pub fn import_document(&mut self, document: GraphDocument) -> ImportReport {
        let mut report = ImportReport::default();

        for (position, record) in document.nodes.into_iter().enumerate() {
            let before = self.node_count();
            match self.add_node(record) {
                Ok(_) => report.nodes_added += self.node_count() - before,
                Err(error) => report.reject(RecordKind::Node, position, error),
            }
        }
        for (position, record) in document.links.into_iter().enumerate() {
            let before = self.node_count();
            match self.add_link(record) {
                Ok(_) => {
                    report.links_added += 1;
                    report.nodes_added += self.node_count() - before;
                }
                Err(error) => report.reject(RecordKind::Link, position, error),
            }
        }

        tracing::debug!(
            nodes = report.nodes_added,
            links = report.links_added,
            rejected = report.rejected.len(),
            "imported graph document"
        );
        report
    }

    /// Parses and imports a `{ "nodes": [...], "links": [...] }` document.
    pub fn import_json(&mut self, text: &str) -> Result<ImportReport> {
        let document: GraphDocument = serde_json::from_str(text)?;
        Ok(self.import_document(document))
    }

    /// Builds a fresh graph with the default [`GraphConfig`] from a JSON document.
    pub fn from_json(text: &str) -> Result<(Self, ImportReport)> {
        Self::from_json_with_config(text, GraphConfig::default())
    }

    /// Builds a fresh graph from a JSON document under `config`, e.g. to re-import a snapshot
    /// taken from a graph with a wider parallel-link cap.
    pub fn from_json_with_config(text: &str, config: GraphConfig) -> Result<(Self, ImportReport)> {
        let mut graph = Graph::with_config(config);
        let report = graph.import_json(text)?;
        Ok((graph, report))
    }

    /// Imports a delimited link table (one link per row, header row first). Nodes are created
    /// from endpoint names in the order they are first seen.
    pub fn import_delimited<R: Read>(&mut self, reader: R, delimiter: u8) -> Result<ImportReport> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut report = ImportReport::default();
        for (position, row) in rdr.deserialize::<DelimitedRow>().enumerate() {
            match row.map_err(Error::from).and_then(DelimitedRow::into_record) {
                Ok(record) => records.push((position, record)),
                Err(error) => report.reject(RecordKind::Link, position, error),
            }
        }

        for (position, record) in records {
            let before = self.node_count();
            match self.add_link(record) {
                Ok(_) => {
                    report.links_added += 1;
                    report.nodes_added += self.node_count() - before;
                }
                Err(error) => report.reject(RecordKind::Link, position, error),
            }
        }
        Ok(report)
    }

    /// The portable form of the graph: endpoints by name, derived and layout fields dropped.
    pub fn to_document(&self) -> GraphDocument {
        let nodes = self
            .nodes()
            .iter()
            .map(|n| NodeRecord {
                name: Some(n.name().to_string()),
                description: n.description.clone(),
                ..Default::default()
            })
            .collect();
        let links = self
            .links()
            .iter()
            .map(|l| LinkRecord {
                source: Some(NodeRef::ByName(self.node_label(l.source))),
                target: Some(NodeRef::ByName(self.node_label(l.target))),
                flow: Some(FlowSpec::Flow(l.flow)),
                kind: Some(l.kind),
                description: l.description.clone(),
                reference: Some(HyperLinkField::List(l.reference.clone())),
                tools: Some(HyperLinkField::List(l.tools.clone())),
                notes: l.notes.clone(),
                links: Some(HyperLinkField::List(l.links.clone())),
                pilot: Some(l.pilot),
            })
            .collect();
        GraphDocument { nodes, links }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_document())?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }
}
