use super::assert_weights_consistent;
use crate::*;
use serde_json::{Value, json};

const DOCUMENT: &str = r#"{
  "nodes": [
    { "name": "Genome", "description": "Assembled reference" },
    { "name": "Reads" }
  ],
  "links": [
    { "source": "Reads", "target": "Genome", "flow": "->", "tools": "bwa", "pilot": 1 },
    { "source": 0, "target": 1, "flow": 2, "reference": "Li 2009", "links": "https://doi.org/li" },
    { "source": "Variants", "target": "Genome", "flow": -1, "type": "MAYBE" }
  ]
}"#;

#[test]
fn from_json_resolves_names_indices_and_reversals() {
    let (g, report) = Graph::from_json(DOCUMENT).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.nodes_added, 3);
    assert_eq!(report.links_added, 3);

    let names: Vec<&str> = g.nodes().iter().map(Node::name).collect();
    assert_eq!(names, ["Genome", "Reads", "Variants"]);
    assert_eq!(
        g.node(0).unwrap().description.as_deref(),
        Some("Assembled reference")
    );

    let first = g.link(0).unwrap();
    assert_eq!(first.kind, LinkType::Done);
    assert_eq!(first.pilot, Pilot::PILOT_1);
    assert_eq!(first.weight(), 2);

    let second = g.link(1).unwrap();
    assert_eq!(second.flow, Flow::Connect);
    assert_eq!(g.node_label(second.source), "Genome");
    assert_eq!(
        second.reference,
        [HyperLink::with_text("Li 2009", "https://doi.org/li")]
    );

    let third = g.link(2).unwrap();
    assert_eq!(g.node_label(third.source), "Genome");
    assert_eq!(g.node_label(third.target), "Variants");
    assert_eq!(third.kind, LinkType::Maybe);
    assert_weights_consistent(&g);
}

#[test]
fn import_is_lenient_and_reports_rejections() {
    let mut g = Graph::new();
    let report = g
        .import_json(
            r#"{
              "nodes": [{ "name": "" }, { "name": "A" }],
              "links": [
                { "source": "A", "target": "B" },
                { "source": "A" },
                { "source": "A", "target": "B" },
                { "source": "B", "target": "C" }
              ]
            }"#,
        )
        .unwrap();
    assert!(!report.is_clean());
    assert_eq!(report.links_added, 2);
    assert_eq!(report.nodes_added, 3);

    let rejected: Vec<(RecordKind, usize, bool)> = report
        .rejected
        .iter()
        .map(|r| (r.kind, r.position, r.error.is_conflict()))
        .collect();
    assert_eq!(
        rejected,
        [
            (RecordKind::Node, 0, false),
            (RecordKind::Link, 1, false),
            (RecordKind::Link, 2, true),
        ]
    );
}

#[test]
fn malformed_json_is_an_error() {
    let mut g = Graph::new();
    assert!(matches!(g.import_json("{ nodes: "), Err(Error::Json(_))));
    assert!(matches!(
        g.import_json(r#"{ "links": [{ "source": "A", "target": "B", "flow": 7 }] }"#),
        Err(Error::Json(_))
    ));
    assert!(g.is_empty());
}

#[test]
fn export_round_trips_through_json() {
    let (g, _) = Graph::from_json(DOCUMENT).unwrap();
    let text = g.to_json().unwrap();
    let (again, report) = Graph::from_json(&text).unwrap();
    assert!(report.is_clean());
    assert_eq!(again.to_document(), g.to_document());
    assert_eq!(again.links(), g.links());
}

#[test]
fn reimport_keeps_wide_buckets_under_the_same_config() {
    let mut g = Graph::with_config(GraphConfig::unbounded());
    g.add_link(LinkRecord::between("A", "B")).unwrap();
    g.add_link(LinkRecord::between("B", "A")).unwrap();
    g.add_link(LinkRecord::between("A", "B").with_flow(Flow::Connect))
        .unwrap();
    g.add_link(LinkRecord::between("B", "A").with_flow(Flow::Connect))
        .unwrap();
    let text = g.to_json().unwrap();

    let (again, report) = Graph::from_json_with_config(&text, GraphConfig::unbounded()).unwrap();
    assert!(report.is_clean());
    assert_eq!(again.config(), g.config());
    assert_eq!(again.links(), g.links());
    assert_weights_consistent(&again);

    let (capped, report) = Graph::from_json(&text).unwrap();
    assert_eq!(capped.link_count(), 3);
    assert_eq!(report.rejected.len(), 1);
    assert_weights_consistent(&capped);
}

#[test]
fn export_uses_names_and_wire_codes() {
    let (g, _) = Graph::from_json(DOCUMENT).unwrap();
    let value: Value = serde_json::from_str(&g.to_json_pretty().unwrap()).unwrap();
    assert_eq!(
        value["links"][0],
        json!({
            "source": "Reads",
            "target": "Genome",
            "flow": 1,
            "type": "DONE",
            "reference": [],
            "tools": [{ "text": "bwa", "link": "bwa" }],
            "links": [],
            "pilot": 1
        })
    );
    assert_eq!(value["links"][1]["flow"], json!(2));
    assert_eq!(value["nodes"][2], json!({ "name": "Variants" }));
}

#[test]
fn delimited_table_imports_like_the_spreadsheet() {
    let table = "\
data1\tdata2\tflow\ttype\treference\ttools\tlinks\tpilot
Reads\tAlignment\t->\t\tLi 2009\tbwa; bowtie\thttps://doi.org/li\tpilot1
Variants\tAlignment\t<-\t\tXXX\t\t\t
Alignment\tVariants\t<->\tTODO\t\t\t\t3
Variants\tPhenotype\t?\t\t\t\t\t
";
    let mut g = Graph::new();
    let report = g.import_delimited(table.as_bytes(), b'\t').unwrap();
    assert_eq!(report.links_added, 3);
    assert_eq!(report.nodes_added, 3);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].position, 3);
    assert!(matches!(
        report.rejected[0].error,
        Error::InvalidInput { field: "flow" }
    ));

    let aligned = g.link(0).unwrap();
    assert_eq!(aligned.kind, LinkType::Done);
    assert_eq!(aligned.tools.len(), 2);
    assert_eq!(aligned.pilot, Pilot::PILOT_1);
    assert_eq!(
        aligned.reference,
        [HyperLink::with_text("Li 2009", "https://doi.org/li")]
    );

    let reversed = g.link(1).unwrap();
    assert_eq!(g.node_label(reversed.source), "Alignment");
    assert_eq!(g.node_label(reversed.target), "Variants");
    assert_eq!(reversed.kind, LinkType::Maybe);

    let both = g.link(2).unwrap();
    assert_eq!(both.flow, Flow::Connect);
    assert_eq!(both.pilot, Pilot::PILOT_1 | Pilot::PILOT_2);
    assert_eq!(both.weight(), 2);
    assert_weights_consistent(&g);
}

#[test]
fn delimited_table_accepts_json_column_names() {
    let table = "source,target,description\nA,B,first\nB,C,\n";
    let mut g = Graph::new();
    let report = g.import_delimited(table.as_bytes(), b',').unwrap();
    assert!(report.is_clean());
    assert_eq!(g.link(0).unwrap().description.as_deref(), Some("first"));
    assert_eq!(g.link(1).unwrap().description, None);
}
