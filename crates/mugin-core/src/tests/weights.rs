use super::{assert_weights_consistent, sample_graph};
use crate::*;

#[test]
fn parallel_links_share_bucket_weight() {
    let g = sample_graph();
    let weights: Vec<u32> = g.links().iter().map(Link::weight).collect();
    assert_eq!(weights, [3, 3, 3, 1]);
    assert_eq!(g.bucket(1), [0, 1, 2]);
    assert_weights_consistent(&g);
}

#[test]
fn fourth_parallel_link_exceeds_default_cap() {
    let mut g = Graph::new();
    g.add_link(LinkRecord::between("A", "B")).unwrap();
    g.add_link(LinkRecord::between("B", "A")).unwrap();
    g.add_link(LinkRecord::between("A", "B").with_flow(Flow::Connect))
        .unwrap();
    let err = g
        .add_link(LinkRecord::between("B", "A").with_flow(Flow::Connect))
        .unwrap_err();
    assert!(matches!(err, Error::CapacityExceeded { max: 3, .. }));
    assert_eq!(g.link_count(), 3);
    assert_weights_consistent(&g);
}

#[test]
fn unbounded_config_accepts_wide_buckets() {
    let mut g = Graph::with_config(GraphConfig::unbounded());
    g.add_link(LinkRecord::between("A", "B")).unwrap();
    g.add_link(LinkRecord::between("B", "A")).unwrap();
    g.add_link(LinkRecord::between("A", "B").with_flow(Flow::Connect))
        .unwrap();
    g.add_link(LinkRecord::between("B", "A").with_flow(Flow::Connect))
        .unwrap();
    assert!(g.links().iter().all(|l| l.weight() == 4));
}

#[test]
fn deleting_a_parallel_link_rebalances_its_bucket() {
    let mut g = sample_graph();
    g.del_link(1).unwrap();
    let weights: Vec<u32> = g.links().iter().map(Link::weight).collect();
    assert_eq!(weights, [2, 2, 1]);
    assert_weights_consistent(&g);
}

#[test]
fn calculate_weights_reports_bucket_size() {
    let g = sample_graph();
    let a = g.node_by_name("A").unwrap().id();
    let c = g.node_by_name("C").unwrap().id();
    let link = Link::new(a, c, Flow::Inform);
    assert_eq!(g.calculate_weights(&link, false).unwrap(), 1);

    let removed = g.links()[3].clone();
    let dup = g.calculate_weights(&removed, false).unwrap_err();
    assert!(matches!(dup, Error::DuplicateEntity { .. }));
}

#[test]
fn calculate_weights_leaves_an_occupied_bucket_untouched() {
    let mut g = Graph::with_config(GraphConfig::unbounded());
    g.add_link(LinkRecord::between("A", "B")).unwrap();
    g.add_link(LinkRecord::between("B", "A")).unwrap();
    let a = g.node_by_name("A").unwrap().id();
    let b = g.node_by_name("B").unwrap().id();

    let planned = g.calculate_weights(&Link::new(a, b, Flow::Connect), false);
    assert_eq!(planned.unwrap(), 3);
    assert_eq!(g.link_count(), 2);
    assert!(g.links().iter().all(|l| l.weight() == 2));
    assert_weights_consistent(&g);

    let removed = g.links()[1].clone();
    assert_eq!(g.calculate_weights(&removed, true).unwrap(), 2);
    assert_weights_consistent(&g);
}

#[test]
fn self_loops_form_their_own_bucket() {
    let mut g = Graph::new();
    g.add_link(LinkRecord::between("A", "A")).unwrap();
    g.add_link(LinkRecord::between("A", "A").with_flow(Flow::Connect))
        .unwrap();
    g.add_link(LinkRecord::between("A", "B")).unwrap();
    let weights: Vec<u32> = g.links().iter().map(Link::weight).collect();
    assert_eq!(weights, [2, 2, 1]);
}

#[test]
fn weights_survive_a_mixed_edit_sequence() {
    let mut g = sample_graph();
    g.add_link(LinkRecord::between("C", "A")).unwrap();
    g.add_link(LinkRecord::between("A", "C").with_flow(Flow::Connect))
        .unwrap();
    assert_weights_consistent(&g);
    g.del_node("B").unwrap();
    assert_weights_consistent(&g);
    assert_eq!(g.link_count(), 2);
    assert!(g.links().iter().all(|l| l.weight() == 2));
}
