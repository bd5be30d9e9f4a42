use crate::ids::{PAIR_KEY, node_pair_ids};
use crate::*;

#[test]
fn pair_ids_are_symmetric_in_undirected_form_only() {
    let ab = node_pair_ids(2, 7);
    let ba = node_pair_ids(7, 2);
    assert_eq!(ab.undirected, ba.undirected);
    assert_ne!(ab.directed, ba.directed);
    assert!(ab.same_bucket(&ba));
}

#[test]
fn pair_ids_pack_smaller_id_first() {
    let ids = node_pair_ids(7, 2);
    assert_eq!(ids.undirected, 2 * PAIR_KEY + 7);
    assert_eq!(ids.directed, 7 * PAIR_KEY + 2);
}

#[test]
fn pair_ids_do_not_collide_across_large_ids() {
    let a = node_pair_ids(1, u32::MAX);
    let b = node_pair_ids(2, 0);
    assert_ne!(a.undirected, b.undirected);
    assert_ne!(a.directed, b.directed);
}

#[test]
fn self_pair_has_equal_forms() {
    let ids = PairIds::of(NodeId::new(5), NodeId::new(5));
    assert_eq!(ids.undirected, ids.directed);
}
