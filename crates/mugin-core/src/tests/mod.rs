mod config;
mod ids;
mod interchange;
mod weights;

use crate::*;

/// `A -> B`, `B -> A`, `A <-> B`, `B -> C`: a full bucket plus a singleton.
fn sample_graph() -> Graph {
    let mut g = Graph::new();
    g.add_link(LinkRecord::between("A", "B")).unwrap();
    g.add_link(LinkRecord::between("B", "A")).unwrap();
    g.add_link(LinkRecord::between("A", "B").with_flow(Flow::Connect))
        .unwrap();
    g.add_link(LinkRecord::between("B", "C")).unwrap();
    g
}

/// Every link's weight equals the size of its bucket.
fn assert_weights_consistent(g: &Graph) {
    for (i, link) in g.links().iter().enumerate() {
        assert_eq!(
            link.weight() as usize,
            g.bucket(i).len(),
            "weight of link {i} disagrees with its bucket"
        );
    }
}
