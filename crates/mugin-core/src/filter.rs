//! Predicate-based link selection.
//!
//! Criteria form a conjunction of disjunctions: every top-level [`Criterion`] must hold, and an
//! [`Criterion::AnyOf`] group holds when any of its predicates does. This is enough to express
//! selections such as `(pilot == 1 OR pilot == 2) AND type == DONE`.

use crate::graph::Graph;
use crate::model::{Flow, Link, LinkType, NodeId, Pilot};

/// A test over `(link, index, all_links)`.
pub type LinkPredicate<'a> = Box<dyn Fn(&Link, usize, &[Link]) -> bool + 'a>;

pub enum Criterion<'a> {
    Predicate(LinkPredicate<'a>),
    AnyOf(Vec<LinkPredicate<'a>>),
}

impl<'a> Criterion<'a> {
    pub fn new(predicate: impl Fn(&Link, usize, &[Link]) -> bool + 'a) -> Self {
        Criterion::Predicate(Box::new(predicate))
    }

    pub fn any_of(predicates: impl IntoIterator<Item = LinkPredicate<'a>>) -> Self {
        Criterion::AnyOf(predicates.into_iter().collect())
    }

    /// `negate` flips each leaf predicate before the group is combined.
    fn holds(&self, link: &Link, index: usize, links: &[Link], negate: bool) -> bool {
        let leaf = |p: &LinkPredicate<'a>| p(link, index, links) != negate;
        match self {
            Criterion::Predicate(p) => leaf(p),
            Criterion::AnyOf(group) => group.iter().any(leaf),
        }
    }
}

impl<'a> From<LinkPredicate<'a>> for Criterion<'a> {
    fn from(predicate: LinkPredicate<'a>) -> Self {
        Criterion::Predicate(predicate)
    }
}

impl std::fmt::Debug for Criterion<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Criterion::Predicate(_) => f.write_str("Predicate(..)"),
            Criterion::AnyOf(group) => write!(f, "AnyOf({} predicates)", group.len()),
        }
    }
}

pub fn pilot_is(pilot: Pilot) -> LinkPredicate<'static> {
    Box::new(move |link: &Link, _: usize, _: &[Link]| link.pilot == pilot)
}

pub fn has_pilot(pilot: Pilot) -> LinkPredicate<'static> {
    Box::new(move |link: &Link, _: usize, _: &[Link]| link.pilot.intersects(pilot))
}

pub fn type_is(kind: LinkType) -> LinkPredicate<'static> {
    Box::new(move |link: &Link, _: usize, _: &[Link]| link.kind == kind)
}

pub fn flow_is(flow: Flow) -> LinkPredicate<'static> {
    Box::new(move |link: &Link, _: usize, _: &[Link]| link.flow == flow)
}

pub fn touches(node: NodeId) -> LinkPredicate<'static> {
    Box::new(move |link: &Link, _: usize, _: &[Link]| link.touches(node))
}

impl Graph {
    fn link_matches(&self, criteria: &[Criterion<'_>], negate: bool, index: usize) -> bool {
        let links = self.links();
        let link = &links[index];
        criteria
            .iter()
            .all(|c| c.holds(link, index, links, negate))
    }

    /// Calls `callback(link, index, matching)` for every link satisfying `criteria` and returns
    /// the matching indices. `index` is the link's position in the graph.
    pub fn filter_links<F>(
        &self,
        criteria: &[Criterion<'_>],
        negate: bool,
        mut callback: F,
    ) -> Vec<usize>
    where
        F: FnMut(&Link, usize, &[&Link]),
    {
        let selected: Vec<usize> = (0..self.link_count())
            .filter(|&i| self.link_matches(criteria, negate, i))
            .collect();
        let matching: Vec<&Link> = selected.iter().map(|&i| &self.links()[i]).collect();
        for (&index, link) in selected.iter().zip(&matching) {
            callback(link, index, &matching);
        }
        selected
    }

    /// One flag per link, in link order: whether it satisfies `criteria`.
    pub fn link_visibility(&self, criteria: &[Criterion<'_>], negate: bool) -> Vec<bool> {
        (0..self.link_count())
            .map(|i| self.link_matches(criteria, negate, i))
            .collect()
    }
}
