//! Reference graph over token ids
//!
//! One graph per layer view: the base layer alone, or a theme merged over it.
//! Edges run from the referring token to its target.

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

/// Directed reference graph for one layer view
#[derive(Debug, Clone, Default)]
pub(crate) struct ReferenceGraph {
    inner: DiGraphMap<usize, ()>,
}

impl ReferenceGraph {
    /// Graph with nodes `0..count` and no edges
    pub(crate) fn with_nodes(count: usize) -> Self {
        let mut inner = DiGraphMap::with_capacity(count, count);
        for id in 0..count {
            inner.add_node(id);
        }
        Self { inner }
    }

    /// `from` references `to`
    pub(crate) fn add_reference(&mut self, from: usize, to: usize) {
        self.inner.add_edge(from, to, ());
    }

    /// Direct reference target of `id`, if any
    pub(crate) fn target(&self, id: usize) -> Option<usize> {
        self.inner
            .neighbors_directed(id, Direction::Outgoing)
            .next()
    }

    /// Tokens whose value references `id` directly, ascending
    pub(crate) fn dependents(&self, id: usize) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .inner
            .neighbors_directed(id, Direction::Incoming)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Find a cycle, if any
    ///
    /// Returns the closed path (`[a, b, a]`) starting at the smallest id of
    /// the lowest-numbered cyclic component. Each token has at most one
    /// outgoing edge, so the walk from that id is unique.
    pub(crate) fn find_cycle(&self) -> Option<Vec<usize>> {
        let start = tarjan_scc(&self.inner)
            .into_iter()
            .filter(|scc| scc.len() > 1 || scc.iter().any(|&n| self.inner.contains_edge(n, n)))
            .filter_map(|scc| scc.into_iter().min())
            .min()?;

        let mut path = vec![start];
        let mut current = start;
        while let Some(next) = self.target(current) {
            path.push(next);
            if next == start || path.len() > self.inner.node_count() {
                break;
            }
            current = next;
        }
        Some(path)
    }

    /// Ids ordered so every target precedes the tokens referencing it
    ///
    /// `None` when the graph is cyclic.
    pub(crate) fn resolution_order(&self) -> Option<Vec<usize>> {
        let mut order = toposort(&self.inner, None).ok()?;
        order.reverse();
        Some(order)
    }

    /// Longest reference chain (in hops) starting at each id
    ///
    /// `None` when the graph is cyclic.
    pub(crate) fn chain_lengths(&self) -> Option<Vec<usize>> {
        let order = self.resolution_order()?;
        let mut lengths = vec![0usize; self.inner.node_count()];
        for id in order {
            if let Some(target) = self.target(id) {
                lengths[id] = lengths[target] + 1;
            }
        }
        Some(lengths)
    }

    /// Number of reference edges
    pub(crate) fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }
}
