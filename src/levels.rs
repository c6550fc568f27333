use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::residual::{has_path, ResidualGraph};

/// BFS distance from `source` over positive-residual edges, `None` for
/// unreached vertices.
pub fn build_levels(residual: &ResidualGraph, source: usize) -> Vec<Option<usize>> {
    let mut level = vec![None; residual.nodes_count()];
    let mut queue = VecDeque::new();
    level[source] = Some(0);
    queue.push_back((source, 0));

    while let Some((node, depth)) = queue.pop_front() {
        for (head, _) in residual.neighbors(node) {
            if level[head].is_none() {
                level[head] = Some(depth + 1);
                queue.push_back((head, depth + 1));
            }
        }
    }

    level
}

/// Layered subgraph of a residual graph used by one blocking-flow phase.
///
/// Only edges going exactly one level deeper are kept. `incoming` indexes
/// the same edges by head, so that a dead-end vertex can be cut off from
/// all of its predecessors without scanning the whole graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvancingGraph {
    outgoing: Vec<FxHashMap<usize, u64>>,
    incoming: Vec<FxHashSet<usize>>,
}

impl AdvancingGraph {
    pub fn build(residual: &ResidualGraph, level: &[Option<usize>]) -> Self {
        let nodes_count = residual.nodes_count();
        let mut outgoing = vec![FxHashMap::default(); nodes_count];
        let mut incoming = vec![FxHashSet::default(); nodes_count];

        for node in 0..nodes_count {
            let Some(node_level) = level[node] else {
                continue;
            };
            for (head, capacity) in residual.neighbors(node) {
                if level[head] == Some(node_level + 1) {
                    outgoing[node].insert(head, capacity);
                    incoming[head].insert(node);
                }
            }
        }

        Self { outgoing, incoming }
    }

    pub fn nodes_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn capacity(&self, node: usize, head: usize) -> u64 {
        self.outgoing[node].get(&head).copied().unwrap_or(0)
    }

    pub fn outgoing(&self) -> &[FxHashMap<usize, u64>] {
        &self.outgoing
    }

    pub fn out_neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.outgoing[node].keys().copied()
    }

    pub fn has_out_edges(&self, node: usize) -> bool {
        !self.outgoing[node].is_empty()
    }

    pub fn edges_count(&self) -> usize {
        self.outgoing.iter().map(|edges| edges.len()).sum()
    }

    pub fn has_path(&self, source: usize, dest: usize) -> bool {
        has_path(&self.outgoing, source, dest)
    }

    /// Consumes `amount` units of capacity on `node -> head`.
    ///
    /// Returns true when the edge got saturated and was removed.
    pub fn consume(&mut self, node: usize, head: usize, amount: u64) -> bool {
        let Some(capacity) = self.outgoing[node].get_mut(&head) else {
            return false;
        };
        debug_assert!(*capacity >= amount);
        *capacity -= amount;
        if *capacity == 0 {
            self.remove_edge(node, head);
            return true;
        }
        false
    }

    pub fn remove_edge(&mut self, node: usize, head: usize) {
        self.outgoing[node].remove(&head);
        self.incoming[head].remove(&node);
    }

    /// Drops every advancing edge entering `node`.
    pub fn disconnect_incoming(&mut self, node: usize) {
        for pred in std::mem::take(&mut self.incoming[node]) {
            self.outgoing[pred].remove(&node);
        }
    }
}
