use crate::{
    error::FlowError,
    flow::Flow,
    network::{FlowAlgorithm, FlowNetwork},
};

/// Bipartite graph with edges going from the left part to the right part.
///
/// Both parts are indexed from 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BipartiteGraph {
    left_count: usize,
    right_count: usize,
    adj_list: Vec<Vec<usize>>,
}

impl BipartiteGraph {
    pub fn new(left_count: usize, right_count: usize) -> Self {
        Self {
            left_count,
            right_count,
            adj_list: vec![vec![]; left_count],
        }
    }

    pub fn add_edge(&mut self, left: usize, right: usize) -> Result<(), FlowError> {
        if left >= self.left_count || right >= self.right_count {
            return Err(FlowError::BipartiteEdgeOutOfRange {
                left,
                right,
                left_count: self.left_count,
                right_count: self.right_count,
            });
        }
        if !self.adj_list[left].contains(&right) {
            self.adj_list[left].push(right);
        }
        Ok(())
    }

    pub fn left_count(&self) -> usize {
        self.left_count
    }

    pub fn right_count(&self) -> usize {
        self.right_count
    }

    pub fn edges_count(&self) -> usize {
        self.adj_list.iter().map(|edges| edges.len()).sum()
    }

    pub fn neighbors(&self, left: usize) -> &[usize] {
        &self.adj_list[left]
    }

    /// Super-source `0`, left vertices `1..=L`, right vertices
    /// `L + 1..=L + R`, super-sink `L + R + 1`, all edges of capacity 1.
    pub fn to_flow_network(&self) -> FlowNetwork {
        let sink = self.left_count + self.right_count + 1;
        let mut adj_list: Vec<Vec<(usize, u64)>> = vec![vec![]; sink + 1];

        for left in 0..self.left_count {
            adj_list[0].push((self.left_vertex(left), 1));
            for &right in &self.adj_list[left] {
                adj_list[self.left_vertex(left)].push((self.right_vertex(right), 1));
            }
        }
        for right in 0..self.right_count {
            adj_list[self.right_vertex(right)].push((sink, 1));
        }

        match FlowNetwork::from_graph(adj_list.as_slice(), 0, sink) {
            Ok(network) => network,
            Err(err) => unreachable!("invalid bipartite reduction: {}", err),
        }
    }

    fn left_vertex(&self, left: usize) -> usize {
        left + 1
    }

    fn right_vertex(&self, right: usize) -> usize {
        self.left_count + 1 + right
    }

    fn matched_pairs(&self, flow: &Flow) -> Vec<(usize, usize)> {
        let mut pairs = vec![];
        for left in 0..self.left_count {
            for &right in &self.adj_list[left] {
                if flow.get(self.left_vertex(left), self.right_vertex(right)) > 0 {
                    pairs.push((left, right));
                }
            }
        }
        pairs
    }
}

/// Size of a maximum matching, computed as a maximum flow.
///
/// Returns the size and the iteration count of the chosen engine.
pub fn compute_max_bipartite_matching_size(
    graph: &BipartiteGraph,
    algorithm: FlowAlgorithm,
) -> (usize, usize) {
    let network = graph.to_flow_network();
    let (flow, iterations) = network.compute_max_flow(algorithm);
    (flow.out_flow(network.source()) as usize, iterations)
}

/// Matched `(left, right)` pairs of a maximum matching.
pub fn compute_max_bipartite_matching(
    graph: &BipartiteGraph,
    algorithm: FlowAlgorithm,
) -> Vec<(usize, usize)> {
    let network = graph.to_flow_network();
    let (flow, _) = network.compute_max_flow(algorithm);
    graph.matched_pairs(&flow)
}
