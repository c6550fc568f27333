use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::{
    dinic::compute_max_flow_dinitz, edmonds_karp::compute_max_flow_edmonds_karp, error::FlowError,
    flow::Flow, residual::ResidualGraph, verify,
};

pub trait FlowGraph {
    fn get_node_count(&self) -> usize;
    // Target + edge capacity
    fn get_node_adj_list(&self, node: usize) -> impl Iterator<Item = (usize, u64)>;

    fn get_capacity(&self, source: usize, target: usize) -> u64 {
        self.get_node_adj_list(source)
            .find_map(|(k, v)| if k == target { Some(v) } else { None })
            .unwrap_or(0)
    }
}

impl FlowGraph for [FxHashMap<usize, u64>] {
    fn get_node_count(&self) -> usize {
        self.len()
    }

    fn get_node_adj_list(&self, node: usize) -> impl Iterator<Item = (usize, u64)> {
        self[node].iter().map(|(k, v)| (*k, *v))
    }

    fn get_capacity(&self, source: usize, target: usize) -> u64 {
        self[source].get(&target).copied().unwrap_or(0)
    }
}

impl FlowGraph for [Vec<(usize, u64)>] {
    fn get_node_count(&self) -> usize {
        self.len()
    }

    fn get_node_adj_list(&self, node: usize) -> impl Iterator<Item = (usize, u64)> {
        self[node].iter().copied()
    }
}

/// Order in which the engines pick among equally good neighbors.
///
/// Only the decomposition of the flow into paths depends on it, never the
/// flow value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Hash-map iteration order.
    #[default]
    Arbitrary,
    LowestIndex,
    HighestIndex,
}

impl TieBreak {
    pub fn pick(self, mut candidates: impl Iterator<Item = usize>) -> Option<usize> {
        match self {
            TieBreak::Arbitrary => candidates.next(),
            TieBreak::LowestIndex => candidates.min(),
            TieBreak::HighestIndex => candidates.max(),
        }
    }

    /// Sorts a neighbor list in place according to the rule.
    pub fn order(self, neighbors: &mut [(usize, u64)]) {
        match self {
            TieBreak::Arbitrary => {}
            TieBreak::LowestIndex => neighbors.sort_unstable_by_key(|(v, _)| *v),
            TieBreak::HighestIndex => {
                neighbors.sort_unstable_by_key(|(v, _)| std::cmp::Reverse(*v))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowAlgorithm {
    Dinitz,
    EdmondsKarp,
}

impl FromStr for FlowAlgorithm {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dinitz" | "dinic" => Ok(FlowAlgorithm::Dinitz),
            "edmonds-karp" | "edmonds_karp" | "ek" => Ok(FlowAlgorithm::EdmondsKarp),
            _ => Err(FlowError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A capacitated network with a designated source and sink.
#[derive(Clone, Debug)]
pub struct FlowNetwork {
    adj_list: Vec<FxHashMap<usize, u64>>,
    source: usize,
    dest: usize,
    tie_break: TieBreak,
}

impl FlowNetwork {
    /// Creates a network without edges; see [`FlowNetwork::add_edge`].
    pub fn new(num_vertices: usize, source: usize, dest: usize) -> Result<Self, FlowError> {
        for vertex in [source, dest] {
            if vertex >= num_vertices {
                return Err(FlowError::VertexOutOfRange {
                    vertex,
                    num_vertices,
                });
            }
        }
        if source == dest {
            return Err(FlowError::SourceIsSink(source));
        }

        Ok(Self {
            adj_list: vec![FxHashMap::default(); num_vertices],
            source,
            dest,
            tie_break: TieBreak::default(),
        })
    }

    /// Copies the positive capacities of any adjacency representation.
    pub fn from_graph<F: FlowGraph + ?Sized>(
        graph: &F,
        source: usize,
        dest: usize,
    ) -> Result<Self, FlowError> {
        let mut network = Self::new(graph.get_node_count(), source, dest)?;
        for node in 0..graph.get_node_count() {
            for (target, capacity) in graph.get_node_adj_list(node) {
                network.add_edge(node, target, capacity)?;
            }
        }
        Ok(network)
    }

    /// Dense constructor: `matrix[u][v]` is the capacity of `u -> v`.
    pub fn from_capacity_matrix(
        num_vertices: usize,
        matrix: &[Vec<u64>],
        source: usize,
        dest: usize,
    ) -> Result<Self, FlowError> {
        if matrix.len() != num_vertices {
            return Err(FlowError::MatrixRowCount {
                expected: num_vertices,
                rows: matrix.len(),
            });
        }
        if let Some((row, line)) = matrix
            .iter()
            .enumerate()
            .find(|(_, line)| line.len() != num_vertices)
        {
            return Err(FlowError::MatrixRowLength {
                row,
                len: line.len(),
                expected: num_vertices,
            });
        }

        let mut network = Self::new(num_vertices, source, dest)?;
        for (node, line) in matrix.iter().enumerate() {
            for (target, &capacity) in line.iter().enumerate() {
                network.add_edge(node, target, capacity)?;
            }
        }
        Ok(network)
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Sets the capacity of `node -> target`. Zero capacities are not stored.
    pub fn add_edge(&mut self, node: usize, target: usize, capacity: u64) -> Result<(), FlowError> {
        let num_vertices = self.adj_list.len();
        for vertex in [node, target] {
            if vertex >= num_vertices {
                return Err(FlowError::VertexOutOfRange {
                    vertex,
                    num_vertices,
                });
            }
        }
        if capacity == 0 {
            self.adj_list[node].remove(&target);
            return Ok(());
        }
        if node == target {
            return Err(FlowError::SelfLoop(node));
        }
        self.adj_list[node].insert(target, capacity);
        Ok(())
    }

    pub fn num_vertices(&self) -> usize {
        self.adj_list.len()
    }

    pub fn num_edges(&self) -> usize {
        self.adj_list.iter().map(|edges| edges.len()).sum()
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn dest(&self) -> usize {
        self.dest
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn adj_list(&self) -> &[FxHashMap<usize, u64>] {
        &self.adj_list
    }

    pub fn capacity(&self, node: usize, target: usize) -> u64 {
        self.adj_list.get_capacity(node, target)
    }

    pub fn compute_max_flow_dinitz(&self) -> (Flow, usize) {
        compute_max_flow_dinitz(self)
    }

    pub fn compute_max_flow_edmonds_karp(&self) -> (Flow, usize) {
        compute_max_flow_edmonds_karp(self)
    }

    pub fn compute_max_flow(&self, algorithm: FlowAlgorithm) -> (Flow, usize) {
        match algorithm {
            FlowAlgorithm::Dinitz => self.compute_max_flow_dinitz(),
            FlowAlgorithm::EdmondsKarp => self.compute_max_flow_edmonds_karp(),
        }
    }

    pub fn is_flow_feasible(&self, flow: &Flow) -> bool {
        verify::is_flow_feasible(self, flow)
    }

    /// Edges of a minimum cut, given a maximum flow of this network.
    ///
    /// The cut separates the vertices still reachable from the source in
    /// the residual graph from the others.
    pub fn compute_min_cut(&self, flow: &Flow) -> Vec<(usize, usize)> {
        let mut residual = ResidualGraph::build(self.adj_list());
        residual.apply_flow(flow);
        let reachable = residual.reachable_from(self.source);

        let mut min_cut = vec![];
        for (node, edges) in self.adj_list.iter().enumerate() {
            if !reachable[node] {
                continue;
            }
            for (&target, &capacity) in edges.iter() {
                if capacity > 0 && !reachable[target] {
                    min_cut.push((node, target));
                }
            }
        }
        min_cut.sort_unstable();
        min_cut
    }
}

impl FlowGraph for FlowNetwork {
    fn get_node_count(&self) -> usize {
        self.adj_list.len()
    }

    fn get_node_adj_list(&self, node: usize) -> impl Iterator<Item = (usize, u64)> {
        self.adj_list.get_node_adj_list(node)
    }

    fn get_capacity(&self, source: usize, target: usize) -> u64 {
        self.adj_list.get_capacity(source, target)
    }
}
