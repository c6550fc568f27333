use rustc_hash::FxHashMap;

use crate::{flow::Flow, network::FlowGraph};

/// Returns true if `dest` can be reached from `source` following only
/// edges with positive capacity.
pub fn has_path(adj_list: &[FxHashMap<usize, u64>], source: usize, dest: usize) -> bool {
    let mut visited = vec![false; adj_list.len()];
    let mut stack = vec![source];
    visited[source] = true;

    while let Some(node) = stack.pop() {
        for (&head, &weight) in adj_list[node].iter() {
            if weight > 0 && !visited[head] {
                if head == dest {
                    return true;
                }
                visited[head] = true;
                stack.push(head);
            }
        }
    }

    false
}

/// Remaining capacities of a network under the flow pushed so far.
///
/// Every edge of the input gets a reverse entry, initially 0, so that
/// return capacity is visible when iterating over a vertex's neighbors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResidualGraph {
    adj_list: Vec<FxHashMap<usize, u64>>,
}

impl ResidualGraph {
    pub fn build<F: FlowGraph + ?Sized>(flow_graph: &F) -> Self {
        let nodes_count = flow_graph.get_node_count();
        let mut adj_list: Vec<FxHashMap<usize, u64>> = vec![FxHashMap::default(); nodes_count];

        for node in 0..nodes_count {
            for (target, capacity) in flow_graph.get_node_adj_list(node) {
                if capacity == 0 {
                    continue;
                }
                let residual = adj_list[node].entry(target).or_default();
                *residual = residual.saturating_add(capacity);
                adj_list[target].entry(node).or_insert(0);
            }
        }

        Self { adj_list }
    }

    pub fn nodes_count(&self) -> usize {
        self.adj_list.len()
    }

    pub fn capacity(&self, node: usize, head: usize) -> u64 {
        self.adj_list[node].get(&head).copied().unwrap_or(0)
    }

    pub fn adj_list(&self) -> &[FxHashMap<usize, u64>] {
        &self.adj_list
    }

    /// Positive-capacity edges leaving `node`.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.adj_list[node]
            .iter()
            .filter_map(|(&head, &weight)| (weight > 0).then_some((head, weight)))
    }

    pub fn has_path(&self, source: usize, dest: usize) -> bool {
        has_path(&self.adj_list, source, dest)
    }

    /// Minimum residual capacity along `path`.
    pub fn bottleneck(&self, path: &[usize]) -> u64 {
        path.windows(2)
            .map(|edge| self.capacity(edge[0], edge[1]))
            .min()
            .unwrap_or(0)
    }

    fn push(&mut self, node: usize, next: usize, amount: u64) {
        let capacity = self.adj_list[node].entry(next).or_default();
        debug_assert!(
            *capacity >= amount,
            "pushing {} units over {} -> {} with residual {}",
            amount,
            node,
            next,
            capacity
        );
        *capacity -= amount;
        // Return capacity above u64::MAX could never be used by a flow
        let reverse = self.adj_list[next].entry(node).or_default();
        *reverse = reverse.saturating_add(amount);
    }

    /// Pushes `amount` along every edge of `path`.
    pub fn augment(&mut self, path: &[usize], amount: u64) {
        for edge in path.windows(2) {
            self.push(edge[0], edge[1], amount);
        }
    }

    /// Pushes every edge of a flow increment.
    pub fn apply_flow(&mut self, flow: &Flow) {
        for (node, head, amount) in flow.iter() {
            self.push(node, head, amount);
        }
    }

    pub fn reachable_from(&self, source: usize) -> Vec<bool> {
        let mut visited = vec![false; self.adj_list.len()];
        let mut stack = vec![source];
        while let Some(node) = stack.pop() {
            if visited[node] {
                continue;
            }
            visited[node] = true;
            for (head, _) in self.neighbors(node) {
                stack.push(head);
            }
        }
        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::FlowNetwork;

    fn diamond() -> FlowNetwork {
        let mut network = FlowNetwork::new(4, 0, 3).unwrap();
        network.add_edge(0, 1, 2).unwrap();
        network.add_edge(0, 2, 3).unwrap();
        network.add_edge(1, 3, 1).unwrap();
        network.add_edge(2, 3, 2).unwrap();
        network
    }

    #[test]
    fn fresh_residual_equals_capacities() {
        let network = diamond();
        let residual = ResidualGraph::build(&network);

        for node in 0..4 {
            for head in 0..4 {
                assert_eq!(residual.capacity(node, head), network.capacity(node, head));
            }
        }
        assert_eq!(residual.capacity(3, 1), 0);
        assert_eq!(residual.capacity(2, 0), 0);
        assert!(residual.adj_list()[3].contains_key(&2));
    }

    #[test]
    fn augment_moves_capacity_to_reverse_edges() {
        let network = diamond();
        let mut residual = ResidualGraph::build(&network);

        let path = [0, 2, 3];
        let amount = residual.bottleneck(&path);
        assert_eq!(amount, 2);
        residual.augment(&path, amount);

        assert_eq!(residual.capacity(0, 2), 1);
        assert_eq!(residual.capacity(2, 0), 2);
        assert_eq!(residual.capacity(2, 3), 0);
        assert_eq!(residual.capacity(3, 2), 2);
    }

    #[test]
    fn probe_stops_when_sink_is_cut_off() {
        let network = diamond();
        let mut residual = ResidualGraph::build(&network);
        assert!(residual.has_path(0, 3));

        residual.augment(&[0, 1, 3], 1);
        residual.augment(&[0, 2, 3], 2);
        assert!(!residual.has_path(0, 3));
        assert!(residual.has_path(3, 0));

        let reachable = residual.reachable_from(0);
        assert_eq!(reachable, vec![true, true, true, false]);
    }

    #[test]
    fn reverse_capacity_saturates() {
        let mut network = FlowNetwork::new(3, 0, 2).unwrap();
        network.add_edge(0, 1, u64::MAX).unwrap();
        network.add_edge(1, 0, 1).unwrap();
        network.add_edge(1, 2, u64::MAX).unwrap();

        let mut residual = ResidualGraph::build(&network);
        residual.augment(&[0, 1, 2], u64::MAX);
        assert_eq!(residual.capacity(0, 1), 0);
        assert_eq!(residual.capacity(1, 0), u64::MAX);
        assert_eq!(residual.capacity(2, 1), u64::MAX);
        assert!(!residual.has_path(0, 2));
    }
}
