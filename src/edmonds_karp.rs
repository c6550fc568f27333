use std::collections::VecDeque;

use crate::{
    flow::Flow,
    network::{FlowNetwork, TieBreak},
    residual::ResidualGraph,
};

/// BFS from `source`, stopping at the first discovery of `dest`.
///
/// Returns a minimum-hop path from `source` to `dest`, or `None` when the
/// sink is unreachable.
pub fn find_shortest_path(
    residual: &ResidualGraph,
    source: usize,
    dest: usize,
    tie_break: TieBreak,
) -> Option<Vec<usize>> {
    let mut parent = vec![None; residual.nodes_count()];
    let mut visited = vec![false; residual.nodes_count()];
    let mut queue = VecDeque::new();
    let mut neighbors = vec![];

    visited[source] = true;
    queue.push_back(source);

    'outer: while let Some(node) = queue.pop_front() {
        neighbors.clear();
        neighbors.extend(residual.neighbors(node));
        tie_break.order(&mut neighbors);

        for &(head, _) in neighbors.iter() {
            if visited[head] {
                continue;
            }
            visited[head] = true;
            parent[head] = Some(node);
            if head == dest {
                break 'outer;
            }
            queue.push_back(head);
        }
    }

    if !visited[dest] {
        return None;
    }

    let mut path = vec![dest];
    let mut current = dest;
    while let Some(prev) = parent[current] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    Some(path)
}

/// Shortest augmenting path max-flow.
///
/// Returns the flow and the number of augmenting paths used.
pub fn compute_max_flow_edmonds_karp(network: &FlowNetwork) -> (Flow, usize) {
    let (source, dest) = (network.source(), network.dest());
    let mut residual = ResidualGraph::build(network);
    let mut flow = Flow::new(network.num_vertices());
    let mut iterations = 0;

    while residual.has_path(source, dest) {
        let Some(path) = find_shortest_path(&residual, source, dest, network.tie_break()) else {
            break;
        };

        let bottleneck = residual.bottleneck(&path);
        log::trace!("Augmenting path {:?} with {}", path, bottleneck);

        residual.augment(&path, bottleneck);
        for edge in path.windows(2) {
            flow.push(edge[0], edge[1], bottleneck);
        }
        iterations += 1;
    }

    log::debug!(
        "Edmonds-Karp: flow {} after {} augmenting paths",
        flow.value(source),
        iterations
    );
    (flow, iterations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_path_prefers_fewer_hops() {
        let mut network = FlowNetwork::new(5, 0, 4).unwrap();
        network.add_edge(0, 1, 5).unwrap();
        network.add_edge(1, 2, 5).unwrap();
        network.add_edge(2, 4, 5).unwrap();
        network.add_edge(0, 3, 1).unwrap();
        network.add_edge(3, 4, 1).unwrap();

        let residual = ResidualGraph::build(&network);
        let path = find_shortest_path(&residual, 0, 4, TieBreak::Arbitrary).unwrap();
        assert_eq!(path, vec![0, 3, 4]);
    }

    #[test]
    fn no_path_to_isolated_sink() {
        let mut network = FlowNetwork::new(3, 0, 2).unwrap();
        network.add_edge(0, 1, 3).unwrap();

        let residual = ResidualGraph::build(&network);
        assert_eq!(find_shortest_path(&residual, 0, 2, TieBreak::LowestIndex), None);

        let (flow, iterations) = network.compute_max_flow_edmonds_karp();
        assert_eq!(flow.value(0), 0);
        assert_eq!(iterations, 0);
    }

    #[test]
    fn cancels_flow_through_reverse_edges() {
        // The unique shortest path 0-1-2-3 is not part of the maximum flow:
        // the second path has to undo 1 -> 2 through its reverse edge.
        let mut network = FlowNetwork::new(8, 0, 3).unwrap();
        for (u, v) in [(0, 1), (1, 2), (2, 3), (0, 4), (4, 5), (5, 2), (1, 6), (6, 7), (7, 3)] {
            network.add_edge(u, v, 1).unwrap();
        }

        for tie_break in [TieBreak::LowestIndex, TieBreak::HighestIndex] {
            let network = network.clone().with_tie_break(tie_break);
            let (flow, iterations) = network.compute_max_flow_edmonds_karp();
            assert_eq!(flow.value(0), 2);
            assert_eq!(iterations, 2);
            assert_eq!(flow.get(1, 2), 0);
            assert_eq!(flow.get(2, 1), 0);
            assert!(network.is_flow_feasible(&flow));
        }
    }
}
