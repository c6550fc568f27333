use rand::{distributions::WeightedIndex, prelude::Distribution, Rng};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::matching::BipartiteGraph;

/// Directed Erdős–Rényi graph: every ordered pair of distinct vertices is
/// an edge with probability `p`, with a capacity uniform in `[1, max_capacity]`.
pub fn generate_erdos_renyi_graph(
    rng: &mut impl Rng,
    n: usize,
    p: f64,
    max_capacity: u64,
) -> Vec<FxHashMap<usize, u64>> {
    let mut graph = vec![FxHashMap::default(); n];

    for (node, edges) in graph.iter_mut().enumerate() {
        for target in 0..n {
            if target != node && rng.gen::<f64>() < p {
                edges.insert(target, rng.gen_range(1..=max_capacity.max(1)));
            }
        }
    }

    graph
}

/// Barabási–Albert preferential attachment: each new vertex draws `m`
/// earlier vertices with probability proportional to their degree and gets
/// an edge from each distinct one.
pub fn generate_barabasi_albert_graph(
    rng: &mut impl Rng,
    n: usize,
    m: usize,
    max_capacity: u64,
) -> Vec<FxHashMap<usize, u64>> {
    let mut graph = vec![FxHashMap::default(); n];
    if n < 2 {
        return graph;
    }
    let max_capacity = max_capacity.max(1);
    let mut degrees = vec![0usize; n];

    graph[0].insert(1, rng.gen_range(1..=max_capacity));
    degrees[0] = 1;
    degrees[1] = 1;

    for node in 2..n {
        let Ok(distribution) = WeightedIndex::new(&degrees[..node]) else {
            continue;
        };
        let selected: FxHashSet<usize> = (0..m).map(|_| distribution.sample(rng)).collect();

        for &target in &selected {
            degrees[target] += 1;
            graph[target].insert(node, rng.gen_range(1..=max_capacity));
        }
        degrees[node] = selected.len();
    }

    graph
}

/// Random bipartite graph with `n` vertices per side and edge probability `p`.
pub fn generate_erdos_renyi_bipartite_graph(rng: &mut impl Rng, n: usize, p: f64) -> BipartiteGraph {
    let mut graph = BipartiteGraph::new(n, n);
    for left in 0..n {
        for right in 0..n {
            if rng.gen::<f64>() < p {
                if let Err(err) = graph.add_edge(left, right) {
                    log::error!("Skipping generated edge: {}", err);
                }
            }
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn erdos_renyi_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = generate_erdos_renyi_graph(&mut rng, 30, 0.2, 10);

        assert_eq!(graph.len(), 30);
        for (node, edges) in graph.iter().enumerate() {
            assert!(!edges.contains_key(&node));
            for &capacity in edges.values() {
                assert!((1..=10).contains(&capacity));
            }
        }

        let empty = generate_erdos_renyi_graph(&mut rng, 10, 0.0, 10);
        assert!(empty.iter().all(|edges| edges.is_empty()));
        let complete = generate_erdos_renyi_graph(&mut rng, 10, 1.0, 10);
        assert!(complete.iter().all(|edges| edges.len() == 9));
    }

    #[test]
    fn barabasi_albert_attaches_every_vertex() {
        let mut rng = StdRng::seed_from_u64(11);
        let graph = generate_barabasi_albert_graph(&mut rng, 40, 3, 5);

        let mut has_in_edge = vec![false; 40];
        for (node, edges) in graph.iter().enumerate() {
            for (&target, &capacity) in edges {
                assert!(target > node);
                assert!((1..=5).contains(&capacity));
                has_in_edge[target] = true;
            }
        }
        assert!(has_in_edge[1..].iter().all(|&x| x));
    }

    #[test]
    fn same_seed_same_graph() {
        let first = generate_erdos_renyi_graph(&mut StdRng::seed_from_u64(3), 20, 0.3, 30);
        let second = generate_erdos_renyi_graph(&mut StdRng::seed_from_u64(3), 20, 0.3, 30);
        assert_eq!(first, second);
    }

    #[test]
    fn bipartite_edges_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let graph = generate_erdos_renyi_bipartite_graph(&mut rng, 8, 0.5);
        assert_eq!((graph.left_count(), graph.right_count()), (8, 8));
        for left in 0..8 {
            assert!(graph.neighbors(left).iter().all(|&right| right < 8));
        }
    }
}
