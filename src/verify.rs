use crate::{flow::Flow, network::FlowNetwork};

/// Checks capacity bounds and conservation of a per-edge flow.
///
/// Every recorded edge must exist in the network and carry at most its
/// capacity; every vertex except source and sink must have equal inflow and
/// outflow.
pub fn is_flow_feasible(network: &FlowNetwork, flow: &Flow) -> bool {
    let nodes_count = network.num_vertices();
    if flow.nodes_count() != nodes_count {
        log::warn!(
            "Flow covers {} vertices, network has {}",
            flow.nodes_count(),
            nodes_count
        );
        return false;
    }

    let mut in_flow = vec![0u64; nodes_count];
    let mut out_flow = vec![0u64; nodes_count];

    for (node, head, amount) in flow.iter() {
        if head >= nodes_count {
            log::warn!("Flow edge {} -> {} leaves the network", node, head);
            return false;
        }
        let capacity = network.capacity(node, head);
        if amount > capacity {
            log::warn!(
                "Flow {} on {} -> {} exceeds capacity {}",
                amount,
                node,
                head,
                capacity
            );
            return false;
        }
        let (Some(out_total), Some(in_total)) = (
            out_flow[node].checked_add(amount),
            in_flow[head].checked_add(amount),
        ) else {
            log::warn!(
                "Flow through {} -> {} overflows the vertex totals",
                node,
                head
            );
            return false;
        };
        out_flow[node] = out_total;
        in_flow[head] = in_total;
    }

    for node in 0..nodes_count {
        if node == network.source() || node == network.dest() {
            continue;
        }
        if in_flow[node] != out_flow[node] {
            log::warn!(
                "Conservation broken at vertex {}: inflow {}, outflow {}",
                node,
                in_flow[node],
                out_flow[node]
            );
            return false;
        }
    }

    true
}

/// Same check for a skew-symmetric flow matrix, where `matrix[u][v]` is
/// the net flow from `u` to `v`.
pub fn is_skew_flow_feasible(network: &FlowNetwork, matrix: &[Vec<i64>]) -> bool {
    let nodes_count = network.num_vertices();
    if matrix.len() != nodes_count || matrix.iter().any(|row| row.len() != nodes_count) {
        log::warn!("Flow matrix is not {}x{}", nodes_count, nodes_count);
        return false;
    }

    for u in 0..nodes_count {
        for v in 0..nodes_count {
            if matrix[u][v] as i128 != -(matrix[v][u] as i128) {
                log::warn!(
                    "Flow matrix not skew-symmetric at ({}, {}): {} vs {}",
                    u,
                    v,
                    matrix[u][v],
                    matrix[v][u]
                );
                return false;
            }
            let capacity = network.capacity(u, v);
            if matrix[u][v] > 0 && matrix[u][v] as u64 > capacity {
                log::warn!(
                    "Flow {} on {} -> {} exceeds capacity {}",
                    matrix[u][v],
                    u,
                    v,
                    capacity
                );
                return false;
            }
        }
    }

    for u in 0..nodes_count {
        if u == network.source() || u == network.dest() {
            continue;
        }
        let balance: i128 = matrix[u].iter().map(|&amount| amount as i128).sum();
        if balance != 0 {
            log::warn!("Conservation broken at vertex {}: net outflow {}", u, balance);
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> FlowNetwork {
        let mut network = FlowNetwork::new(4, 0, 3).unwrap();
        network.add_edge(0, 1, 2).unwrap();
        network.add_edge(0, 2, 3).unwrap();
        network.add_edge(1, 3, 1).unwrap();
        network.add_edge(2, 3, 2).unwrap();
        network
    }

    #[test]
    fn accepts_maximum_and_zero_flows() {
        let network = diamond();
        let flow = Flow::from_edges(4, &[(0, 1, 1), (0, 2, 2), (1, 3, 1), (2, 3, 2)]);
        assert!(is_flow_feasible(&network, &flow));
        assert!(is_skew_flow_feasible(&network, &flow.to_skew_matrix()));
        assert!(is_flow_feasible(&network, &Flow::new(4)));
    }

    #[test]
    fn rejects_over_capacity() {
        let network = diamond();
        let flow = Flow::from_edges(4, &[(0, 1, 2), (0, 2, 1), (1, 3, 2), (2, 3, 1)]);
        assert!(!is_flow_feasible(&network, &flow));
        assert!(!is_skew_flow_feasible(&network, &flow.to_skew_matrix()));
    }

    #[test]
    fn rejects_flow_on_missing_edge() {
        let network = diamond();
        let flow = Flow::from_edges(4, &[(0, 1, 1), (1, 2, 1), (2, 3, 1)]);
        assert!(!is_flow_feasible(&network, &flow));
    }

    #[test]
    fn rejects_broken_conservation() {
        let network = diamond();
        // Vertex 2 receives 3 units and forwards only 2.
        let flow = Flow::from_edges(4, &[(0, 1, 1), (0, 2, 3), (1, 3, 1), (2, 3, 2)]);
        assert!(!is_flow_feasible(&network, &flow));
        assert!(!is_skew_flow_feasible(&network, &flow.to_skew_matrix()));
    }

    #[test]
    fn rejects_non_skew_matrix() {
        let network = diamond();
        let mut matrix = Flow::from_edges(4, &[(0, 1, 1), (1, 3, 1)]).to_skew_matrix();
        assert!(is_skew_flow_feasible(&network, &matrix));

        matrix[1][0] = 0;
        assert!(!is_skew_flow_feasible(&network, &matrix));
    }

    #[test]
    fn rejects_overflowing_vertex_totals() {
        let mut network = FlowNetwork::new(4, 0, 3).unwrap();
        network.add_edge(0, 2, u64::MAX).unwrap();
        network.add_edge(1, 2, u64::MAX).unwrap();
        network.add_edge(2, 3, u64::MAX).unwrap();

        // Every edge is within capacity but vertex 2 would receive 2 * u64::MAX.
        let flow = Flow::from_edges(4, &[(0, 2, u64::MAX), (1, 2, u64::MAX), (2, 3, u64::MAX)]);
        assert!(!is_flow_feasible(&network, &flow));
    }

    #[test]
    fn skew_check_handles_extreme_entries() {
        let mut network = FlowNetwork::new(3, 0, 2).unwrap();
        network.add_edge(0, 1, u64::MAX).unwrap();
        network.add_edge(1, 2, u64::MAX).unwrap();

        let mut matrix = vec![vec![0i64; 3]; 3];
        matrix[0][1] = i64::MIN;
        assert!(!is_skew_flow_feasible(&network, &matrix));

        let matrix = Flow::from_edges(3, &[(0, 1, i64::MAX as u64), (1, 2, i64::MAX as u64)])
            .to_skew_matrix();
        assert!(is_skew_flow_feasible(&network, &matrix));

        // Skew-symmetric and within capacity, but vertex 1 sums past the i64 range.
        let mut network = FlowNetwork::new(4, 0, 3).unwrap();
        network.add_edge(0, 1, u64::MAX).unwrap();
        network.add_edge(2, 1, u64::MAX).unwrap();
        let matrix = vec![
            vec![0, i64::MAX, 0, 0],
            vec![-i64::MAX, 0, -i64::MAX, 0],
            vec![0, i64::MAX, 0, 0],
            vec![0, 0, 0, 0],
        ];
        assert!(!is_skew_flow_feasible(&network, &matrix));
    }

    #[test]
    fn rejects_mismatched_shapes() {
        let network = diamond();
        assert!(!is_flow_feasible(&network, &Flow::new(3)));
        assert!(!is_skew_flow_feasible(&network, &vec![vec![0; 4]; 3]));
    }
}
