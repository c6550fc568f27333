use crate::{
    flow::Flow,
    levels::{build_levels, AdvancingGraph},
    network::{FlowNetwork, TieBreak},
    residual::ResidualGraph,
};

/// Saturates every `source -> dest` path of `advancing`.
///
/// The walk keeps the current path on an explicit stack. Saturated edges
/// are deleted and the stack is cut back to the tail of the shallowest
/// one; a vertex without outgoing edges is removed from the graph through
/// its incoming edges, so no edge or dead end is visited twice in the
/// phase. `advancing` is left pruned.
pub fn compute_blocking_flow(
    advancing: &mut AdvancingGraph,
    source: usize,
    dest: usize,
    tie_break: TieBreak,
) -> Flow {
    let mut blocking_flow = Flow::new(advancing.nodes_count());
    let mut stack = vec![source];

    while let Some(&node) = stack.last() {
        if node == dest {
            let delta = stack
                .windows(2)
                .map(|edge| advancing.capacity(edge[0], edge[1]))
                .min()
                .unwrap_or(0);

            let mut first_saturated = None;
            for (pos, edge) in stack.windows(2).enumerate() {
                blocking_flow.push(edge[0], edge[1], delta);
                if advancing.consume(edge[0], edge[1], delta) && first_saturated.is_none() {
                    first_saturated = Some(pos);
                }
            }

            // The bottleneck edge is always saturated: resume from the tail
            // of the shallowest one
            stack.truncate(first_saturated.unwrap_or(0) + 1);
        } else if let Some(head) = tie_break.pick(advancing.out_neighbors(node)) {
            stack.push(head);
        } else {
            // Dead end
            advancing.disconnect_incoming(node);
            stack.pop();
        }
    }

    blocking_flow
}

/// Dinic's max-flow: one blocking flow per BFS layering.
///
/// Returns the flow and the number of phases.
pub fn compute_max_flow_dinitz(network: &FlowNetwork) -> (Flow, usize) {
    let (source, dest) = (network.source(), network.dest());
    let mut residual = ResidualGraph::build(network);
    let mut flow = Flow::new(network.num_vertices());
    let mut iterations = 0;

    while residual.has_path(source, dest) {
        let level = build_levels(&residual, source);
        let mut advancing = AdvancingGraph::build(&residual, &level);

        let blocking_flow =
            compute_blocking_flow(&mut advancing, source, dest, network.tie_break());
        iterations += 1;

        log::debug!(
            "Phase {}: distance {:?}, blocking flow {}",
            iterations,
            level[dest],
            blocking_flow.value(source)
        );

        residual.apply_flow(&blocking_flow);
        flow.add(&blocking_flow);
    }

    log::debug!(
        "Dinitz: flow {} after {} phases",
        flow.value(source),
        iterations
    );
    (flow, iterations)
}
