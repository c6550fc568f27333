use rustc_hash::FxHashMap;

/// Flow assignment stored per directed edge.
///
/// Only positive values are stored, and at most one direction of a vertex
/// pair carries flow: pushing along `u -> v` first cancels what is
/// recorded on `v -> u`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Flow {
    edges: Vec<FxHashMap<usize, u64>>,
}

impl Flow {
    pub fn new(nodes_count: usize) -> Self {
        Self {
            edges: vec![FxHashMap::default(); nodes_count],
        }
    }

    /// Builds a flow from explicit `(tail, head, amount)` triples, without
    /// any cancellation.
    pub fn from_edges(nodes_count: usize, edges: &[(usize, usize, u64)]) -> Self {
        let mut flow = Self::new(nodes_count);
        for &(node, head, amount) in edges {
            flow.set(node, head, amount);
        }
        flow
    }

    pub fn nodes_count(&self) -> usize {
        self.edges.len()
    }

    pub fn get(&self, node: usize, head: usize) -> u64 {
        self.edges[node].get(&head).copied().unwrap_or(0)
    }

    /// Overwrites the flow recorded on `node -> head`.
    pub fn set(&mut self, node: usize, head: usize, amount: u64) {
        if amount == 0 {
            self.edges[node].remove(&head);
        } else {
            self.edges[node].insert(head, amount);
        }
    }

    /// Pushes `amount` units along `node -> head`, cancelling the opposite
    /// direction first.
    pub fn push(&mut self, node: usize, head: usize, amount: u64) {
        let backward = self.get(head, node);
        let cancelled = backward.min(amount);
        if cancelled > 0 {
            self.set(head, node, backward - cancelled);
        }
        if amount > cancelled {
            *self.edges[node].entry(head).or_default() += amount - cancelled;
        }
    }

    /// Sums `other` into this flow.
    pub fn add(&mut self, other: &Flow) {
        for (node, head, amount) in other.iter() {
            self.push(node, head, amount);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .flat_map(|(node, edges)| edges.iter().map(move |(&head, &amount)| (node, head, amount)))
    }

    pub fn node_edges(&self, node: usize) -> &FxHashMap<usize, u64> {
        &self.edges[node]
    }

    /// Saturates at `u64::MAX`.
    pub fn out_flow(&self, node: usize) -> u64 {
        self.edges[node]
            .values()
            .fold(0u64, |total, &amount| total.saturating_add(amount))
    }

    /// Saturates at `u64::MAX`.
    pub fn in_flow(&self, node: usize) -> u64 {
        self.edges
            .iter()
            .filter_map(|edges| edges.get(&node))
            .fold(0u64, |total, &amount| total.saturating_add(amount))
    }

    /// Net amount leaving `source`.
    pub fn value(&self, source: usize) -> u64 {
        self.out_flow(source).saturating_sub(self.in_flow(source))
    }

    /// Skew-symmetric matrix view: `m[u][v] = flow(u, v) - flow(v, u)`.
    ///
    /// Entries saturate at `±i64::MAX`, so amounts above `i64::MAX` are
    /// clamped.
    pub fn to_skew_matrix(&self) -> Vec<Vec<i64>> {
        let nodes_count = self.edges.len();
        let mut matrix = vec![vec![0i64; nodes_count]; nodes_count];
        for (node, head, amount) in self.iter() {
            let amount = i64::try_from(amount).unwrap_or(i64::MAX);
            matrix[node][head] = matrix[node][head].saturating_add(amount);
            matrix[head][node] = matrix[head][node].saturating_sub(amount);
        }
        matrix
    }
}
