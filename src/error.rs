use thiserror::Error;

/// Errors raised while building a network or a bipartite instance.
///
/// The flow engines themselves never fail once a network exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("capacity matrix has {rows} rows, expected {expected}")]
    MatrixRowCount { expected: usize, rows: usize },

    #[error("capacity matrix row {row} has {len} entries, expected {expected}")]
    MatrixRowLength {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("vertex {vertex} is out of range for a network of {num_vertices} vertices")]
    VertexOutOfRange { vertex: usize, num_vertices: usize },

    #[error("source and sink must be different vertices (both are {0})")]
    SourceIsSink(usize),

    #[error("self-loop on vertex {0} is not supported")]
    SelfLoop(usize),

    #[error("bipartite edge ({left}, {right}) is outside a {left_count}x{right_count} graph")]
    BipartiteEdgeOutOfRange {
        left: usize,
        right: usize,
        left_count: usize,
        right_count: usize,
    },

    #[error("unknown flow algorithm '{0}', expected 'dinitz' or 'edmonds-karp'")]
    UnknownAlgorithm(String),
}
