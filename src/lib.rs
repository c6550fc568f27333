pub mod dinic;
pub mod edmonds_karp;
pub mod error;
pub mod flow;
pub mod levels;
pub mod matching;
pub mod network;
pub mod residual;
pub mod verify;

pub mod experiments;
pub mod generators;

pub use error::FlowError;
pub use flow::Flow;
pub use matching::{
    compute_max_bipartite_matching, compute_max_bipartite_matching_size, BipartiteGraph,
};
pub use network::{FlowAlgorithm, FlowGraph, FlowNetwork, TieBreak};
