use thiserror::Error;

// Error type for graph construction. Every variant is a malformed-input
// condition: the graph is rejected before any model is built from it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node identifier was declared more than once.
    #[error("Duplicate node identifier {0}")]
    DuplicateNode(String),

    /// An edge references a node that was never declared.
    #[error("Edge {edge} references undeclared node {node}")]
    UnknownEndpoint { edge: String, node: String },

    /// An edge connects a node to itself; graphs must be simple.
    #[error("Self-loop on node {0} is not allowed in a simple graph")]
    SelfLoop(String),

    /// The same unordered node pair was given twice.
    #[error("Duplicate edge {0}")]
    DuplicateEdge(String),
}
