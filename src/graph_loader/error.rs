use crate::graph::GraphError;
use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for graph file loading operations.
#[derive(Error, Debug)]
pub enum GraphLoaderError {
    /// Error when reading a file.
    #[error("Failed to read file '{0}': {1}")]
    ReadFile(String, std::io::Error),

    /// Error when a line is not a valid node or edge declaration.
    #[error("Failed to parse '{path}' at line {line}: {reason}")]
    Parse {
        path: String,
        line: usize,
        reason: String,
    },

    /// Error when the declarations do not form a valid simple graph.
    #[error("Malformed graph in '{0}': {1}")]
    Graph(String, GraphError),
}
