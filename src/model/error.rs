use crate::graph::GraphError;
use thiserror::Error;

// Error type for model construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A host or pattern graph violates the node/edge contract.
    #[error("Malformed input graph: {0}")]
    MalformedInput(#[from] GraphError),

    /// A bound parameter is outside its admissible range. Raised before any
    /// variable is created.
    #[error("Parameter '{name}' out of range: {reason}")]
    ParameterOutOfRange { name: &'static str, reason: String },
}
