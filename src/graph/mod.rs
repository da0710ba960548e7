// error module
mod error;
// graph module
#[allow(clippy::module_inception)]
mod graph;
// paths module
pub mod paths;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports.
//─────────────────────────────────────────────────────────────────────────────
pub use error::GraphError;
pub use graph::{Graph, HostGraph, NodeId, PatternGraph};
pub use paths::{Chain, HostChains, PathEnumerator};
