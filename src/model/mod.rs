// error module
mod error;
// builder module
mod builder;

pub mod constraints;
pub mod linear;
pub mod params;
pub mod variables;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports.
//─────────────────────────────────────────────────────────────────────────────
pub use builder::{build_embedding_model, EmbeddingModel, EmbeddingModelBuilder, ModelStats};
pub use error::ModelError;
pub use linear::{Assignment, BinaryModel, Family, LinearConstraint, LinearExpr, Sense, VarId, VarKind};
pub use params::{ChainConnectivity, EmbeddingParams};
pub use variables::AssignmentVars;
