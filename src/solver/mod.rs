// error module
mod error;
// Z3 backend module
pub mod z3_backend;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports.
//─────────────────────────────────────────────────────────────────────────────
pub use error::SolverError;
pub use z3_backend::{solve, SolveOutcome, SolverOptions};
