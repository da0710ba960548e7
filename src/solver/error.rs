use thiserror::Error;

// Error type for handing a model to Z3 and reading the answer back.
// Infeasibility is not an error; see `SolveOutcome::Infeasible`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// Z3 returned `unknown`, e.g. because the timeout expired.
    #[error("Z3 solver returned unknown: {0}")]
    Unknown(String),

    /// Z3 reported `sat` but produced no model.
    #[error("Z3 reported a satisfiable model but none was available")]
    ModelUnavailable,

    /// A variable could not be evaluated to a concrete boolean in the model.
    #[error("Failed to evaluate variable '{0}' in the Z3 model")]
    Evaluation(String),
}
