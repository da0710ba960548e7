use thiserror::Error;

// Custom Application Error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Graph loading error: {0}")]
    GraphLoad(#[from] crate::graph_loader::GraphLoaderError),
    #[error("Model construction error: {0}")]
    Model(#[from] crate::model::ModelError),
    #[error("Z3 solving error: {0}")]
    Solver(#[from] crate::solver::SolverError),
    #[error("Invalid file path: {0}")]
    InvalidPath(String),
    #[error("General error: {0}")]
    General(String),
}
