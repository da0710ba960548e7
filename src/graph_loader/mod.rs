pub mod error;
mod loader;

pub use error::GraphLoaderError;
pub use loader::{load_graph_from_file, parse_graph};
