mod app;
mod graph;
mod graph_loader;
mod model;
mod solver;

use clap::Parser;

fn main() {
    let cli = app::Cli::parse();
    if let Err(e) = app::run_app(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
