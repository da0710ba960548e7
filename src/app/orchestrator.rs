//! Main application orchestrator.
//!
//! Coordinates one embedding run:
//! 1. Initializes logging.
//! 2. Loads and validates the host and pattern graphs.
//! 3. Resolves the bound parameters (CLI values, host-size defaults).
//! 4. Builds the constraint model and writes its listing.
//! 5. Solves with Z3 and prints the fibers or the infeasibility result.

use std::io::Write; // For BufWriter::flush

use super::cli::Cli;
use super::error::AppError;
use super::file_handler;
use super::logger;
use super::processing;
use super::{verbose_eprintln, verbose_println}; // Macros for conditional logging.
use crate::model::EmbeddingParams;
use crate::solver::SolverOptions;

/// Runs the main application logic based on parsed command-line arguments.
///
/// # Errors
/// Returns `AppError` for unreadable or malformed graph files, out-of-range
/// parameters, and solver failures. An infeasible model is not an error.
pub fn run_app(cli: Cli) -> Result<(), AppError> {
    let quiet_mode = cli.quiet;

    let log_file = cli.log_file.display();

    if !quiet_mode {
        if let Err(e) = logger::init_global_logger(&cli.log_file) {
            eprintln!(
                "Warning: Failed to initialize verbose logger ({}): {}. Verbose file logging will be unavailable.",
                log_file, e
            );
        } else {
            verbose_println!(quiet_mode, "Verbose logging initialized to {}", log_file);
        }
    }

    // Uninitialized in quiet mode, so step headings are dropped there.
    logger::log_step(1, "Loading graphs");
    let host = processing::load_graph("Host", &cli.host, quiet_mode)?;
    let pattern = processing::load_graph("Pattern", &cli.pattern, quiet_mode)?;

    // Size defaults follow the host: at most every host node is used.
    let host_nodes = u32::try_from(host.node_count())
        .map_err(|_| AppError::General("host graph has too many nodes".to_string()))?;
    let params = EmbeddingParams {
        min_size: cli.min_size,
        max_size: cli.max_size.unwrap_or(host_nodes),
        fiber_min: cli.fiber_min,
        fiber_max: cli.fiber_max.unwrap_or(host_nodes),
        max_chain_length: cli.max_chain_length,
        chain_connectivity: cli.connectivity.into(),
    };

    logger::log_step(2, "Building constraint model");
    let built = processing::build_model(&host, &pattern, params, quiet_mode)?;

    if !quiet_mode {
        let mut model_log_writer =
            file_handler::init_model_log_writer(&cli.model_log).map_err(|e| {
                verbose_eprintln!(
                    quiet_mode,
                    "[ERROR] Failed to open model listing ({}): {}",
                    cli.model_log.display(),
                    e
                );
                AppError::Io(e)
            })?;
        processing::write_model_listing(&built, &mut model_log_writer, quiet_mode);
        if let Err(e) = model_log_writer.flush() {
            verbose_eprintln!(
                quiet_mode,
                "[WARNING] Failed to flush model listing ({}): {}",
                cli.model_log.display(),
                e
            );
        }
        verbose_println!(
            quiet_mode,
            "   => Model listing written to {}",
            cli.model_log.display()
        );
    }

    logger::log_step(3, "Solving with Z3");
    let options = SolverOptions {
        timeout_ms: cli.timeout_ms,
    };
    let result = processing::solve_and_report(&built, &host, &pattern, &options, quiet_mode);

    // Final flush of the run log, also when solving failed.
    if !quiet_mode {
        if let Err(e) = logger::flush_global_logger() {
            eprintln!("[WARNING] Failed to perform final flush of {}: {}", log_file, e);
        }
    }

    let (report, feasible) = result?;
    if quiet_mode {
        println!("{}", if feasible { "Feasible." } else { "Infeasible." });
    } else {
        print!("{}", report);
        println!(
            "\nSee '{}' for verbose output and '{}' for the model.",
            log_file,
            cli.model_log.display()
        );
    }

    Ok(())
}
