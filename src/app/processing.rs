//! Handles the core steps of one embedding run.
//!
//! This module loads the host and pattern graphs, builds the constraint model,
//! writes its listing, hands it to Z3 and turns the answer into a report.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use super::error::AppError;
use super::file_handler;
use super::{verbose_eprintln, verbose_println}; // Macros for conditional logging.
use crate::graph::Graph;
use crate::graph_loader;
use crate::model::{build_embedding_model, EmbeddingModel, EmbeddingParams};
use crate::solver::{self, SolveOutcome, SolverOptions};

/// Loads one graph file, logging its size.
///
/// # Arguments
/// * `label` - Role of the graph in log lines ("Host" or "Pattern").
/// * `graph_file_path` - Path to the graph file.
/// * `quiet_mode` - Suppresses verbose logging if true.
///
/// # Returns
/// The validated graph, or an `AppError` for a missing, unreadable or
/// malformed file.
pub fn load_graph(
    label: &str,
    graph_file_path: &PathBuf,
    quiet_mode: bool,
) -> Result<Graph<String>, AppError> {
    let graph_file_str = file_handler::validate_graph_file(graph_file_path, quiet_mode)?;
    let graph = graph_loader::load_graph_from_file(graph_file_str)?;
    verbose_println!(
        quiet_mode,
        "   => {} graph: {} node(s), {} edge(s).",
        label,
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Builds the embedding model and logs its size per family.
///
/// # Errors
/// Returns `AppError::Model` if the parameters are out of range.
pub fn build_model(
    host: &Graph<String>,
    pattern: &Graph<String>,
    params: EmbeddingParams,
    quiet_mode: bool,
) -> Result<EmbeddingModel, AppError> {
    let built = build_embedding_model(host, pattern, params)?;
    verbose_println!(quiet_mode, "   Parameters: {:?}", built.params);
    let stats = built.stats();
    verbose_println!(
        quiet_mode,
        "   => {} variable(s): {} assignment, {} pullback, {} chain indicator.",
        stats.variables,
        stats.assignment_vars,
        stats.pullback_vars,
        stats.chain_indicator_vars
    );
    verbose_println!(
        quiet_mode,
        "   => {} constraint(s), {} of them linearizations.",
        stats.constraints,
        stats.linearization_constraints
    );
    Ok(built)
}

/// Writes the variable/constraint listing. Failures are logged, not fatal.
pub fn write_model_listing(
    built: &EmbeddingModel,
    model_log_writer: &mut BufWriter<File>,
    quiet_mode: bool,
) {
    if let Err(e) = built.model.write_to(model_log_writer) {
        verbose_eprintln!(quiet_mode, "   [ERROR] Failed to write model listing: {}", e);
    }
}

/// Solves the model and renders the outcome for the user.
///
/// Returns the report text and whether the model was feasible. Infeasibility
/// is reported, not raised.
pub fn solve_and_report(
    built: &EmbeddingModel,
    host: &Graph<String>,
    pattern: &Graph<String>,
    options: &SolverOptions,
    quiet_mode: bool,
) -> Result<(String, bool), AppError> {
    let outcome = solver::solve(&built.model, options)?;
    match outcome {
        SolveOutcome::Feasible(assignment) => {
            let violations = assignment.violations(&built.model);
            if !violations.is_empty() {
                // Would mean the Z3 translation and the model disagree.
                verbose_eprintln!(
                    quiet_mode,
                    "   [WARNING] Solver assignment violates {} constraint(s), first: {}",
                    violations.len(),
                    violations[0].name
                );
            }
            let fibers = built.assignment.fibers(&assignment);
            Ok((format_fibers(&fibers, host, pattern), true))
        }
        SolveOutcome::Infeasible => {
            verbose_println!(quiet_mode, "   => Model is infeasible.");
            Ok(("Infeasible: no embedding satisfies the constraints.".to_string(), false))
        }
    }
}

/// One line per pattern node: `P: A, C`.
fn format_fibers(fibers: &[Vec<usize>], host: &Graph<String>, pattern: &Graph<String>) -> String {
    let mut report = String::from("Feasible embedding:\n");
    for (w, fiber) in fibers.iter().enumerate() {
        let pattern_label = pattern.node(w).map(String::as_str).unwrap_or("?");
        let hosts: Vec<&str> = fiber
            .iter()
            .map(|&v| host.node(v).map(String::as_str).unwrap_or("?"))
            .collect();
        report.push_str(&format!("  {}: {}\n", pattern_label, hosts.join(", ")));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fibers_are_reported_with_labels() {
        let host = Graph::new(
            ["A".to_string(), "B".to_string(), "C".to_string()],
            [("A".to_string(), "B".to_string())],
        )
        .unwrap();
        let pattern = Graph::new(["P".to_string(), "Q".to_string()], Vec::new()).unwrap();
        let text = format_fibers(&[vec![0, 2], vec![1]], &host, &pattern);
        assert_eq!(text, "Feasible embedding:\n  P: A, C\n  Q: B\n");
    }
}
