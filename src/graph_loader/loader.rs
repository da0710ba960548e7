use std::fs;

use super::error::GraphLoaderError;
use crate::graph::Graph;

//─────────────────────────────────────────────────────────────────────────────
// Graph file format, one declaration per line:
//
//     # comment
//     n <id>          declare a node
//     e <a> <b>       declare an undirected edge
//
// Node declarations fix the node order. Declarations are handed to
// `Graph::new` unchanged, so duplicates and dangling edges are reported by the
// graph itself.
//─────────────────────────────────────────────────────────────────────────────

/// Loads a graph from a file in the `n`/`e` line format.
pub fn load_graph_from_file(file_path: &str) -> Result<Graph<String>, GraphLoaderError> {
    let file_content =
        fs::read_to_string(file_path).map_err(|e| GraphLoaderError::ReadFile(file_path.into(), e))?;
    parse_graph(file_path, &file_content)
}

/// Parses graph declarations from `content`. `source` names the input in
/// error messages.
pub fn parse_graph(source: &str, content: &str) -> Result<Graph<String>, GraphLoaderError> {
    let mut nodes: Vec<String> = Vec::new();
    let mut edges: Vec<(String, String)> = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let parse_error = |reason: String| GraphLoaderError::Parse {
            path: source.into(),
            line: idx + 1,
            reason,
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            ["n", id] => nodes.push((*id).to_string()),
            ["e", a, b] => edges.push(((*a).to_string(), (*b).to_string())),
            ["n", ..] => return Err(parse_error("expected 'n <id>'".to_string())),
            ["e", ..] => return Err(parse_error("expected 'e <a> <b>'".to_string())),
            [other, ..] => {
                return Err(parse_error(format!("unknown declaration '{}'", other)));
            }
            [] => {}
        }
    }

    Graph::new(nodes, edges).map_err(|e| GraphLoaderError::Graph(source.into(), e))
}
