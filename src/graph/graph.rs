// graph.rs
// ──────────────────────────────────────────────────────────────────────────────
// Simple undirected graph used for both sides of the embedding problem.  The
// host graph supplies the nodes and edges that are available; the pattern graph
// is the structure to be realized inside it.  Nodes carry opaque, hashable
// identifiers and are addressed internally by their declaration index.
// ──────────────────────────────────────────────────────────────────────────────
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use super::error::GraphError;

/// Index of a node inside a `Graph`, assigned in declaration order.
pub type NodeId = usize;

/// A simple undirected graph with stable node order.
///
/// Construction validates the node/edge contract: node identifiers are unique,
/// every edge endpoint is declared, and there are no self-loops or repeated
/// edges. A `Graph` is never mutated after `Graph::new` returns.
#[derive(Clone, Debug)]
pub struct Graph<N> {
    nodes: Vec<N>,
    index: HashMap<N, NodeId>,
    edges: Vec<(NodeId, NodeId)>,
    adjacency: Vec<Vec<NodeId>>,
}

/// The graph the pattern is embedded into.
pub type HostGraph<N> = Graph<N>;

/// The graph whose nodes and edges must be realized inside the host.
pub type PatternGraph<N> = Graph<N>;

impl<N> Graph<N>
where
    N: Clone + Eq + Hash + Debug,
{
    /// Builds a graph from a node list and an edge list.
    ///
    /// Edge endpoints are stored in the order given, so `edges()` reproduces
    /// the orientation the caller used.
    ///
    /// # Errors
    /// Returns a `GraphError` if a node is declared twice, an edge references
    /// an undeclared node, an edge is a self-loop, or an edge is repeated
    /// (in either orientation).
    pub fn new<I, E>(nodes: I, edges: E) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = N>,
        E: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Graph {
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            adjacency: Vec::new(),
        };

        for node in nodes {
            if graph.index.contains_key(&node) {
                return Err(GraphError::DuplicateNode(format!("{:?}", node)));
            }
            let id = graph.nodes.len();
            graph.index.insert(node.clone(), id);
            graph.nodes.push(node);
            graph.adjacency.push(Vec::new());
        }

        let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();
        for (a, b) in edges {
            let edge_repr = format!("({:?}, {:?})", a, b);
            let u = graph.lookup(&a, &edge_repr)?;
            let v = graph.lookup(&b, &edge_repr)?;
            if u == v {
                return Err(GraphError::SelfLoop(format!("{:?}", a)));
            }
            if !seen.insert((u.min(v), u.max(v))) {
                return Err(GraphError::DuplicateEdge(edge_repr));
            }
            graph.edges.push((u, v));
            graph.adjacency[u].push(v);
            graph.adjacency[v].push(u);
        }

        Ok(graph)
    }

    fn lookup(&self, node: &N, edge_repr: &str) -> Result<NodeId, GraphError> {
        self.index
            .get(node)
            .copied()
            .ok_or_else(|| GraphError::UnknownEndpoint {
                edge: edge_repr.to_string(),
                node: format!("{:?}", node),
            })
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edges as index pairs, in declaration order.
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Returns the identifier of the node at `id`.
    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(id)
    }

    /// Returns the neighbours of `id` in edge declaration order.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns all node indices.
    pub fn node_ids(&self) -> std::ops::Range<NodeId> {
        0..self.nodes.len()
    }
}
