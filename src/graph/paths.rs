use std::fmt::Debug;
use std::hash::Hash;

use super::graph::{Graph, NodeId};

/// A simple path in the host graph, listed endpoint to endpoint.
pub type Chain = Vec<NodeId>;

/// Returns the interior nodes of a chain (both endpoints excluded).
pub fn interior(chain: &[NodeId]) -> &[NodeId] {
    if chain.len() <= 2 {
        &[]
    } else {
        &chain[1..chain.len() - 1]
    }
}

/// `PathEnumerator` finds every simple path between two nodes whose length,
/// counted in edges, does not exceed a cutoff.
///
/// The search is exhaustive and its cost grows exponentially with the cutoff
/// on dense graphs. Callers choose the cutoff explicitly; there is no
/// unbounded mode.
pub struct PathEnumerator<'g, N> {
    graph: &'g Graph<N>,
    cutoff: usize,
}

impl<'g, N> PathEnumerator<'g, N>
where
    N: Clone + Eq + Hash + Debug,
{
    pub fn new(graph: &'g Graph<N>, cutoff: usize) -> Self {
        Self { graph, cutoff }
    }

    /// Returns all simple paths from `source` to `target` with at most
    /// `cutoff` edges, found depth-first with an explicit stack.
    ///
    /// Returns an empty vector when `source == target`, when the cutoff is
    /// zero, or when no such path exists.
    pub fn simple_paths(&self, source: NodeId, target: NodeId) -> Vec<Chain> {
        let mut found = Vec::new();
        if source == target
            || self.cutoff == 0
            || source >= self.graph.node_count()
            || target >= self.graph.node_count()
        {
            return found;
        }

        // Stack stores the partial path; its last element is the current node.
        let mut stack: Vec<Chain> = vec![vec![source]];

        while let Some(path) = stack.pop() {
            let current = path[path.len() - 1];
            if current == target {
                found.push(path);
                continue;
            }
            if path.len() > self.cutoff {
                continue;
            }
            // Push in reverse so neighbours are explored in declaration order.
            for &next in self.graph.neighbors(current).iter().rev() {
                if !path.contains(&next) {
                    let mut extended = path.clone();
                    extended.push(next);
                    stack.push(extended);
                }
            }
        }
        found
    }
}

/// Chains of bounded length for every unordered pair of host nodes.
///
/// Pairs are `(a, b)` with `a < b`, in lexicographic order. Chains run from
/// `a` to `b`. Pairs with no chain are kept with an empty list, so callers can
/// tell host nodes that may never share a fiber from those that can be linked.
#[derive(Clone, Debug, Default)]
pub struct HostChains {
    pairs: Vec<((NodeId, NodeId), Vec<Chain>)>,
}

impl HostChains {
    pub fn collect<N>(host: &Graph<N>, cutoff: usize) -> Self
    where
        N: Clone + Eq + Hash + Debug,
    {
        let enumerator = PathEnumerator::new(host, cutoff);
        let n = host.node_count();
        let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for a in 0..n {
            for b in (a + 1)..n {
                pairs.push(((a, b), enumerator.simple_paths(a, b)));
            }
        }
        Self { pairs }
    }

    /// Iterates over every unordered pair together with its chains.
    pub fn pairs(&self) -> impl Iterator<Item = ((NodeId, NodeId), &[Chain])> + '_ {
        self.pairs.iter().map(|(pair, chains)| (*pair, chains.as_slice()))
    }

    /// Pairs that have no chain within the cutoff.
    pub fn disconnected_pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.pairs()
            .filter(|(_, chains)| chains.is_empty())
            .map(|(pair, _)| pair)
    }

    /// Pairs that have at least one chain within the cutoff.
    pub fn connected_pairs(&self) -> impl Iterator<Item = ((NodeId, NodeId), &[Chain])> + '_ {
        self.pairs().filter(|(_, chains)| !chains.is_empty())
    }
}
