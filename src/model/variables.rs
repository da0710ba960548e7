use std::fmt::Debug;
use std::hash::Hash;

use super::linear::{Assignment, BinaryModel, VarId, VarKind};
use crate::graph::paths::interior;
use crate::graph::{Chain, Graph, NodeId};

/// The assignment variables `x[v,w]`, one per (host node, pattern node).
///
/// Stored row-major by host node: `x[v,w]` sits at `v * pattern_count + w`.
#[derive(Clone, Debug)]
pub struct AssignmentVars {
    host_count: usize,
    pattern_count: usize,
    ids: Vec<VarId>,
}

impl AssignmentVars {
    /// `x[host, pattern]`.
    ///
    /// # Panics
    /// Panics if either index is outside the graphs the variables were
    /// defined for.
    pub fn get(&self, host: NodeId, pattern: NodeId) -> VarId {
        assert!(
            host < self.host_count && pattern < self.pattern_count,
            "assignment index ({}, {}) out of bounds",
            host,
            pattern
        );
        self.ids[host * self.pattern_count + pattern]
    }

    pub fn host_count(&self) -> usize {
        self.host_count
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn all(&self) -> &[VarId] {
        &self.ids
    }

    /// Variables `x[host, w]` for every pattern node `w`.
    pub fn for_host(&self, host: NodeId) -> impl Iterator<Item = VarId> + '_ {
        (0..self.pattern_count).map(move |w| self.get(host, w))
    }

    /// Variables `x[v, pattern]` for every host node `v`.
    pub fn for_pattern(&self, pattern: NodeId) -> impl Iterator<Item = VarId> + '_ {
        (0..self.host_count).map(move |v| self.get(v, pattern))
    }

    /// Reads the fiber of every pattern node from a solved assignment.
    /// Entry `w` lists the host nodes with `x[v,w] = 1`, in host order.
    pub fn fibers(&self, assignment: &Assignment) -> Vec<Vec<NodeId>> {
        (0..self.pattern_count)
            .map(|w| {
                (0..self.host_count)
                    .filter(|&v| assignment.value(self.get(v, w)))
                    .collect()
            })
            .collect()
    }
}

/// Creates `x[v,w]` for every host node `v` and pattern node `w`.
pub fn define_assignment_variables<H, P>(
    host: &Graph<H>,
    pattern: &Graph<P>,
    model: &mut BinaryModel,
) -> AssignmentVars
where
    H: Clone + Eq + Hash + Debug,
    P: Clone + Eq + Hash + Debug,
{
    let host_count = host.node_count();
    let pattern_count = pattern.node_count();
    let mut ids = Vec::with_capacity(host_count * pattern_count);
    for v in host.node_ids() {
        for w in pattern.node_ids() {
            ids.push(model.add_binary(format!("x_h{}_p{}", v, w), VarKind::Assignment));
        }
    }
    AssignmentVars {
        host_count,
        pattern_count,
        ids,
    }
}

/// Creates the two pullback indicators for host edge `(h1, h2)` lying over
/// pattern edge `(p1, p2)`:
/// `δp = x[h1,p1]·x[h2,p2]` and `δo = x[h1,p2]·x[h2,p1]`.
pub fn define_pullback_variables(
    model: &mut BinaryModel,
    vars: &AssignmentVars,
    host_edge: (NodeId, NodeId),
    pattern_edge: (NodeId, NodeId),
) -> (VarId, VarId) {
    let (h1, h2) = host_edge;
    let (p1, p2) = pattern_edge;
    let tag = format!("h{}h{}_p{}p{}", h1, h2, p1, p2);

    let parallel = model.add_product(
        format!("delta_p_{}", tag),
        VarKind::PullbackParallel,
        vars.get(h1, p1),
        vars.get(h2, p2),
    );
    let opposite = model.add_product(
        format!("delta_o_{}", tag),
        VarKind::PullbackOpposite,
        vars.get(h1, p2),
        vars.get(h2, p1),
    );
    (parallel, opposite)
}

/// Creates one chain indicator per host chain with interior nodes:
/// `γ(c, j) = ∧ x[i,j]` over the interior host nodes `i` of `c`, i.e. the
/// whole interior of `c` lies in the fiber of pattern node `j`.
///
/// Chains that are a single host edge contribute no variable.
pub fn define_chain_indicators(
    model: &mut BinaryModel,
    vars: &AssignmentVars,
    chains: &[Chain],
    pattern: NodeId,
) -> Vec<VarId> {
    chains
        .iter()
        .filter_map(|chain| {
            let factors: Vec<VarId> = interior(chain).iter().map(|&i| vars.get(i, pattern)).collect();
            let name = format!("gamma_{}_p{}", chain_label(chain), pattern);
            model.add_conjunction(name, VarKind::ChainIndicator, &factors)
        })
        .collect()
}

pub(crate) fn chain_label(chain: &[NodeId]) -> String {
    chain
        .iter()
        .map(|n| format!("h{}", n))
        .collect::<Vec<_>>()
        .join("-")
}
