//! Constraint families of the embedding model.
//!
//! Each family is a free function that appends its constraints (and any
//! auxiliary variables it needs) to the shared `BinaryModel`. Families are
//! independent: none of them relies on another having run first.

use std::fmt::Debug;
use std::hash::Hash;

use super::linear::{BinaryModel, Family, LinearExpr, Sense};
use super::params::{ChainConnectivity, EmbeddingParams};
use super::variables::{
    chain_label, define_chain_indicators, define_pullback_variables, AssignmentVars,
};
use crate::graph::paths::interior;
use crate::graph::{Graph, HostChains};

/// `min_size ≤ Σ x ≤ max_size` over every assignment variable.
pub fn add_size_constraint(model: &mut BinaryModel, vars: &AssignmentVars, params: &EmbeddingParams) {
    let total: LinearExpr = vars.all().iter().copied().collect();
    model.add_constraint(
        "size_max",
        Family::Size,
        total.clone(),
        Sense::Le,
        i64::from(params.max_size),
    );
    model.add_constraint(
        "size_min",
        Family::Size,
        total,
        Sense::Ge,
        i64::from(params.min_size),
    );
}

/// Every host node is assigned to at most one pattern node.
pub fn add_well_defined_constraint(model: &mut BinaryModel, vars: &AssignmentVars) {
    for v in 0..vars.host_count() {
        model.add_constraint(
            format!("well_defined_h{}", v),
            Family::WellDefined,
            vars.for_host(v).collect(),
            Sense::Le,
            1,
        );
    }
}

/// Every fiber has between `fiber_min` and `fiber_max` host nodes.
pub fn add_fiber_size_constraint(
    model: &mut BinaryModel,
    vars: &AssignmentVars,
    params: &EmbeddingParams,
) {
    for w in 0..vars.pattern_count() {
        let fiber: LinearExpr = vars.for_pattern(w).collect();
        model.add_constraint(
            format!("fiber_size_max_p{}", w),
            Family::FiberSize,
            fiber.clone(),
            Sense::Le,
            i64::from(params.fiber_max),
        );
        model.add_constraint(
            format!("fiber_size_min_p{}", w),
            Family::FiberSize,
            fiber,
            Sense::Ge,
            i64::from(params.fiber_min),
        );
    }
}

/// Host nodes with no chain of length ≤ k between them never share a fiber:
/// `x[a,j] + x[b,j] ≤ 1` for every pattern node `j`.
pub fn add_fiber_refinement(model: &mut BinaryModel, vars: &AssignmentVars, chains: &HostChains) {
    for (a, b) in chains.disconnected_pairs() {
        for j in 0..vars.pattern_count() {
            model.add_constraint(
                format!("fs_ref_p{}_h{}_h{}", j, a, b),
                Family::FiberRefinement,
                [vars.get(a, j), vars.get(b, j)].into_iter().collect(),
                Sense::Le,
                1,
            );
        }
    }
}

/// Every pattern edge is realized by a host edge running between the two
/// fibers, in either orientation.
///
/// For each pattern edge the pullback indicators of all host edges are summed
/// in host edge order; the running partial sum is bounded by one after each
/// step and the complete sum must reach one. A host graph without edges
/// leaves the constant constraint `0 ≥ 1` for every pattern edge.
pub fn add_pullback_constraint<H, P>(
    model: &mut BinaryModel,
    vars: &AssignmentVars,
    host: &Graph<H>,
    pattern: &Graph<P>,
) where
    H: Clone + Eq + Hash + Debug,
    P: Clone + Eq + Hash + Debug,
{
    for &(p1, p2) in pattern.edges() {
        let mut running = LinearExpr::new();
        for &(h1, h2) in host.edges() {
            let (parallel, opposite) = define_pullback_variables(model, vars, (h1, h2), (p1, p2));
            running.add_var(parallel);
            running.add_var(opposite);
            model.add_constraint(
                format!("pullback_ds_p{}p{}_h{}h{}", p1, p2, h1, h2),
                Family::Pullback,
                running.clone(),
                Sense::Le,
                1,
            );
        }
        model.add_constraint(
            format!("pullback_p{}p{}", p1, p2),
            Family::Pullback,
            running,
            Sense::Ge,
            1,
        );
    }
}

/// Ties membership of two chain-linked host nodes in the fiber of pattern
/// node `j` to the chain indicators at `j`. See `ChainConnectivity` for the
/// two forms.
pub fn add_chain_connectivity_constraint(
    model: &mut BinaryModel,
    vars: &AssignmentVars,
    chains: &HostChains,
    mode: ChainConnectivity,
) {
    for j in 0..vars.pattern_count() {
        for ((a, b), pair_chains) in chains.connected_pairs() {
            let gammas = define_chain_indicators(model, vars, pair_chains, j);
            let direct = pair_chains
                .iter()
                .filter(|c| interior(c).is_empty())
                .count() as i64;

            let mut expr = LinearExpr::new()
                .with_term(vars.get(a, j), 1)
                .with_term(vars.get(b, j), 1);
            let rhs = match mode {
                ChainConnectivity::Literal => {
                    for g in gammas {
                        expr.add_var(g);
                    }
                    expr.add_constant(-1);
                    2
                }
                ChainConnectivity::Binding => {
                    for g in gammas {
                        expr.add_term(g, -1);
                    }
                    expr.add_constant(-direct);
                    1
                }
            };
            model.add_constraint(
                format!("chain_p{}_{}", j, chain_label(&[a, b])),
                Family::ChainConnectivity,
                expr,
                Sense::Le,
                rhs,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::linear::{Assignment, VarKind};
    use crate::model::variables::define_assignment_variables;

    fn params() -> EmbeddingParams {
        EmbeddingParams {
            min_size: 2,
            max_size: 3,
            fiber_min: 1,
            fiber_max: 2,
            max_chain_length: 1,
            chain_connectivity: ChainConnectivity::Binding,
        }
    }

    fn host_abc() -> Graph<&'static str> {
        Graph::new(["A", "B", "C"], [("A", "B"), ("B", "C")]).unwrap()
    }

    fn setup(pattern: &Graph<&'static str>) -> (BinaryModel, AssignmentVars) {
        let mut model = BinaryModel::new();
        let vars = define_assignment_variables(&host_abc(), pattern, &mut model);
        (model, vars)
    }

    fn zeros(model: &BinaryModel) -> Assignment {
        Assignment::new(vec![false; model.num_variables()])
    }

    #[test]
    fn size_constraint_bounds_total() {
        let pattern = Graph::new(["P", "Q"], [("P", "Q")]).unwrap();
        let (mut model, vars) = setup(&pattern);
        add_size_constraint(&mut model, &vars, &params());
        assert_eq!(model.count_constraints(Family::Size), 2);

        let mut a = zeros(&model);
        a.set(vars.get(0, 0), true);
        assert_eq!(a.violations(&model).len(), 1); // below min_size
        a.set(vars.get(1, 1), true);
        assert!(a.violations(&model).is_empty());
        a.set(vars.get(2, 0), true);
        a.set(vars.get(2, 1), true);
        assert_eq!(a.violations(&model)[0].name, "size_max");
    }

    #[test]
    fn well_definedness_is_per_host_node() {
        let pattern = Graph::new(["P", "Q"], [("P", "Q")]).unwrap();
        let (mut model, vars) = setup(&pattern);
        add_well_defined_constraint(&mut model, &vars);
        assert_eq!(model.count_constraints(Family::WellDefined), 3);

        let mut a = zeros(&model);
        a.set(vars.get(1, 0), true);
        a.set(vars.get(1, 1), true);
        let violated: Vec<_> = a.violations(&model).iter().map(|c| c.name.clone()).collect();
        assert_eq!(violated, vec!["well_defined_h1"]);
    }

    #[test]
    fn fiber_size_requires_surjectivity() {
        let pattern = Graph::new(["P", "Q"], [("P", "Q")]).unwrap();
        let (mut model, vars) = setup(&pattern);
        add_fiber_size_constraint(&mut model, &vars, &params());
        assert_eq!(model.count_constraints(Family::FiberSize), 4);

        let mut a = zeros(&model);
        for v in 0..3 {
            a.set(vars.get(v, 0), true);
        }
        let violated: Vec<_> = a.violations(&model).iter().map(|c| c.name.clone()).collect();
        assert_eq!(violated, vec!["fiber_size_max_p0", "fiber_size_min_p1"]);
    }

    fn violated_names(a: &Assignment, model: &BinaryModel, family: Family) -> Vec<String> {
        a.violations(model)
            .iter()
            .filter(|c| c.family == family)
            .map(|c| c.name.clone())
            .collect()
    }

    #[test]
    fn refinement_only_for_far_apart_pairs() {
        // Host path A-B-C-D; with k = 2 only (A,D) is out of reach.
        let host = Graph::new(["A", "B", "C", "D"], [("A", "B"), ("B", "C"), ("C", "D")]).unwrap();
        let pattern = Graph::new(["P", "Q"], [("P", "Q")]).unwrap();
        let mut model = BinaryModel::new();
        let vars = define_assignment_variables(&host, &pattern, &mut model);
        add_fiber_refinement(&mut model, &vars, &HostChains::collect(&host, 2));
        assert_eq!(model.count_constraints(Family::FiberRefinement), 2);

        // A and C are two edges apart and may share P.
        let mut a = zeros(&model);
        a.set(vars.get(0, 0), true);
        a.set(vars.get(2, 0), true);
        assert!(a.violations(&model).is_empty());

        // A and D may not, although well-definedness alone would allow it.
        let mut b = zeros(&model);
        b.set(vars.get(0, 1), true);
        b.set(vars.get(3, 1), true);
        add_well_defined_constraint(&mut model, &vars);
        assert_eq!(
            violated_names(&b, &model, Family::FiberRefinement),
            vec!["fs_ref_p1_h0_h3"]
        );
        assert!(violated_names(&b, &model, Family::WellDefined).is_empty());
    }

    #[test]
    fn pullback_emits_running_and_final_bounds() {
        let pattern = Graph::new(["P", "Q", "R"], [("P", "Q"), ("Q", "R")]).unwrap();
        let (mut model, vars) = setup(&pattern);
        add_pullback_constraint(&mut model, &vars, &host_abc(), &pattern);

        // Two pattern edges x two host edges: 2 running bounds + 1 final each.
        assert_eq!(model.count_constraints(Family::Pullback), 6);
        assert_eq!(model.count_variables(VarKind::PullbackParallel), 4);
        assert_eq!(model.count_variables(VarKind::PullbackOpposite), 4);
        let finals: Vec<_> = model
            .constraints_in(Family::Pullback)
            .filter(|c| c.sense == Sense::Ge)
            .map(|c| (c.name.clone(), c.expr.terms().len()))
            .collect();
        assert_eq!(
            finals,
            vec![("pullback_p0p1".to_string(), 4), ("pullback_p1p2".to_string(), 4)]
        );
    }

    #[test]
    fn pullback_accepts_connected_fibers() {
        let pattern = Graph::new(["P", "Q"], [("P", "Q")]).unwrap();
        let host = host_abc();
        let mut model = BinaryModel::new();
        let vars = define_assignment_variables(&host, &pattern, &mut model);
        add_pullback_constraint(&mut model, &vars, &host, &pattern);

        // A,B -> P and C -> Q: only B-C runs between the fibers.
        let mut a = zeros(&model);
        a.set(vars.get(0, 0), true);
        a.set(vars.get(1, 0), true);
        a.set(vars.get(2, 1), true);
        a.set(model.var_by_name("delta_p_h1h2_p0p1").unwrap(), true);
        assert!(a.violations(&model).is_empty());

        // A,C -> P and B -> Q: both host edges realize P-Q.
        let mut b = zeros(&model);
        b.set(vars.get(0, 0), true);
        b.set(vars.get(2, 0), true);
        b.set(vars.get(1, 1), true);
        for name in ["delta_p_h0h1_p0p1", "delta_o_h1h2_p0p1"] {
            b.set(model.var_by_name(name).unwrap(), true);
        }
        assert_eq!(
            violated_names(&b, &model, Family::Pullback),
            vec!["pullback_ds_p0p1_h1h2"]
        );

        // A -> P and C -> Q: no host edge between the fibers.
        let mut c = zeros(&model);
        c.set(vars.get(0, 0), true);
        c.set(vars.get(2, 1), true);
        assert_eq!(violated_names(&c, &model, Family::Pullback), vec!["pullback_p0p1"]);
    }

    #[test]
    fn pullback_without_host_edges_is_constant() {
        let host = Graph::new(["A", "B"], Vec::<(&str, &str)>::new()).unwrap();
        let pattern = Graph::new(["P", "Q"], [("P", "Q")]).unwrap();
        let mut model = BinaryModel::new();
        let vars = define_assignment_variables(&host, &pattern, &mut model);
        add_pullback_constraint(&mut model, &vars, &host, &pattern);
        let constraints: Vec<_> = model.constraints_in(Family::Pullback).collect();
        assert_eq!(constraints.len(), 1);
        assert!(constraints[0].expr.terms().is_empty());
        assert!(!constraints[0].is_satisfied_by(&zeros(&model)));
    }

    #[test]
    fn pullback_skips_edgeless_pattern() {
        let pattern = Graph::new(["P", "Q"], Vec::<(&str, &str)>::new()).unwrap();
        let (mut model, vars) = setup(&pattern);
        add_pullback_constraint(&mut model, &vars, &host_abc(), &pattern);
        assert_eq!(model.count_constraints(Family::Pullback), 0);
    }

    // Path A-B-C-D, k = 2: (A,C) and (B,D) are linked only through an
    // interior node, (A,D) not at all.
    fn host_abcd() -> Graph<&'static str> {
        Graph::new(["A", "B", "C", "D"], [("A", "B"), ("B", "C"), ("C", "D")]).unwrap()
    }

    #[test]
    fn literal_connectivity_allows_single_indicators() {
        let host = host_abcd();
        let pattern = Graph::new(["P", "Q"], [("P", "Q")]).unwrap();
        let mut model = BinaryModel::new();
        let vars = define_assignment_variables(&host, &pattern, &mut model);
        let chains = HostChains::collect(&host, 2);
        add_chain_connectivity_constraint(&mut model, &vars, &chains, ChainConnectivity::Literal);

        // Linked pairs: (A,B), (A,C), (B,C), (B,D), (C,D) for each pattern node.
        assert_eq!(model.count_constraints(Family::ChainConnectivity), 10);
        // A-B-C and B-C-D have an interior node.
        assert_eq!(model.count_variables(VarKind::ChainIndicator), 4);

        // At most one indicator per pair, so even all-true assignments pass.
        let all = Assignment::new(vec![true; model.num_variables()]);
        assert!(model
            .constraints_in(Family::ChainConnectivity)
            .all(|c| c.is_satisfied_by(&all)));
    }

    #[test]
    fn binding_connectivity_needs_interior_in_the_fiber() {
        let host = host_abcd();
        let pattern = Graph::new(["P", "Q"], [("P", "Q")]).unwrap();
        let mut model = BinaryModel::new();
        let vars = define_assignment_variables(&host, &pattern, &mut model);
        let chains = HostChains::collect(&host, 2);
        add_well_defined_constraint(&mut model, &vars);
        add_chain_connectivity_constraint(&mut model, &vars, &chains, ChainConnectivity::Binding);

        // A,C -> P without B: the chain A-B-C leaves the fiber.
        let mut a = zeros(&model);
        a.set(vars.get(0, 0), true);
        a.set(vars.get(2, 0), true);
        assert_eq!(
            violated_names(&a, &model, Family::ChainConnectivity),
            vec!["chain_p0_h0-h2"]
        );
        assert!(violated_names(&a, &model, Family::WellDefined).is_empty());

        // Adding B to P closes the chain. Indicators follow their interiors.
        a.set(vars.get(1, 0), true);
        for name in ["gamma_h0-h1-h2_p0", "gamma_h1-h2-h3_p0"] {
            a.set(model.var_by_name(name).unwrap(), true);
        }
        assert!(a.violations(&model).is_empty());

        // Adjacent C,D may share Q through their direct edge.
        let mut b = zeros(&model);
        b.set(vars.get(2, 1), true);
        b.set(vars.get(3, 1), true);
        b.set(model.var_by_name("gamma_h1-h2-h3_p1").unwrap(), true);
        assert!(b.violations(&model).is_empty());
    }
}
