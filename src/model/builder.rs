use std::fmt::Debug;
use std::hash::Hash;

use super::constraints::{
    add_chain_connectivity_constraint, add_fiber_refinement, add_fiber_size_constraint,
    add_pullback_constraint, add_size_constraint, add_well_defined_constraint,
};
use super::error::ModelError;
use super::linear::{BinaryModel, Family, VarKind};
use super::params::EmbeddingParams;
use super::variables::{define_assignment_variables, AssignmentVars};
use crate::graph::{HostChains, HostGraph, PatternGraph};

/// A finished model together with the handles needed to read a solution.
#[derive(Clone, Debug)]
pub struct EmbeddingModel {
    pub model: BinaryModel,
    pub assignment: AssignmentVars,
    pub params: EmbeddingParams,
}

/// Variable and constraint counts of a built model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModelStats {
    pub variables: usize,
    pub assignment_vars: usize,
    pub pullback_vars: usize,
    pub chain_indicator_vars: usize,
    pub constraints: usize,
    pub linearization_constraints: usize,
}

impl EmbeddingModel {
    pub fn stats(&self) -> ModelStats {
        ModelStats {
            variables: self.model.num_variables(),
            assignment_vars: self.model.count_variables(VarKind::Assignment),
            pullback_vars: self.model.count_variables(VarKind::PullbackParallel)
                + self.model.count_variables(VarKind::PullbackOpposite),
            chain_indicator_vars: self.model.count_variables(VarKind::ChainIndicator),
            constraints: self.model.num_constraints(),
            linearization_constraints: self.model.count_constraints(Family::Linearization),
        }
    }
}

/// Builds the embedding model for one (host, pattern, parameters) triple.
///
/// Parameters are validated in `new`, before any variable exists. The model
/// itself is exclusively owned by the build call and handed to each family in
/// turn.
pub struct EmbeddingModelBuilder<'g, H, P> {
    host: &'g HostGraph<H>,
    pattern: &'g PatternGraph<P>,
    params: EmbeddingParams,
}

impl<'g, H, P> EmbeddingModelBuilder<'g, H, P>
where
    H: Clone + Eq + Hash + Debug,
    P: Clone + Eq + Hash + Debug,
{
    /// # Errors
    /// Returns `ModelError::ParameterOutOfRange` if `params` fails validation.
    pub fn new(
        host: &'g HostGraph<H>,
        pattern: &'g PatternGraph<P>,
        params: EmbeddingParams,
    ) -> Result<Self, ModelError> {
        params.validate()?;
        Ok(Self {
            host,
            pattern,
            params,
        })
    }

    /// Runs every family in `Family::DEFAULT_ORDER`.
    pub fn build(&self) -> EmbeddingModel {
        self.build_with(&Family::DEFAULT_ORDER)
    }

    /// Runs the given families in the given order. `Family::Linearization`
    /// entries are ignored; linearizations are emitted by the families that
    /// create auxiliary variables.
    pub fn build_with(&self, families: &[Family]) -> EmbeddingModel {
        let mut model = BinaryModel::new();
        let vars = define_assignment_variables(self.host, self.pattern, &mut model);

        // Enumerated once and shared by the two families that need it.
        let needs_chains = families
            .iter()
            .any(|f| matches!(f, Family::FiberRefinement | Family::ChainConnectivity));
        let chains = if needs_chains {
            HostChains::collect(self.host, self.params.max_chain_length as usize)
        } else {
            HostChains::default()
        };

        for family in families {
            match family {
                Family::Size => add_size_constraint(&mut model, &vars, &self.params),
                Family::WellDefined => add_well_defined_constraint(&mut model, &vars),
                Family::FiberSize => add_fiber_size_constraint(&mut model, &vars, &self.params),
                Family::FiberRefinement => add_fiber_refinement(&mut model, &vars, &chains),
                Family::Pullback => {
                    add_pullback_constraint(&mut model, &vars, self.host, self.pattern)
                }
                Family::ChainConnectivity => add_chain_connectivity_constraint(
                    &mut model,
                    &vars,
                    &chains,
                    self.params.chain_connectivity,
                ),
                Family::Linearization => {}
            }
        }

        EmbeddingModel {
            model,
            assignment: vars,
            params: self.params,
        }
    }
}

/// Validates `params` and builds the full model in the default family order.
///
/// # Arguments
/// * `host` - The graph whose nodes are partitioned into fibers.
/// * `pattern` - The graph each fiber stands in for one node of.
/// * `params` - Size, fiber and chain-length bounds.
///
/// # Returns
/// The finished `EmbeddingModel`, or `ModelError::ParameterOutOfRange` if
/// `params` is invalid. No variable is created in the error case.
pub fn build_embedding_model<H, P>(
    host: &HostGraph<H>,
    pattern: &PatternGraph<P>,
    params: EmbeddingParams,
) -> Result<EmbeddingModel, ModelError>
where
    H: Clone + Eq + Hash + Debug,
    P: Clone + Eq + Hash + Debug,
{
    Ok(EmbeddingModelBuilder::new(host, pattern, params)?.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::model::params::ChainConnectivity;

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

    #[test]
    fn builds_path_over_single_edge() {
        let host = Graph::new(["A", "B", "C"], [("A", "B"), ("B", "C")]).unwrap();
        let pattern = Graph::new(["P", "Q"], [("P", "Q")]).unwrap();
        let built = build_embedding_model(&host, &pattern, params()).unwrap();
        let stats = built.stats();

        assert_eq!(stats.assignment_vars, 6);
        // 1 pattern edge x 2 host edges x (parallel, opposite).
        assert_eq!(stats.pullback_vars, 4);
        // k = 1: every chain is a single host edge.
        assert_eq!(stats.chain_indicator_vars, 0);
        assert_eq!(stats.variables, 10);
        assert_eq!(built.model.count_constraints(Family::Size), 2);
        assert_eq!(built.model.count_constraints(Family::WellDefined), 3);
        assert_eq!(built.model.count_constraints(Family::FiberSize), 4);
        // A and C are two edges apart: one row per pattern node.
        assert_eq!(built.model.count_constraints(Family::FiberRefinement), 2);
        assert_eq!(built.model.count_constraints(Family::Pullback), 3);
        // (A,B) and (B,C) for each pattern node.
        assert_eq!(built.model.count_constraints(Family::ChainConnectivity), 4);
        assert_eq!(stats.linearization_constraints, 4 * 3);
    }

    #[test]
    fn infeasible_bounds_still_build() {
        let host = Graph::new(["A", "B", "C"], [("A", "B"), ("B", "C")]).unwrap();
        let pattern = Graph::new(["P", "Q"], Vec::<(&str, &str)>::new()).unwrap();
        let p = EmbeddingParams {
            min_size: 3,
            max_size: 3,
            fiber_min: 2,
            fiber_max: 2,
            ..params()
        };
        let built = build_embedding_model(&host, &pattern, p).unwrap();
        // No pattern edge to realize.
        assert_eq!(built.model.count_constraints(Family::Pullback), 0);
        assert_eq!(built.stats().pullback_vars, 0);
        assert_eq!(built.model.count_constraints(Family::FiberRefinement), 2);
    }

    #[test]
    fn rejects_parameters_before_building() {
        let host = Graph::new(["A"], Vec::<(&str, &str)>::new()).unwrap();
        let pattern = Graph::new(["P"], Vec::<(&str, &str)>::new()).unwrap();
        let p = EmbeddingParams {
            max_chain_length: 0,
            ..params()
        };
        assert!(matches!(
            EmbeddingModelBuilder::new(&host, &pattern, p),
            Err(ModelError::ParameterOutOfRange { name: "max_chain_length", .. })
        ));
    }

    #[test]
    fn caller_chooses_families() {
        let host = Graph::new(["A", "B"], [("A", "B")]).unwrap();
        let pattern = Graph::new(["P", "Q"], [("P", "Q")]).unwrap();
        let builder = EmbeddingModelBuilder::new(&host, &pattern, params()).unwrap();
        let built = builder.build_with(&[Family::WellDefined, Family::Size]);
        assert_eq!(built.model.num_constraints(), 2 + 2);
        assert_eq!(built.model.constraints()[0].family, Family::WellDefined);
        assert_eq!(built.model.constraints()[2].family, Family::Size);
        assert_eq!(built.stats().pullback_vars, 0);
    }
}
