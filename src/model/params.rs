use super::error::ModelError;

/// How the chain-connectivity family turns chain indicators into a constraint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChainConnectivity {
    /// `x[a,j] + x[b,j] + Σγ − 1 ≤ 2`, the unmodified inequality. It only
    /// cuts off assignments where several chain indicators hold at once.
    Literal,
    /// `x[a,j] + x[b,j] − Σγ − d ≤ 1`, with `d` = 1 when host nodes `a` and
    /// `b` are adjacent: both may sit in the fiber of pattern node `j` only if
    /// they are adjacent or the whole interior of a connecting chain is in
    /// that fiber too.
    #[default]
    Binding,
}

/// Bound parameters of one model-construction call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmbeddingParams {
    /// Lower bound on the total number of true assignment variables.
    pub min_size: u32,
    /// Upper bound on the total number of true assignment variables.
    pub max_size: u32,
    /// Lower bound on every fiber's size. Must be at least one.
    pub fiber_min: u32,
    /// Upper bound on every fiber's size.
    pub fiber_max: u32,
    /// `k`: longest chain, in host edges, considered by the refinement and
    /// connectivity families. Path enumeration is exponential in `k`.
    pub max_chain_length: u32,
    pub chain_connectivity: ChainConnectivity,
}

impl EmbeddingParams {
    /// Checks the parameter ranges.
    ///
    /// # Errors
    /// Returns `ModelError::ParameterOutOfRange` if `min_size > max_size`,
    /// `fiber_min > fiber_max`, `fiber_min == 0`, or `max_chain_length < 1`.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.min_size > self.max_size {
            return Err(ModelError::ParameterOutOfRange {
                name: "min_size",
                reason: format!(
                    "min_size ({}) exceeds max_size ({})",
                    self.min_size, self.max_size
                ),
            });
        }
        if self.fiber_min == 0 {
            return Err(ModelError::ParameterOutOfRange {
                name: "fiber_min",
                reason: "every pattern node needs a non-empty fiber, fiber_min must be >= 1"
                    .to_string(),
            });
        }
        if self.fiber_min > self.fiber_max {
            return Err(ModelError::ParameterOutOfRange {
                name: "fiber_min",
                reason: format!(
                    "fiber_min ({}) exceeds fiber_max ({})",
                    self.fiber_min, self.fiber_max
                ),
            });
        }
        if self.max_chain_length < 1 {
            return Err(ModelError::ParameterOutOfRange {
                name: "max_chain_length",
                reason: "k must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
