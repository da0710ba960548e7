use z3::ast::{Bool, Int};
use z3::{Config, Context, SatResult, Solver};

use super::error::SolverError;
use crate::model::{Assignment, BinaryModel, LinearConstraint, Sense};

/// Solver settings chosen by the calling application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverOptions {
    /// Z3 timeout in milliseconds. `None` lets Z3 run to completion.
    pub timeout_ms: Option<u64>,
}

/// Result of a feasibility check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A value for every model variable satisfying all constraints.
    Feasible(Assignment),
    /// The constraints admit no solution. This is a normal result.
    Infeasible,
}

/// Translates a `BinaryModel` into Z3 assertions.
///
/// Every model variable becomes a Z3 `Bool`; each linear constraint becomes an
/// `Int` comparison over `ite(b, c, 0)` terms.
struct Z3ModelTranslator<'ctx> {
    z3_ctx: &'ctx Context,
    /// Z3 constants indexed by `VarId::index`.
    bools: Vec<Bool<'ctx>>,
}

impl<'ctx> Z3ModelTranslator<'ctx> {
    fn new(ctx: &'ctx Context, model: &BinaryModel) -> Self {
        let bools = model
            .variables()
            .iter()
            .map(|v| Bool::new_const(ctx, v.name.as_str()))
            .collect();
        Z3ModelTranslator { z3_ctx: ctx, bools }
    }

    fn translate_constraint(&self, constraint: &LinearConstraint) -> Bool<'ctx> {
        let zero = Int::from_i64(self.z3_ctx, 0);
        // The constant is always the first summand, so `add` never sees an
        // empty slice.
        let mut summands: Vec<Int<'ctx>> =
            vec![Int::from_i64(self.z3_ctx, constraint.expr.constant_term())];
        for (var, coeff) in constraint.expr.terms() {
            let coeff_ast = Int::from_i64(self.z3_ctx, *coeff);
            summands.push(self.bools[var.index()].ite(&coeff_ast, &zero));
        }
        let summand_refs: Vec<&Int<'ctx>> = summands.iter().collect();
        let lhs = Int::add(self.z3_ctx, &summand_refs);
        let rhs = Int::from_i64(self.z3_ctx, constraint.rhs);

        match constraint.sense {
            Sense::Le => lhs.le(&rhs),
            Sense::Ge => lhs.ge(&rhs),
        }
    }

    fn read_assignment(
        &self,
        z3_model: &z3::Model<'ctx>,
        model: &BinaryModel,
    ) -> Result<Assignment, SolverError> {
        let values = self
            .bools
            .iter()
            .zip(model.variables())
            .map(|(b, v)| {
                z3_model
                    .eval(b, true)
                    .and_then(|value| value.as_bool())
                    .ok_or_else(|| SolverError::Evaluation(v.name.clone()))
            })
            .collect::<Result<Vec<bool>, SolverError>>()?;
        Ok(Assignment::new(values))
    }
}

/// Hands `model` to Z3 and reports whether it is feasible.
///
/// # Arguments
/// * `model` - The constraint model; every variable is treated as boolean.
/// * `options` - Solver settings such as the timeout.
///
/// # Returns
/// `SolveOutcome::Feasible` with a value for every model variable, or
/// `SolveOutcome::Infeasible`.
///
/// # Errors
/// Returns `SolverError::Unknown` if Z3 cannot decide (for instance on
/// timeout), and `ModelUnavailable`/`Evaluation` if a satisfiable result
/// cannot be read back.
pub fn solve(model: &BinaryModel, options: &SolverOptions) -> Result<SolveOutcome, SolverError> {
    let mut z3_config = Config::new();
    if let Some(ms) = options.timeout_ms {
        z3_config.set_timeout_msec(ms);
    }
    let z3_ctx = Context::new(&z3_config);
    let translator = Z3ModelTranslator::new(&z3_ctx, model);

    let solver = Solver::new(&z3_ctx);
    for constraint in model.constraints() {
        solver.assert(&translator.translate_constraint(constraint));
    }

    match solver.check() {
        SatResult::Sat => {
            let z3_model = solver.get_model().ok_or(SolverError::ModelUnavailable)?;
            Ok(SolveOutcome::Feasible(
                translator.read_assignment(&z3_model, model)?,
            ))
        }
        SatResult::Unsat => Ok(SolveOutcome::Infeasible),
        SatResult::Unknown => Err(SolverError::Unknown(
            solver
                .get_reason_unknown()
                .unwrap_or_else(|| "Reason unknown".to_string()),
        )),
    }
}
