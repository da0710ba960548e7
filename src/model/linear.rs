// linear.rs
// ──────────────────────────────────────────────────────────────────────────────
// Solver-independent 0/1 model: binary variables, integer linear expressions
// over them, and linear constraints.  The constraint generator appends to a
// single `BinaryModel`; a solver backend translates it afterwards.
// ──────────────────────────────────────────────────────────────────────────────
use std::fmt;
use std::io::Write;

/// Handle to a binary variable registered in a `BinaryModel`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a variable stands for in the embedding model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// `x[v,w]`: host node `v` lies in the fiber of pattern node `w`.
    Assignment,
    /// Product indicator for a host edge lying over a pattern edge, same orientation.
    PullbackParallel,
    /// Product indicator for a host edge lying over a pattern edge, swapped orientation.
    PullbackOpposite,
    /// Conjunction indicator: the interior of a host chain lies in one fiber.
    ChainIndicator,
}

/// Constraint family a constraint was emitted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Size,
    WellDefined,
    FiberSize,
    FiberRefinement,
    Pullback,
    ChainConnectivity,
    /// Exact linearization of a product or conjunction of binaries.
    Linearization,
}

impl Family {
    /// The generator families in the order the builder runs them by default.
    pub const DEFAULT_ORDER: [Family; 6] = [
        Family::Size,
        Family::WellDefined,
        Family::FiberSize,
        Family::FiberRefinement,
        Family::Pullback,
        Family::ChainConnectivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Size => "size",
            Family::WellDefined => "well_defined",
            Family::FiberSize => "fiber_size",
            Family::FiberRefinement => "fiber_refinement",
            Family::Pullback => "pullback",
            Family::ChainConnectivity => "chain_connectivity",
            Family::Linearization => "linearization",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct Variable {
    pub name: String,
    pub kind: VarKind,
}

/// An integer linear expression `Σ cᵢ·vᵢ + constant` over binary variables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(VarId, i64)>,
    constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `coeff·var`. Repeated variables are merged.
    pub fn add_term(&mut self, var: VarId, coeff: i64) {
        if let Some((_, c)) = self.terms.iter_mut().find(|(v, _)| *v == var) {
            *c += coeff;
        } else {
            self.terms.push((var, coeff));
        }
    }

    pub fn add_var(&mut self, var: VarId) {
        self.add_term(var, 1);
    }

    pub fn add_constant(&mut self, value: i64) {
        self.constant += value;
    }

    /// Builder-style `add_term`.
    pub fn with_term(mut self, var: VarId, coeff: i64) -> Self {
        self.add_term(var, coeff);
        self
    }

    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    pub fn constant_term(&self) -> i64 {
        self.constant
    }

    /// Evaluates the expression under a full assignment.
    pub fn evaluate(&self, assignment: &Assignment) -> i64 {
        self.terms
            .iter()
            .filter(|(v, _)| assignment.value(*v))
            .map(|(_, c)| *c)
            .sum::<i64>()
            + self.constant
    }
}

impl FromIterator<VarId> for LinearExpr {
    /// Sums the given variables with coefficient one.
    fn from_iter<T: IntoIterator<Item = VarId>>(iter: T) -> Self {
        let mut expr = LinearExpr::new();
        for v in iter {
            expr.add_var(v);
        }
        expr
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    Le,
    Ge,
}

impl Sense {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sense::Le => "<=",
            Sense::Ge => ">=",
        }
    }
}

/// `expr (<= | >=) rhs`.
#[derive(Clone, Debug)]
pub struct LinearConstraint {
    pub name: String,
    pub family: Family,
    pub expr: LinearExpr,
    pub sense: Sense,
    pub rhs: i64,
}

impl LinearConstraint {
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        let lhs = self.expr.evaluate(assignment);
        match self.sense {
            Sense::Le => lhs <= self.rhs,
            Sense::Ge => lhs >= self.rhs,
        }
    }
}

/// A value for every variable of a model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    pub fn new(values: Vec<bool>) -> Self {
        Self { values }
    }

    /// Value of `var`; variables outside the assignment read as false.
    pub fn value(&self, var: VarId) -> bool {
        self.values.get(var.0).copied().unwrap_or(false)
    }

    /// Constraints of `model` that this assignment violates.
    pub fn violations<'m>(&self, model: &'m BinaryModel) -> Vec<&'m LinearConstraint> {
        model
            .constraints()
            .iter()
            .filter(|c| !c.is_satisfied_by(self))
            .collect()
    }
}

/// The variable and constraint registry of one model-construction call.
#[derive(Clone, Debug, Default)]
pub struct BinaryModel {
    variables: Vec<Variable>,
    constraints: Vec<LinearConstraint>,
}

impl BinaryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new binary variable.
    pub fn add_binary(&mut self, name: impl Into<String>, kind: VarKind) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable {
            name: name.into(),
            kind,
        });
        id
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        family: Family,
        expr: LinearExpr,
        sense: Sense,
        rhs: i64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            family,
            expr,
            sense,
            rhs,
        });
    }

    /// Registers `g = a·b` and returns `g`.
    pub fn add_product(&mut self, name: impl Into<String>, kind: VarKind, a: VarId, b: VarId) -> VarId {
        let name = name.into();
        let g = self.add_binary(name.clone(), kind);
        self.linearize_and(&name, g, &[a, b]);
        g
    }

    /// Registers `g = f₁ ∧ … ∧ fₙ` and returns `g`, or `None` when there are
    /// no factors.
    pub fn add_conjunction(
        &mut self,
        name: impl Into<String>,
        kind: VarKind,
        factors: &[VarId],
    ) -> Option<VarId> {
        if factors.is_empty() {
            return None;
        }
        let name = name.into();
        let g = self.add_binary(name.clone(), kind);
        self.linearize_and(&name, g, factors);
        Some(g)
    }

    // g <= f_i for every factor, and g >= sum(f) - (n - 1).
    fn linearize_and(&mut self, name: &str, g: VarId, factors: &[VarId]) {
        for (i, &f) in factors.iter().enumerate() {
            self.add_constraint(
                format!("{}_le_{}", name, i),
                Family::Linearization,
                LinearExpr::new().with_term(g, 1).with_term(f, -1),
                Sense::Le,
                0,
            );
        }
        let mut lower: LinearExpr = factors.iter().copied().collect();
        lower.add_term(g, -1);
        self.add_constraint(
            format!("{}_ge", name),
            Family::Linearization,
            lower,
            Sense::Le,
            factors.len() as i64 - 1,
        );
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.0)
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn count_variables(&self, kind: VarKind) -> usize {
        self.variables.iter().filter(|v| v.kind == kind).count()
    }

    pub fn count_constraints(&self, family: Family) -> usize {
        self.constraints_in(family).count()
    }

    pub fn constraints_in(&self, family: Family) -> impl Iterator<Item = &LinearConstraint> + '_ {
        self.constraints.iter().filter(move |c| c.family == family)
    }

    /// Renders one constraint with variable names, e.g. `x_h0_p0 + x_h0_p1 <= 1`.
    pub fn format_constraint(&self, constraint: &LinearConstraint) -> String {
        let mut out = String::new();
        for (i, (var, coeff)) in constraint.expr.terms().iter().enumerate() {
            let name = self
                .variable(*var)
                .map(|v| v.name.as_str())
                .unwrap_or("?");
            let sign = if *coeff < 0 { "-" } else { "+" };
            if i == 0 {
                if *coeff < 0 {
                    out.push('-');
                }
            } else {
                out.push_str(&format!(" {} ", sign));
            }
            if coeff.abs() != 1 {
                out.push_str(&format!("{} ", coeff.abs()));
            }
            out.push_str(name);
        }
        let constant = constraint.expr.constant_term();
        if constraint.expr.terms().is_empty() {
            out.push_str(&constant.to_string());
        } else if constant != 0 {
            let sign = if constant < 0 { "-" } else { "+" };
            out.push_str(&format!(" {} {}", sign, constant.abs()));
        }
        format!("{} {} {}", out, constraint.sense.as_str(), constraint.rhs)
    }

    /// Writes a readable listing of every variable and constraint.
    pub fn write_to(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "=== VARIABLES ({}) ===", self.variables.len())?;
        for (i, v) in self.variables.iter().enumerate() {
            writeln!(writer, "v{} {:?} {}", i, v.kind, v.name)?;
        }
        writeln!(writer)?;
        writeln!(writer, "=== CONSTRAINTS ({}) ===", self.constraints.len())?;
        for c in &self.constraints {
            writeln!(
                writer,
                "[{}] {}: {}",
                c.family,
                c.name,
                self.format_constraint(c)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl Assignment {
    pub fn set(&mut self, var: VarId, value: bool) {
        if var.0 >= self.values.len() {
            self.values.resize(var.0 + 1, false);
        }
        self.values[var.0] = value;
    }
}

#[cfg(test)]
impl BinaryModel {
    /// Looks a variable up by name. Linear in the number of variables.
    pub fn var_by_name(&self, name: &str) -> Option<VarId> {
        self.variables.iter().position(|v| v.name == name).map(VarId)
    }
}
