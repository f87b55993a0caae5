use super::value_objects::{ConstraintType, SolutionStatus, SolverBackend};

/// A `(variable index, coefficient)` pair of a sparse linear expression
pub type Term = (usize, f64);

/// Decision variable in an optimization problem
///
/// Every variable the packing models declare is a 0/1 integer column.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub name: String,
}

impl Variable {
    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            lower_bound: 0.0,
            upper_bound: 1.0,
            name: name.into(),
        }
    }
}

/// Linear objective, always minimized
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectiveFunction {
    pub terms: Vec<Term>,
}

impl ObjectiveFunction {
    pub fn minimize(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Evaluate the objective at the given variable values
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(i, c)| c * values.get(i).copied().unwrap_or(0.0))
            .sum()
    }
}

/// Sparse linear constraint on variables
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub constraint_type: ConstraintType,
    pub terms: Vec<Term>,
    pub bound: f64,
    pub name: String,
}

impl Constraint {
    pub fn new(constraint_type: ConstraintType, terms: Vec<Term>, bound: f64) -> Self {
        Self {
            constraint_type,
            terms,
            bound,
            name: String::new(),
        }
    }

    /// `Σ x_i ≤ bound` over the given variable indices
    pub fn at_most(indices: impl IntoIterator<Item = usize>, bound: f64) -> Self {
        Self::new(
            ConstraintType::LessThanOrEqual,
            indices.into_iter().map(|i| (i, 1.0)).collect(),
            bound,
        )
    }

    /// `Σ x_i = bound` over the given variable indices
    pub fn exactly(indices: impl IntoIterator<Item = usize>, bound: f64) -> Self {
        Self::new(
            ConstraintType::Equal,
            indices.into_iter().map(|i| (i, 1.0)).collect(),
            bound,
        )
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Amount by which `values` violate this constraint (0 when satisfied)
    pub fn violation(&self, values: &[f64]) -> f64 {
        let lhs: f64 = self
            .terms
            .iter()
            .map(|&(i, c)| c * values.get(i).copied().unwrap_or(0.0))
            .sum();
        match self.constraint_type {
            ConstraintType::LessThanOrEqual => (lhs - self.bound).max(0.0),
            ConstraintType::Equal => (lhs - self.bound).abs(),
        }
    }
}

/// Configuration for the solver
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    /// Wall-clock limit in seconds
    pub time_limit: Option<f64>,
    /// Relative MIP gap at which the solver may stop
    pub gap_tolerance: Option<f64>,
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::Auto,
            time_limit: None,
            gap_tolerance: None,
            verbose: false,
        }
    }
}

impl SolverConfig {
    pub fn with_backend(mut self, backend: SolverBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_time_limit(mut self, seconds: Option<f64>) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn with_gap_tolerance(mut self, gap: Option<f64>) -> Self {
        self.gap_tolerance = gap;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Complete optimization problem
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationProblem {
    pub name: String,
    pub description: String,
    pub objective: ObjectiveFunction,
    pub constraints: Vec<Constraint>,
    pub variables: Vec<Variable>,
    pub solver_config: SolverConfig,
}

impl OptimizationProblem {
    pub fn new(variables: Vec<Variable>, objective: ObjectiveFunction) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            objective,
            constraints: Vec::new(),
            variables,
            solver_config: SolverConfig::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.solver_config = config;
        self
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Largest violation of any constraint or variable bound
    pub fn max_violation(&self, values: &[f64]) -> f64 {
        let bounds = self
            .variables
            .iter()
            .zip(values)
            .map(|(v, &x)| (v.lower_bound - x).max(x - v.upper_bound).max(0.0));
        let rows = self.constraints.iter().map(|c| c.violation(values));
        bounds.chain(rows).fold(0.0, f64::max)
    }
}

/// Statistics about the solve process
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub solve_time_ms: f64,
    pub num_variables: u32,
    pub num_constraints: u32,
}

impl SolverStatistics {
    pub fn for_problem(problem: &OptimizationProblem, solve_time_ms: f64) -> Self {
        Self {
            solve_time_ms,
            num_variables: problem.num_variables() as u32,
            num_constraints: problem.num_constraints() as u32,
        }
    }
}

/// Solution to an optimization problem
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolutionStatus,
    pub objective_value: Option<f64>,
    /// Column values; empty when the solver produced no incumbent
    pub variable_values: Vec<f64>,
    pub message: String,
    pub statistics: SolverStatistics,
}

impl Solution {
    pub fn new(status: SolutionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            objective_value: None,
            variable_values: Vec::new(),
            message: message.into(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn optimal(value: f64, variable_values: Vec<f64>) -> Self {
        Self::with_incumbent(SolutionStatus::Optimal, value, variable_values)
            .with_message("Optimal solution found")
    }

    /// A solution carrying values whose optimality may not be proven
    pub fn with_incumbent(status: SolutionStatus, value: f64, variable_values: Vec<f64>) -> Self {
        Self {
            status,
            objective_value: Some(value),
            variable_values,
            message: String::new(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_statistics(mut self, statistics: SolverStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    /// True when the solver returned an assignment that can be decoded
    pub fn has_incumbent(&self) -> bool {
        !self.variable_values.is_empty()
            && !matches!(
                self.status,
                SolutionStatus::Infeasible | SolutionStatus::Unbounded
            )
    }
}
