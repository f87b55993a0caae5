// Domain service interface for solving optimization problems
// Any MILP backend plugs in behind this trait; the packing models never see a concrete solver

use super::models::{OptimizationProblem, Solution};
use super::value_objects::SolutionStatus;

/// Column values further than this from satisfying the model are not an incumbent
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Domain service interface for optimization solvers
///
/// Implementations receive a fully assembled problem and report either a
/// solution (possibly without values, see [`Solution::has_incumbent`]) or an
/// error when the backend itself fails.
pub trait SolverService: Send + Sync {
    /// Solve an optimization problem
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution>;

    /// Validate a problem without solving it
    fn validate(&self, problem: &OptimizationProblem) -> Result<()> {
        let mut errors = Vec::new();
        let num_vars = problem.num_variables();

        if num_vars == 0 {
            errors.push("Problem must declare at least one variable".to_string());
        }

        if let Some(&(i, _)) = problem.objective.terms.iter().find(|(i, _)| *i >= num_vars) {
            errors.push(format!(
                "Objective references variable {} but problem has {} variables",
                i, num_vars
            ));
        }

        for (c, constraint) in problem.constraints.iter().enumerate() {
            if let Some(&(i, _)) = constraint.terms.iter().find(|(i, _)| *i >= num_vars) {
                errors.push(format!(
                    "Constraint {} '{}' references variable {} but problem has {} variables",
                    c, constraint.name, i, num_vars
                ));
            }
        }

        for (i, var) in problem.variables.iter().enumerate() {
            if var.lower_bound > var.upper_bound {
                errors.push(format!(
                    "Variable {} '{}' has lower bound ({}) > upper bound ({})",
                    i, var.name, var.lower_bound, var.upper_bound
                ));
            }
        }

        if let Some(limit) = problem.solver_config.time_limit {
            if limit.is_nan() || limit <= 0.0 {
                errors.push(format!("Time limit must be positive, got {}", limit));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Get the name of this solver backend
    fn name(&self) -> &str;

    /// Check if this solver supports mixed-integer programming
    fn supports_mip(&self) -> bool;
}

/// Wrap the columns a backend reported, keeping them only if they satisfy the model
///
/// A MIP stopped on a limit may hand back LP or zero columns without having
/// found an incumbent; those become a solution without values. A backend that
/// claims optimality for columns violating the model is a backend failure.
pub fn incumbent(
    problem: &OptimizationProblem,
    values: Vec<f64>,
    status: SolutionStatus,
    message: &str,
) -> Result<Solution> {
    let violation = if values.len() == problem.num_variables() {
        problem.max_violation(&values)
    } else {
        f64::INFINITY
    };

    if violation <= FEASIBILITY_TOLERANCE {
        let value = problem.objective.evaluate(&values);
        return Ok(Solution::with_incumbent(status, value, values)
            .with_message(format!("{} for '{}'", message, problem.name)));
    }

    if status == SolutionStatus::Optimal {
        return Err(SolverError::ExecutionFailed(format!(
            "solver reported an optimum for '{}' that violates the model by {}",
            problem.name, violation
        )));
    }

    Ok(Solution::new(status, format!("{} without an incumbent", message)))
}
