// HiGHS Solver Adapter
// Implements the SolverService interface for HiGHS
// Translates the sparse domain model into a HiGHS RowProblem

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{incumbent, Result, SolverError, SolverService},
    value_objects::{ConstraintType, SolutionStatus as DomainSolutionStatus},
};
use highs::{HighsModelStatus, RowProblem, Sense};
use std::time::Instant;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        // Validate first
        self.validate(problem)?;

        let start_time = Instant::now();

        let mut objective = vec![0.0; problem.num_variables()];
        for &(i, coeff) in &problem.objective.terms {
            objective[i] += coeff;
        }

        // Add variables
        let mut pb = RowProblem::default();
        let cols: Vec<_> = problem
            .variables
            .iter()
            .zip(&objective)
            .map(|(var, &coeff)| pb.add_integer_column(coeff, var.lower_bound..=var.upper_bound))
            .collect();

        // Add constraints
        for constraint in &problem.constraints {
            let terms: Vec<_> = constraint
                .terms
                .iter()
                .map(|&(i, coeff)| (cols[i], coeff))
                .collect();

            match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => {
                    pb.add_row(..=constraint.bound, &terms);
                }
                ConstraintType::Equal => {
                    pb.add_row(constraint.bound..=constraint.bound, &terms);
                }
            }
        }

        let config = &problem.solver_config;
        let mut model = pb.optimise(Sense::Minimise);
        model.set_option("output_flag", config.verbose);
        if let Some(limit) = config.time_limit {
            model.set_option("time_limit", limit);
        }
        if let Some(gap) = config.gap_tolerance {
            model.set_option("mip_rel_gap", gap);
        }

        let solved = model.solve();
        let solve_time = start_time.elapsed().as_secs_f64() * 1000.0;
        let statistics = SolverStatistics::for_problem(problem, solve_time);

        let columns = || solved.get_solution().columns().to_vec();

        match solved.status() {
            HighsModelStatus::Optimal => Ok(incumbent(
                problem,
                columns(),
                DomainSolutionStatus::Optimal,
                "Optimal solution found",
            )?
            .with_statistics(statistics)),
            HighsModelStatus::ReachedTimeLimit => Ok(incumbent(
                problem,
                columns(),
                DomainSolutionStatus::TimeLimit,
                "Time limit reached",
            )?
            .with_statistics(statistics)),
            HighsModelStatus::ReachedIterationLimit => Ok(incumbent(
                problem,
                columns(),
                DomainSolutionStatus::IterationLimit,
                "Iteration limit reached",
            )?
            .with_statistics(statistics)),
            HighsModelStatus::ObjectiveBound | HighsModelStatus::ObjectiveTarget => Ok(incumbent(
                problem,
                columns(),
                DomainSolutionStatus::Feasible,
                "Stopped at objective bound",
            )?
            .with_statistics(statistics)),
            HighsModelStatus::Infeasible => Ok(DomainSolution::new(
                DomainSolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            )
            .with_statistics(statistics)),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                Ok(DomainSolution::new(
                    DomainSolutionStatus::Unbounded,
                    "Problem is unbounded: objective can be improved infinitely",
                )
                .with_statistics(statistics))
            }
            status => Err(SolverError::ExecutionFailed(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
