// COIN-OR CBC Solver Adapter, driven through good_lp

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics, Term},
    solver_service::{incumbent, Result, SolverError, SolverService},
    value_objects::{ConstraintType, SolutionStatus as DomainSolutionStatus},
};
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolutionStatus as GoodLpStatus, SolverModel,
    Variable as GoodLpVariable, WithMipGap, WithTimeLimit,
};
use std::time::Instant;

pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

fn linear(terms: &[Term], lp_variables: &[GoodLpVariable]) -> Expression {
    let mut expr: Expression = 0.into();
    for &(i, coeff) in terms {
        if coeff != 0.0 {
            expr += coeff * lp_variables[i];
        }
    }
    expr
}

impl SolverService for CoinCbcSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        // Validate first
        self.validate(problem)?;

        let start_time = Instant::now();

        // Build variables using good_lp
        let mut vars = variables!();
        let lp_variables: Vec<GoodLpVariable> = problem
            .variables
            .iter()
            .map(|var_def| {
                vars.add(
                    variable()
                        .integer()
                        .min(var_def.lower_bound)
                        .max(var_def.upper_bound),
                )
            })
            .collect();

        let objective = linear(&problem.objective.terms, &lp_variables);
        let mut lp_model = vars.minimise(objective).using(coin_cbc::coin_cbc);

        let config = &problem.solver_config;
        lp_model.set_log_level(if config.verbose { 1 } else { 0 });
        if let Some(limit) = config.time_limit {
            lp_model = lp_model.with_time_limit(limit);
        }
        if let Some(gap) = config.gap_tolerance {
            lp_model = lp_model
                .with_mip_gap(gap as f32)
                .map_err(|e| SolverError::InvalidProblem(e.to_string()))?;
        }

        // Build constraints
        for constraint in &problem.constraints {
            let lhs = linear(&constraint.terms, &lp_variables);
            lp_model = match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => lp_model.with(lhs.leq(constraint.bound)),
                ConstraintType::Equal => lp_model.with(lhs.eq(constraint.bound)),
            };
        }

        // Solve the problem
        let solution_result = lp_model.solve();
        let elapsed = start_time.elapsed().as_secs_f64();
        let statistics = SolverStatistics::for_problem(problem, elapsed * 1000.0);

        match solution_result {
            Ok(sol) => {
                let variable_values: Vec<f64> =
                    lp_variables.iter().map(|&var| sol.value(var)).collect();

                let (status, message) = match sol.status() {
                    GoodLpStatus::Optimal => {
                        (DomainSolutionStatus::Optimal, "Optimal solution found")
                    }
                    GoodLpStatus::TimeLimit => (DomainSolutionStatus::TimeLimit, "Time limit reached"),
                    GoodLpStatus::GapLimit => (DomainSolutionStatus::Feasible, "Stopped on gap"),
                };

                Ok(incumbent(problem, variable_values, status, message)?.with_statistics(statistics))
            }
            Err(ResolutionError::Infeasible) => Ok(DomainSolution::new(
                DomainSolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            )
            .with_statistics(statistics)),
            Err(ResolutionError::Unbounded) => Ok(DomainSolution::new(
                DomainSolutionStatus::Unbounded,
                "Problem is unbounded: objective can be improved infinitely",
            )
            .with_statistics(statistics)),
            Err(ResolutionError::Other("Stopped")) => Ok(DomainSolution::new(
                DomainSolutionStatus::TimeLimit,
                "CBC stopped before finding an incumbent",
            )
            .with_statistics(statistics)),
            Err(e) => Err(SolverError::ExecutionFailed(format!("{:?}", e))),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
