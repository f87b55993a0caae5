// Orchestration: build a packing model, hand it to a solver, decode and check the result

use std::sync::Arc;

use crate::domain::{Solution, SolutionStatus, SolverError, SolverService};
use crate::packing::error::{PackingError, Result};
use crate::packing::verify::{self, Violation};
use crate::packing::{LineModelBuilder, PackingConfig, PackingModel, SquareGridModelBuilder};

use super::decode;

/// Decoded coloring of a square grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridColoring {
    /// Row-major colors, `rows[r][c]` is cell `(r + 1, c + 1)`
    pub rows: Vec<Vec<u32>>,
    pub status: SolutionStatus,
    /// False when the solver stopped on a limit with an incumbent
    pub proven_optimal: bool,
    pub objective_value: Option<f64>,
}

impl GridColoring {
    pub fn distinct_colors(&self) -> usize {
        verify::distinct_colors(self.rows.iter().flatten())
    }

    pub fn max_color(&self) -> u32 {
        verify::max_color(self.rows.iter().flatten())
    }
}

fn ensure_packing(violations: Vec<Violation>) -> Result<()> {
    match violations.into_iter().next() {
        None => Ok(()),
        Some(v) => Err(PackingError::InvalidColoring {
            color: v.color,
            first: v.first,
            second: v.second,
            distance: v.distance,
        }),
    }
}

/// Runs packing models through a [`SolverService`]
#[derive(Clone)]
pub struct ModelOrchestrator {
    solver: Arc<dyn SolverService>,
    config: PackingConfig,
}

impl ModelOrchestrator {
    pub fn new(solver: Arc<dyn SolverService>) -> Self {
        Self {
            solver,
            config: PackingConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PackingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PackingConfig {
        &self.config
    }

    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    fn run(&self, model: &PackingModel) -> Result<Solution> {
        if !self.solver.supports_mip() {
            return Err(SolverError::SolverNotAvailable(format!(
                "{} cannot solve binary programs",
                self.solver.name()
            ))
            .into());
        }

        let problem = &model.problem;
        log::info!(
            "Solving {} with {} ({} variables, {} constraints)",
            problem.name,
            self.solver.name(),
            problem.num_variables(),
            problem.num_constraints()
        );

        let solution = self.solver.solve(problem)?;
        log::info!(
            "{}: {} in {:.1} ms",
            problem.name,
            solution.status,
            solution.statistics.solve_time_ms
        );
        Ok(solution)
    }

    /// Color the `n × n` grid
    ///
    /// Returns `Ok(None)` when the solver produced no assignment. An
    /// incumbent found before the time limit is returned with
    /// `proven_optimal == false`.
    pub fn solve_grid(&self, n: usize) -> Result<Option<GridColoring>> {
        let model = SquareGridModelBuilder::from_config(n, &self.config).build()?;
        let solution = self.run(&model)?;

        if !solution.has_incumbent() {
            log::warn!("No coloring for the {}x{} grid: {}", n, n, solution.message);
            return Ok(None);
        }
        if !solution.is_optimal() {
            log::warn!(
                "Using best incumbent for the {}x{} grid, optimality not proven ({})",
                n,
                n,
                solution.status
            );
        }

        let rows = decode::decode_grid(&model, &solution)?;
        for row in &rows {
            log::debug!("{:?}", row);
        }
        ensure_packing(verify::grid_violations(&rows))?;

        Ok(Some(GridColoring {
            rows,
            status: solution.status,
            proven_optimal: solution.is_optimal(),
            objective_value: solution.objective_value,
        }))
    }

    /// Color the path on `n` vertices
    ///
    /// Anything short of a proven optimum yields `Ok(None)`.
    pub fn solve_line(&self, n: usize) -> Result<Option<Vec<u32>>> {
        let model = LineModelBuilder::from_config(n, &self.config).build()?;
        let solution = self.run(&model)?;

        if !solution.is_optimal() {
            log::warn!("No optimal coloring for the path on {} vertices: {}", n, solution.status);
            return Ok(None);
        }

        let colors = decode::decode_line(&model, &solution)?;
        ensure_packing(verify::line_violations(&colors))?;
        Ok(Some(colors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stub_solver::{one_hot, StubSolver};
    use crate::domain::incumbent;
    use crate::packing::{Topology, VariableLayout};

    fn square(n: usize) -> VariableLayout {
        VariableLayout {
            topology: Topology::Square,
            n,
            colors: (n * n).min(15),
        }
    }

    fn path(n: usize) -> VariableLayout {
        VariableLayout {
            topology: Topology::Line,
            n,
            colors: n.min(3),
        }
    }

    #[test]
    fn grid_incumbent_is_returned_but_flagged() {
        let stub = StubSolver::answering(square(2), vec![1, 2, 3, 1], SolutionStatus::TimeLimit);
        let coloring = ModelOrchestrator::new(Arc::new(stub))
            .solve_grid(2)
            .unwrap()
            .unwrap();

        assert_eq!(coloring.rows, vec![vec![1, 2], vec![3, 1]]);
        assert!(!coloring.proven_optimal);
        assert_eq!(coloring.status, SolutionStatus::TimeLimit);
        assert_eq!(coloring.objective_value, Some(7.0));
        assert_eq!(coloring.distinct_colors(), 3);
        assert_eq!(coloring.max_color(), 3);
    }

    #[test]
    fn grid_without_incumbent_is_no_solution() {
        let stub = StubSolver::new(|_| Ok(Solution::new(SolutionStatus::Infeasible, "infeasible")));
        let result = ModelOrchestrator::new(Arc::new(stub)).solve_grid(3).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn stopped_solve_with_unusable_columns_is_no_solution() {
        // a MIP stopped on a limit may hand back all-zero columns
        let stub = StubSolver::new(|problem| {
            let zeros = vec![0.0; problem.num_variables()];
            incumbent(problem, zeros, SolutionStatus::TimeLimit, "Time limit reached")
        });
        let orchestrator = ModelOrchestrator::new(Arc::new(stub));
        assert!(orchestrator.solve_grid(3).unwrap().is_none());
        assert_eq!(orchestrator.solve_line(5).unwrap(), None);
    }

    #[test]
    fn gap_stop_is_not_a_proven_path_optimum() {
        let colors = vec![1, 2, 1, 3, 1, 2];
        let stub = StubSolver::new(move |problem| {
            let values = one_hot(&path(6), &colors);
            incumbent(problem, values, SolutionStatus::Feasible, "Stopped on gap")
        });
        let orchestrator = ModelOrchestrator::new(Arc::new(stub));
        assert_eq!(orchestrator.solve_line(6).unwrap(), None);
    }

    #[test]
    fn optimum_that_breaks_the_model_is_a_solver_failure() {
        let stub = StubSolver::new(|problem| {
            let halves = vec![0.5; problem.num_variables()];
            incumbent(problem, halves, SolutionStatus::Optimal, "Optimal solution found")
        });
        let err = ModelOrchestrator::new(Arc::new(stub)).solve_line(4).unwrap_err();
        assert!(matches!(err, PackingError::Solver(SolverError::ExecutionFailed(_))));
    }

    #[test]
    fn grid_model_carries_configured_time_limit() {
        let stub = StubSolver::new(|problem| {
            assert_eq!(problem.solver_config.time_limit, Some(10.0));
            Ok(Solution::new(SolutionStatus::TimeLimit, "no incumbent"))
        });
        assert!(ModelOrchestrator::new(Arc::new(stub)).solve_grid(3).unwrap().is_none());
    }

    #[test]
    fn line_requires_proven_optimum() {
        let colors = vec![1, 2, 1, 3, 1, 2, 1, 3, 1, 2];
        let stub = StubSolver::answering(path(10), colors.clone(), SolutionStatus::TimeLimit);
        assert_eq!(ModelOrchestrator::new(Arc::new(stub)).solve_line(10).unwrap(), None);

        let stub = StubSolver::answering(path(10), colors.clone(), SolutionStatus::Optimal);
        assert_eq!(
            ModelOrchestrator::new(Arc::new(stub)).solve_line(10).unwrap(),
            Some(colors)
        );
    }

    #[test]
    fn invalid_coloring_is_reported_distinctly() {
        let stub = StubSolver::answering(path(4), vec![1, 1, 2, 3], SolutionStatus::Optimal);
        let err = ModelOrchestrator::new(Arc::new(stub)).solve_line(4).unwrap_err();
        assert!(matches!(err, PackingError::InvalidColoring { color: 1, .. }));
    }

    #[test]
    fn decode_failure_is_not_no_solution() {
        let stub = StubSolver::new(|problem| {
            Ok(Solution::optimal(0.0, vec![0.0; problem.num_variables()]))
        });
        let err = ModelOrchestrator::new(Arc::new(stub)).solve_line(5).unwrap_err();
        assert!(matches!(err, PackingError::DecodeFailure { .. }));
    }

    #[test]
    fn solver_errors_propagate() {
        let stub = StubSolver::new(|_| Err(SolverError::ExecutionFailed("boom".into())));
        let err = ModelOrchestrator::new(Arc::new(stub)).solve_grid(2).unwrap_err();
        assert!(matches!(err, PackingError::Solver(SolverError::ExecutionFailed(_))));

        let stub = StubSolver::new(|_| unreachable!()).without_mip();
        let err = ModelOrchestrator::new(Arc::new(stub)).solve_line(2).unwrap_err();
        assert!(matches!(err, PackingError::Solver(SolverError::SolverNotAvailable(_))));
    }
}
