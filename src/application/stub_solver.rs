// Scripted solver used by unit tests in place of a real MILP backend

use crate::domain::{OptimizationProblem, Result, Solution, SolutionStatus, SolverService};
use crate::packing::{Cell, VariableLayout};

type Script = dyn Fn(&OptimizationProblem) -> Result<Solution> + Send + Sync;

pub(crate) struct StubSolver {
    script: Box<Script>,
    supports_mip: bool,
}

impl StubSolver {
    pub(crate) fn new(
        script: impl Fn(&OptimizationProblem) -> Result<Solution> + Send + Sync + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
            supports_mip: true,
        }
    }

    /// Always answers with the given row-major coloring and status
    pub(crate) fn answering(
        layout: VariableLayout,
        colors: Vec<u32>,
        status: SolutionStatus,
    ) -> Self {
        Self::new(move |problem| {
            let values = one_hot(&layout, &colors);
            let value = problem.objective.evaluate(&values);
            Ok(Solution::with_incumbent(status, value, values))
        })
    }

    pub(crate) fn without_mip(mut self) -> Self {
        self.supports_mip = false;
        self
    }
}

pub(crate) fn one_hot(layout: &VariableLayout, colors: &[u32]) -> Vec<f64> {
    let mut values = vec![0.0; layout.num_variables()];
    let cells: Vec<Cell> = layout.cells();
    for (cell, &k) in cells.into_iter().zip(colors) {
        values[layout.variable(cell, k as usize)] = 1.0;
    }
    values
}

impl SolverService for StubSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution> {
        self.validate(problem)?;
        (self.script)(problem)
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn supports_mip(&self) -> bool {
        self.supports_mip
    }
}
