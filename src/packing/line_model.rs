use crate::domain::{Constraint, OptimizationProblem, SolverConfig};

use super::config::{PackingConfig, LINE_COLOR_CAP};
use super::error::{PackingError, Result};
use super::model::{ObjectiveKind, PackingModel, Topology, VariableLayout};
use super::Cell;

/// Number of window constraints the path model emits
pub fn window_constraint_count(n: usize, colors: usize) -> usize {
    (1..=colors).map(|j| n.saturating_sub(j)).sum()
}

/// Builds the packing-coloring model of a path on `n` vertices
///
/// On a path the packing ball of color `j` is an interval, so every window of
/// `j + 1` consecutive vertices holds color `j` at most once.
#[derive(Debug, Clone)]
pub struct LineModelBuilder {
    n: usize,
    color_cap: usize,
    objective: ObjectiveKind,
    solver_config: SolverConfig,
}

impl LineModelBuilder {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            color_cap: LINE_COLOR_CAP,
            objective: ObjectiveKind::ColorSum,
            solver_config: SolverConfig::default(),
        }
    }

    pub fn from_config(n: usize, config: &PackingConfig) -> Self {
        Self::new(n)
            .with_color_cap(config.line_color_cap)
            .with_objective(config.objective)
            .with_solver_config(
                SolverConfig::default()
                    .with_backend(config.backend)
                    .with_time_limit(config.line_time_limit)
                    .with_gap_tolerance(config.gap_tolerance)
                    .with_verbose(config.verbose),
            )
    }

    pub fn with_color_cap(mut self, cap: usize) -> Self {
        self.color_cap = cap;
        self
    }

    pub fn with_objective(mut self, objective: ObjectiveKind) -> Self {
        self.objective = objective;
        self
    }

    pub fn with_solver_config(mut self, config: SolverConfig) -> Self {
        self.solver_config = config;
        self
    }

    /// `min(n, cap)`
    pub fn colors(&self) -> usize {
        self.n.min(self.color_cap)
    }

    pub fn build(&self) -> Result<PackingModel> {
        let n = self.n;
        if n == 0 || self.color_cap == 0 {
            return Err(PackingError::InvalidArgument(format!(
                "path length and color cap must be at least 1 (n={}, cap={})",
                n, self.color_cap
            )));
        }

        let layout = VariableLayout {
            topology: Topology::Line,
            n,
            colors: self.colors(),
        };

        let mut constraints =
            Vec::with_capacity(window_constraint_count(n, layout.colors) + layout.num_cells());

        for j in 1..=layout.colors {
            for start in 1..=n.saturating_sub(j) {
                let window = (start..=start + j).map(|i| layout.variable(Cell::on_path(i), j));
                constraints.push(
                    Constraint::at_most(window, 1.0).with_name(format!("window[{},{}]", start, j)),
                );
            }
        }

        let distance_constraints = constraints.len();
        constraints.extend(layout.uniqueness_constraints());
        let uniqueness_constraints = constraints.len() - distance_constraints;

        log::debug!(
            "line model n={}: {} variables, {} window + {} uniqueness constraints",
            n,
            layout.num_variables(),
            distance_constraints,
            uniqueness_constraints
        );

        let problem = OptimizationProblem::new(layout.variables(), layout.objective(self.objective))
            .with_name(format!("packing-line-{}", n))
            .with_description(format!(
                "Packing coloring of the path on {} vertices with colors 1..={}",
                n, layout.colors
            ))
            .with_constraints(constraints)
            .with_config(self.solver_config.clone());

        Ok(PackingModel {
            layout,
            problem,
            distance_constraints,
            uniqueness_constraints,
        })
    }
}
