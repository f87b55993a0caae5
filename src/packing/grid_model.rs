use crate::domain::{Constraint, OptimizationProblem, SolverConfig};

use super::config::{PackingConfig, GRID_COLOR_CAP, GRID_TIME_LIMIT_SECS};
use super::error::{PackingError, Result};
use super::model::{ObjectiveKind, PackingModel, Topology, VariableLayout};
use super::neighborhood::NeighborhoodEnumerator;
use super::Cell;

/// Number of region constraints the square model emits for `n` and `colors`
///
/// Each color sweeps `max(n - k, 1)` anchor rows over `n` columns, and every
/// region is added once as is and once transposed.
pub fn distance_constraint_count(n: usize, colors: usize) -> usize {
    (1..=colors)
        .map(|k| 2 * n * n.saturating_sub(k).max(1))
        .sum()
}

/// Builds the packing-coloring model of an `n × n` grid
#[derive(Debug, Clone)]
pub struct SquareGridModelBuilder {
    n: usize,
    color_cap: usize,
    objective: ObjectiveKind,
    solver_config: SolverConfig,
}

impl SquareGridModelBuilder {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            color_cap: GRID_COLOR_CAP,
            objective: ObjectiveKind::ColorSum,
            solver_config: SolverConfig::default().with_time_limit(Some(GRID_TIME_LIMIT_SECS)),
        }
    }

    pub fn from_config(n: usize, config: &PackingConfig) -> Self {
        Self::new(n)
            .with_color_cap(config.grid_color_cap)
            .with_objective(config.objective)
            .with_solver_config(
                SolverConfig::default()
                    .with_backend(config.backend)
                    .with_time_limit(config.grid_time_limit)
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

    /// `min(n², cap)`
    pub fn colors(&self) -> usize {
        self.n.saturating_mul(self.n).min(self.color_cap)
    }

    pub fn build(&self) -> Result<PackingModel> {
        let n = self.n;
        let enumerator = NeighborhoodEnumerator::new(n)?;
        if self.color_cap == 0 {
            return Err(PackingError::InvalidArgument(
                "color cap must be at least 1".to_string(),
            ));
        }

        let layout = VariableLayout {
            topology: Topology::Square,
            n,
            colors: self.colors(),
        };

        let mut constraints =
            Vec::with_capacity(distance_constraint_count(n, layout.colors) + layout.num_cells());

        for k in 1..=layout.colors {
            for i in enumerator.anchor_rows(k) {
                for j in 1..=n {
                    let region = enumerator.region(Cell::new(i, j), k)?;

                    constraints.push(
                        Constraint::at_most(region.iter().map(|&c| layout.variable(c, k)), 1.0)
                            .with_name(format!("dist[{},{},{}]", i, j, k)),
                    );
                    // regions are built row-wise only; the transpose covers columns
                    constraints.push(
                        Constraint::at_most(
                            region.iter().map(|&c| layout.variable(c.transposed(), k)),
                            1.0,
                        )
                        .with_name(format!("dist_t[{},{},{}]", i, j, k)),
                    );
                }
            }
        }

        let distance_constraints = constraints.len();
        constraints.extend(layout.uniqueness_constraints());
        let uniqueness_constraints = constraints.len() - distance_constraints;

        log::debug!(
            "square model n={}: {} variables, {} distance + {} uniqueness constraints",
            n,
            layout.num_variables(),
            distance_constraints,
            uniqueness_constraints
        );

        let problem = OptimizationProblem::new(layout.variables(), layout.objective(self.objective))
            .with_name(format!("packing-grid-{}x{}", n, n))
            .with_description(format!(
                "Packing coloring of the {}x{} grid with colors 1..={}",
                n, n, layout.colors
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
