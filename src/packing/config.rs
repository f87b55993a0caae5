use crate::domain::SolverBackend;

use super::model::ObjectiveKind;

/// Colors ever needed on the infinite square grid
pub const GRID_COLOR_CAP: usize = 15;

/// Colors ever needed on the infinite path (periodic 1 2 1 3)
pub const LINE_COLOR_CAP: usize = 3;

/// Default wall-clock budget for the square-grid solve, in seconds
pub const GRID_TIME_LIMIT_SECS: f64 = 10.0;

/// Settings shared by the model builders and the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub struct PackingConfig {
    pub grid_color_cap: usize,
    pub line_color_cap: usize,
    pub grid_time_limit: Option<f64>,
    pub line_time_limit: Option<f64>,
    /// Relative MIP gap handed to the solver
    pub gap_tolerance: Option<f64>,
    pub objective: ObjectiveKind,
    pub backend: SolverBackend,
    pub verbose: bool,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            grid_color_cap: GRID_COLOR_CAP,
            line_color_cap: LINE_COLOR_CAP,
            grid_time_limit: Some(GRID_TIME_LIMIT_SECS),
            line_time_limit: None,
            gap_tolerance: None,
            objective: ObjectiveKind::ColorSum,
            backend: SolverBackend::Auto,
            verbose: false,
        }
    }
}

impl PackingConfig {
    pub fn with_grid_color_cap(mut self, cap: usize) -> Self {
        self.grid_color_cap = cap;
        self
    }

    pub fn with_line_color_cap(mut self, cap: usize) -> Self {
        self.line_color_cap = cap;
        self
    }

    pub fn with_grid_time_limit(mut self, seconds: Option<f64>) -> Self {
        self.grid_time_limit = seconds;
        self
    }

    pub fn with_line_time_limit(mut self, seconds: Option<f64>) -> Self {
        self.line_time_limit = seconds;
        self
    }

    pub fn with_gap_tolerance(mut self, gap: Option<f64>) -> Self {
        self.gap_tolerance = gap;
        self
    }

    pub fn with_objective(mut self, objective: ObjectiveKind) -> Self {
        self.objective = objective;
        self
    }

    pub fn with_backend(mut self, backend: SolverBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
