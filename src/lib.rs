// Domain layer: linear model types and the solver contract
pub mod domain;

// Model generation: packing-ball geometry and the grid/path builders
pub mod packing;

// Application layer: solve orchestration and decoding
pub mod application;

// Infrastructure layer: concurrent batch runs and reporting
pub mod infrastructure;

// Solver adapters: Concrete implementations of SolverService
#[cfg(feature = "solvers")]
pub mod solver;

// Re-export commonly used types
pub use domain::{
    Constraint, ConstraintType, ObjectiveFunction, OptimizationProblem, Solution, SolutionStatus,
    SolverBackend, SolverConfig, SolverError, SolverService, Variable,
};

pub use packing::{
    Cell, LineModelBuilder, NeighborhoodEnumerator, ObjectiveKind, PackingConfig, PackingError,
    PackingModel, SquareGridModelBuilder,
};

pub use application::{GridColoring, ModelOrchestrator};

pub use infrastructure::{print_report, run_batch, BatchReport, RunnerConfig};

#[cfg(feature = "solvers")]
pub use solver::{CoinCbcSolver, HighsSolver, SolverFactory};
