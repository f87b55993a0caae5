// Packing-coloring model generation: geometry, builders and verification

pub mod cell;
pub mod config;
pub mod error;
pub mod grid_model;
pub mod line_model;
pub mod model;
pub mod neighborhood;
pub mod verify;

pub use cell::Cell;
pub use config::PackingConfig;
pub use error::PackingError;
pub use grid_model::SquareGridModelBuilder;
pub use line_model::LineModelBuilder;
pub use model::{ObjectiveKind, PackingModel, Topology, VariableLayout};
pub use neighborhood::NeighborhoodEnumerator;
