// Application layer: model orchestration and result decoding

pub mod decode;
pub mod orchestrator;

#[cfg(test)]
pub(crate) mod stub_solver;

pub use orchestrator::{GridColoring, ModelOrchestrator};
