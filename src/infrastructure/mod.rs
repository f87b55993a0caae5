// Infrastructure: running batches of models and reporting results

pub mod runner;

pub use runner::{print_report, run_batch, BatchReport, RunnerConfig};
