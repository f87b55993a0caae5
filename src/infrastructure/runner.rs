// Infrastructure: batch runner
// Solves several independent packing models concurrently on tokio's blocking pool

use std::sync::Arc;

use futures::future::{join, join_all};

use crate::application::{GridColoring, ModelOrchestrator};
use crate::domain::solver_service::SolverService;
use crate::packing::error::{PackingError, Result};
use crate::packing::PackingConfig;

pub struct RunnerConfig {
    pub grid_sizes: Vec<usize>,
    pub line_sizes: Vec<usize>,
    pub packing: PackingConfig,
    pub solver: Arc<dyn SolverService>,
}

impl RunnerConfig {
    pub fn new(solver: Arc<dyn SolverService>) -> Self {
        Self {
            grid_sizes: Vec::new(),
            line_sizes: Vec::new(),
            packing: PackingConfig::default(),
            solver,
        }
    }

    pub fn with_grid_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.grid_sizes = sizes;
        self
    }

    pub fn with_line_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.line_sizes = sizes;
        self
    }

    pub fn with_packing(mut self, packing: PackingConfig) -> Self {
        self.packing = packing;
        self
    }
}

/// Results in request order; `None` marks a size without a solution
#[derive(Debug)]
pub struct BatchReport {
    pub solver: String,
    pub grids: Vec<(usize, Option<GridColoring>)>,
    pub lines: Vec<(usize, Option<Vec<u32>>)>,
}

fn join_error(e: tokio::task::JoinError) -> PackingError {
    PackingError::Runtime(format!("solve task failed: {}", e))
}

/// Solve every requested grid and path size
///
/// Each size builds its own model on a blocking thread, so the solver calls
/// run side by side. A failing size does not cut the batch short: all solves
/// finish before the first failure is returned.
pub async fn run_batch(config: RunnerConfig) -> Result<BatchReport> {
    let orchestrator = ModelOrchestrator::new(config.solver).with_config(config.packing);
    let solver = orchestrator.solver_name().to_string();

    log::info!(
        "Running {} grid and {} path models with {}",
        config.grid_sizes.len(),
        config.line_sizes.len(),
        solver
    );

    let grid_tasks: Vec<_> = config
        .grid_sizes
        .iter()
        .map(|&n| {
            let orchestrator = orchestrator.clone();
            tokio::task::spawn_blocking(move || orchestrator.solve_grid(n).map(|c| (n, c)))
        })
        .collect();

    let line_tasks: Vec<_> = config
        .line_sizes
        .iter()
        .map(|&n| {
            let orchestrator = orchestrator.clone();
            tokio::task::spawn_blocking(move || orchestrator.solve_line(n).map(|c| (n, c)))
        })
        .collect();

    // every task is awaited before the first error is reported
    let (grids, lines) = join(join_all(grid_tasks), join_all(line_tasks)).await;
    let grids = grids
        .into_iter()
        .map(|task| task.map_err(join_error).and_then(|solved| solved))
        .collect::<Result<Vec<_>>>()?;
    let lines = lines
        .into_iter()
        .map(|task| task.map_err(join_error).and_then(|solved| solved))
        .collect::<Result<Vec<_>>>()?;

    Ok(BatchReport {
        solver,
        grids,
        lines,
    })
}

pub fn print_report(report: &BatchReport) {
    print_banner(&report.solver);

    for (n, coloring) in &report.grids {
        println!("{}x{} grid:", n, n);
        match coloring {
            Some(coloring) => {
                for row in &coloring.rows {
                    println!("{:?}", row);
                }
                println!(
                    "  {} distinct colors, max color {}, {}",
                    coloring.distinct_colors(),
                    coloring.max_color(),
                    if coloring.proven_optimal {
                        "proven optimal".to_string()
                    } else {
                        format!("best found ({})", coloring.status)
                    }
                );
            }
            None => println!("  no solution"),
        }
    }

    for (n, colors) in &report.lines {
        match colors {
            Some(colors) => println!("path of {}: {:?}", n, colors),
            None => println!("path of {}: no solution", n),
        }
    }
}

fn print_banner(solver: &str) {
    println!("\n╔═══════════════════════════════════════════════════════════╗");
    println!("║  Packing Chromatic - MILP packing colorings               ║");
    println!("╠═══════════════════════════════════════════════════════════╣");
    println!("║  Powered by: {:44} ║", solver);
    println!("╚═══════════════════════════════════════════════════════════╝\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stub_solver::{one_hot, StubSolver};
    use crate::domain::{Solution, SolutionStatus};
    use crate::packing::{Topology, VariableLayout};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Known packing colorings of small instances, keyed off the problem name
    fn known_coloring(name: &str) -> (VariableLayout, Vec<u32>) {
        if let Some(n) = name.strip_prefix("packing-line-") {
            let n: usize = n.parse().unwrap();
            let colors = [1, 2, 1, 3].iter().cycle().take(n).copied().collect();
            let layout = VariableLayout {
                topology: Topology::Line,
                n,
                colors: n.min(3),
            };
            (layout, colors)
        } else {
            let n: usize = name.trim_start_matches("packing-grid-")[..1].parse().unwrap();
            let colors = match n {
                1 => vec![1],
                2 => vec![1, 2, 3, 1],
                _ => unreachable!(),
            };
            let layout = VariableLayout {
                topology: Topology::Square,
                n,
                colors: (n * n).min(15),
            };
            (layout, colors)
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn batch_keeps_request_order() {
        let stub = StubSolver::new(|problem| {
            let (layout, colors) = known_coloring(&problem.name);
            let values = one_hot(&layout, &colors);
            Ok(Solution::optimal(problem.objective.evaluate(&values), values))
        });

        let config = RunnerConfig::new(Arc::new(stub))
            .with_grid_sizes(vec![2, 1])
            .with_line_sizes(vec![10, 4]);
        let report = run_batch(config).await.unwrap();

        assert_eq!(report.solver, "stub");
        let grid_sizes: Vec<_> = report.grids.iter().map(|(n, _)| *n).collect();
        assert_eq!(grid_sizes, vec![2, 1]);
        assert_eq!(
            report.grids[0].1.as_ref().unwrap().rows,
            vec![vec![1, 2], vec![3, 1]]
        );
        assert_eq!(report.grids[1].1.as_ref().unwrap().rows, vec![vec![1]]);
        assert_eq!(report.lines[0].1.as_deref(), Some(&[1, 2, 1, 3, 1, 2, 1, 3, 1, 2][..]));
        assert_eq!(report.lines[1].1.as_deref(), Some(&[1, 2, 1, 3][..]));
    }

    #[tokio::test]
    async fn missing_solutions_are_reported_not_raised() {
        let stub = StubSolver::new(|_| Ok(Solution::new(SolutionStatus::Infeasible, "none")));
        let config = RunnerConfig::new(Arc::new(stub))
            .with_grid_sizes(vec![3])
            .with_line_sizes(vec![5])
            .with_packing(PackingConfig::default().with_grid_time_limit(Some(1.0)));
        let report = run_batch(config).await.unwrap();

        assert!(report.grids[0].1.is_none());
        assert!(report.lines[0].1.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn failure_is_reported_after_every_solve_finishes() {
        let finished = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&finished);
        let stub = StubSolver::new(move |problem| {
            if problem.name.starts_with("packing-grid-") {
                return Ok(Solution::optimal(0.0, Vec::new()));
            }
            std::thread::sleep(Duration::from_millis(200));
            let (layout, colors) = known_coloring(&problem.name);
            let values = one_hot(&layout, &colors);
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Solution::optimal(problem.objective.evaluate(&values), values))
        });

        let config = RunnerConfig::new(Arc::new(stub))
            .with_grid_sizes(vec![2])
            .with_line_sizes(vec![4, 6]);
        assert!(matches!(
            run_batch(config).await,
            Err(PackingError::DecodeFailure { .. })
        ));
        assert_eq!(finished.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn decode_failure_fails_the_batch() {
        let stub = StubSolver::new(|_| Ok(Solution::optimal(0.0, Vec::new())));
        let config = RunnerConfig::new(Arc::new(stub)).with_line_sizes(vec![3]);
        assert!(matches!(
            run_batch(config).await,
            Err(PackingError::DecodeFailure { .. })
        ));
    }
}
