use packchrom::{print_report, run_batch, RunnerConfig, SolverBackend, SolverFactory};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Create solver instance
    let solver = SolverFactory::create_from_backend(SolverBackend::Auto);

    // The 5x5 grid and the path on 10 vertices
    let config = RunnerConfig::new(solver)
        .with_grid_sizes(vec![5])
        .with_line_sizes(vec![10]);
    let report = run_batch(config).await?;

    print_report(&report);

    Ok(())
}
