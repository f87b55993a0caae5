#![cfg(feature = "solvers")]

use std::sync::Arc;

use packchrom::packing::verify::{grid_violations, line_violations};
use packchrom::{CoinCbcSolver, HighsSolver, ModelOrchestrator, ObjectiveKind, PackingConfig};

fn orchestrators() -> Vec<ModelOrchestrator> {
    vec![
        ModelOrchestrator::new(Arc::new(HighsSolver::new())),
        ModelOrchestrator::new(Arc::new(CoinCbcSolver::new())),
    ]
}

#[test]
fn single_cell_gets_color_one() {
    for orchestrator in orchestrators() {
        let coloring = orchestrator.solve_grid(1).unwrap().unwrap();
        assert_eq!(coloring.rows, vec![vec![1]], "{}", orchestrator.solver_name());
        assert!(coloring.proven_optimal);
    }
}

#[test]
fn two_by_two_puts_ones_on_a_diagonal() {
    for orchestrator in orchestrators() {
        let coloring = orchestrator.solve_grid(2).unwrap().unwrap();
        let rows = &coloring.rows;
        assert!(grid_violations(rows).is_empty());
        let ones = rows.iter().flatten().filter(|&&k| k == 1).count();
        assert_eq!(ones, 2);
        assert_eq!(coloring.max_color(), 3);
        assert_eq!(coloring.objective_value.map(f64::round), Some(7.0));
    }
}

#[test]
fn five_by_five_is_a_valid_packing() {
    for orchestrator in orchestrators() {
        let coloring = orchestrator.solve_grid(5).unwrap().unwrap();
        assert_eq!(coloring.rows.len(), 5);
        assert!(coloring.rows.iter().all(|row| row.len() == 5));
        assert!(grid_violations(&coloring.rows).is_empty());
        assert!(coloring.distinct_colors() <= 8, "{:?}", coloring.rows);
    }
}

#[test]
fn count_above_objective_still_packs() {
    let config = PackingConfig::default().with_objective(ObjectiveKind::CountAbove(7));
    let orchestrator = ModelOrchestrator::new(Arc::new(HighsSolver::new())).with_config(config);
    let coloring = orchestrator.solve_grid(4).unwrap().unwrap();
    assert!(grid_violations(&coloring.rows).is_empty());
}

#[test]
fn path_of_ten_is_optimal() {
    for orchestrator in orchestrators() {
        let colors = orchestrator.solve_line(10).unwrap().unwrap();
        assert_eq!(colors.len(), 10);
        assert!(line_violations(&colors).is_empty());
        for (i, &j) in colors.iter().enumerate() {
            let reach = j as usize;
            for other in colors.iter().skip(i + 1).take(reach) {
                assert_ne!(*other, j, "{:?}", colors);
            }
        }
        assert_eq!(colors.iter().sum::<u32>(), 17);
    }
}
