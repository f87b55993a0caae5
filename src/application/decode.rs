// Decoding: convert solver column values back into per-cell colors
// The one-hot layout of the model decides which column belongs to which (cell, color)

use crate::domain::Solution;
use crate::packing::error::{PackingError, Result};
use crate::packing::{Cell, PackingModel, Topology};

const ONE_HOT_THRESHOLD: f64 = 0.5;

fn describe(topology: Topology, cell: Cell) -> String {
    match topology {
        Topology::Square => cell.to_string(),
        Topology::Line => format!("vertex {}", cell.col),
    }
}

/// One color per cell, in row-major layout order
pub fn decode_colors(model: &PackingModel, solution: &Solution) -> Result<Vec<u32>> {
    let layout = &model.layout;
    let values = &solution.variable_values;

    if values.len() != layout.num_variables() {
        return Err(PackingError::DecodeFailure {
            cell: "*".to_string(),
            reason: format!(
                "expected {} variable values, solver returned {}",
                layout.num_variables(),
                values.len()
            ),
        });
    }

    layout
        .cells()
        .into_iter()
        .map(|cell| {
            let chosen: Vec<usize> = (1..=layout.colors)
                .filter(|&k| values[layout.variable(cell, k)] > ONE_HOT_THRESHOLD)
                .collect();
            match chosen.as_slice() {
                [k] => Ok(*k as u32),
                [] => Err(PackingError::DecodeFailure {
                    cell: describe(layout.topology, cell),
                    reason: "no color selected".to_string(),
                }),
                many => Err(PackingError::DecodeFailure {
                    cell: describe(layout.topology, cell),
                    reason: format!("several colors selected: {:?}", many),
                }),
            }
        })
        .collect()
}

/// Row-major `n × n` coloring of a square model
pub fn decode_grid(model: &PackingModel, solution: &Solution) -> Result<Vec<Vec<u32>>> {
    if model.layout.topology != Topology::Square {
        return Err(PackingError::InvalidArgument(
            "decode_grid needs a square model".to_string(),
        ));
    }
    let flat = decode_colors(model, solution)?;
    Ok(flat.chunks(model.n()).map(<[u32]>::to_vec).collect())
}

/// Coloring of a path model
pub fn decode_line(model: &PackingModel, solution: &Solution) -> Result<Vec<u32>> {
    if model.layout.topology != Topology::Line {
        return Err(PackingError::InvalidArgument(
            "decode_line needs a path model".to_string(),
        ));
    }
    decode_colors(model, solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stub_solver::one_hot;
    use crate::packing::{LineModelBuilder, SquareGridModelBuilder};

    #[test]
    fn grid_values_decode_row_major() {
        let model = SquareGridModelBuilder::new(2).build().unwrap();
        // solvers report integral columns with small noise
        let mut values = one_hot(&model.layout, &[1, 2, 3, 1]);
        values[1] = 1e-9;
        let solution = Solution::optimal(7.0, values);

        let rows = decode_grid(&model, &solution).unwrap();
        assert_eq!(rows, vec![vec![1, 2], vec![3, 1]]);
    }

    #[test]
    fn empty_cell_is_a_decode_failure() {
        let model = LineModelBuilder::new(3).build().unwrap();
        let mut values = one_hot(&model.layout, &[1, 2, 1]);
        values[model.layout.variable(Cell::on_path(2), 2)] = 0.0;

        let err = decode_line(&model, &Solution::optimal(2.0, values)).unwrap_err();
        match err {
            PackingError::DecodeFailure { cell, reason } => {
                assert_eq!(cell, "vertex 2");
                assert_eq!(reason, "no color selected");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn doubly_colored_cell_is_a_decode_failure() {
        let model = LineModelBuilder::new(3).build().unwrap();
        let mut values = one_hot(&model.layout, &[1, 2, 1]);
        values[model.layout.variable(Cell::on_path(3), 3)] = 1.0;

        assert!(matches!(
            decode_line(&model, &Solution::optimal(2.0, values)),
            Err(PackingError::DecodeFailure { .. })
        ));
    }

    #[test]
    fn truncated_values_are_rejected() {
        let model = SquareGridModelBuilder::new(2).build().unwrap();
        let solution = Solution::optimal(0.0, vec![1.0; 3]);
        assert!(decode_grid(&model, &solution).is_err());
        assert!(decode_line(&model, &solution).is_err());
    }
}
