use crate::domain::{Constraint, ObjectiveFunction, OptimizationProblem, Variable};

use super::Cell;

/// Objective used as a proxy for the packing chromatic number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectiveKind {
    /// Minimize `Σ k · a[cell, k]`
    #[default]
    ColorSum,
    /// Minimize the number of cells colored `k >= threshold`
    ///
    /// Solves much faster than [`ObjectiveKind::ColorSum`] but does not push
    /// the remaining colors as low as possible.
    CountAbove(usize),
}

impl ObjectiveKind {
    fn coefficient(self, color: usize) -> f64 {
        match self {
            ObjectiveKind::ColorSum => color as f64,
            ObjectiveKind::CountAbove(threshold) if color >= threshold => 1.0,
            ObjectiveKind::CountAbove(_) => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// `n × n` square grid
    Square,
    /// Path on `n` vertices
    Line,
}

/// Dense one-hot layout of the `a[cell, k]` variables, cell-major
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableLayout {
    pub topology: Topology,
    pub n: usize,
    pub colors: usize,
}

impl VariableLayout {
    pub fn num_cells(&self) -> usize {
        match self.topology {
            Topology::Square => self.n * self.n,
            Topology::Line => self.n,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.num_cells() * self.colors
    }

    /// Cells in row-major order
    pub fn cells(&self) -> Vec<Cell> {
        match self.topology {
            Topology::Square => (1..=self.n)
                .flat_map(|row| (1..=self.n).map(move |col| Cell::new(row, col)))
                .collect(),
            Topology::Line => (1..=self.n).map(Cell::on_path).collect(),
        }
    }

    fn ordinal(&self, cell: Cell) -> usize {
        match self.topology {
            Topology::Square => (cell.row - 1) * self.n + (cell.col - 1),
            Topology::Line => cell.col - 1,
        }
    }

    /// Column index of `a[cell, color]`
    pub fn variable(&self, cell: Cell, color: usize) -> usize {
        self.ordinal(cell) * self.colors + (color - 1)
    }

    pub(crate) fn variables(&self) -> Vec<Variable> {
        let mut vars = Vec::with_capacity(self.num_variables());
        for cell in self.cells() {
            for k in 1..=self.colors {
                let name = match self.topology {
                    Topology::Square => format!("a[{},{},{}]", cell.row, cell.col, k),
                    Topology::Line => format!("a[{},{}]", cell.col, k),
                };
                vars.push(Variable::binary(name));
            }
        }
        vars
    }

    pub(crate) fn objective(&self, kind: ObjectiveKind) -> ObjectiveFunction {
        let terms = self
            .cells()
            .into_iter()
            .flat_map(|cell| (1..=self.colors).map(move |k| (cell, k)))
            .filter_map(|(cell, k)| {
                let c = kind.coefficient(k);
                (c != 0.0).then_some((self.variable(cell, k), c))
            })
            .collect();
        ObjectiveFunction::minimize(terms)
    }

    /// `Σ_k a[cell, k] = 1` for every cell
    pub(crate) fn uniqueness_constraints(&self) -> Vec<Constraint> {
        self.cells()
            .into_iter()
            .map(|cell| {
                Constraint::exactly((1..=self.colors).map(|k| self.variable(cell, k)), 1.0)
                    .with_name(format!("unique{}", cell))
            })
            .collect()
    }
}

/// An assembled packing-coloring model, ready to hand to a solver
#[derive(Debug, Clone, PartialEq)]
pub struct PackingModel {
    pub layout: VariableLayout,
    pub problem: OptimizationProblem,
    pub distance_constraints: usize,
    pub uniqueness_constraints: usize,
}

impl PackingModel {
    pub fn n(&self) -> usize {
        self.layout.n
    }

    pub fn colors(&self) -> usize {
        self.layout.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_layout_is_cell_major() {
        let layout = VariableLayout {
            topology: Topology::Square,
            n: 3,
            colors: 4,
        };
        assert_eq!(layout.variable(Cell::new(1, 1), 1), 0);
        assert_eq!(layout.variable(Cell::new(1, 1), 4), 3);
        assert_eq!(layout.variable(Cell::new(1, 2), 1), 4);
        assert_eq!(layout.variable(Cell::new(3, 3), 4), 35);
        assert_eq!(layout.variables()[5].name, "a[1,2,2]");
    }

    #[test]
    fn count_above_only_charges_high_colors() {
        let layout = VariableLayout {
            topology: Topology::Line,
            n: 2,
            colors: 3,
        };
        let objective = layout.objective(ObjectiveKind::CountAbove(3));
        assert_eq!(objective.terms, vec![(2, 1.0), (5, 1.0)]);

        let objective = layout.objective(ObjectiveKind::ColorSum);
        assert_eq!(objective.terms.len(), 6);
        assert_eq!(objective.terms[4], (4, 2.0));
    }
}
