//! Independent checks of decoded colorings against the packing rule.

use std::collections::BTreeSet;

use super::Cell;

/// Two cells sharing `color` that are too close, or a cell with color 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub color: u32,
    pub first: Cell,
    pub second: Cell,
    pub distance: usize,
}

fn violations(cells: &[(Cell, u32)]) -> Vec<Violation> {
    let mut found = Vec::new();
    for (x, &(p, color)) in cells.iter().enumerate() {
        if color == 0 {
            found.push(Violation {
                color,
                first: p,
                second: p,
                distance: 0,
            });
            continue;
        }
        for &(q, other) in &cells[x + 1..] {
            let distance = p.distance(q);
            if other == color && distance <= color as usize {
                found.push(Violation {
                    color,
                    first: p,
                    second: q,
                    distance,
                });
            }
        }
    }
    found
}

/// Every packing violation of a row-major square coloring
pub fn grid_violations(rows: &[Vec<u32>]) -> Vec<Violation> {
    let cells: Vec<_> = rows
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &k)| (Cell::new(r + 1, c + 1), k))
        })
        .collect();
    violations(&cells)
}

/// Every packing violation of a path coloring
pub fn line_violations(colors: &[u32]) -> Vec<Violation> {
    let cells: Vec<_> = colors
        .iter()
        .enumerate()
        .map(|(i, &k)| (Cell::on_path(i + 1), k))
        .collect();
    violations(&cells)
}

pub fn distinct_colors<'a>(colors: impl IntoIterator<Item = &'a u32>) -> usize {
    colors.into_iter().collect::<BTreeSet<_>>().len()
}

pub fn max_color<'a>(colors: impl IntoIterator<Item = &'a u32>) -> u32 {
    colors.into_iter().copied().max().unwrap_or(0)
}
