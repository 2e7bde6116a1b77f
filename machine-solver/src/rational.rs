//! Exact Gauss-Jordan elimination of the counter system over the rationals.
//!
//! The lattice search downstream depends on exact zero tests and exact
//! divisibility tests, so every entry stays a `Ratio` from start to finish;
//! no floating point anywhere.

use itertools::Itertools;
use num::{One, Zero};

use crate::error::SolveError;
use crate::machine::{JoltageSystem, Rat};

/// Every solution of the counter system, written as a particular solution
/// plus combinations of the null-space basis: `x = x0 + sum(t_k * v_k)`.
#[derive(Debug, Clone)]
pub struct SolutionSpace {
    /// One solution with every free variable at zero.
    pub particular: Vec<Rat>,
    /// One basis vector per free column.
    pub basis: Vec<Vec<Rat>>,
    /// Column index of the free variable behind each basis vector. Vector
    /// `k` is exactly 1 at `free_cols[k]` and 0 at every other free column,
    /// so the parameter `t_k` equals that button's press count.
    pub free_cols: Vec<usize>,
}

/// Reduces the system, normalising each pivot row so pivots are exactly one,
/// and extracts the solution space.
#[tracing::instrument(skip_all)]
pub fn reduce(system: &JoltageSystem) -> Result<SolutionSpace, SolveError> {
    let num_eqs = system.a.nrows();
    let num_vars = system.a.ncols();

    let mut aug: Vec<Vec<Rat>> = (0..num_eqs)
        .map(|r| {
            (0..num_vars)
                .map(|c| system.a[(r, c)].clone())
                .chain([system.b[r].clone()])
                .collect()
        })
        .collect();

    let mut col_to_pivot: Vec<Option<usize>> = vec![None; num_vars];
    let mut pivot_row = 0;

    for col in 0..num_vars {
        let Some(row) = (pivot_row..num_eqs).find(|&r| !aug[r][col].is_zero()) else {
            continue;
        };
        aug.swap(pivot_row, row);
        col_to_pivot[col] = Some(pivot_row);

        let pivot = aug[pivot_row][col].clone();
        for entry in &mut aug[pivot_row] {
            *entry /= pivot.clone();
        }

        let pivot_vec = aug[pivot_row].clone();
        for (r, row) in aug.iter_mut().enumerate() {
            if r != pivot_row && !row[col].is_zero() {
                let factor = row[col].clone();
                for (entry, pivot_entry) in row.iter_mut().zip(&pivot_vec) {
                    *entry -= factor.clone() * pivot_entry.clone();
                }
            }
        }
        pivot_row += 1;
    }

    // A zero row with a non-zero augmented entry reads 0 = b.
    for r in pivot_row..num_eqs {
        if !aug[r][num_vars].is_zero() {
            return Err(SolveError::JoltageInfeasible);
        }
    }

    let free_cols: Vec<usize> = col_to_pivot.iter().positions(Option::is_none).collect();

    let mut particular = vec![Rat::zero(); num_vars];
    for (col, &pivot) in col_to_pivot.iter().enumerate() {
        if let Some(r) = pivot {
            particular[col] = aug[r][num_vars].clone();
        }
    }

    let basis = free_cols
        .iter()
        .map(|&f| {
            let mut v = vec![Rat::zero(); num_vars];
            v[f] = Rat::one();
            for (col, &pivot) in col_to_pivot.iter().enumerate() {
                if let Some(r) = pivot {
                    v[col] = -aug[r][f].clone();
                }
            }
            v
        })
        .collect();

    tracing::debug!(rank = pivot_row, free = free_cols.len(), "reduced joltage system");

    Ok(SolutionSpace {
        particular,
        basis,
        free_cols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Machine;

    fn machine(buttons: &[&[usize]], joltage: &[u64]) -> Machine {
        Machine {
            target_lights: Default::default(),
            buttons: buttons.iter().map(|wiring| wiring.to_vec()).collect(),
            joltage_targets: joltage.to_vec(),
        }
    }

    #[test]
    fn full_rank_system_has_a_unique_solution() {
        // x0 = 4 from the first counter, then x1 = 2 from the second.
        let system = machine(&[&[0, 1], &[1]], &[4, 6]).joltage_system();
        let space = reduce(&system).unwrap();

        assert!(space.basis.is_empty());
        assert_eq!(
            space.particular,
            vec![Rat::from_integer(4), Rat::from_integer(2)]
        );
    }

    #[test]
    fn contradictory_counters_are_infeasible() {
        // One button feeding both counters cannot reach two different targets.
        let system = machine(&[&[0, 1]], &[4, 6]).joltage_system();
        assert_eq!(
            reduce(&system).unwrap_err(),
            SolveError::JoltageInfeasible
        );
    }

    #[test]
    fn basis_vectors_span_the_null_space() {
        let system = machine(
            &[&[3], &[1, 3], &[2], &[2, 3], &[0, 2], &[0, 1]],
            &[3, 5, 4, 7],
        )
        .joltage_system();
        let space = reduce(&system).unwrap();

        assert_eq!(space.basis.len(), space.free_cols.len());
        for (k, v) in space.basis.iter().enumerate() {
            // A * v = 0, coordinate by coordinate.
            for r in 0..system.a.nrows() {
                let dot: Rat = (0..system.a.ncols())
                    .map(|c| system.a[(r, c)].clone() * v[c].clone())
                    .sum();
                assert!(dot.is_zero());
            }
            // The defining free variable is 1; the other free variables 0.
            for (l, &f) in space.free_cols.iter().enumerate() {
                let expected = if l == k { Rat::one() } else { Rat::zero() };
                assert_eq!(v[f], expected);
            }
        }
    }

    #[test]
    fn particular_solution_satisfies_the_system() {
        let system = machine(
            &[&[0, 2, 3, 4], &[2, 3], &[0, 4], &[0, 1, 2], &[1, 2, 3, 4]],
            &[7, 5, 12, 7, 2],
        )
        .joltage_system();
        let space = reduce(&system).unwrap();

        for r in 0..system.a.nrows() {
            let dot: Rat = (0..system.a.ncols())
                .map(|c| system.a[(r, c)].clone() * space.particular[c].clone())
                .sum();
            assert_eq!(dot, system.b[r]);
        }
    }
}
