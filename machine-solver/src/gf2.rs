//! Minimum-weight solutions of the light-toggle system over GF(2).
//!
//! Pressing a button an even number of times cancels out, so only press
//! parity matters and the system lives in GF(2): row XOR is the elimination
//! step, and the weight of a solution is the number of buttons pressed an
//! odd number of times.

use crate::error::SolveError;
use crate::machine::{Bits, LightSystem};

/// Enumerating the null space costs one XOR pass per combination, `2^free`
/// in total. Anything past this many free variables is a degenerate wiring,
/// not a puzzle, and gets rejected instead of running for hours.
const MAX_FREE_VARS: usize = 24;

/// Augmented system `[A | b]` after Gauss-Jordan elimination.
struct Reduced {
    aug: Vec<Bits>,
    num_vars: usize,
    /// Pivot row for each column, if the column has one.
    col_to_pivot: Vec<Option<usize>>,
    /// Columns without a pivot.
    free: Vec<usize>,
}

fn reduce(system: &LightSystem) -> Result<Reduced, SolveError> {
    let num_eqs = system.matrix.len();
    let num_vars = system.matrix.first().map_or(0, |row| row.len());

    let mut aug: Vec<Bits> = system
        .matrix
        .iter()
        .zip(system.target.iter().by_vals())
        .map(|(row, lit)| {
            let mut out = row.clone();
            out.push(lit);
            out
        })
        .collect();

    let mut col_to_pivot = vec![None; num_vars];
    let mut free = Vec::new();
    let mut pivot_row = 0;

    for col in 0..num_vars {
        let Some(row) = (pivot_row..num_eqs).find(|&r| aug[r][col]) else {
            free.push(col);
            continue;
        };
        aug.swap(pivot_row, row);
        col_to_pivot[col] = Some(pivot_row);

        // XOR the pivot row into every other row with a set bit in this
        // column, above and below, so the matrix ends fully reduced.
        let pivot_vec = aug[pivot_row].clone();
        for r in 0..num_eqs {
            if r != pivot_row && aug[r][col] {
                aug[r] ^= &pivot_vec;
            }
        }
        pivot_row += 1;
    }

    // A zero row with a set augmented bit reads 0 = 1.
    for r in pivot_row..num_eqs {
        if aug[r][num_vars] {
            return Err(SolveError::LightsInfeasible);
        }
    }

    Ok(Reduced {
        aug,
        num_vars,
        col_to_pivot,
        free,
    })
}

impl Reduced {
    /// Particular solution (free variables at zero) and one null-space basis
    /// vector per free column. Both read directly off the reduced matrix:
    /// pivot variables take the augmented column for the particular solution
    /// and the free variable's column for its basis vector.
    fn solution_space(&self) -> (Bits, Vec<Bits>) {
        let mut particular = Bits::repeat(false, self.num_vars);
        for (col, &pivot) in self.col_to_pivot.iter().enumerate() {
            if let Some(r) = pivot {
                if self.aug[r][self.num_vars] {
                    particular.set(col, true);
                }
            }
        }

        let basis = self
            .free
            .iter()
            .map(|&f| {
                let mut v = Bits::repeat(false, self.num_vars);
                v.set(f, true);
                for (col, &pivot) in self.col_to_pivot.iter().enumerate() {
                    if let Some(r) = pivot {
                        if self.aug[r][f] {
                            v.set(col, true);
                        }
                    }
                }
                v
            })
            .collect();

        (particular, basis)
    }
}

/// Minimum number of buttons pressed an odd number of times to reach the
/// target light pattern.
#[tracing::instrument(skip_all)]
pub fn min_presses(system: &LightSystem) -> Result<u64, SolveError> {
    let reduced = reduce(system)?;
    let (particular, basis) = reduced.solution_space();

    if basis.len() > MAX_FREE_VARS {
        return Err(SolveError::NullSpaceTooLarge { free: basis.len() });
    }
    tracing::debug!(free = basis.len(), "reduced light system");

    // Gray-code walk over every null-space combination: between consecutive
    // masks exactly one basis vector flips, so each candidate is a single XOR
    // away from the previous one.
    let mut current = particular;
    let mut min_weight = current.count_ones();
    for mask in 1usize..(1 << basis.len()) {
        current ^= &basis[mask.trailing_zeros() as usize];
        min_weight = min_weight.min(current.count_ones());
    }

    Ok(min_weight as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Machine;

    use rstest::rstest;

    fn light_system(lights: &[u8], buttons: &[&[usize]]) -> LightSystem {
        Machine {
            target_lights: lights.iter().map(|&bit| bit == 1).collect(),
            buttons: buttons.iter().map(|wiring| wiring.to_vec()).collect(),
            joltage_targets: vec![],
        }
        .light_system()
    }

    /// Exhaustive minimum over all press subsets, for small systems.
    fn brute_force(system: &LightSystem) -> Option<u64> {
        let num_vars = system.matrix.first().map_or(0, |row| row.len());
        let num_eqs = system.matrix.len();
        assert!(num_vars <= 16);

        (0u32..1 << num_vars)
            .filter_map(|subset| {
                let matches = (0..num_eqs).all(|r| {
                    let parity = (0..num_vars)
                        .filter(|&c| subset & (1 << c) != 0 && system.matrix[r][c])
                        .count();
                    (parity % 2 == 1) == system.target[r]
                });
                matches.then(|| u64::from(subset.count_ones()))
            })
            .min()
    }

    #[rstest]
    #[case(&[1, 0, 1], &[&[0][..], &[1, 2], &[0, 2]])]
    #[case(&[0, 1, 1, 0], &[&[3][..], &[1, 3], &[2], &[2, 3], &[0, 2], &[0, 1]])]
    #[case(&[1, 1, 1, 1], &[&[0, 1][..], &[1, 2], &[2, 3], &[0, 3], &[0, 1, 2, 3]])]
    #[case(&[0, 0, 0, 1, 0], &[&[0, 2, 3, 4][..], &[2, 3], &[0, 4], &[0, 1, 2], &[1, 2, 3, 4]])]
    #[case(&[1, 0, 0, 0, 0, 1], &[&[0, 5][..], &[1, 4], &[2, 3], &[0, 1, 2], &[3, 4, 5]])]
    fn weight_matches_exhaustive_search(#[case] lights: &[u8], #[case] buttons: &[&[usize]]) {
        let system = light_system(lights, buttons);
        assert_eq!(brute_force(&system), min_presses(&system).ok());
    }

    #[test]
    fn single_press_beats_wider_combinations() {
        // Pressing only the third button toggles lights 0 and 2 at once.
        let system = light_system(&[1, 0, 1], &[&[0], &[1, 2], &[0, 2]]);
        assert_eq!(min_presses(&system), Ok(1));
    }

    #[test]
    fn mismatched_parity_is_infeasible() {
        let system = light_system(&[1, 0], &[&[0, 1]]);
        assert_eq!(min_presses(&system), Err(SolveError::LightsInfeasible));
    }

    #[test]
    fn no_buttons_and_dark_lights_is_free() {
        let system = light_system(&[0, 0], &[]);
        assert_eq!(min_presses(&system), Ok(0));
    }

    #[test]
    fn no_buttons_and_lit_target_is_infeasible() {
        let system = light_system(&[1], &[]);
        assert_eq!(min_presses(&system), Err(SolveError::LightsInfeasible));
    }

    #[test]
    fn oversized_null_space_is_rejected() {
        // 25 buttons wired to nothing leave 25 free columns.
        let empty: &[usize] = &[];
        let buttons = vec![empty; 25];
        let system = light_system(&[0], &buttons);
        assert_eq!(
            min_presses(&system),
            Err(SolveError::NullSpaceTooLarge { free: 25 })
        );
    }
}
