//! Bounded search for the cheapest non-negative integer point of the
//! solution lattice `x = x0 + sum(t_k * v_k)`.
//!
//! Denominators are cleared up front, so integrality becomes a divisibility
//! test on scaled coordinates. Each parameter `t_k` equals the press count of
//! its free-column button (the basis has `v_k[free_k] = 1` and zeros at the
//! other free columns), which caps every dimension at that button's press
//! bound and keeps the search finite without any empirical sweep constant.
//! Within those caps the search is a depth-first branch-and-bound: levels
//! tighten their range with ceil/floor bounds from the coordinates they
//! finalise and prune on the cost of everything settled so far.

use num::Signed;
use num_integer::{div_ceil, div_floor, lcm};

use crate::error::SolveError;
use crate::machine::Rat;
use crate::rational::SolutionSpace;

/// One level of the search: a scaled basis direction, the hard cap on its
/// parameter, and the coordinates no later direction touches.
struct Level {
    direction: Vec<i128>,
    max_presses: i128,
    finalized: Vec<usize>,
}

struct Search<'a> {
    levels: &'a [Level],
    scale: i128,
    best: Option<i128>,
}

impl Search<'_> {
    /// Chooses `t` for `level` within the tightened range, then recurses with
    /// the shifted point.
    fn descend(&mut self, level: usize, point: &[i128], settled: i128) {
        let levels = self.levels;
        if level == levels.len() {
            self.best = Some(self.best.map_or(settled, |best| best.min(settled)));
            return;
        }
        let current = &levels[level];

        // Non-negativity of the coordinates finalised here pins the range:
        // a positive coefficient gives a lower bound, a negative one an
        // upper bound. The button's own press cap closes the top.
        let mut lo: i128 = 0;
        let mut hi: i128 = current.max_presses;
        for &j in &current.finalized {
            let coeff = current.direction[j];
            if coeff > 0 {
                lo = lo.max(div_ceil(-point[j], coeff));
            } else if coeff < 0 {
                hi = hi.min(div_floor(point[j], -coeff));
            }
        }
        if lo > hi {
            return;
        }

        let mut shifted: Vec<i128> = point
            .iter()
            .zip(&current.direction)
            .map(|(&p, &coeff)| p + lo * coeff)
            .collect();

        for _t in lo..=hi {
            if let Some(cost) = self.settle(current, &shifted, settled) {
                self.descend(level + 1, &shifted, cost);
            }
            for (p, &coeff) in shifted.iter_mut().zip(&current.direction) {
                *p += coeff;
            }
        }
    }

    /// Validates the coordinates this level finalises and folds them into the
    /// settled cost. `None` if any coordinate misses divisibility or the cost
    /// already reaches the best known total.
    fn settle(&self, level: &Level, point: &[i128], mut settled: i128) -> Option<i128> {
        for &j in &level.finalized {
            let x = point[j];
            if x < 0 || x % self.scale != 0 {
                return None;
            }
            settled += x / self.scale;
        }
        match self.best {
            Some(best) if settled >= best => None,
            _ => Some(settled),
        }
    }
}

fn scaled(x: &Rat, scale: i128) -> i128 {
    x.numer() * (scale / x.denom())
}

/// Minimum of `sum(x_j)` over all points of the solution space with every
/// coordinate a non-negative integer. `press_bounds[j]` caps the press count
/// of button `j` (see `Machine::press_bounds`); its length must match the
/// solution space's variable count.
#[tracing::instrument(skip_all)]
pub fn min_total_presses(
    space: &SolutionSpace,
    press_bounds: &[i128],
) -> Result<u64, SolveError> {
    let num_vars = space.particular.len();

    if space.basis.is_empty() {
        // Unique solution: valid only if already a non-negative integer
        // vector.
        let mut total: i128 = 0;
        for x in &space.particular {
            if x.is_negative() || !x.is_integer() {
                return Err(SolveError::JoltageInfeasible);
            }
            total += x.to_integer();
        }
        return Ok(total as u64);
    }

    let scale = space
        .particular
        .iter()
        .chain(space.basis.iter().flatten())
        .fold(1i128, |acc, x| lcm(acc, *x.denom()));

    let origin: Vec<i128> = space.particular.iter().map(|x| scaled(x, scale)).collect();
    let directions: Vec<Vec<i128>> = space
        .basis
        .iter()
        .map(|v| v.iter().map(|x| scaled(x, scale)).collect())
        .collect();

    // The last level that can still change each coordinate. Coordinates no
    // direction touches are fixed by the particular solution and checked
    // once, here.
    let mut last_touch = vec![None; num_vars];
    for (k, direction) in directions.iter().enumerate() {
        for (j, &coeff) in direction.iter().enumerate() {
            if coeff != 0 {
                last_touch[j] = Some(k);
            }
        }
    }
    let mut fixed_cost: i128 = 0;
    for (j, touch) in last_touch.iter().enumerate() {
        if touch.is_none() {
            if origin[j] < 0 || origin[j] % scale != 0 {
                return Err(SolveError::JoltageInfeasible);
            }
            fixed_cost += origin[j] / scale;
        }
    }

    let levels: Vec<Level> = directions
        .into_iter()
        .enumerate()
        .map(|(k, direction)| Level {
            direction,
            max_presses: press_bounds[space.free_cols[k]],
            finalized: (0..num_vars).filter(|&j| last_touch[j] == Some(k)).collect(),
        })
        .collect();

    tracing::debug!(dims = levels.len(), scale, "searching solution lattice");

    let mut search = Search {
        levels: &levels,
        scale,
        best: None,
    };
    search.descend(0, &origin, fixed_cost);

    search
        .best
        .map(|total| total as u64)
        .ok_or(SolveError::JoltageInfeasible)
}
