use bitvec::prelude::*;
use nalgebra::{DMatrix, DVector};
use num::rational::Ratio;
use num::{One, Zero};

/// Exact rational scalar used by the joltage stage. Incidence coefficients
/// are 0/1, so numerators and denominators stay tiny through elimination;
/// 128 bits leaves plenty of headroom above the largest observed targets.
pub type Rat = Ratio<i128>;

/// A bit vector backed by `usize` words with Least Significant Bit first
/// ordering.
pub type Bits = BitVec<usize, Lsb0>;

/// One factory machine: the target light pattern, the button wirings, and the
/// per-counter joltage targets.
///
/// Each button carries a single index list; pressing it toggles the light and
/// increments the counter at every listed index. The two system builders
/// interpret the same list against their own index space, and indices that
/// fall outside that space are dropped.
#[derive(Debug, Clone)]
pub struct Machine {
    pub target_lights: Bits,
    pub buttons: Vec<Vec<usize>>,
    pub joltage_targets: Vec<u64>,
}

/// Binary incidence system for the lights: rows are lights, columns are
/// buttons, plus the target pattern as the right-hand side.
#[derive(Debug, Clone)]
pub struct LightSystem {
    pub matrix: Vec<Bits>,
    pub target: Bits,
}

/// Rational incidence system for the counters: rows are counters, columns
/// are buttons, with the joltage targets as the right-hand side.
#[derive(Debug, Clone)]
pub struct JoltageSystem {
    pub a: DMatrix<Rat>,
    pub b: DVector<Rat>,
}

impl Machine {
    /// Builds the light-toggle system (A matrix and target over GF(2)).
    pub fn light_system(&self) -> LightSystem {
        let num_lights = self.target_lights.len();
        let num_buttons = self.buttons.len();

        let mut matrix = vec![Bits::repeat(false, num_buttons); num_lights];
        for (col, wiring) in self.buttons.iter().enumerate() {
            for &idx in wiring {
                if idx < num_lights {
                    matrix[idx].set(col, true);
                }
            }
        }

        LightSystem {
            matrix,
            target: self.target_lights.clone(),
        }
    }

    /// Builds the counter system (A matrix and target over the rationals).
    pub fn joltage_system(&self) -> JoltageSystem {
        let num_counters = self.joltage_targets.len();
        let num_buttons = self.buttons.len();

        let mut a = DMatrix::from_element(num_counters, num_buttons, Rat::zero());
        for (col, wiring) in self.buttons.iter().enumerate() {
            for &idx in wiring {
                if idx < num_counters {
                    a[(idx, col)] = Rat::one();
                }
            }
        }

        let b = DVector::from_iterator(
            num_counters,
            self.joltage_targets
                .iter()
                .map(|&target| Rat::from_integer(target as i128)),
        );

        JoltageSystem { a, b }
    }

    /// Upper bound on how often each button can usefully be pressed. Every
    /// press adds one to each wired counter and presses never subtract, so a
    /// wired button is capped by the smallest target among its counters. A
    /// button wired to no counter never moves the system and is capped at
    /// zero.
    pub fn press_bounds(&self) -> Vec<i128> {
        self.buttons
            .iter()
            .map(|wiring| {
                wiring
                    .iter()
                    .filter_map(|&idx| self.joltage_targets.get(idx))
                    .min()
                    .map_or(0, |&target| target as i128)
            })
            .collect()
    }
}
