use indicatif::ParallelProgressIterator;
use miette::*;
use rayon::prelude::*;

use crate::error::SolveError;
use crate::machine::Machine;
use crate::{lattice, parse, rational};

/// Minimum total press count driving one machine's counters to their joltage
/// targets.
pub fn machine_presses(machine: &Machine) -> Result<u64, SolveError> {
    let space = rational::reduce(&machine.joltage_system())?;
    lattice::min_total_presses(&space, &machine.press_bounds())
}

/// Sums the minimum joltage press count over every machine.
#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let machines = parse::machines(input)?;

    let total = machines
        .par_iter()
        .progress_count(machines.len() as u64)
        .map(machine_presses)
        .sum::<Result<u64, SolveError>>()?;

    Ok(total.to_string())
}
