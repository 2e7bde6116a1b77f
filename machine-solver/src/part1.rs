use miette::*;
use rayon::prelude::*;

use crate::error::SolveError;
use crate::{gf2, parse};

/// Sums the minimum light-pattern press count over every machine.
#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let machines = parse::machines(input)?;

    let total = machines
        .par_iter()
        .map(|machine| gf2::min_presses(&machine.light_system()))
        .sum::<Result<u64, SolveError>>()?;

    Ok(total.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = "[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}";
        assert_eq!("7", process(input)?);
        Ok(())
    }
}
