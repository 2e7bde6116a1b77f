//! Input parsing: one machine per line, in the form
//! `[.##.] (3) (1,3) (0,2) {3,5,4,7}`: a bracketed light diagram (`#` lit),
//! one parenthesised index list per button, and the braced joltage targets.

use chumsky::prelude::*;

use crate::machine::{Bits, Machine};

fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Machine>, extra::Err<Rich<'a, char>>> {
    // Whitespace between sections, newlines excluded.
    let hspace = one_of(" \t").repeated();

    let light = choice((just('.').to(false), just('#').to(true)));

    // [.##.]
    let diagram = light
        .repeated()
        .collect::<Vec<bool>>()
        .map(|bits| bits.into_iter().collect::<Bits>())
        .delimited_by(just('['), just(']'));

    let number = text::int(10).from_str::<u64>().unwrapped();

    // (0,2,3)
    let wiring = number
        .map(|idx| idx as usize)
        .separated_by(just(','))
        .collect::<Vec<usize>>()
        .delimited_by(just('('), just(')'));

    let buttons = wiring.padded_by(hspace).repeated().collect::<Vec<_>>();

    // {3,5,4,7}
    let joltage = number
        .separated_by(just(','))
        .collect::<Vec<u64>>()
        .delimited_by(just('{'), just('}'));

    let machine = diagram
        .then_ignore(hspace)
        .then(buttons)
        .then(joltage)
        .map(|((target_lights, buttons), joltage_targets)| Machine {
            target_lights,
            buttons,
            joltage_targets,
        });

    machine
        .separated_by(text::newline())
        .allow_trailing()
        .collect()
}

/// Parses the full puzzle input.
pub fn machines(input: &str) -> miette::Result<Vec<Machine>> {
    parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette::miette!("Parse failed: {:?}", e))
}
