use miette::Diagnostic;
use thiserror::Error;

/// Failure modes of the machine solvers. All are fatal for the machine being
/// solved; well-formed puzzle input never produces them.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SolveError {
    /// The light-toggle system is inconsistent over GF(2).
    #[error("no combination of button presses matches the light pattern")]
    #[diagnostic(code(machine_solver::lights_infeasible))]
    LightsInfeasible,

    /// The counter system has no non-negative integer solution.
    #[error("no combination of button presses reaches the joltage targets")]
    #[diagnostic(code(machine_solver::joltage_infeasible))]
    JoltageInfeasible,

    /// The GF(2) null space is too large to enumerate exhaustively.
    #[error("light system has {free} free variables; refusing to enumerate 2^{free} candidates")]
    #[diagnostic(code(machine_solver::null_space_too_large))]
    NullSpaceTooLarge { free: usize },
}
