use std::fmt;

use super::options::EvolutionOptions;

/// Why a run stopped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The best fitness fell below the convergence threshold.
    Converged,
    /// The stall count exceeded its ceiling.
    Stalled,
    /// The generation limit was reached.
    Exhausted,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Converged => "converged",
            Self::Stalled => "stalled",
            Self::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// Checks the exit conditions after generation `generation` (zero-based) has
/// been measured. Convergence wins over a stall, and both over exhaustion.
pub fn check_termination(
    options: &EvolutionOptions,
    generation: usize,
    best: f64,
    stall_count: usize,
) -> Option<TerminationReason> {
    if best < options.get_convergence_threshold() {
        Some(TerminationReason::Converged)
    } else if stall_count > options.get_max_stall() {
        Some(TerminationReason::Stalled)
    } else if generation + 1 >= options.get_max_generations() {
        Some(TerminationReason::Exhausted)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> EvolutionOptions {
        EvolutionOptions::builder()
            .max_generations(10)
            .max_stall(3)
            .convergence_threshold(0.5)
            .build()
    }

    #[test]
    fn test_continue() {
        assert_eq!(check_termination(&options(), 0, 10.0, 0), None);
        assert_eq!(check_termination(&options(), 8, 0.5, 3), None);
    }

    #[test]
    fn test_each_reason() {
        assert_eq!(
            check_termination(&options(), 0, 0.49, 0),
            Some(TerminationReason::Converged)
        );
        assert_eq!(
            check_termination(&options(), 4, 10.0, 4),
            Some(TerminationReason::Stalled)
        );
        assert_eq!(
            check_termination(&options(), 9, 10.0, 0),
            Some(TerminationReason::Exhausted)
        );
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            check_termination(&options(), 9, 0.1, 9),
            Some(TerminationReason::Converged)
        );
        assert_eq!(
            check_termination(&options(), 9, 10.0, 9),
            Some(TerminationReason::Stalled)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TerminationReason::Stalled.to_string(), "stalled");
    }
}
