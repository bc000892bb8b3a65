//! Statistic logging of the solver. Statistics are printed as `PREFIX name=value` lines so that
//! downstream tooling can scrape them, with a configurable prefix and an optional closing line.

use std::fmt::Display;
use std::sync::OnceLock;

static STATISTIC_PREFIX: OnceLock<&str> = OnceLock::new();
static AFTER_STATISTICS: OnceLock<Option<&str>> = OnceLock::new();

const DEFAULT_PREFIX: &str = "%% ";

/// Configures the statistic logger to use a certain prefix and (an optional) closing line which
/// is printed after a block of statistics. The first configuration wins; later calls are
/// ignored.
pub fn configure(prefix: &'static str, after: Option<&'static str>) {
    let _ = STATISTIC_PREFIX.set(prefix);
    let _ = AFTER_STATISTICS.set(after);
}

/// Logs the statistic with name `name` and value `value` as `PREFIX name=value`.
pub fn log_statistic(name: impl Display, value: impl Display) {
    let prefix = STATISTIC_PREFIX.get().copied().unwrap_or(DEFAULT_PREFIX);
    println!("{prefix}{name}={value}");
}

/// Prints the closing line of a block of statistics, if one is configured.
pub fn log_statistic_postfix() {
    if let Some(Some(postfix)) = AFTER_STATISTICS.get() {
        println!("{postfix}");
    }
}

/// Counters maintained by the search core during one run of the solver.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolverStatistics {
    /// The number of branching decisions made.
    pub num_decisions: u64,
    /// The number of variables fixed by propagation.
    pub num_propagations: u64,
    /// The number of nodes discarded because propagation found a violation.
    pub num_conflicts: u64,
    /// The number of nodes discarded because their bound could not beat the incumbent.
    pub num_nodes_pruned: u64,
    /// The number of improving solutions found.
    pub num_solutions_found: u64,
}

impl SolverStatistics {
    pub fn log(&self) {
        log_statistic("numberOfDecisions", self.num_decisions);
        log_statistic("numberOfPropagations", self.num_propagations);
        log_statistic("numberOfConflicts", self.num_conflicts);
        log_statistic("numberOfPrunedNodes", self.num_nodes_pruned);
        log_statistic("numberOfSolutions", self.num_solutions_found);
        log_statistic_postfix();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_first_configuration_wins() {
        configure("> ", None);
        configure("! ", Some("done"));

        assert_eq!(STATISTIC_PREFIX.get().copied(), Some("> "));
        assert_eq!(AFTER_STATISTICS.get(), Some(&None));
    }
}
