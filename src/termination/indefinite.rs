use super::TerminationCondition;

/// A [`TerminationCondition`] which never triggers. The solver runs until it has proven
/// optimality or infeasibility.
#[derive(Clone, Copy, Debug)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}
