use super::TerminationCondition;

/// Combines two [`TerminationCondition`]s into one which triggers as soon as either of the two
/// triggers. Combine with the blanket implementation for `Option` to make either side optional.
#[derive(Clone, Copy, Debug)]
pub struct Combinator<A, B> {
    first: A,
    second: B,
}

impl<A, B> Combinator<A, B> {
    pub fn new(first: A, second: B) -> Combinator<A, B> {
        Combinator { first, second }
    }
}

impl<A: TerminationCondition, B: TerminationCondition> TerminationCondition for Combinator<A, B> {
    fn should_stop(&mut self) -> bool {
        // Both sides are polled so that stateful conditions keep observing the search.
        let first = self.first.should_stop();
        let second = self.second.should_stop();

        first || second
    }

    fn decision_has_been_made(&mut self) {
        self.first.decision_has_been_made();
        self.second.decision_has_been_made();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::DecisionBudget;
    use crate::termination::Indefinite;

    #[test]
    fn either_side_triggers_the_combinator() {
        let mut condition = Combinator::new(Indefinite, DecisionBudget::new(1));
        assert!(!condition.should_stop());

        condition.decision_has_been_made();
        assert!(condition.should_stop());
    }

    #[test]
    fn absent_sides_never_trigger() {
        let mut condition = Combinator::new(None::<DecisionBudget>, None::<DecisionBudget>);
        assert!(!condition.should_stop());
    }
}
