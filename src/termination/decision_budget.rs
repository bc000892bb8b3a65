use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers after the solver has made a given number of
/// branching decisions, giving a deterministic alternative to [`TimeBudget`].
///
/// [`TimeBudget`]: super::TimeBudget
#[derive(Clone, Copy, Debug)]
pub struct DecisionBudget {
    budget: u64,
    num_decisions: u64,
}

impl DecisionBudget {
    pub fn new(budget: u64) -> DecisionBudget {
        DecisionBudget {
            budget,
            num_decisions: 0,
        }
    }
}

impl TerminationCondition for DecisionBudget {
    fn should_stop(&mut self) -> bool {
        self.num_decisions >= self.budget
    }

    fn decision_has_been_made(&mut self) {
        self.num_decisions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_budget_triggers_after_enough_decisions() {
        let mut budget = DecisionBudget::new(2);
        assert!(!budget.should_stop());

        budget.decision_has_been_made();
        assert!(!budget.should_stop());

        budget.decision_has_been_made();
        assert!(budget.should_stop());
    }
}
