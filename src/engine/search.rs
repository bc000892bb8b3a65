//! The branch-and-bound search core: a depth-first traversal of the boolean assignment space
//! which propagates at every node, prunes on an objective bound, and keeps the best feasible
//! leaf as the incumbent. The procedure is exact: it either proves the incumbent optimal, proves
//! the instance infeasible, or reports the incumbent as unproven when a budget triggers first.

use log::debug;

use crate::branching::SelectionContext;
use crate::branching::VariableSelector;
use crate::constraints::ConstraintStore;
use crate::engine::domains::DomainStore;
use crate::engine::domains::FixResult;
use crate::engine::propagation::propagate;
use crate::engine::propagation::PropagationResult;
use crate::model::Model;
use crate::results::OptimisationResult;
use crate::results::Solution;
use crate::roster_assert_eq_simple;
use crate::roster_assert_moderate;
use crate::statistics::SolverStatistics;
use crate::termination::TerminationCondition;

/// One node of the search tree. A node exclusively owns its domain snapshot; the snapshot is
/// dropped when the node is discarded on backtracking.
#[derive(Debug)]
struct SearchNode {
    domains: DomainStore,
}

/// A single run of the branch-and-bound search over a derived constraint store.
pub(crate) struct BranchAndBoundSearch<'a> {
    model: &'a Model,
    constraints: &'a ConstraintStore,
    selector: Box<dyn VariableSelector>,
    statistics: &'a mut SolverStatistics,
    solution_callback: &'a mut dyn FnMut(&Solution),
}

impl<'a> BranchAndBoundSearch<'a> {
    pub(crate) fn new(
        model: &'a Model,
        constraints: &'a ConstraintStore,
        selector: Box<dyn VariableSelector>,
        statistics: &'a mut SolverStatistics,
        solution_callback: &'a mut dyn FnMut(&Solution),
    ) -> Self {
        BranchAndBoundSearch {
            model,
            constraints,
            selector,
            statistics,
            solution_callback,
        }
    }

    /// Run the search to completion or until the termination condition triggers.
    pub(crate) fn run(
        mut self,
        termination: &mut impl TerminationCondition,
    ) -> OptimisationResult {
        if let Some(slot) = self.constraints.unfillable_slot() {
            debug!(
                "every candidate for '{}' is forbidden; the instance is infeasible",
                self.model.slot_name(slot)
            );
            return OptimisationResult::Unsatisfiable;
        }

        // No feasible assignment can fill more slots than there are agents or slots.
        let objective_limit = self.model.num_agents().min(self.model.num_slots()) as u32;

        let mut incumbent: Option<Solution> = None;
        let mut stack = vec![SearchNode {
            domains: self.root_domains(),
        }];
        let mut stopped = false;

        while let Some(mut node) = stack.pop() {
            if termination.should_stop() {
                stopped = true;
                break;
            }

            match propagate(&mut node.domains, self.constraints) {
                PropagationResult::Infeasible => {
                    self.statistics.num_conflicts += 1;
                    continue;
                }
                PropagationResult::Tightened(num_fixed) => {
                    self.statistics.num_propagations += num_fixed as u64;
                }
                PropagationResult::NoChange => {}
            }

            if let Some(best) = &incumbent {
                if node.domains.upper_bound() <= best.objective() {
                    self.statistics.num_nodes_pruned += 1;
                    continue;
                }
            }

            let context = SelectionContext::new(&node.domains, self.constraints);
            match self.selector.select_variable(&context) {
                None => {
                    let solution = self.record_leaf(&node.domains, &incumbent);
                    let objective = solution.objective();
                    incumbent = Some(solution);

                    if objective == objective_limit {
                        // Nothing can beat a solution which assigns every agent or fills every
                        // slot; the incumbent is optimal without exhausting the stack.
                        break;
                    }
                }
                Some(variable) => {
                    termination.decision_has_been_made();
                    self.statistics.num_decisions += 1;

                    let mut zero_child = node.domains.clone();
                    roster_assert_eq_simple!(zero_child.fix(variable, false), FixResult::Fixed);

                    let mut one_child = node.domains;
                    roster_assert_eq_simple!(one_child.fix(variable, true), FixResult::Fixed);

                    // The 1-branch is pushed last so it is explored first, favouring filled
                    // slots.
                    stack.push(SearchNode {
                        domains: zero_child,
                    });
                    stack.push(SearchNode { domains: one_child });
                }
            }
        }

        match (incumbent, stopped) {
            (Some(solution), false) => OptimisationResult::Optimal(solution),
            (Some(solution), true) => OptimisationResult::Satisfiable(solution),
            (None, false) => OptimisationResult::Unsatisfiable,
            (None, true) => OptimisationResult::Unknown,
        }
    }

    /// The root node: every variable free, except that the variable of each forbidden pair is
    /// permanently fixed to 0.
    fn root_domains(&self) -> DomainStore {
        let mut domains = DomainStore::new(self.model.num_variables());

        for variable in self.model.forbidden_variables() {
            roster_assert_eq_simple!(domains.fix(variable, false), FixResult::Fixed);
        }

        domains
    }

    fn record_leaf(&mut self, domains: &DomainStore, incumbent: &Option<Solution>) -> Solution {
        roster_assert_eq_simple!(domains.num_free(), 0);

        let solution = Solution::from_domains(domains, self.model.num_slots() as u32);

        // The bound check already discarded nodes which cannot improve on the incumbent, so the
        // recorded objective values are strictly increasing.
        roster_assert_moderate!(incumbent
            .as_ref()
            .map_or(true, |best| solution.objective() > best.objective()));

        self.statistics.num_solutions_found += 1;
        debug!(
            "improving solution with {} filled slot(s)",
            solution.objective()
        );
        (self.solution_callback)(&solution);

        solution
    }
}

impl std::fmt::Debug for BranchAndBoundSearch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchAndBoundSearch")
            .field("selector", &self.selector.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::create_selector;
    use crate::branching::BranchingStrategy;
    use crate::termination::DecisionBudget;
    use crate::termination::Indefinite;

    fn maximise(model: &Model, termination: &mut impl TerminationCondition) -> OptimisationResult {
        let constraints = ConstraintStore::derive(model);
        let mut statistics = SolverStatistics::default();
        let mut callback = |_: &Solution| {};

        let search = BranchAndBoundSearch::new(
            model,
            &constraints,
            create_selector(BranchingStrategy::default()),
            &mut statistics,
            &mut callback,
        );

        search.run(termination)
    }

    #[test]
    fn a_restricted_instance_fills_every_slot() {
        // The scenario of the toy instance: A cannot take Role2 but all three roles are filled.
        let model = Model::build(
            ["A", "B", "C"],
            ["Role1", "Role2", "Role3"],
            [("A", "Role2")],
        )
        .unwrap();

        let OptimisationResult::Optimal(solution) = maximise(&model, &mut Indefinite) else {
            panic!("expected an optimal result");
        };

        assert_eq!(solution.objective(), 3);

        let a = model.agent("A").unwrap();
        let role2 = model.slot("Role2").unwrap();
        assert!(!solution.value(a, role2));
    }

    #[test]
    fn a_single_agent_fills_exactly_one_of_two_slots() {
        let model =
            Model::build(["A"], ["Role1", "Role2"], Vec::<(&str, &str)>::new()).unwrap();

        let OptimisationResult::Optimal(solution) = maximise(&model, &mut Indefinite) else {
            panic!("expected an optimal result");
        };

        assert_eq!(solution.objective(), 1);
    }

    #[test]
    fn a_fully_forbidden_slot_is_unsatisfiable() {
        let model =
            Model::build(["A", "B"], ["Role1"], [("A", "Role1"), ("B", "Role1")]).unwrap();

        assert!(matches!(
            maximise(&model, &mut Indefinite),
            OptimisationResult::Unsatisfiable
        ));
    }

    #[test]
    fn an_exhausted_budget_without_incumbent_is_unknown() {
        let model = Model::build(
            ["A", "B", "C"],
            ["Role1", "Role2", "Role3"],
            Vec::<(&str, &str)>::new(),
        )
        .unwrap();

        assert!(matches!(
            maximise(&model, &mut DecisionBudget::new(0)),
            OptimisationResult::Unknown
        ));
    }

    #[test]
    fn an_exhausted_budget_with_an_incumbent_is_satisfiable() {
        let model = Model::build(
            ["A", "B", "C"],
            ["Role1", "Role2", "Role3"],
            [("B", "Role1"), ("C", "Role2"), ("C", "Role3")],
        )
        .unwrap();

        // The first dive reaches a leaf filling two roles; the optimum fills all three but lies
        // beyond the second decision.
        let OptimisationResult::Satisfiable(solution) =
            maximise(&model, &mut DecisionBudget::new(2))
        else {
            panic!("expected a feasible-but-unproven result");
        };

        assert_eq!(solution.objective(), 2);
    }

    #[test]
    fn incumbent_objectives_are_monotonically_increasing() {
        let model = Model::build(
            ["A", "B", "C", "D"],
            ["Role1", "Role2", "Role3"],
            [("A", "Role1"), ("B", "Role2")],
        )
        .unwrap();

        let constraints = ConstraintStore::derive(&model);
        let mut statistics = SolverStatistics::default();
        let mut objectives = Vec::new();
        let mut callback = |solution: &Solution| objectives.push(solution.objective());

        let search = BranchAndBoundSearch::new(
            &model,
            &constraints,
            create_selector(BranchingStrategy::default()),
            &mut statistics,
            &mut callback,
        );

        assert!(matches!(
            search.run(&mut Indefinite),
            OptimisationResult::Optimal(_)
        ));
        assert!(objectives.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(objectives.last(), Some(&3));
    }

    #[test]
    fn both_strategies_agree_on_the_optimum() {
        let model = Model::build(
            ["A", "B", "C"],
            ["Role1", "Role2"],
            [("A", "Role1"), ("B", "Role1")],
        )
        .unwrap();

        for strategy in [
            BranchingStrategy::InputOrder,
            BranchingStrategy::FewestCandidateSlot,
        ] {
            let constraints = ConstraintStore::derive(&model);
            let mut statistics = SolverStatistics::default();
            let mut callback = |_: &Solution| {};

            let search = BranchAndBoundSearch::new(
                &model,
                &constraints,
                create_selector(strategy),
                &mut statistics,
                &mut callback,
            );

            let OptimisationResult::Optimal(solution) = search.run(&mut Indefinite) else {
                panic!("expected an optimal result for {strategy:?}");
            };

            assert_eq!(solution.objective(), 2);
        }
    }
}
