//! The outcomes of a solver run. Infeasibility and budget exhaustion are values to
//! pattern-match on, never errors: the caller can always distinguish a proven optimum from a
//! feasible-but-unproven incumbent.

use crate::engine::DomainStore;
use crate::model::AgentId;
use crate::model::SlotId;

/// The conclusion of [`Solver::maximise`](crate::Solver::maximise).
#[derive(Clone, Debug)]
pub enum OptimisationResult {
    /// The search space was exhausted; the solution is a proven optimum.
    Optimal(Solution),
    /// A termination condition triggered before optimality was proven; the solution is the best
    /// incumbent found so far.
    Satisfiable(Solution),
    /// No assignment satisfies the constraints.
    Unsatisfiable,
    /// A termination condition triggered before any solution was found.
    Unknown,
}

/// A total, consistent assignment of every decision variable, produced by the search core at a
/// feasible leaf and immutable afterwards.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Agent-major variable values, mirroring the layout of the model's variable table.
    values: Box<[bool]>,
    num_slots: u32,
    objective: u32,
}

impl Solution {
    pub(crate) fn from_domains(domains: &DomainStore, num_slots: u32) -> Solution {
        let values = domains
            .values()
            .iter()
            .map(|value| value.unwrap_or(false))
            .collect();

        Solution {
            values,
            num_slots,
            objective: domains.num_fixed_one(),
        }
    }

    /// The number of filled slots.
    pub fn objective(&self) -> u32 {
        self.objective
    }

    /// The value of the decision variable of the (agent, slot) pair.
    pub fn value(&self, agent: AgentId, slot: SlotId) -> bool {
        self.values[(agent.id * self.num_slots + slot.id) as usize]
    }

    /// The (agent, slot) pairs assigned in this solution, ordered by agent index.
    pub fn assignments(&self) -> impl Iterator<Item = (AgentId, SlotId)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, assigned)| **assigned)
            .map(|(index, _)| {
                let index = index as u32;
                (
                    AgentId {
                        id: index / self.num_slots,
                    },
                    SlotId {
                        id: index % self.num_slots,
                    },
                )
            })
    }
}

/// Signalled by [`report`] when the result carries no solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no solution found")]
pub struct NoSolutionFound;

/// Renders the fixed-to-1 variables of the best solution as (agent, slot) pairs, ordered by
/// agent index. A pure transformation: [`OptimisationResult::Unsatisfiable`] and
/// [`OptimisationResult::Unknown`] are reported as [`NoSolutionFound`].
pub fn report(result: &OptimisationResult) -> Result<Vec<(AgentId, SlotId)>, NoSolutionFound> {
    match result {
        OptimisationResult::Optimal(solution) | OptimisationResult::Satisfiable(solution) => {
            Ok(solution.assignments().collect())
        }
        OptimisationResult::Unsatisfiable | OptimisationResult::Unknown => Err(NoSolutionFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FixResult;
    use crate::model::Model;

    fn solved_domains(model: &Model, assigned: &[(AgentId, SlotId)]) -> DomainStore {
        let mut domains = DomainStore::new(model.num_variables());

        for agent in model.agents() {
            for slot in model.slots() {
                let value = assigned.contains(&(agent, slot));
                assert_eq!(
                    domains.fix(model.variable(agent, slot), value),
                    FixResult::Fixed
                );
            }
        }

        domains
    }

    #[test]
    fn assignments_are_ordered_by_agent_index() {
        let model = Model::build(["A", "B"], ["Role1", "Role2"], Vec::<(&str, &str)>::new())
            .unwrap();
        let a = model.agent("A").unwrap();
        let b = model.agent("B").unwrap();
        let role1 = model.slot("Role1").unwrap();
        let role2 = model.slot("Role2").unwrap();

        let domains = solved_domains(&model, &[(b, role1), (a, role2)]);
        let solution = Solution::from_domains(&domains, model.num_slots() as u32);

        assert_eq!(solution.objective(), 2);
        assert_eq!(
            solution.assignments().collect::<Vec<_>>(),
            vec![(a, role2), (b, role1)]
        );
        assert!(solution.value(a, role2));
        assert!(!solution.value(a, role1));
    }

    #[test]
    fn report_extracts_pairs_from_solutions() {
        let model = Model::build(["A"], ["Role1"], Vec::<(&str, &str)>::new()).unwrap();
        let a = model.agent("A").unwrap();
        let role1 = model.slot("Role1").unwrap();

        let domains = solved_domains(&model, &[(a, role1)]);
        let solution = Solution::from_domains(&domains, 1);

        let pairs = report(&OptimisationResult::Optimal(solution.clone())).unwrap();
        assert_eq!(pairs, vec![(a, role1)]);

        let pairs = report(&OptimisationResult::Satisfiable(solution)).unwrap();
        assert_eq!(pairs, vec![(a, role1)]);
    }

    #[test]
    fn report_signals_when_there_is_no_solution() {
        assert_eq!(
            report(&OptimisationResult::Unsatisfiable),
            Err(NoSolutionFound)
        );
        assert_eq!(report(&OptimisationResult::Unknown), Err(NoSolutionFound));
    }
}
