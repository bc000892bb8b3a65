//! Variable selection for the branch-and-bound search. Both selectors are deterministic so that
//! the reported optimal solution is reproducible; which optimum is reported first depends on the
//! selection order, correctness does not.

use crate::constraints::ConstraintStore;
use crate::engine::DomainStore;
use crate::model::VariableId;

/// The branching strategy to use during search, selectable on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BranchingStrategy {
    /// Branch on the free variable with the lowest agent index, then the lowest slot index.
    #[default]
    InputOrder,
    /// Branch within the slot that has the fewest free candidates, ties broken by input order.
    FewestCandidateSlot,
}

pub(crate) fn create_selector(strategy: BranchingStrategy) -> Box<dyn VariableSelector> {
    match strategy {
        BranchingStrategy::InputOrder => Box::new(InputOrder),
        BranchingStrategy::FewestCandidateSlot => Box::new(FewestCandidateSlot),
    }
}

/// Read access to the state a [`VariableSelector`] may base its decision on.
#[derive(Debug)]
pub(crate) struct SelectionContext<'a> {
    domains: &'a DomainStore,
    constraints: &'a ConstraintStore,
}

impl<'a> SelectionContext<'a> {
    pub(crate) fn new(domains: &'a DomainStore, constraints: &'a ConstraintStore) -> Self {
        SelectionContext {
            domains,
            constraints,
        }
    }

    pub(crate) fn is_fixed(&self, variable: VariableId) -> bool {
        self.domains.is_fixed(variable)
    }

    pub(crate) fn slot_groups(&self) -> impl Iterator<Item = &[VariableId]> {
        self.constraints.slot_groups()
    }
}

/// Selects the variable on which the search branches next, or `None` when every variable is
/// fixed and the node is a leaf.
///
/// Every permitted variable occurs in exactly one slot group, so a selector which scans the slot
/// groups sees every branching candidate.
pub(crate) trait VariableSelector {
    fn name(&self) -> &str;

    fn select_variable(&mut self, context: &SelectionContext<'_>) -> Option<VariableId>;
}

/// The documented default: lowest agent index first, then lowest slot index. Variable ids are
/// agent-major, so this is simply the smallest free variable id.
#[derive(Clone, Copy, Debug)]
pub(crate) struct InputOrder;

impl VariableSelector for InputOrder {
    fn name(&self) -> &str {
        "InputOrder"
    }

    fn select_variable(&mut self, context: &SelectionContext<'_>) -> Option<VariableId> {
        context
            .slot_groups()
            .flatten()
            .copied()
            .filter(|&variable| !context.is_fixed(variable))
            .min()
    }
}

/// A first-fail analogue: branch in the slot with the fewest free candidates, which tends to
/// close nearly-decided slots early.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FewestCandidateSlot;

impl VariableSelector for FewestCandidateSlot {
    fn name(&self) -> &str {
        "FewestCandidateSlot"
    }

    fn select_variable(&mut self, context: &SelectionContext<'_>) -> Option<VariableId> {
        let mut selected: Option<(usize, VariableId)> = None;

        for group in context.slot_groups() {
            let free: Vec<VariableId> = group
                .iter()
                .copied()
                .filter(|&variable| !context.is_fixed(variable))
                .collect();

            if free.is_empty() {
                continue;
            }

            let candidate = (free.len(), free[0]);
            if selected.map_or(true, |best| candidate.0 < best.0) {
                selected = Some(candidate);
            }
        }

        selected.map(|(_, variable)| variable)
    }
}
