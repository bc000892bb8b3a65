//! The normalised constraint structure derived from a [`Model`]: one covering group per slot and
//! one at-most-one group per agent. Groups only contain permitted variables; the variable of a
//! forbidden pair is fixed to 0 before search starts and never takes part in propagation.

use crate::model::Model;
use crate::model::SlotId;
use crate::model::VariableId;

/// The cardinality constraints of a model in a form amenable to propagation.
///
/// The structure is bipartite: every permitted variable belongs to exactly one slot group and
/// exactly one agent group. The store is immutable once derived; only variable domains change
/// during search.
#[derive(Clone, Debug)]
pub(crate) struct ConstraintStore {
    /// For every slot, the permitted variables which could fill it. At most one of them may be 1,
    /// and the search maximises the number of groups with exactly one variable at 1.
    slot_groups: Vec<Vec<VariableId>>,
    /// For every agent, the permitted variables of the slots it could occupy. At most one of
    /// them may be 1.
    agent_groups: Vec<Vec<VariableId>>,
    /// The first slot which has no permitted candidate at all. Such a slot can never be filled,
    /// which makes the instance infeasible before any search.
    unfillable_slot: Option<SlotId>,
    num_slots: u32,
}

impl ConstraintStore {
    /// Derive the constraint store from a model. No side effects; the model is not modified.
    pub(crate) fn derive(model: &Model) -> ConstraintStore {
        let mut slot_groups = vec![Vec::new(); model.num_slots()];
        let mut agent_groups = vec![Vec::new(); model.num_agents()];

        for agent in model.agents() {
            for slot in model.slots() {
                if model.is_forbidden(agent, slot) {
                    continue;
                }

                let variable = model.variable(agent, slot);
                slot_groups[slot.index()].push(variable);
                agent_groups[agent.index()].push(variable);
            }
        }

        let unfillable_slot = slot_groups
            .iter()
            .position(Vec::is_empty)
            .map(|index| SlotId { id: index as u32 });

        ConstraintStore {
            slot_groups,
            agent_groups,
            unfillable_slot,
            num_slots: model.num_slots() as u32,
        }
    }

    pub(crate) fn slot_groups(&self) -> impl Iterator<Item = &[VariableId]> {
        self.slot_groups.iter().map(Vec::as_slice)
    }

    pub(crate) fn agent_groups(&self) -> impl Iterator<Item = &[VariableId]> {
        self.agent_groups.iter().map(Vec::as_slice)
    }

    /// The at-most-one group of the agent which owns the given variable.
    pub(crate) fn agent_group_of(&self, variable: VariableId) -> &[VariableId] {
        &self.agent_groups[(variable.id / self.num_slots) as usize]
    }

    /// A slot for which every candidate is forbidden, if one exists.
    pub(crate) fn unfillable_slot(&self) -> Option<SlotId> {
        self.unfillable_slot
    }
}
