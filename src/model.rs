//! The in-memory representation of an assignment problem: agents, slots, and the forbidden
//! (agent, slot) pairs. One boolean decision variable exists per (agent, slot) pair.

use std::fmt::Display;

use fnv::FnvHashMap;

/// The identifier of an agent: an index into the agent table of the [`Model`] that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentId {
    pub(crate) id: u32,
}

impl AgentId {
    /// The index of this agent within its model.
    pub fn index(&self) -> usize {
        self.id as usize
    }
}

impl Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agent{}", self.id)
    }
}

/// The identifier of a slot: an index into the slot table of the [`Model`] that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId {
    pub(crate) id: u32,
}

impl SlotId {
    /// The index of this slot within its model.
    pub fn index(&self) -> usize {
        self.id as usize
    }
}

impl Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot{}", self.id)
    }
}

/// The identifier of a boolean decision variable. Variables are laid out agent-major, so the
/// natural ordering of variable ids is the lowest-agent-then-lowest-slot ordering used by the
/// default branching strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct VariableId {
    pub(crate) id: u32,
}

impl VariableId {
    pub(crate) fn index(&self) -> usize {
        self.id as usize
    }
}

/// Errors reported by [`Model::build`] for malformed input. Model construction fails fast; no
/// search is attempted on an invalid model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidModelError {
    #[error("the model does not contain any agents")]
    NoAgents,
    #[error("the model does not contain any slots")]
    NoSlots,
    #[error("duplicate agent identity '{0}'")]
    DuplicateAgent(String),
    #[error("duplicate slot identity '{0}'")]
    DuplicateSlot(String),
    #[error("restriction references unknown agent '{0}'")]
    UnknownAgent(String),
    #[error("restriction references unknown slot '{0}'")]
    UnknownSlot(String),
}

/// A validated assignment problem. The model owns all decision variables in a single
/// agent-major table; restrictions are normalised into a boolean lookup table at construction so
/// the search never hashes identities.
#[derive(Clone, Debug)]
pub struct Model {
    agents: Vec<String>,
    slots: Vec<String>,
    /// Agent-major table; `forbidden[agent * num_slots + slot]` marks the pair as forbidden.
    forbidden: Vec<bool>,
}

impl Model {
    /// Build a model from agent identities, slot identities, and forbidden (agent, slot) pairs.
    ///
    /// Identities must be unique within their own sequence, both sequences must be non-empty,
    /// and every restriction must reference an existing agent and slot; otherwise the
    /// corresponding [`InvalidModelError`] is returned. Construction is pure.
    pub fn build<AgentName, SlotName, RestrictionAgent, RestrictionSlot>(
        agents: impl IntoIterator<Item = AgentName>,
        slots: impl IntoIterator<Item = SlotName>,
        restrictions: impl IntoIterator<Item = (RestrictionAgent, RestrictionSlot)>,
    ) -> Result<Model, InvalidModelError>
    where
        AgentName: Into<String>,
        SlotName: Into<String>,
        RestrictionAgent: AsRef<str>,
        RestrictionSlot: AsRef<str>,
    {
        let (agents, agent_indices) = collect_identities(agents, InvalidModelError::DuplicateAgent)?;
        let (slots, slot_indices) = collect_identities(slots, InvalidModelError::DuplicateSlot)?;

        if agents.is_empty() {
            return Err(InvalidModelError::NoAgents);
        }
        if slots.is_empty() {
            return Err(InvalidModelError::NoSlots);
        }

        let mut forbidden = vec![false; agents.len() * slots.len()];

        for (agent, slot) in restrictions {
            let agent_index = *agent_indices
                .get(agent.as_ref())
                .ok_or_else(|| InvalidModelError::UnknownAgent(agent.as_ref().to_owned()))?;
            let slot_index = *slot_indices
                .get(slot.as_ref())
                .ok_or_else(|| InvalidModelError::UnknownSlot(slot.as_ref().to_owned()))?;

            forbidden[agent_index * slots.len() + slot_index] = true;
        }

        Ok(Model {
            agents,
            slots,
            forbidden,
        })
    }

    pub fn num_agents(&self) -> usize {
        self.agents.len()
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// The total number of decision variables, one per (agent, slot) pair.
    pub fn num_variables(&self) -> usize {
        self.agents.len() * self.slots.len()
    }

    pub fn agents(&self) -> impl Iterator<Item = AgentId> {
        (0..self.agents.len() as u32).map(|id| AgentId { id })
    }

    pub fn slots(&self) -> impl Iterator<Item = SlotId> {
        (0..self.slots.len() as u32).map(|id| SlotId { id })
    }

    pub fn agent_name(&self, agent: AgentId) -> &str {
        &self.agents[agent.index()]
    }

    pub fn slot_name(&self, slot: SlotId) -> &str {
        &self.slots[slot.index()]
    }

    /// Look up an agent by its identity.
    pub fn agent(&self, name: &str) -> Option<AgentId> {
        self.agents
            .iter()
            .position(|agent| agent == name)
            .map(|index| AgentId { id: index as u32 })
    }

    /// Look up a slot by its identity.
    pub fn slot(&self, name: &str) -> Option<SlotId> {
        self.slots
            .iter()
            .position(|slot| slot == name)
            .map(|index| SlotId { id: index as u32 })
    }

    /// Whether the (agent, slot) pair is marked forbidden. The decision variable of a forbidden
    /// pair is fixed to 0 before search starts and can never become 1.
    pub fn is_forbidden(&self, agent: AgentId, slot: SlotId) -> bool {
        self.forbidden[self.variable(agent, slot).index()]
    }

    pub(crate) fn variable(&self, agent: AgentId, slot: SlotId) -> VariableId {
        VariableId {
            id: agent.id * self.slots.len() as u32 + slot.id,
        }
    }

    pub(crate) fn agent_of(&self, variable: VariableId) -> AgentId {
        AgentId {
            id: variable.id / self.slots.len() as u32,
        }
    }

    pub(crate) fn slot_of(&self, variable: VariableId) -> SlotId {
        SlotId {
            id: variable.id % self.slots.len() as u32,
        }
    }

    pub(crate) fn forbidden_variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.forbidden
            .iter()
            .enumerate()
            .filter(|(_, forbidden)| **forbidden)
            .map(|(index, _)| VariableId { id: index as u32 })
    }
}

fn collect_identities<Name: Into<String>>(
    names: impl IntoIterator<Item = Name>,
    duplicate_error: impl Fn(String) -> InvalidModelError,
) -> Result<(Vec<String>, FnvHashMap<String, usize>), InvalidModelError> {
    let mut identities = Vec::new();
    let mut indices = FnvHashMap::default();

    for name in names {
        let name = name.into();

        if indices.insert(name.clone(), identities.len()).is_some() {
            return Err(duplicate_error(name));
        }

        identities.push(name);
    }

    Ok((identities, indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn building_a_valid_model_succeeds() {
        let model = Model::build(["A", "B", "C"], ["Role1", "Role2"], [("A", "Role2")])
            .expect("the model is valid");

        assert_eq!(model.num_agents(), 3);
        assert_eq!(model.num_slots(), 2);
        assert_eq!(model.num_variables(), 6);

        let a = model.agent("A").unwrap();
        let role2 = model.slot("Role2").unwrap();
        assert!(model.is_forbidden(a, role2));

        let b = model.agent("B").unwrap();
        assert!(!model.is_forbidden(b, role2));
    }

    #[test]
    fn an_empty_agent_sequence_is_rejected() {
        let result = Model::build(Vec::<String>::new(), vec!["Role1"], no_restrictions());

        assert_eq!(result.unwrap_err(), InvalidModelError::NoAgents);
    }

    #[test]
    fn an_empty_slot_sequence_is_rejected() {
        let result = Model::build(vec!["A"], Vec::<String>::new(), no_restrictions());

        assert_eq!(result.unwrap_err(), InvalidModelError::NoSlots);
    }

    #[test]
    fn duplicate_identities_are_rejected() {
        let result = Model::build(["A", "A"], ["Role1"], no_restrictions());
        assert_eq!(
            result.unwrap_err(),
            InvalidModelError::DuplicateAgent("A".to_owned())
        );

        let result = Model::build(["A"], ["Role1", "Role1"], no_restrictions());
        assert_eq!(
            result.unwrap_err(),
            InvalidModelError::DuplicateSlot("Role1".to_owned())
        );
    }

    #[test]
    fn restrictions_must_reference_known_identities() {
        let result = Model::build(["A"], ["Role1"], [("B", "Role1")]);
        assert_eq!(
            result.unwrap_err(),
            InvalidModelError::UnknownAgent("B".to_owned())
        );

        let result = Model::build(["A"], ["Role1"], [("A", "Role9")]);
        assert_eq!(
            result.unwrap_err(),
            InvalidModelError::UnknownSlot("Role9".to_owned())
        );
    }

    #[test]
    fn variable_ids_are_agent_major() {
        let model = Model::build(["A", "B"], ["Role1", "Role2"], no_restrictions()).unwrap();

        let b = model.agent("B").unwrap();
        let role2 = model.slot("Role2").unwrap();
        let variable = model.variable(b, role2);

        assert_eq!(variable.index(), 3);
        assert_eq!(model.agent_of(variable), b);
        assert_eq!(model.slot_of(variable), role2);
    }

    fn no_restrictions() -> Vec<(String, String)> {
        Vec::new()
    }
}
