//! The boolean domain table of a search node. Domains only ever shrink: a free variable can be
//! fixed, but a fixed variable never becomes free again and never changes value.

use crate::model::VariableId;

/// The result of fixing a variable in a [`DomainStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FixResult {
    /// The variable was free and is now fixed to the requested value.
    Fixed,
    /// The variable was already fixed to the requested value.
    Unchanged,
    /// The variable is fixed to the opposite value; the requested fixing is inconsistent.
    Conflict,
}

/// The domains of all decision variables of one search node. Every node owns its store
/// exclusively; branching clones the store and the clone is dropped on backtrack.
#[derive(Clone, Debug)]
pub(crate) struct DomainStore {
    values: Vec<Option<bool>>,
    num_fixed_one: u32,
    num_free: u32,
}

impl DomainStore {
    pub(crate) fn new(num_variables: usize) -> DomainStore {
        DomainStore {
            values: vec![None; num_variables],
            num_fixed_one: 0,
            num_free: num_variables as u32,
        }
    }

    pub(crate) fn value(&self, variable: VariableId) -> Option<bool> {
        self.values[variable.index()]
    }

    pub(crate) fn is_fixed(&self, variable: VariableId) -> bool {
        self.values[variable.index()].is_some()
    }

    /// Fix a variable to a value. Fixing is monotone: a previously fixed variable is never
    /// unfixed, and an attempt to flip one is reported as [`FixResult::Conflict`].
    pub(crate) fn fix(&mut self, variable: VariableId, value: bool) -> FixResult {
        match self.values[variable.index()] {
            Some(current) if current == value => FixResult::Unchanged,
            Some(_) => FixResult::Conflict,
            None => {
                self.values[variable.index()] = Some(value);
                self.num_free -= 1;
                if value {
                    self.num_fixed_one += 1;
                }
                FixResult::Fixed
            }
        }
    }

    /// The number of variables currently fixed to 1, which is the objective value once no free
    /// variable remains.
    pub(crate) fn num_fixed_one(&self) -> u32 {
        self.num_fixed_one
    }

    pub(crate) fn num_free(&self) -> u32 {
        self.num_free
    }

    /// An upper bound on the objective reachable from this state: every free variable could, at
    /// best, still become 1.
    pub(crate) fn upper_bound(&self) -> u32 {
        self.num_fixed_one + self.num_free
    }

    pub(crate) fn values(&self) -> &[Option<bool>] {
        &self.values
    }
}
