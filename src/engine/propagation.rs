//! Unit propagation specialised to the slot-covering / at-most-one structure of the assignment
//! problem. Propagation runs to a fixed point, never unfixes a variable, and is idempotent:
//! running it again on an already-propagated store reports no change.

use crate::constraints::ConstraintStore;
use crate::engine::domains::DomainStore;
use crate::engine::domains::FixResult;
use crate::model::VariableId;

/// The result of running the propagator on a search node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PropagationResult {
    /// Propagation fixed the given number of additional variables.
    Tightened(usize),
    /// The store was already at a fixed point.
    NoChange,
    /// A cardinality constraint is violated; the node cannot lead to a solution.
    Infeasible,
}

/// Tighten the domains with the unit rules until a fixed point or a violation:
///
/// - a group with two variables fixed to 1 is a violation;
/// - a group with one variable fixed to 1 fixes every other member to 0;
/// - a slot whose last remaining free candidate is its only hope of being filled fixes that
///   candidate to 1, unless the candidate's agent is already assigned elsewhere (in which case
///   the candidate is 0 and the slot stays unfilled).
///
/// The last rule is a dominance rule rather than a feasibility rule: filling a slot with its
/// only candidate always preserves at least one optimal assignment.
pub(crate) fn propagate(
    domains: &mut DomainStore,
    constraints: &ConstraintStore,
) -> PropagationResult {
    let mut num_fixed_total = 0;

    loop {
        let mut num_fixed = 0;

        for group in constraints.agent_groups() {
            match sweep_at_most_one(domains, group) {
                Some(n) => num_fixed += n,
                None => return PropagationResult::Infeasible,
            }
        }

        for group in constraints.slot_groups() {
            match sweep_slot(domains, constraints, group) {
                Some(n) => num_fixed += n,
                None => return PropagationResult::Infeasible,
            }
        }

        if num_fixed == 0 {
            break;
        }

        num_fixed_total += num_fixed;
    }

    if num_fixed_total == 0 {
        PropagationResult::NoChange
    } else {
        PropagationResult::Tightened(num_fixed_total)
    }
}

/// At most one member of `group` may be 1. Returns the number of newly fixed variables, or
/// `None` on a violation.
fn sweep_at_most_one(domains: &mut DomainStore, group: &[VariableId]) -> Option<usize> {
    let mut assigned = None;

    for &variable in group {
        if domains.value(variable) == Some(true) {
            if assigned.is_some() {
                return None;
            }
            assigned = Some(variable);
        }
    }

    match assigned {
        Some(variable) => zero_all_except(domains, group, variable),
        None => Some(0),
    }
}

/// The covering group of one slot: at most one member may be 1, and a single remaining free
/// candidate is fixed to 1 by dominance.
fn sweep_slot(
    domains: &mut DomainStore,
    constraints: &ConstraintStore,
    group: &[VariableId],
) -> Option<usize> {
    let mut assigned = None;
    let mut free = None;
    let mut num_free = 0;

    for &variable in group {
        match domains.value(variable) {
            Some(true) => {
                if assigned.is_some() {
                    return None;
                }
                assigned = Some(variable);
            }
            Some(false) => {}
            None => {
                free = Some(variable);
                num_free += 1;
            }
        }
    }

    if let Some(variable) = assigned {
        return zero_all_except(domains, group, variable);
    }

    let (Some(candidate), 1) = (free, num_free) else {
        return Some(0);
    };

    // The candidate's agent may already be assigned to another slot; then the candidate is 0 and
    // the slot stays unfilled.
    let agent_group = constraints.agent_group_of(candidate);
    if agent_group
        .iter()
        .any(|&other| domains.value(other) == Some(true))
    {
        return match domains.fix(candidate, false) {
            FixResult::Conflict => None,
            _ => Some(1),
        };
    }

    if domains.fix(candidate, true) == FixResult::Conflict {
        return None;
    }

    zero_all_except(domains, agent_group, candidate).map(|n| n + 1)
}

fn zero_all_except(
    domains: &mut DomainStore,
    group: &[VariableId],
    keep: VariableId,
) -> Option<usize> {
    let mut num_fixed = 0;

    for &variable in group {
        if variable == keep {
            continue;
        }

        match domains.fix(variable, false) {
            FixResult::Fixed => num_fixed += 1,
            FixResult::Unchanged => {}
            FixResult::Conflict => return None,
        }
    }

    Some(num_fixed)
}
