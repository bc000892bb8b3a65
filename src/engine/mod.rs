pub(crate) mod domains;
pub(crate) mod propagation;
pub(crate) mod search;

pub(crate) use domains::DomainStore;
pub(crate) use domains::FixResult;
pub(crate) use search::BranchAndBoundSearch;
