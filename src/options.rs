use crate::branching::BranchingStrategy;

/// Configuration of the [`Solver`](crate::Solver).
#[derive(Clone, Copy, Debug, Default)]
pub struct SolverOptions {
    /// The branching strategy used by the search core.
    pub branching: BranchingStrategy,
}
