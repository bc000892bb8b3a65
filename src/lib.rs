//! `roster` is an exact solver for assignment problems: a finite set of agents, a finite set of
//! slots, and a set of forbidden (agent, slot) pairs. Every slot can be filled by at most one
//! agent and every agent fills at most one slot; the solver maximises the number of filled slots
//! and proves that no better assignment exists.
//!
//! The solver is built from the following pieces:
//! - A [`Model`](model::Model) describing the agents, the slots, and the forbidden pairs. The
//!   model is validated once at construction and is immutable afterwards.
//! - A constraint store derived from the model which normalises the cardinality structure: one
//!   covering group per slot and one at-most-one group per agent.
//! - A propagator performing unit propagation specialised to this structure.
//! - A depth-first branch-and-bound search which returns an [`OptimisationResult`]: a proven
//!   optimal solution, a feasible-but-unproven solution when a budget runs out, an infeasibility
//!   verdict, or unknown.
//!
//! # Example
//! ```
//! use roster::model::Model;
//! use roster::results::OptimisationResult;
//! use roster::termination::Indefinite;
//! use roster::Solver;
//!
//! let model = Model::build(["A", "B"], ["Role1", "Role2"], [("A", "Role2")])?;
//! let mut solver = Solver::from_model(model);
//!
//! match solver.maximise(&mut Indefinite) {
//!     OptimisationResult::Optimal(solution) => assert_eq!(solution.objective(), 2),
//!     _ => unreachable!("the instance is trivially satisfiable"),
//! }
//! # Ok::<(), roster::model::InvalidModelError>(())
//! ```

pub mod asserts;
pub mod branching;
pub mod model;
pub mod options;
pub mod results;
pub mod runner;
pub mod statistics;
pub mod termination;

mod api;
mod constraints;
mod engine;

pub use api::Solver;
pub use options::SolverOptions;
