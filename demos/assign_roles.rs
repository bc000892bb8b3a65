//! The toy instance: three associates, three roles, and one restriction. Every role can be
//! filled even though A cannot take Role2.

use roster::model::Model;
use roster::results::OptimisationResult;
use roster::termination::Indefinite;
use roster::Solver;

fn main() {
    let model = Model::build(
        ["A", "B", "C"],
        ["Role1", "Role2", "Role3"],
        [("A", "Role2")],
    )
    .expect("the toy instance is a valid model");

    let mut solver = Solver::from_model(model);
    let model = solver.model().clone();

    match solver.maximise(&mut Indefinite) {
        OptimisationResult::Optimal(solution) | OptimisationResult::Satisfiable(solution) => {
            println!("Assignments:");
            for (agent, slot) in solution.assignments() {
                println!(
                    "{} assigned to {}",
                    model.agent_name(agent),
                    model.slot_name(slot)
                );
            }
        }
        OptimisationResult::Unsatisfiable | OptimisationResult::Unknown => {
            println!("No solution found.");
        }
    }
}
