//! The command-line glue around the solver: parses a line-oriented instance file, runs the
//! search with the requested budgets, and prints the assignment of every improving solution.
//!
//! The instance format has one directive per line:
//!
//! ```text
//! % a comment
//! agent A
//! agent B
//! slot Role1
//! forbid A Role1
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use crate::branching::BranchingStrategy;
use crate::model::Model;
use crate::options::SolverOptions;
use crate::results::OptimisationResult;
use crate::statistics;
use crate::termination::Combinator;
use crate::termination::DecisionBudget;
use crate::termination::TimeBudget;
use crate::Solver;

#[derive(Debug, clap::Parser)]
#[command(about = "An exact solver for agent-to-slot assignment with forbidden pairs.")]
pub struct Cli {
    /// The instance file to solve.
    pub instance: PathBuf,

    /// The number of seconds the solver is allowed to run.
    #[arg(short = 't', long = "time-out")]
    pub time_out: Option<u64>,

    /// The number of branching decisions the solver is allowed to make.
    #[arg(short = 'd', long = "decision-budget")]
    pub decision_budget: Option<u64>,

    /// The branching strategy to use.
    #[arg(short = 'S', long = "branching", value_enum, default_value_t)]
    pub branching: BranchingStrategy,
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();

    let args = Cli::parse();

    statistics::configure("%% ", None);

    let source = std::fs::read_to_string(&args.instance)
        .with_context(|| format!("Error reading {}", args.instance.display()))?;

    let model = parse_instance(&source)
        .with_context(|| format!("Failed to parse {}", args.instance.display()))?;

    solve(model, args.branching, args.time_out, args.decision_budget)
}

/// Solve the model and print its solutions: one `AGENT -> SLOT` line per assignment, a
/// `----------` separator per improving solution, and the usual status banners.
pub fn solve(
    model: Model,
    branching: BranchingStrategy,
    time_out: Option<u64>,
    decision_budget: Option<u64>,
) -> anyhow::Result<()> {
    let mut solver = Solver::with_options(model, SolverOptions { branching });

    let callback_model = solver.model().clone();
    solver.with_solution_callback(move |solution| {
        for (agent, slot) in solution.assignments() {
            println!(
                "{} -> {}",
                callback_model.agent_name(agent),
                callback_model.slot_name(slot)
            );
        }

        println!("----------");
    });

    let mut termination = Combinator::new(
        time_out.map(|seconds| TimeBudget::starting_now(Duration::from_secs(seconds))),
        decision_budget.map(DecisionBudget::new),
    );

    // Printing of the solutions is handled in the callback.
    let result = solver.maximise(&mut termination);
    println!("{}", status_banner(&result));

    solver.log_statistics();

    Ok(())
}

/// The status line printed after the solutions: `==========` when the last printed solution is a
/// proven optimum, and an explicit marker when a termination condition cut the search short.
fn status_banner(result: &OptimisationResult) -> &'static str {
    match result {
        OptimisationResult::Optimal(_) => "==========",
        OptimisationResult::Satisfiable(_) => "% search incomplete",
        OptimisationResult::Unsatisfiable => "UNSATISFIABLE",
        OptimisationResult::Unknown => "UNKNOWN",
    }
}

/// Parse the line-oriented instance format. Blank lines and lines starting with `%` are ignored;
/// every other line is an `agent`, `slot`, or `forbid` directive.
pub fn parse_instance(source: &str) -> anyhow::Result<Model> {
    let mut agents = Vec::new();
    let mut slots = Vec::new();
    let mut restrictions = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(directive) = tokens.next() else {
            continue;
        };

        match directive {
            "agent" => {
                let name = tokens
                    .next()
                    .with_context(|| format!("line {line_number}: expected a name after 'agent'"))?;
                agents.push(name.to_owned());
            }
            "slot" => {
                let name = tokens
                    .next()
                    .with_context(|| format!("line {line_number}: expected a name after 'slot'"))?;
                slots.push(name.to_owned());
            }
            "forbid" => {
                let agent = tokens.next().with_context(|| {
                    format!("line {line_number}: expected an agent after 'forbid'")
                })?;
                let slot = tokens.next().with_context(|| {
                    format!("line {line_number}: expected a slot after 'forbid {agent}'")
                })?;
                restrictions.push((agent.to_owned(), slot.to_owned()));
            }
            _ => anyhow::bail!("line {line_number}: unknown directive '{directive}'"),
        }

        if let Some(trailing) = tokens.next() {
            anyhow::bail!("line {line_number}: unexpected trailing input '{trailing}'");
        }
    }

    Ok(Model::build(agents, slots, restrictions)?)
}
