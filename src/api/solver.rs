use crate::branching::create_selector;
use crate::constraints::ConstraintStore;
use crate::engine::BranchAndBoundSearch;
use crate::model::Model;
use crate::options::SolverOptions;
use crate::results::OptimisationResult;
use crate::results::Solution;
use crate::statistics::SolverStatistics;
use crate::termination::TerminationCondition;

/// The entry point for solving an assignment problem: owns a validated [`Model`], the constraint
/// store derived from it, and the statistics of the most recent run.
///
/// # Example
/// ```
/// use roster::model::Model;
/// use roster::results::OptimisationResult;
/// use roster::termination::Indefinite;
/// use roster::Solver;
///
/// let model = Model::build(["A", "B"], ["Role1"], [("A", "Role1")])?;
/// let mut solver = Solver::from_model(model);
///
/// let result = solver.maximise(&mut Indefinite);
/// assert!(matches!(result, OptimisationResult::Optimal(_)));
/// # Ok::<(), roster::model::InvalidModelError>(())
/// ```
pub struct Solver {
    model: Model,
    constraints: ConstraintStore,
    options: SolverOptions,
    statistics: SolverStatistics,
    solution_callback: Box<dyn FnMut(&Solution)>,
}

impl Solver {
    /// Create a solver with default options.
    pub fn from_model(model: Model) -> Solver {
        Solver::with_options(model, SolverOptions::default())
    }

    /// Create a solver with the given options. The constraint store is derived once, here; only
    /// variable domains change during search.
    pub fn with_options(model: Model, options: SolverOptions) -> Solver {
        let constraints = ConstraintStore::derive(&model);

        Solver {
            model,
            constraints,
            options,
            statistics: SolverStatistics::default(),
            solution_callback: Box::new(|_| {}),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Register a callback which is invoked on every improving solution the search finds,
    /// replacing any previously registered callback.
    pub fn with_solution_callback(&mut self, callback: impl FnMut(&Solution) + 'static) {
        self.solution_callback = Box::new(callback);
    }

    /// Search for the assignment which fills the most slots.
    ///
    /// Returns [`OptimisationResult::Optimal`] or [`OptimisationResult::Unsatisfiable`] when the
    /// search space is exhausted, and [`OptimisationResult::Satisfiable`] or
    /// [`OptimisationResult::Unknown`] when the termination condition triggers first. Every run
    /// starts from scratch; no state carries over between runs.
    pub fn maximise(
        &mut self,
        termination: &mut impl TerminationCondition,
    ) -> OptimisationResult {
        self.statistics = SolverStatistics::default();

        let search = BranchAndBoundSearch::new(
            &self.model,
            &self.constraints,
            create_selector(self.options.branching),
            &mut self.statistics,
            self.solution_callback.as_mut(),
        );

        search.run(termination)
    }

    /// The statistics of the most recent [`Solver::maximise`] run.
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// Log the statistics of the most recent run through the statistic logger.
    pub fn log_statistics(&self) {
        self.statistics.log();
    }
}

impl std::fmt::Debug for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("model", &self.model)
            .field("options", &self.options)
            .field("statistics", &self.statistics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::DecisionBudget;
    use crate::termination::Indefinite;

    #[test]
    fn repeated_runs_are_stateless() {
        let model =
            Model::build(["A", "B"], ["Role1", "Role2"], [("A", "Role2")]).unwrap();
        let mut solver = Solver::from_model(model);

        for _ in 0..2 {
            let OptimisationResult::Optimal(solution) = solver.maximise(&mut Indefinite) else {
                panic!("expected an optimal result");
            };
            assert_eq!(solution.objective(), 2);
        }
    }

    #[test]
    fn the_callback_observes_every_incumbent() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let model = Model::build(
            ["A", "B", "C"],
            ["Role1", "Role2", "Role3"],
            [("A", "Role2")],
        )
        .unwrap();
        let mut solver = Solver::from_model(model);

        let objectives = Rc::new(RefCell::new(Vec::new()));
        let observed = Rc::clone(&objectives);
        solver.with_solution_callback(move |solution| {
            observed.borrow_mut().push(solution.objective());
        });

        let _ = solver.maximise(&mut Indefinite);

        assert_eq!(objectives.borrow().last(), Some(&3));
        assert_eq!(solver.statistics().num_solutions_found as usize, objectives.borrow().len());
    }

    #[test]
    fn a_budget_of_zero_reports_unknown() {
        let model =
            Model::build(["A", "B"], ["Role1", "Role2"], Vec::<(&str, &str)>::new()).unwrap();
        let mut solver = Solver::from_model(model);

        assert!(matches!(
            solver.maximise(&mut DecisionBudget::new(0)),
            OptimisationResult::Unknown
        ));
    }
}
