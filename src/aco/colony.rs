use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tracing::{debug, info, warn};

use crate::{
    aco::{
        construction::AssignmentConstructor,
        parameters::AcoParameters,
        pheromone::PheromoneMatrix,
        selection::{value::ValueSelector, variable::VariableSelector},
        update::PheromoneUpdater,
    },
    csp::{assignment::Assignment, problem::Problem, propagation::Propagator},
    error::{EngineError, Result},
};

/// How a colony run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A complete consistent assignment was found in the given cycle.
    SolutionFound { cycle: usize },
    /// The cycle budget ran out; the returned assignment is best-effort.
    BudgetExhausted,
    /// The external stop flag was raised between cycles.
    Stopped,
}

/// Counters for one [`Colony::solve`] run.
#[derive(Debug, Clone)]
pub struct ColonyStats {
    pub cycles_run: usize,
    pub ants_dispatched: usize,
    /// Size of the best assignment of each cycle, in cycle order.
    pub cycle_best_sizes: Vec<usize>,
    pub outcome: Outcome,
}

/// An ant colony that iteratively constructs and improves CSP assignments.
///
/// The colony drives the outer loop: `ants_per_cycle` construction walks
/// per cycle against a read-only pheromone matrix, then one MAX-MIN update
/// as the sole mutation point, until a solution appears or the cycle
/// budget is spent. Propagator failures are absorbed as short walks; only
/// contract violations surface as errors.
pub struct Colony {
    parameters: AcoParameters,
    pheromones: PheromoneMatrix,
    best_assignment: Assignment,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl Colony {
    /// Build a colony for the problem, with every trail at τ_max.
    pub fn create(problem: &Problem, parameters: AcoParameters) -> Result<Self> {
        let pheromones = PheromoneMatrix::initialize(problem, parameters.tau_max())?;
        Ok(Self {
            parameters,
            pheromones,
            best_assignment: Assignment::empty(),
            stop_flag: None,
        })
    }

    /// Install a flag that callers may raise from another thread. It is
    /// checked at cycle boundaries only; a running cycle always finishes.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    pub fn parameters(&self) -> &AcoParameters {
        &self.parameters
    }

    pub fn pheromones(&self) -> &PheromoneMatrix {
        &self.pheromones
    }

    /// The best assignment seen since the colony was created. Its size is
    /// non-decreasing across cycles and solve calls.
    pub fn best_assignment(&self) -> &Assignment {
        &self.best_assignment
    }

    /// Run up to `max_cycles` cycles, returning as soon as a cycle's best
    /// assignment is a solution.
    ///
    /// On budget exhaustion the best assignment ever seen is returned
    /// without an error; callers distinguish "found" from "best-effort"
    /// with [`Problem::is_solution`].
    #[allow(clippy::too_many_arguments)]
    pub fn solve<VS, V, U, P>(
        &mut self,
        problem: &Problem,
        constructor: &AssignmentConstructor,
        variable_selector: &mut VS,
        value_selector: &mut V,
        updater: &U,
        propagator: &mut P,
        max_cycles: usize,
    ) -> Result<(Assignment, ColonyStats)>
    where
        VS: VariableSelector,
        V: ValueSelector,
        U: PheromoneUpdater,
        P: Propagator,
    {
        if max_cycles == 0 {
            return Err(EngineError::InvalidParameter {
                name: "max_cycles",
                message: "must be at least 1".into(),
            }
            .into());
        }

        info!(
            max_cycles,
            ants = self.parameters.ants_per_cycle(),
            problem_size = problem.size(),
            "starting colony"
        );

        let mut stats = ColonyStats {
            cycles_run: 0,
            ants_dispatched: 0,
            cycle_best_sizes: Vec::with_capacity(max_cycles),
            outcome: Outcome::BudgetExhausted,
        };

        for cycle in 0..max_cycles {
            if let Some(flag) = &self.stop_flag {
                if flag.load(Ordering::Relaxed) {
                    info!(cycle, "stop requested, halting colony");
                    stats.outcome = Outcome::Stopped;
                    return Ok((self.best_assignment.snapshot(), stats));
                }
            }

            let cycle_best = self.run_cycle(
                problem,
                constructor,
                variable_selector,
                value_selector,
                updater,
                propagator,
                &mut stats,
            )?;
            stats.cycles_run += 1;
            stats.cycle_best_sizes.push(cycle_best.size());

            if problem.is_solution(&cycle_best) {
                info!(
                    cycle,
                    assigned = cycle_best.size(),
                    total = problem.size(),
                    "solution found"
                );
                stats.outcome = Outcome::SolutionFound { cycle };
                return Ok((cycle_best, stats));
            }
            debug!(
                cycle,
                cycle_best = cycle_best.size(),
                best = self.best_assignment.size(),
                "cycle finished without a solution"
            );
        }

        warn!(
            best = self.best_assignment.size(),
            total = problem.size(),
            "cycle budget exhausted without a complete solution"
        );
        Ok((self.best_assignment.snapshot(), stats))
    }

    #[allow(clippy::too_many_arguments)]
    fn run_cycle<VS, V, U, P>(
        &mut self,
        problem: &Problem,
        constructor: &AssignmentConstructor,
        variable_selector: &mut VS,
        value_selector: &mut V,
        updater: &U,
        propagator: &mut P,
        stats: &mut ColonyStats,
    ) -> Result<Assignment>
    where
        VS: VariableSelector,
        V: ValueSelector,
        U: PheromoneUpdater,
        P: Propagator,
    {
        let mut cycle_assignments = Vec::with_capacity(self.parameters.ants_per_cycle());
        let mut cycle_best = Assignment::empty();

        for _ant in 0..self.parameters.ants_per_cycle() {
            let assignment = constructor.construct(
                problem,
                &self.pheromones,
                &self.parameters,
                variable_selector,
                value_selector,
                propagator,
            )?;
            stats.ants_dispatched += 1;

            if assignment.is_empty() {
                continue;
            }

            if assignment.size() > cycle_best.size() {
                cycle_best = assignment.snapshot();
            }
            // Greater-or-equal: ties refresh the global best too.
            if assignment.size() >= self.best_assignment.size() {
                self.best_assignment = assignment.snapshot();
            }

            cycle_assignments.push(assignment);
        }

        updater.update(
            problem,
            &mut self.pheromones,
            &cycle_assignments,
            &self.best_assignment,
            &self.parameters,
        )?;

        Ok(cycle_best)
    }
}
