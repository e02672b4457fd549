use tracing::{debug, trace};

use crate::{
    aco::{parameters::AcoParameters, pheromone::PheromoneMatrix},
    csp::{assignment::Assignment, problem::Problem},
    error::{EngineError, Result},
};

/// A pheromone update policy applied once per cycle, after the last ant
/// of the cycle has reported.
pub trait PheromoneUpdater {
    fn update(
        &self,
        problem: &Problem,
        pheromones: &mut PheromoneMatrix,
        cycle_assignments: &[Assignment],
        best_overall: &Assignment,
        parameters: &AcoParameters,
    ) -> Result<()>;
}

/// MAX-MIN Ant System update: evaporate, reinforce every best-of-cycle
/// assignment, then clamp all trails into [τ_min, τ_max].
///
/// Best-of-cycle is the set of cycle assignments whose size equals the
/// cycle maximum. Partial assignments participate unless
/// [`complete_solutions_only`](MaxMinUpdate::complete_solutions_only) is
/// chosen. The order evaporate → deposit → clamp is load-bearing:
/// clamping earlier would either erase the reinforcement or waste the
/// sweep.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaxMinUpdate {
    complete_only: bool,
}

impl MaxMinUpdate {
    pub fn new() -> Self {
        Self {
            complete_only: false,
        }
    }

    /// Restrict the reinforcement pool to complete assignments.
    pub fn complete_solutions_only() -> Self {
        Self {
            complete_only: true,
        }
    }
}

impl PheromoneUpdater for MaxMinUpdate {
    fn update(
        &self,
        problem: &Problem,
        pheromones: &mut PheromoneMatrix,
        cycle_assignments: &[Assignment],
        best_overall: &Assignment,
        parameters: &AcoParameters,
    ) -> Result<()> {
        debug!(
            cycle_size = cycle_assignments.len(),
            best = best_overall.size(),
            "updating pheromones"
        );

        pheromones.evaporate(parameters.rho())?;

        let pool = cycle_assignments
            .iter()
            .filter(|a| !self.complete_only || a.is_complete(problem.size()));
        let max_size = pool.clone().map(Assignment::size).max().unwrap_or(0);

        if max_size == 0 {
            debug!("no assignment to reinforce in this cycle");
            return pheromones.clamp(parameters.tau_min(), parameters.tau_max());
        }

        let best_of_cycle: Vec<Assignment> = pool
            .filter(|a| a.size() == max_size)
            .cloned()
            .collect();
        trace!(
            count = best_of_cycle.len(),
            size = max_size,
            "best-of-cycle selected"
        );

        pheromones.deposit_multiple(&best_of_cycle, |assignment| {
            deposit_amount(assignment, best_overall)
        })?;

        pheromones.clamp(parameters.tau_min(), parameters.tau_max())
    }
}

/// Δτ(A) = 1 / (1 + |A_best| − |A|).
///
/// A cycle assignment larger than the running best means the colony's
/// best tracking is broken; that is surfaced, never clamped away.
fn deposit_amount(assignment: &Assignment, best_overall: &Assignment) -> Result<f64> {
    if assignment.size() > best_overall.size() {
        return Err(EngineError::BestGapAnomaly {
            assignment: assignment.size(),
            best: best_overall.size(),
        }
        .into());
    }

    let gap = (best_overall.size() - assignment.size()) as f64;
    Ok(1.0 / (1.0 + gap))
}
