use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::csp::{
    assignment::Assignment, problem::Problem, propagation::Propagator, variable::VariableId,
};

/// A strategy for picking the next variable an ant will bind.
pub trait VariableSelector {
    /// Select an unassigned variable, or `None` when every variable is
    /// already assigned.
    fn select_next(
        &mut self,
        problem: &Problem,
        assignment: &Assignment,
        propagator: &dyn Propagator,
    ) -> Option<VariableId>;
}

/// Fail-first ordering: the unassigned variable with the smallest current
/// domain, ties broken by variable id.
///
/// Tackling the most constrained variable first detects dead ends early
/// and is the standard ordering in the CSP literature.
#[derive(Debug, Default, Clone, Copy)]
pub struct SmallestDomainFirst;

impl VariableSelector for SmallestDomainFirst {
    fn select_next(
        &mut self,
        problem: &Problem,
        assignment: &Assignment,
        propagator: &dyn Propagator,
    ) -> Option<VariableId> {
        problem
            .variable_ids()
            .filter(|&id| !assignment.is_assigned(id))
            .min_by_key(|&id| propagator.current_domain(id).len())
    }
}

/// Uniform random choice over the unassigned variables.
#[derive(Debug)]
pub struct RandomVariable {
    rng: StdRng,
}

impl RandomVariable {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl VariableSelector for RandomVariable {
    fn select_next(
        &mut self,
        problem: &Problem,
        assignment: &Assignment,
        _propagator: &dyn Propagator,
    ) -> Option<VariableId> {
        let unassigned: Vec<VariableId> = problem
            .variable_ids()
            .filter(|&id| !assignment.is_assigned(id))
            .collect();
        if unassigned.is_empty() {
            return None;
        }
        Some(unassigned[self.rng.gen_range(0..unassigned.len())])
    }
}
