use std::{collections::HashMap, sync::Arc, time::Instant};

use tracing::debug;

use crate::csp::{
    assignment::Assignment,
    constraint::Constraint,
    problem::{ConstraintId, Problem},
    variable::{Value, VariableId},
};

/// Performance counters for a single constraint.
#[derive(Debug, Default, Clone, Copy)]
pub struct PerConstraintStats {
    /// The number of times the constraint was revised during propagation.
    pub revisions: u64,
    /// The number of times the constraint pruned a variable's domain.
    pub prunings: u64,
    /// The total time spent revising the constraint, in microseconds.
    pub time_spent_micros: u64,
}

/// Counters for a propagator's lifetime.
///
/// They accumulate across [`Propagator::reset`] calls, so after a colony
/// run they describe the propagation work of the whole search.
#[derive(Debug, Default)]
pub struct PropagationStats {
    /// The number of `propagate` calls.
    pub propagations: u64,
    /// The number of propagations that latched the failed flag.
    pub failures: u64,
    /// Per-constraint counters, keyed by [`ConstraintId`].
    pub constraint_stats: HashMap<ConstraintId, PerConstraintStats>,
}

/// The contract the assignment constructor relies on.
///
/// After a successful `propagate`, no value left in any current domain
/// trivially violates a constraint whose other variables are all assigned.
/// Once a propagation has failed the propagator stays failed until the
/// next `reset`.
pub trait Propagator {
    /// Restore every current domain to the problem's original domain and
    /// clear the failed flag.
    fn reset(&mut self);

    /// Forward-check the problem against the given (partial) assignment,
    /// reducing the domains of unassigned involved variables. Returns
    /// `false` and latches the failed flag on a domain wipeout or an
    /// inconsistent assignment.
    fn propagate(&mut self, assignment: &Assignment) -> bool;

    /// The present reduced domain of a variable belonging to the problem.
    fn current_domain(&self, variable: VariableId) -> &[Value];

    fn has_failed(&self) -> bool;

    /// Variables whose current domain has exactly one value, whether or
    /// not they are already assigned. Callers filter.
    fn singleton_variables(&self) -> Vec<VariableId>;
}

/// Forward-checking propagator with in-place domain reduction.
///
/// Candidate values are tested through [`Assignment::with`] probes instead
/// of mutating the live assignment, so a propagation never observes its
/// own intermediate state.
#[derive(Debug)]
pub struct ForwardChecker {
    problem: Arc<Problem>,
    domains: Vec<Vec<Value>>,
    failed: bool,
    stats: PropagationStats,
}

impl ForwardChecker {
    pub fn new(problem: Arc<Problem>) -> Self {
        let domains = problem
            .variables()
            .iter()
            .map(|v| v.domain().to_vec())
            .collect();
        Self {
            problem,
            domains,
            failed: false,
            stats: PropagationStats::default(),
        }
    }

    pub fn stats(&self) -> &PropagationStats {
        &self.stats
    }

    fn revise_constraint(
        &mut self,
        constraint: &dyn Constraint,
        constraint_id: ConstraintId,
        assignment: &Assignment,
    ) -> bool {
        let involved = constraint.variables();
        if involved.iter().all(|&v| assignment.is_assigned(v)) {
            return constraint.is_satisfied_by(assignment);
        }

        for &variable in involved {
            if !assignment.is_assigned(variable)
                && !self.reduce_domain(variable, constraint, constraint_id, assignment)
            {
                return false;
            }
        }
        true
    }

    /// Retains the values of `variable` that, combined with the current
    /// assignment, do not violate `constraint`. Returns `false` on
    /// wipeout.
    fn reduce_domain(
        &mut self,
        variable: VariableId,
        constraint: &dyn Constraint,
        constraint_id: ConstraintId,
        assignment: &Assignment,
    ) -> bool {
        let current = &self.domains[variable as usize];
        let reduced: Vec<Value> = current
            .iter()
            .copied()
            .filter(|&value| constraint.is_satisfied_by(&assignment.with(variable, value)))
            .collect();

        if reduced.len() < current.len() {
            self.stats
                .constraint_stats
                .entry(constraint_id)
                .or_default()
                .prunings += 1;
        }

        let wiped = reduced.is_empty();
        self.domains[variable as usize] = reduced;
        !wiped
    }
}

impl Propagator for ForwardChecker {
    fn reset(&mut self) {
        self.failed = false;
        for (domain, variable) in self.domains.iter_mut().zip(self.problem.variables()) {
            domain.clear();
            domain.extend_from_slice(variable.domain());
        }
    }

    fn propagate(&mut self, assignment: &Assignment) -> bool {
        if self.failed {
            return false;
        }
        self.stats.propagations += 1;

        if !self.problem.is_consistent(assignment) {
            debug!("assignment inconsistent with a fully-assigned constraint");
            self.stats.failures += 1;
            self.failed = true;
            return false;
        }

        let problem = Arc::clone(&self.problem);
        for (constraint_id, constraint) in problem.constraints().iter().enumerate() {
            let start = Instant::now();
            let ok = self.revise_constraint(constraint.as_ref(), constraint_id, assignment);

            let entry = self.stats.constraint_stats.entry(constraint_id).or_default();
            entry.revisions += 1;
            entry.time_spent_micros += start.elapsed().as_micros() as u64;

            if !ok {
                debug!(
                    constraint = %constraint.descriptor().description,
                    "constraint propagation failed"
                );
                self.stats.failures += 1;
                self.failed = true;
                return false;
            }
        }

        true
    }

    fn current_domain(&self, variable: VariableId) -> &[Value] {
        &self.domains[variable as usize]
    }

    fn has_failed(&self) -> bool {
        self.failed
    }

    fn singleton_variables(&self) -> Vec<VariableId> {
        self.domains
            .iter()
            .enumerate()
            .filter(|(_, domain)| domain.len() == 1)
            .map(|(id, _)| id as VariableId)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::csp::{
        constraints::{all_different::AllDifferentConstraint, not_equal::NotEqualConstraint},
        variable::Variable,
    };

    fn all_different_problem() -> Arc<Problem> {
        let variables = vec![
            Variable::new("a", [1, 2, 3]).unwrap(),
            Variable::new("b", [1, 2, 3]).unwrap(),
            Variable::new("c", [1, 2, 3]).unwrap(),
        ];
        let constraints: Vec<Box<dyn Constraint>> =
            vec![Box::new(AllDifferentConstraint::new(vec![0, 1, 2]))];
        Arc::new(Problem::new(variables, constraints).unwrap())
    }

    #[test]
    fn reset_restores_original_domains() {
        let problem = all_different_problem();
        let mut checker = ForwardChecker::new(problem.clone());

        let mut assignment = Assignment::empty();
        assignment.assign(0, 1);
        assert!(checker.propagate(&assignment));
        assert_eq!(checker.current_domain(1), &[2, 3]);

        checker.reset();
        for id in problem.variable_ids() {
            assert_eq!(checker.current_domain(id), problem.variable(id).domain());
        }
        assert!(!checker.has_failed());
    }

    #[test]
    fn forward_checking_prunes_neighbour_domains() {
        let problem = all_different_problem();
        let mut checker = ForwardChecker::new(problem);

        let mut assignment = Assignment::empty();
        assignment.assign(0, 1);
        assert!(checker.propagate(&assignment));

        assert_eq!(checker.current_domain(0), &[1, 2, 3]);
        assert_eq!(checker.current_domain(1), &[2, 3]);
        assert_eq!(checker.current_domain(2), &[2, 3]);
        assert!(checker.singleton_variables().is_empty());
    }

    #[test]
    fn propagation_exposes_forced_singletons() {
        let problem = all_different_problem();
        let mut checker = ForwardChecker::new(problem);

        let mut assignment = Assignment::empty();
        assignment.assign(0, 1);
        assert!(checker.propagate(&assignment));
        assignment.assign(1, 2);
        assert!(checker.propagate(&assignment));

        assert_eq!(checker.current_domain(2), &[3]);
        assert_eq!(checker.singleton_variables(), vec![2]);
    }

    #[test]
    fn wipeout_latches_the_failed_flag() {
        let variables = vec![
            Variable::new("x", [1]).unwrap(),
            Variable::new("y", [1]).unwrap(),
        ];
        let constraints: Vec<Box<dyn Constraint>> = vec![Box::new(NotEqualConstraint::new(0, 1))];
        let problem = Arc::new(Problem::new(variables, constraints).unwrap());
        let mut checker = ForwardChecker::new(problem);

        let mut assignment = Assignment::empty();
        assignment.assign(0, 1);
        assert!(!checker.propagate(&assignment));
        assert!(checker.has_failed());
        assert!(checker.current_domain(1).is_empty());

        // Failed stays latched for any further propagation until reset.
        assert!(!checker.propagate(&Assignment::empty()));
        checker.reset();
        assert!(!checker.has_failed());
    }

    #[test]
    fn inconsistent_assignment_fails_without_reduction() {
        let variables = vec![
            Variable::new("x", [1, 2]).unwrap(),
            Variable::new("y", [1, 2]).unwrap(),
        ];
        let constraints: Vec<Box<dyn Constraint>> = vec![Box::new(NotEqualConstraint::new(0, 1))];
        let problem = Arc::new(Problem::new(variables, constraints).unwrap());
        let mut checker = ForwardChecker::new(problem);

        let mut assignment = Assignment::empty();
        assignment.assign(0, 1);
        assignment.assign(1, 1);
        assert!(!checker.propagate(&assignment));
        assert!(checker.has_failed());
    }

    #[test]
    fn probing_never_mutates_the_live_assignment() {
        let problem = all_different_problem();
        let mut checker = ForwardChecker::new(problem);

        let mut assignment = Assignment::empty();
        assignment.assign(0, 1);
        let before = assignment.snapshot();
        checker.propagate(&assignment);
        assert_eq!(assignment, before);
    }

    #[test]
    fn stats_count_revisions_and_prunings() {
        let problem = all_different_problem();
        let mut checker = ForwardChecker::new(problem);

        let mut assignment = Assignment::empty();
        assignment.assign(0, 1);
        checker.propagate(&assignment);

        let stats = checker.stats();
        assert_eq!(stats.propagations, 1);
        let per_constraint = stats.constraint_stats.get(&0).unwrap();
        assert_eq!(per_constraint.revisions, 1);
        assert!(per_constraint.prunings >= 1);
    }
}
