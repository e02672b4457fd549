use tracing::{debug, warn};

use crate::{
    aco::{
        parameters::AcoParameters,
        pheromone::PheromoneMatrix,
        selection::{value::ValueSelector, variable::VariableSelector},
    },
    csp::{assignment::Assignment, problem::Problem, propagation::Propagator},
    error::Result,
};

/// Builds one assignment per call: one ant's walk through the problem.
///
/// Construction failures (domain wipeout, nothing selectable) are not
/// errors; the walk stops and the partial assignment is returned, since
/// its size still carries learning signal for the pheromone update. Only
/// a degenerate weight distribution in the value selector surfaces as an
/// error.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssignmentConstructor;

impl AssignmentConstructor {
    pub fn new() -> Self {
        Self
    }

    pub fn construct<VS, V, P>(
        &self,
        problem: &Problem,
        pheromones: &PheromoneMatrix,
        parameters: &AcoParameters,
        variable_selector: &mut VS,
        value_selector: &mut V,
        propagator: &mut P,
    ) -> Result<Assignment>
    where
        VS: VariableSelector,
        V: ValueSelector,
        P: Propagator,
    {
        let mut assignment = Assignment::empty();
        propagator.reset();

        let mut step = 0usize;
        while !assignment.is_complete(problem.size()) {
            let Some(variable) = variable_selector.select_next(problem, &assignment, propagator)
            else {
                debug!(step, "no variable selectable, stopping walk");
                return Ok(assignment);
            };

            let domain = propagator.current_domain(variable);
            if domain.is_empty() {
                debug!(step, variable, "empty current domain, stopping walk");
                return Ok(assignment);
            }

            let Some(value) = value_selector.select(variable, domain, pheromones, parameters)?
            else {
                debug!(step, variable, "no value selectable, stopping walk");
                return Ok(assignment);
            };

            assignment.assign(variable, value);
            if !propagator.propagate(&assignment) {
                debug!(
                    step,
                    assigned = assignment.size(),
                    total = problem.size(),
                    "propagation failed, stopping walk"
                );
                return Ok(assignment);
            }

            self.close_singletons(&mut assignment, propagator);
            if propagator.has_failed() {
                debug!(
                    step,
                    assigned = assignment.size(),
                    total = problem.size(),
                    "propagation failed during singleton closure"
                );
                return Ok(assignment);
            }

            step += 1;
        }

        debug!(assigned = assignment.size(), "construction complete");
        Ok(assignment)
    }

    /// Bind every unassigned variable whose current domain has shrunk to a
    /// single value, repeating until a fixpoint. Forced moves spend no
    /// probabilistic decision.
    fn close_singletons<P: Propagator>(&self, assignment: &mut Assignment, propagator: &mut P) {
        loop {
            let forced: Vec<_> = propagator
                .singleton_variables()
                .into_iter()
                .filter(|&v| !assignment.is_assigned(v))
                .collect();
            if forced.is_empty() {
                return;
            }

            for variable in forced {
                // Re-read the domain: an earlier forced assignment in this
                // batch may have reshaped it.
                let domain = propagator.current_domain(variable);
                let &[value] = domain else {
                    warn!(variable, size = domain.len(), "variable is no longer a singleton");
                    continue;
                };

                assignment.assign(variable, value);
                if !propagator.propagate(assignment) {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        aco::selection::{
            value::ProbabilisticSelector,
            variable::SmallestDomainFirst,
        },
        csp::{
            constraint::Constraint,
            constraints::{all_different::AllDifferentConstraint, not_equal::NotEqualConstraint},
            propagation::ForwardChecker,
            variable::{Value, Variable, VariableId},
        },
    };

    /// Wraps a selector and counts how many probabilistic decisions the
    /// walk actually spends.
    struct CountingSelector<V> {
        inner: V,
        calls: usize,
    }

    impl<V: ValueSelector> ValueSelector for CountingSelector<V> {
        fn select(
            &mut self,
            variable: VariableId,
            domain: &[Value],
            pheromones: &PheromoneMatrix,
            parameters: &AcoParameters,
        ) -> Result<Option<Value>> {
            self.calls += 1;
            self.inner.select(variable, domain, pheromones, parameters)
        }
    }

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
    fn completes_a_satisfiable_walk() {
        let problem = all_different_problem();
        let matrix = PheromoneMatrix::initialize(&problem, 10.0).unwrap();
        let params = AcoParameters::default();
        let mut propagator = ForwardChecker::new(problem.clone());
        let mut variable_selector = SmallestDomainFirst;
        let mut value_selector = ProbabilisticSelector::new(17);

        let assignment = AssignmentConstructor::new()
            .construct(
                &problem,
                &matrix,
                &params,
                &mut variable_selector,
                &mut value_selector,
                &mut propagator,
            )
            .unwrap();

        assert!(problem.is_solution(&assignment));
    }

    #[test]
    fn singleton_closure_spends_no_probabilistic_decision() {
        let problem = all_different_problem();
        let matrix = PheromoneMatrix::initialize(&problem, 10.0).unwrap();
        let params = AcoParameters::default();
        let mut propagator = ForwardChecker::new(problem.clone());
        let mut variable_selector = SmallestDomainFirst;
        let mut value_selector = CountingSelector {
            inner: ProbabilisticSelector::new(5),
            calls: 0,
        };

        let assignment = AssignmentConstructor::new()
            .construct(
                &problem,
                &matrix,
                &params,
                &mut variable_selector,
                &mut value_selector,
                &mut propagator,
            )
            .unwrap();

        // Two decisions bind a and b; propagation forces c.
        assert!(problem.is_solution(&assignment));
        assert_eq!(value_selector.calls, 2);
    }

    #[test]
    fn unsatisfiable_walk_returns_a_partial_assignment() {
        let variables = vec![
            Variable::new("x", [1]).unwrap(),
            Variable::new("y", [1]).unwrap(),
        ];
        let constraints: Vec<Box<dyn Constraint>> = vec![Box::new(NotEqualConstraint::new(0, 1))];
        let problem = Arc::new(Problem::new(variables, constraints).unwrap());

        let matrix = PheromoneMatrix::initialize(&problem, 10.0).unwrap();
        let params = AcoParameters::default();
        let mut propagator = ForwardChecker::new(problem.clone());
        let mut variable_selector = SmallestDomainFirst;
        let mut value_selector = ProbabilisticSelector::new(3);

        let assignment = AssignmentConstructor::new()
            .construct(
                &problem,
                &matrix,
                &params,
                &mut variable_selector,
                &mut value_selector,
                &mut propagator,
            )
            .unwrap();

        assert_eq!(assignment.size(), 1);
        assert!(propagator.has_failed());
        assert!(!problem.is_solution(&assignment));
    }

    #[test]
    fn every_assigned_value_comes_from_the_domain() {
        let problem = all_different_problem();
        let matrix = PheromoneMatrix::initialize(&problem, 10.0).unwrap();
        let params = AcoParameters::default();
        let mut propagator = ForwardChecker::new(problem.clone());
        let mut variable_selector = SmallestDomainFirst;

        for seed in 0..20 {
            let mut value_selector = ProbabilisticSelector::new(seed);
            let assignment = AssignmentConstructor::new()
                .construct(
                    &problem,
                    &matrix,
                    &params,
                    &mut variable_selector,
                    &mut value_selector,
                    &mut propagator,
                )
                .unwrap();

            for (variable, value) in assignment.iter() {
                assert!(problem.variable(variable).contains(value));
            }
        }
    }

    #[test]
    fn no_unassigned_singleton_survives_a_successful_walk() {
        let problem = all_different_problem();
        let matrix = PheromoneMatrix::initialize(&problem, 10.0).unwrap();
        let params = AcoParameters::default();
        let mut propagator = ForwardChecker::new(problem.clone());
        let mut variable_selector = SmallestDomainFirst;

        for seed in 0..20 {
            let mut value_selector = ProbabilisticSelector::new(seed);
            let assignment = AssignmentConstructor::new()
                .construct(
                    &problem,
                    &matrix,
                    &params,
                    &mut variable_selector,
                    &mut value_selector,
                    &mut propagator,
                )
                .unwrap();

            if !propagator.has_failed() {
                for variable in propagator.singleton_variables() {
                    assert!(assignment.is_assigned(variable));
                }
            }
        }
    }
}
