use crate::csp::{
    assignment::Assignment,
    constraint::{Constraint, ConstraintDescriptor},
    variable::{Value, VariableId},
};

/// A constraint that enforces `abs(X - Y) != c`.
///
/// Together with [`AllDifferentConstraint`](crate::csp::constraints::all_different::AllDifferentConstraint)
/// this expresses the diagonal rule of n-queens style problems.
#[derive(Debug, Clone)]
pub struct AbsDiffNotEqualConstraint {
    vars: [VariableId; 2],
    c: Value,
}

impl AbsDiffNotEqualConstraint {
    pub fn new(x: VariableId, y: VariableId, c: Value) -> Self {
        Self { vars: [x, y], c }
    }
}

impl Constraint for AbsDiffNotEqualConstraint {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "AbsDiffNotEqualConstraint".to_string(),
            description: format!("abs(?{} - ?{}) != {}", self.vars[0], self.vars[1], self.c),
        }
    }

    fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        match (assignment.get(self.vars[0]), assignment.get(self.vars[1])) {
            (Some(x), Some(y)) => (x - y).abs() != self.c,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn violated_when_difference_matches() {
        let constraint = AbsDiffNotEqualConstraint::new(0, 1, 2);
        let mut assignment = Assignment::empty();
        assignment.assign(0, 5);
        assignment.assign(1, 3);
        assert!(!constraint.is_satisfied_by(&assignment));
    }

    #[test]
    fn satisfied_when_difference_differs() {
        let constraint = AbsDiffNotEqualConstraint::new(0, 1, 2);
        let mut assignment = Assignment::empty();
        assignment.assign(0, 5);
        assignment.assign(1, 4);
        assert!(constraint.is_satisfied_by(&assignment));
    }

    #[test]
    fn optimistic_while_partially_assigned() {
        let constraint = AbsDiffNotEqualConstraint::new(0, 1, 2);
        let mut assignment = Assignment::empty();
        assignment.assign(0, 5);
        assert!(constraint.is_satisfied_by(&assignment));
    }

    #[test]
    fn descriptor_reports_the_actual_difference() {
        let constraint = AbsDiffNotEqualConstraint::new(10, 20, 5);
        assert_eq!(constraint.descriptor().description, "abs(?10 - ?20) != 5");
    }
}
