use crate::csp::{
    assignment::Assignment,
    constraint::{Constraint, ConstraintDescriptor},
    variable::VariableId,
};

/// A constraint that enforces inequality between two variables (`A != B`).
#[derive(Debug, Clone)]
pub struct NotEqualConstraint {
    /// The variables that must not be equal.
    pub vars: [VariableId; 2],
}

impl NotEqualConstraint {
    pub fn new(a: VariableId, b: VariableId) -> Self {
        Self { vars: [a, b] }
    }
}

impl Constraint for NotEqualConstraint {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "NotEqualConstraint".to_string(),
            description: format!("?{} != ?{}", self.vars[0], self.vars[1]),
        }
    }

    fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        match (assignment.get(self.vars[0]), assignment.get(self.vars[1])) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn violated_when_both_assigned_equal() {
        let constraint = NotEqualConstraint::new(0, 1);
        let mut assignment = Assignment::empty();
        assignment.assign(0, 3);
        assignment.assign(1, 3);
        assert!(!constraint.is_satisfied_by(&assignment));
    }

    #[test]
    fn satisfied_when_both_assigned_different() {
        let constraint = NotEqualConstraint::new(0, 1);
        let mut assignment = Assignment::empty();
        assignment.assign(0, 3);
        assignment.assign(1, 4);
        assert!(constraint.is_satisfied_by(&assignment));
    }

    #[test]
    fn optimistic_while_partially_assigned() {
        let constraint = NotEqualConstraint::new(0, 1);
        let mut assignment = Assignment::empty();
        assert!(constraint.is_satisfied_by(&assignment));
        assignment.assign(0, 3);
        assert!(constraint.is_satisfied_by(&assignment));
    }

    #[test]
    fn descriptor_names_both_variables() {
        let constraint = NotEqualConstraint::new(2, 5);
        assert_eq!(constraint.descriptor().description, "?2 != ?5");
    }
}
