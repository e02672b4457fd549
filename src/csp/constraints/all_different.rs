use std::collections::HashSet;

use crate::csp::{
    assignment::Assignment,
    constraint::{Constraint, ConstraintDescriptor},
    variable::VariableId,
};

/// A constraint that ensures all variables in a given set have unique
/// values.
///
/// This is the workhorse of problems like Sudoku, where every cell in a
/// row, column, or box must take a different number.
#[derive(Debug, Clone)]
pub struct AllDifferentConstraint {
    pub vars: Vec<VariableId>,
}

impl AllDifferentConstraint {
    pub fn new(vars: Vec<VariableId>) -> Self {
        Self { vars }
    }
}

impl Constraint for AllDifferentConstraint {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        let vars_str = self
            .vars
            .iter()
            .map(|v| format!("?{}", v))
            .collect::<Vec<_>>()
            .join(", ");
        ConstraintDescriptor {
            name: "AllDifferentConstraint".to_string(),
            description: format!("AllDifferent({})", vars_str),
        }
    }

    fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        let mut seen = HashSet::new();
        for &var in &self.vars {
            if let Some(value) = assignment.get(var) {
                if !seen.insert(value) {
                    return false;
                }
            }
        }
        true
    }
}
