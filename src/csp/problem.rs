use std::collections::HashSet;

use crate::{
    csp::{
        assignment::Assignment,
        constraint::Constraint,
        variable::{Variable, VariableId},
    },
    error::{EngineError, Result},
};

/// A numeric identifier for a single constraint in the problem, its index
/// in the constraint list.
pub type ConstraintId = usize;

/// A constraint satisfaction problem: an ordered list of variables and the
/// constraints over them.
///
/// Variables are interned at construction: the id of a variable is its
/// index in the list passed to [`Problem::new`], and constraints reference
/// variables by those ids. Consistency is judged optimistically: only
/// constraints whose involved variables are all assigned can reject a
/// partial assignment.
#[derive(Debug)]
pub struct Problem {
    variables: Vec<Variable>,
    constraints: Vec<Box<dyn Constraint>>,
}

impl Problem {
    pub fn new(variables: Vec<Variable>, constraints: Vec<Box<dyn Constraint>>) -> Result<Self> {
        if variables.is_empty() {
            return Err(EngineError::InvalidParameter {
                name: "variables",
                message: "a problem needs at least one variable".into(),
            }
            .into());
        }

        let mut names = HashSet::new();
        for variable in &variables {
            if !names.insert(variable.name()) {
                return Err(EngineError::DuplicateVariable {
                    name: variable.name().to_string(),
                }
                .into());
            }
        }

        for constraint in &constraints {
            for &id in constraint.variables() {
                if id as usize >= variables.len() {
                    return Err(EngineError::UnknownVariable { id }.into());
                }
            }
        }

        Ok(Self {
            variables,
            constraints,
        })
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id as usize]
    }

    pub fn variable_ids(&self) -> impl Iterator<Item = VariableId> {
        0..self.variables.len() as VariableId
    }

    pub fn constraints(&self) -> &[Box<dyn Constraint>] {
        &self.constraints
    }

    /// The number of variables.
    pub fn size(&self) -> usize {
        self.variables.len()
    }

    /// Whether every constraint with all involved variables assigned is
    /// satisfied.
    pub fn is_consistent(&self, assignment: &Assignment) -> bool {
        self.constraints
            .iter()
            .filter(|c| c.variables().iter().all(|&v| assignment.is_assigned(v)))
            .all(|c| c.is_satisfied_by(assignment))
    }

    /// Whether the assignment is complete and consistent.
    pub fn is_solution(&self, assignment: &Assignment) -> bool {
        assignment.is_complete(self.size()) && self.is_consistent(assignment)
    }
}
