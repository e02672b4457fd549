use crate::csp::{assignment::Assignment, variable::VariableId};

/// Human-readable identification of a constraint, used in log lines and
/// the statistics table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

/// A rule over a set of variables.
///
/// Evaluation is optimistic: while any involved variable is still
/// unassigned the constraint reports `true`, meaning "not yet definitively
/// violated". Only a fully-observable violation returns `false`.
pub trait Constraint: std::fmt::Debug {
    /// The variables whose assignments this constraint observes.
    fn variables(&self) -> &[VariableId];

    fn descriptor(&self) -> ConstraintDescriptor;

    /// Whether the (possibly partial) assignment is compatible with this
    /// constraint.
    fn is_satisfied_by(&self, assignment: &Assignment) -> bool;
}
