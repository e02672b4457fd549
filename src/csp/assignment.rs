use im::HashMap;

use crate::csp::variable::{Value, VariableId};

/// A mutable mapping from variables to their chosen values.
///
/// One ant mutates a single `Assignment` over the course of its walk.
/// Because the map is a persistent `im::HashMap`, [`snapshot`](Assignment::snapshot)
/// and [`with`](Assignment::with) are cheap structural shares rather than
/// deep copies, so the cycle history can keep every ant's result without
/// copying the underlying storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: HashMap<VariableId, Value>,
}

impl Assignment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, variable: VariableId, value: Value) {
        self.values.insert(variable, value);
    }

    pub fn unassign(&mut self, variable: VariableId) -> Option<Value> {
        self.values.remove(&variable)
    }

    /// A copy of this assignment extended with one extra binding.
    ///
    /// The propagator uses this to test candidate values without mutating
    /// the live assignment.
    pub fn with(&self, variable: VariableId, value: Value) -> Self {
        Self {
            values: self.values.update(variable, value),
        }
    }

    pub fn get(&self, variable: VariableId) -> Option<Value> {
        self.values.get(&variable).copied()
    }

    pub fn is_assigned(&self, variable: VariableId) -> bool {
        self.values.contains_key(&variable)
    }

    /// The number of assigned variables.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_complete(&self, total_variables: usize) -> bool {
        self.size() == total_variables
    }

    /// An independent copy, safe to keep across later mutations of `self`.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, Value)> + '_ {
        self.values.iter().map(|(variable, value)| (*variable, *value))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn assign_and_get_round_trip() {
        let mut assignment = Assignment::empty();
        assignment.assign(0, 7);
        assert_eq!(assignment.get(0), Some(7));
        assert!(assignment.is_assigned(0));
        assert_eq!(assignment.size(), 1);
    }

    #[test]
    fn unassign_removes_binding() {
        let mut assignment = Assignment::empty();
        assignment.assign(0, 7);
        assert_eq!(assignment.unassign(0), Some(7));
        assert!(!assignment.is_assigned(0));
        assert!(assignment.is_empty());
    }

    #[test]
    fn with_leaves_original_untouched() {
        let mut assignment = Assignment::empty();
        assignment.assign(0, 1);

        let probe = assignment.with(1, 2);
        assert_eq!(probe.size(), 2);
        assert_eq!(probe.get(1), Some(2));
        assert_eq!(assignment.size(), 1);
        assert!(!assignment.is_assigned(1));
    }

    #[test]
    fn snapshot_is_independent_of_later_mutation() {
        let mut assignment = Assignment::empty();
        assignment.assign(0, 1);

        let snapshot = assignment.snapshot();
        assignment.assign(0, 9);
        assignment.assign(1, 2);

        assert_eq!(snapshot.get(0), Some(1));
        assert_eq!(snapshot.size(), 1);
    }

    #[test]
    fn completeness_is_judged_against_the_problem_size() {
        let mut assignment = Assignment::empty();
        assignment.assign(0, 1);
        assignment.assign(1, 1);
        assert!(assignment.is_complete(2));
        assert!(!assignment.is_complete(3));
    }
}
