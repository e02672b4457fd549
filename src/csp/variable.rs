use std::collections::HashSet;

use crate::error::{EngineError, Result};

/// A numeric identifier for a single variable in the constraint problem.
///
/// Ids are assigned densely by [`Problem::new`](crate::csp::problem::Problem::new):
/// the id of a variable is its index in the list the problem was built from.
pub type VariableId = u32;

/// The value space for variable domains.
///
/// Domains are drawn from a discrete integer space; the engine is
/// monomorphised on `i64` rather than carrying a type-erased value
/// representation.
pub type Value = i64;

/// A named variable with a finite, fixed domain of candidate values.
///
/// The domain is de-duplicated at construction and iterated in insertion
/// order afterwards, which keeps value selection deterministic for a fixed
/// RNG seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    name: String,
    domain: Vec<Value>,
}

impl Variable {
    pub fn new(name: impl Into<String>, domain: impl IntoIterator<Item = Value>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EngineError::InvalidParameter {
                name: "variable name",
                message: "must not be empty".into(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        let domain: Vec<Value> = domain.into_iter().filter(|v| seen.insert(*v)).collect();
        if domain.is_empty() {
            return Err(EngineError::EmptyDomain { name }.into());
        }

        Ok(Self { name, domain })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &[Value] {
        &self.domain
    }

    pub fn contains(&self, value: Value) -> bool {
        self.domain.contains(&value)
    }
}
