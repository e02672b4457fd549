use std::backtrace::Backtrace;

use crate::csp::variable::{Value, VariableId};

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("variable {name:?} has an empty domain")]
    EmptyDomain { name: String },

    #[error("duplicate variable name {name:?}")]
    DuplicateVariable { name: String },

    #[error("constraint references unknown variable id {id}")]
    UnknownVariable { id: VariableId },

    #[error("no pheromone trail for variable {variable} with value {value}")]
    UnknownTrail { variable: VariableId, value: Value },

    #[error("all candidate weights are zero for variable {variable}; the pheromone floor was violated")]
    DegenerateWeights { variable: VariableId },

    #[error("cycle assignment of size {assignment} exceeds the best-so-far of size {best}")]
    BestGapAnomaly { assignment: usize, best: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<EngineError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<EngineError> for Error {
    fn from(inner: EngineError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}

impl Error {
    /// The engine error wrapped by this error.
    pub fn inner(&self) -> &EngineError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}
