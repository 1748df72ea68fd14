use std::backtrace::Backtrace;

use crate::solver::model::{ConstraintId, VariableId};

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("invalid bounds [{lmin}, {lmax}]: lower bound exceeds upper bound")]
    InvalidBounds { lmin: i32, lmax: i32 },
    #[error("unknown variable ?{0}")]
    UnknownVariable(VariableId),
    #[error("unknown constraint #{0}")]
    UnknownConstraint(ConstraintId),
    #[error("the model is frozen: no mutation is allowed once solving has begun")]
    ModelFrozen,
    #[error("no solution available: solve has not produced a feasible assignment")]
    NoSolution,
    #[error("malformed puzzle grid: {0}")]
    MalformedGrid(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<SolverError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<SolverError> for Error {
    fn from(inner: SolverError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}

impl Error {
    /// The underlying [`SolverError`], without the captured backtrace.
    pub fn inner(&self) -> &SolverError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}
