use crate::repair::RepairError;
use std::fmt::{Display, Formatter};

impl RepairError {
    /// Attach the observation context to an error raised while evaluating a valuation
    /// of `profile` at `time`. Errors which already carry context are returned unchanged.
    pub fn at(self, profile: &str, time: usize) -> RepairError {
        match self {
            RepairError::MissingValue { node } => RepairError::MissingObservation {
                profile: profile.to_string(),
                time,
                node,
            },
            other => other,
        }
    }

    /// True for errors caused by the consistency checker rather than by the model.
    pub fn is_solver_error(&self) -> bool {
        matches!(
            self,
            RepairError::Unsatisfiable | RepairError::SolverFailure(_)
        )
    }
}

impl Display for RepairError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RepairError::MissingEdge { regulator, target } => write!(
                f,
                "The function of `{}` uses `{}`, but there is no such regulation.",
                target, regulator
            ),
            RepairError::MissingValue { node } => {
                write!(f, "Missing value of `{}`.", node)
            }
            RepairError::MissingObservation {
                profile,
                time,
                node,
            } => write!(
                f,
                "Missing value of `{}` at time {} of profile `{}`.",
                node, time, profile
            ),
            RepairError::UnknownSemantics { profile } => {
                write!(f, "Cannot determine update semantics of profile `{}`.", profile)
            }
            RepairError::InvalidEdit(message) => write!(f, "Invalid network edit: {}", message),
            RepairError::Unsatisfiable => write!(
                f,
                "It is not possible to repair this network: the same input requires two different outputs."
            ),
            RepairError::SolverFailure(message) => {
                write!(f, "Consistency check failed: {}", message)
            }
        }
    }
}

impl std::error::Error for RepairError {}
