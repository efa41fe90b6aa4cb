//! Evaluation of regulatory functions against observed behaviour.
//!
//! The oracle answers two questions about a candidate `BooleanFunction` of some node:
//! does it reproduce every observation of a `Labeling` (`is_function_consistent`), and if
//! not, in which direction it has to move (`classify_function`). A function that predicts
//! `0` where `1` was observed must be generalized, a function that predicts `1` where `0`
//! was observed must be particularized. When both happen, the node is double inconsistent
//! and no comparable function can fix it.
//!
//! Profiles are interpreted by an `Updater`, one per `UpdateType`. All updaters share the
//! clause evaluation primitive `clause_satisfiable`: a clause is satisfied when every
//! regulator in it has the value demanded by the sign of its edge.

use crate::repair::RepairError;
use crate::{BooleanFunction, Network, NodeId, UpdateType, Valuation};
use std::collections::BTreeMap;

/// **(internal)** Evaluation of functions and clauses.
mod _impl_evaluation;
/// **(internal)** Exact and approximate half determination of functions.
mod _impl_half_determination;
/// **(internal)** Construction and queries of `Labeling`s.
mod _impl_labeling;
/// **(internal)** The four `Updater` implementations.
mod _impl_updaters;

pub use _impl_evaluation::{clause_satisfiable, evaluate};
pub use _impl_half_determination::is_in_bottom_half;
pub use _impl_updaters::{classify_function, is_function_consistent};

/// Classification of a function with respect to a labeling.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Inconsistency {
    Consistent,
    /// The function predicts `0` where `1` is observed.
    NeedGeneralization,
    /// The function predicts `1` where `0` is observed.
    NeedParticularization,
    /// Both kinds of mismatch occur.
    DoubleInconsistent,
}

/// A completed observation of the network, as produced by the external consistency
/// checker for one candidate world.
///
/// It stores `values[profile][time][node]`, the asynchronous schedule
/// `updates[time][profile]` and optionally an explicit update semantics per profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labeling {
    values: BTreeMap<String, BTreeMap<usize, Valuation>>,
    updates: BTreeMap<usize, BTreeMap<String, Vec<NodeId>>>,
    semantics: BTreeMap<String, UpdateType>,
}

/// Interpretation of one profile of a `Labeling` under a particular update semantics.
pub trait Updater {
    /// Classify `function` (of the node `function.get_target()`) against the given `profile`.
    fn classify(
        &self,
        network: &Network,
        labeling: &Labeling,
        function: &BooleanFunction,
        profile: &str,
    ) -> Result<Inconsistency, RepairError>;

    /// True if `function` reproduces every observation of `profile`.
    fn is_consistent(
        &self,
        network: &Network,
        labeling: &Labeling,
        function: &BooleanFunction,
        profile: &str,
    ) -> Result<bool, RepairError> {
        Ok(self.classify(network, labeling, function, profile)? == Inconsistency::Consistent)
    }
}

/// Every profile is a set of independent steady states: the function must map each state
/// of the regulators to the observed value of the target.
#[derive(Clone, Copy, Debug, Default)]
pub struct SteadyStateUpdater;

/// All nodes are updated at every step of a time series.
#[derive(Clone, Copy, Debug, Default)]
pub struct SynchronousUpdater;

/// Only the nodes scheduled by the labeling in `updates[t][profile]` are updated at step `t`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsynchronousUpdater;

/// Any subset of nodes can be updated at a step. Which subset was chosen is decided by the
/// external checker, so the gate follows the schedule the same way as `AsynchronousUpdater`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompleteUpdater;

impl Inconsistency {
    /// Combine two classifications: a consistent result is neutral, and two opposite
    /// single-direction mismatches make a double inconsistency.
    pub fn merge(self, other: Inconsistency) -> Inconsistency {
        match (self, other) {
            (Inconsistency::Consistent, x) | (x, Inconsistency::Consistent) => x,
            (a, b) if a == b => a,
            _ => Inconsistency::DoubleInconsistent,
        }
    }

    pub fn is_consistent(self) -> bool {
        self == Inconsistency::Consistent
    }

    /// The classification of a single mismatch between a `predicted` and an `observed` value.
    pub fn of_mismatch(predicted: bool, observed: bool) -> Inconsistency {
        match (predicted, observed) {
            (false, true) => Inconsistency::NeedGeneralization,
            (true, false) => Inconsistency::NeedParticularization,
            _ => Inconsistency::Consistent,
        }
    }
}

impl UpdateType {
    /// The `Updater` implementing this semantics.
    pub fn updater(self) -> &'static dyn Updater {
        match self {
            UpdateType::SteadyState => &SteadyStateUpdater,
            UpdateType::Synchronous => &SynchronousUpdater,
            UpdateType::Asynchronous => &AsynchronousUpdater,
            UpdateType::Complete => &CompleteUpdater,
        }
    }
}
