//! Search for minimal repairs of an inconsistent network.
//!
//! The external consistency checker (`ConsistencyChecker`) proposes one or more candidate
//! worlds (`InconsistencySolution`). Each world names the inconsistent nodes, how they are
//! inconsistent, and a completed labeling of the observations. For every such node,
//! `RepairSearch` explores topology edits (edge additions and removals), then sign flips,
//! and finally function replacements through the `FunctionLattice`, in the order of
//! increasing cost. The cheapest repairs of each node are kept in `RepairSet`s, and
//! `model_revision` then selects the best candidate worlds.
//!
//! The cost of a repair is ordered lexicographically by the number of edge additions and
//! removals, the number of flips, and the total number of operations (see `RepairCost`).

use crate::lattice::FunctionLattice;
use crate::oracle::{Inconsistency, Labeling};
use crate::{BooleanFunction, Edge, Network, NodeId, LOG_NOTHING};
use std::collections::{BTreeMap, BTreeSet};

/// **(internal)** Lazy enumeration of k-combinations.
mod _impl_combinations;
/// **(internal)** The `ConsistencyChecker` seam and its results.
mod _impl_consistency_check;
/// **(internal)** Function replacement through the function lattice.
mod _impl_function_search;
/// **(internal)** Utility methods for `InconsistencySolution`.
mod _impl_inconsistency_solution;
/// **(internal)** Utility methods for `InconsistentNode`.
mod _impl_inconsistent_node;
/// **(internal)** Selection of the best repaired worlds.
mod _impl_model_revision;
/// **(internal)** Ordering and arithmetic of `RepairCost`.
mod _impl_repair_cost;
/// **(internal)** Display and context of `RepairError`.
mod _impl_repair_error;
/// **(internal)** Utility methods for `RepairSet`.
mod _impl_repair_set;
/// **(internal)** Edge additions, removals and flips.
mod _impl_topology_search;

pub use _impl_combinations::Combinations;
pub use _impl_model_revision::model_revision;

/// Failures of the oracle and of the repair search.
///
/// A node which cannot be repaired is not an error. It is reported through
/// `InconsistencySolution::has_impossibility`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RepairError {
    /// A function uses `regulator`, but the network has no `regulator -> target` edge.
    MissingEdge { regulator: String, target: String },
    /// A valuation does not assign a value to `node`.
    MissingValue { node: String },
    /// The labeling does not assign a value to `node` at `time` in `profile`.
    MissingObservation {
        profile: String,
        time: usize,
        node: String,
    },
    /// No update semantics applies to `profile`.
    UnknownSemantics { profile: String },
    /// A network modification performed by the search failed.
    InvalidEdit(String),
    /// The consistency checker proved that no repair exists.
    Unsatisfiable,
    /// The consistency checker failed.
    SolverFailure(String),
}

/// Options of the repair search. The same value is passed through the whole search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RepairConfig {
    /// Collect all optimal repairs instead of stopping at the first one.
    pub all_opt: bool,
    /// Collect every function at the minimal lattice distance instead of the first one.
    pub show_all_functions: bool,
    /// Fall back to the search for non-comparable functions when the comparable search fails.
    pub force_optimum: bool,
    /// Rank non-comparable functions by their level relative to the original function.
    pub compare_level_function: bool,
    /// Decide the search direction of the non-comparable search by counting inputs exactly,
    /// instead of comparing lattice levels.
    pub exact_middle_function_determination: bool,
    /// Report also the repaired worlds which are worse than the best one.
    pub show_sub_optimal: bool,
    pub log_level: usize,
}

/// Cost of a repair. Costs are ordered by `add_remove_ops`, then `flip_ops`, then
/// `repair_ops`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct RepairCost {
    /// Number of added and removed edges.
    pub add_remove_ops: usize,
    /// Number of flipped edges.
    pub flip_ops: usize,
    /// Number of all operations, including function replacements.
    pub repair_ops: usize,
    /// Number of edge operations of any kind.
    pub topology_changes: usize,
}

/// One way of repairing a node: a set of replacement functions and edge operations.
///
/// Edges are recorded as they were before the operation (a flipped edge keeps its original
/// sign). Adding an element which is already present has no effect.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RepairSet {
    repaired_functions: Vec<BooleanFunction>,
    flipped_edges: BTreeSet<Edge>,
    removed_edges: BTreeSet<Edge>,
    added_edges: BTreeSet<Edge>,
}

/// A node which has to be repaired in some candidate world, together with the cheapest
/// repairs found for it so far (all of them have the same cost).
#[derive(Clone, Debug)]
pub struct InconsistentNode {
    id: NodeId,
    repair_type: Inconsistency,
    topological_error: bool,
    repair_sets: Vec<RepairSet>,
    cost: RepairCost,
    repaired: bool,
}

/// One candidate world proposed by the consistency checker and the repairs found for it.
///
/// The total cost is the sum of the costs of the best repairs of all nodes.
#[derive(Clone, Debug, Default)]
pub struct InconsistencySolution {
    nodes: BTreeMap<NodeId, InconsistentNode>,
    labeling: Labeling,
    inconsistent_profiles: BTreeMap<String, Vec<NodeId>>,
    inconsistent_nodes_profiles: BTreeMap<NodeId, Vec<String>>,
    cost: RepairCost,
    has_impossibility: bool,
}

/// The external solver which finds the minimal sets of inconsistent nodes.
///
/// Any `Fn(&Network) -> Result<ConsistencyCheck, RepairError>` is a checker.
pub trait ConsistencyChecker {
    fn check_consistency(&self, network: &Network) -> Result<ConsistencyCheck, RepairError>;
}

/// The outcome of a consistency check: the candidate worlds and the optimization code.
#[derive(Clone, Debug)]
pub struct ConsistencyCheck {
    pub solutions: Vec<InconsistencySolution>,
    pub optimization: Optimization,
}

/// Status reported by the consistency checker.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Optimization {
    /// The network is consistent with all observations (code `0`).
    Consistent,
    /// The given number of candidate worlds was found (a positive code).
    Inconsistent(usize),
    /// No candidate world exists (code `-1`).
    Unsatisfiable,
    /// The check was not performed or failed (code `-2`).
    NotAttempted,
}

/// The result of `model_revision`.
#[derive(Clone, Debug)]
pub enum Revision {
    /// The network is already consistent.
    Consistent,
    /// The network was repaired. `optimal` holds the best repaired worlds, `sub_optimal`
    /// holds the remaining repairable worlds when they were requested.
    Repaired {
        optimal: Vec<InconsistencySolution>,
        sub_optimal: Vec<InconsistencySolution>,
    },
    /// None of the candidate worlds could be repaired.
    Unrepairable,
}

/// The repair search over a particular function lattice.
pub struct RepairSearch<'a, L: FunctionLattice + ?Sized> {
    lattice: &'a L,
    config: &'a RepairConfig,
}

impl Default for RepairConfig {
    fn default() -> Self {
        RepairConfig {
            all_opt: true,
            show_all_functions: true,
            force_optimum: false,
            compare_level_function: true,
            exact_middle_function_determination: true,
            show_sub_optimal: false,
            log_level: LOG_NOTHING,
        }
    }
}

impl<'a, L: FunctionLattice + ?Sized> RepairSearch<'a, L> {
    pub fn new(lattice: &'a L, config: &'a RepairConfig) -> RepairSearch<'a, L> {
        RepairSearch { lattice, config }
    }

    pub fn config(&self) -> &RepairConfig {
        self.config
    }
}
