//! Consistency checking and repair of Boolean regulatory networks.
//!
//! A `Network` is a signed regulatory graph where every node carries a monotone
//! `BooleanFunction` in disjunctive normal form over its regulators. Given observations
//! of the network's behaviour (steady states or time series), the crate evaluates whether
//! a function reproduces them (`oracle`) and, if it does not, searches for the cheapest
//! combination of edge additions, removals, sign flips and function replacements that
//! restores consistency (`repair`). The replacement functions are obtained by moving
//! through the partial order of monotone Boolean functions (`lattice`).
//!
//! The detection of the minimal set of inconsistent nodes itself is delegated to an
//! external solver, see `repair::ConsistencyChecker`.

use crate::bitvector::ArrayBitVector;
use lazy_static::lazy_static;
use regex::Regex;
use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::iter::Map;
use std::ops::Range;

pub mod bitvector;
pub mod lattice;
pub mod oracle;
pub mod repair;

/// **(internal)** Utility methods for `BooleanFunction`.
mod _impl_boolean_function;
/// **(internal)** Utility methods for `Clause`.
mod _impl_clause;
/// **(internal)** Utility methods for `Edge` and `Sign`.
mod _impl_edge;
/// **(internal)** Construction and inspection of `Network`s.
mod _impl_network;
/// **(internal)** Transactional modifications of a `Network`.
mod _impl_network_edit;
/// **(internal)** Utility methods for `NodeId`.
mod _impl_node_id;
/// **(internal)** Utility methods for `UpdateType` and `ObservationSource`.
mod _impl_update_type;

/// Log level which disables all progress output.
pub const LOG_NOTHING: usize = 0;
/// Log level which only prints the important milestones of a computation.
pub const LOG_ESSENTIAL: usize = 1;
/// Log level which prints everything the search is doing.
pub const LOG_VERBOSE: usize = 2;

/// True if the given `log_level` permits any output.
pub fn should_log(log_level: usize) -> bool {
    log_level > LOG_NOTHING
}

lazy_static! {
    /// A regular expression that matches valid node identifiers: names starting with
    /// a lower-case letter or a digit, or arbitrary text wrapped in double quotes.
    static ref ID_REGEX: Regex = Regex::new(r#"^("[^"]+"|[a-z0-9][a-zA-Z0-9_]*)$"#).unwrap();
}

/// A type-safe index of a `Node` inside a `Network`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

/// Polarity of an `Edge`. A positive edge is an activation (sign `1`), a negative edge
/// is an inhibition (sign `0`).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Sign {
    Positive,
    Negative,
}

/// A signed regulation `source -> target` in a `Network`.
///
/// Edges marked as `fixed` are never modified by the repair search. Two edges are equal
/// (and hash the same) when they share the endpoints and the sign; the `fixed` flag is
/// not part of the identity.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    sign: Sign,
    fixed: bool,
}

/// A node of a `Network` together with its currently assigned regulatory function.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    name: String,
    function: BooleanFunction,
}

/// A conjunctive term of a `BooleanFunction`, stored as a signature over the
/// function's regulator list: bit `i` is set when the `i`-th regulator takes part
/// in the conjunction.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Clause {
    signature: ArrayBitVector,
}

/// The regulatory function of a single node, written as a disjunction of conjunctive
/// terms over the node's regulators.
///
/// The order in which regulators are first added fixes their column in the clause
/// signatures. The signature form of the function (its element in the function lattice)
/// is only built once it is needed, and is reduced by absorption, so `a || (a && b)` and
/// `a` denote the same element.
///
/// Two functions are equal when they have the same regulator list and the same clauses.
/// Functions without regulators are all equal to each other, regardless of their target.
#[derive(Clone, Debug)]
pub struct BooleanFunction {
    target: NodeId,
    regulators: Vec<NodeId>,
    terms: BTreeMap<usize, Vec<NodeId>>,
    clauses: OnceCell<Vec<Clause>>,
}

/// Update semantics under which a profile of observations is interpreted.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum UpdateType {
    SteadyState,
    Synchronous,
    Asynchronous,
    Complete,
}

/// One source of observations (typically a file) and the semantics its profiles follow.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ObservationSource {
    name: String,
    update: UpdateType,
}

/// A signed regulatory network.
///
/// Edges are stored in an adjacency list indexed by the source node, together with
/// the exact inverse index `target -> regulators`. There is at most one edge for every
/// ordered pair of nodes.
///
/// During the repair search, the network is the single piece of shared mutable state.
/// All temporary modifications should go through `Network::edit`, which guarantees
/// that they are reverted.
#[derive(Clone, Debug, Default)]
pub struct Network {
    nodes: Vec<Node>,
    node_to_index: HashMap<String, NodeId>,
    successors: Vec<Vec<Edge>>,
    regulators: Vec<Vec<NodeId>>,
    observations: Vec<ObservationSource>,
}

/// A guard over a `Network` which records every modification made through it and undoes
/// them (in reverse order) when dropped.
///
/// The guard dereferences to the underlying `Network`, so nested guards can be opened
/// with `edit()` and read-only queries work as usual. Changes made through `DerefMut`
/// directly (instead of the guard methods) are not recorded.
pub struct NetworkEdit<'a> {
    network: &'a mut Network,
    undo: Vec<_impl_network_edit::EditAction>,
}

/// Values of (some) nodes at one point in time.
pub type Valuation = HashMap<NodeId, bool>;

/// An iterator over all `NodeId`s of a `Network`.
pub type NodeIdIterator = Map<Range<usize>, fn(usize) -> NodeId>;
