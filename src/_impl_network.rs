use crate::{
    BooleanFunction, Edge, Network, Node, NodeId, NodeIdIterator, ObservationSource, Sign,
    UpdateType, ID_REGEX,
};
use std::collections::HashSet;

/// Methods for safely constructing new instances of `Network`s.
impl Network {
    /// Create a new empty `Network`.
    pub fn new() -> Network {
        Network::default()
    }

    /// Add a node with the given `name` and an empty function. If the node already exists,
    /// its existing id is returned.
    ///
    /// Returns `Err` when the name is not a valid identifier.
    pub fn add_node(&mut self, name: &str) -> Result<NodeId, String> {
        if let Some(id) = self.find_node(name) {
            return Ok(id);
        }
        if !ID_REGEX.is_match(name) {
            return Err(format!("Invalid node name `{}`.", name));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            function: BooleanFunction::new(id),
        });
        self.node_to_index.insert(name.to_string(), id);
        self.successors.push(Vec::new());
        self.regulators.push(Vec::new());
        Ok(id)
    }

    /// Add a new (non-fixed) `source -> target` edge with the given `sign`.
    ///
    /// Returns `Err` if one of the nodes does not exist or the two nodes are
    /// already connected.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, sign: Sign) -> Result<(), String> {
        self.assert_node(source)?;
        self.assert_node(target)?;
        if self.find_edge(source, target).is_some() {
            return Err(format!(
                "Invalid edge: {} already regulates {}.",
                self.get_node_name(source),
                self.get_node_name(target)
            ));
        }
        self.insert_edge(Edge::new(source, target, sign));
        Ok(())
    }

    /// Remove the `source -> target` edge, returning it.
    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> Result<Edge, String> {
        self.take_edge(source, target)
            .ok_or_else(|| self.missing_edge_message(source, target))
    }

    /// Invert the sign of the `source -> target` edge, returning the updated edge.
    pub fn flip_edge(&mut self, source: NodeId, target: NodeId) -> Result<Edge, String> {
        let message = self.missing_edge_message(source, target);
        let edge = self
            .find_edge_mut(source, target)
            .ok_or(message)?;
        edge.sign = edge.sign.flip();
        Ok(*edge)
    }

    /// Mark the `source -> target` edge as (not) fixed. Fixed edges are never changed by
    /// the repair search.
    pub fn set_fixed(&mut self, source: NodeId, target: NodeId, fixed: bool) -> Result<(), String> {
        let message = self.missing_edge_message(source, target);
        let edge = self
            .find_edge_mut(source, target)
            .ok_or(message)?;
        edge.fixed = fixed;
        Ok(())
    }

    /// Add `regulator` to the term `term_id` of the function of `target`.
    ///
    /// The edge `regulator -> target` does not have to exist yet. A function referencing
    /// a regulator without an edge is only reported once it is evaluated.
    pub fn add_regulator_to_term(
        &mut self,
        target: NodeId,
        term_id: usize,
        regulator: NodeId,
    ) -> Result<(), String> {
        self.assert_node(target)?;
        self.assert_node(regulator)?;
        self.nodes[target.0]
            .function
            .add_regulator_to_term(term_id, regulator);
        Ok(())
    }

    /// Replace the function of `node`, returning the previous one. The function is
    /// re-targeted to `node` if necessary.
    pub fn set_function(&mut self, node: NodeId, mut function: BooleanFunction) -> BooleanFunction {
        function.target = node;
        std::mem::replace(&mut self.nodes[node.0].function, function)
    }

    /// Register a new source of observations.
    ///
    /// Returns `Err` when the source would activate a second time-series semantics, since
    /// profiles of such network could not be interpreted unambiguously.
    pub fn add_observation(&mut self, name: &str, update: UpdateType) -> Result<(), String> {
        if let Some(active) = self.time_series_update() {
            if update.is_time_series() && update != active {
                return Err(format!(
                    "Cannot add {} observations `{}`: the network already uses {} time series.",
                    update, name, active
                ));
            }
        }
        self.observations.push(ObservationSource::new(name, update));
        Ok(())
    }

    /// **(internal)** Insert an edge while keeping both adjacency indices sorted.
    pub(crate) fn insert_edge(&mut self, edge: Edge) {
        let successors = &mut self.successors[edge.source.0];
        let position = successors.partition_point(|e| e.target < edge.target);
        successors.insert(position, edge);
        let regulators = &mut self.regulators[edge.target.0];
        let position = regulators.partition_point(|r| *r < edge.source);
        regulators.insert(position, edge.source);
    }

    /// **(internal)** Remove an edge from both adjacency indices, if it exists.
    pub(crate) fn take_edge(&mut self, source: NodeId, target: NodeId) -> Option<Edge> {
        if source.0 >= self.nodes.len() || target.0 >= self.nodes.len() {
            return None;
        }
        let successors = &mut self.successors[source.0];
        let position = successors.iter().position(|e| e.target == target)?;
        let edge = successors.remove(position);
        self.regulators[target.0].retain(|r| *r != source);
        Some(edge)
    }

    /// **(internal)** Find a mutable reference to an edge.
    fn find_edge_mut(&mut self, source: NodeId, target: NodeId) -> Option<&mut Edge> {
        self.successors
            .get_mut(source.0)?
            .iter_mut()
            .find(|e| e.target == target)
    }

    /// **(internal)** Utility method to ensure a node id is valid.
    fn assert_node(&self, node: NodeId) -> Result<(), String> {
        if node.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(format!("Unknown node {}.", node))
        }
    }

    /// **(internal)** An error message for operations on edges that do not exist.
    fn missing_edge_message(&self, source: NodeId, target: NodeId) -> String {
        let name = |id: NodeId| {
            self.nodes
                .get(id.0)
                .map(|n| n.name.clone())
                .unwrap_or_else(|| id.to_string())
        };
        format!("Invalid edge: {} does not regulate {}.", name(source), name(target))
    }
}

/// Some basic utility methods for inspecting the `Network`.
impl Network {
    /// The number of nodes in this `Network`.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return an iterator over all node ids of this network.
    pub fn nodes(&self) -> NodeIdIterator {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Find a `NodeId` for the given name, or `None` if the node does not exist.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.node_to_index.get(name).cloned()
    }

    pub fn get_node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Shorthand for `self.get_node(id).get_name()`.
    pub fn get_node_name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    /// The function currently assigned to `node`.
    pub fn get_function(&self, node: NodeId) -> &BooleanFunction {
        &self.nodes[node.0].function
    }

    /// Find the edge `source -> target` if it exists.
    pub fn find_edge(&self, source: NodeId, target: NodeId) -> Option<&Edge> {
        self.successors
            .get(source.0)?
            .iter()
            .find(|e| e.target == target)
    }

    /// A sorted list of nodes that regulate the given `target` node.
    pub fn regulators(&self, target: NodeId) -> &[NodeId] {
        &self.regulators[target.0]
    }

    /// Outgoing edges of `source`, sorted by target.
    pub fn successors(&self, source: NodeId) -> &[Edge] {
        &self.successors[source.0]
    }

    /// All edges of this network, sorted.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self.successors.iter().flatten().cloned().collect();
        edges.sort();
        edges
    }

    pub fn num_edges(&self) -> usize {
        self.successors.iter().map(|s| s.len()).sum()
    }

    pub fn observations(&self) -> &[ObservationSource] {
        &self.observations
    }

    /// The set of update semantics activated by the registered observations.
    pub fn update_types(&self) -> HashSet<UpdateType> {
        self.observations.iter().map(|o| o.update).collect()
    }

    pub fn has_steady_state_observations(&self) -> bool {
        self.observations
            .iter()
            .any(|o| o.update == UpdateType::SteadyState)
    }

    /// The time-series semantics of this network, if any time-series observations exist.
    pub fn time_series_update(&self) -> Option<UpdateType> {
        self.observations
            .iter()
            .map(|o| o.update)
            .find(|u| u.is_time_series())
    }
}

impl Node {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_function(&self) -> &BooleanFunction {
        &self.function
    }
}

#[cfg(test)]
mod tests {
    use crate::{BooleanFunction, Network, Sign, UpdateType};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_network_construction() {
        let mut network = Network::new();
        let a = network.add_node("a").unwrap();
        let b = network.add_node("b").unwrap();
        let c = network.add_node("\"long name\"").unwrap();
        assert_eq!(a, network.add_node("a").unwrap());
        assert!(network.add_node("Abc").is_err());
        assert!(network.add_node("a b").is_err());
        assert_eq!(3, network.num_nodes());
        assert_eq!(vec![a, b, c], network.nodes().collect::<Vec<_>>());

        network.add_edge(c, b, Sign::Positive).unwrap();
        network.add_edge(a, b, Sign::Negative).unwrap();
        assert!(network.add_edge(a, b, Sign::Positive).is_err());
        assert_eq!(&[a, c], network.regulators(b));
        assert_eq!(2, network.num_edges());
        assert_eq!(Sign::Negative, network.find_edge(a, b).unwrap().get_sign());
        assert!(network.find_edge(b, a).is_none());

        let flipped = network.flip_edge(a, b).unwrap();
        assert_eq!(Sign::Positive, flipped.get_sign());
        network.set_fixed(c, b, true).unwrap();
        assert!(network.find_edge(c, b).unwrap().is_fixed());
        assert!(network.flip_edge(b, c).is_err());

        let removed = network.remove_edge(a, b).unwrap();
        assert_eq!(a, removed.get_source());
        assert_eq!(&[c], network.regulators(b));
        assert!(network.successors(a).is_empty());
        assert!(network.remove_edge(a, b).is_err());
    }

    #[test]
    fn test_functions() {
        let mut network = Network::new();
        let a = network.add_node("a").unwrap();
        let b = network.add_node("b").unwrap();
        network.add_edge(a, b, Sign::Positive).unwrap();
        network.add_regulator_to_term(b, 1, a).unwrap();
        assert_eq!(&[a], network.get_function(b).regulators());
        let previous = network.set_function(b, BooleanFunction::new(a));
        assert_eq!(&[a], previous.regulators());
        assert!(network.get_function(b).is_empty());
        assert_eq!(b, network.get_function(b).get_target());
        assert_eq!("b", network.get_node(b).get_name());
    }

    #[test]
    fn test_observation_sources() {
        let mut network = Network::new();
        assert_eq!(None, network.time_series_update());
        network
            .add_observation("steady.lp", UpdateType::SteadyState)
            .unwrap();
        network
            .add_observation("series.lp", UpdateType::Asynchronous)
            .unwrap();
        network
            .add_observation("more.lp", UpdateType::Asynchronous)
            .unwrap();
        assert!(network
            .add_observation("sync.lp", UpdateType::Synchronous)
            .is_err());
        assert!(network.has_steady_state_observations());
        assert_eq!(Some(UpdateType::Asynchronous), network.time_series_update());
        assert_eq!(2, network.update_types().len());
        assert_eq!(3, network.observations().len());
    }
}
