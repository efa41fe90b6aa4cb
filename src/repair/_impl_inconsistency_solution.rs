use crate::oracle::{Inconsistency, Labeling};
use crate::repair::{InconsistencySolution, InconsistentNode, RepairCost, RepairSet};
use crate::{Network, NodeId, UpdateType};
use std::cmp::Ordering;

/// Registration of the data reported by the consistency checker.
impl InconsistencySolution {
    pub fn new() -> InconsistencySolution {
        InconsistencySolution::default()
    }

    /// Mark `node` as needing generalization. A node that already needs particularization
    /// becomes double inconsistent.
    pub fn add_generalization(&mut self, node: NodeId) {
        self.add_inconsistency(node, Inconsistency::NeedGeneralization);
    }

    /// Mark `node` as needing particularization. A node that already needs generalization
    /// becomes double inconsistent.
    pub fn add_particularization(&mut self, node: NodeId) {
        self.add_inconsistency(node, Inconsistency::NeedParticularization);
    }

    fn add_inconsistency(&mut self, node: NodeId, kind: Inconsistency) {
        match self.nodes.get_mut(&node) {
            Some(existing) => {
                let merged = existing.repair_type().merge(kind);
                existing.set_repair_type(merged);
            }
            None => {
                let generalization = kind == Inconsistency::NeedGeneralization;
                self.nodes
                    .insert(node, InconsistentNode::new(node, generalization));
            }
        }
    }

    /// Mark `node` as having a topological error (its regulations must change).
    pub fn add_topological_error(&mut self, node: NodeId) {
        self.nodes
            .entry(node)
            .or_insert_with(|| InconsistentNode::topological(node))
            .set_topological_error(true);
    }

    /// Record the value of `node` at `time` in `profile`, as completed by the checker.
    pub fn add_v_label(&mut self, profile: &str, node: NodeId, value: bool, time: usize) {
        self.labeling.add_value(profile, time, node, value);
    }

    /// Record that `node` is updated at `time` in `profile`.
    pub fn add_update(&mut self, time: usize, profile: &str, node: NodeId) {
        self.labeling.add_update(time, profile, node);
    }

    /// Interpret `profile` with the given semantics instead of deriving it from the network.
    pub fn set_profile_semantics(&mut self, profile: &str, update: UpdateType) {
        self.labeling.set_semantics(profile, update);
    }

    /// Record that `node` is inconsistent with `profile`.
    pub fn add_inconsistent_profile(&mut self, profile: &str, node: NodeId) {
        let nodes = self
            .inconsistent_profiles
            .entry(profile.to_string())
            .or_default();
        if !nodes.contains(&node) {
            nodes.push(node);
        }
        let profiles = self.inconsistent_nodes_profiles.entry(node).or_default();
        if !profiles.iter().any(|p| p == profile) {
            profiles.push(profile.to_string());
        }
    }
}

/// Inspection and repair bookkeeping.
impl InconsistencySolution {
    pub fn inconsistent_nodes(&self) -> impl Iterator<Item = &InconsistentNode> {
        self.nodes.values()
    }

    pub fn num_inconsistent_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn get_node(&self, node: NodeId) -> Option<&InconsistentNode> {
        self.nodes.get(&node)
    }

    pub fn labeling(&self) -> &Labeling {
        &self.labeling
    }

    /// Nodes inconsistent with `profile`.
    pub fn profile_nodes(&self, profile: &str) -> &[NodeId] {
        self.inconsistent_profiles
            .get(profile)
            .map(|n| n.as_slice())
            .unwrap_or(&[])
    }

    /// Profiles `node` is inconsistent with.
    pub fn node_profiles(&self, node: NodeId) -> &[String] {
        self.inconsistent_nodes_profiles
            .get(&node)
            .map(|p| p.as_slice())
            .unwrap_or(&[])
    }

    /// Sum of the costs of the best repairs of all nodes.
    pub fn cost(&self) -> RepairCost {
        self.cost
    }

    pub fn has_impossibility(&self) -> bool {
        self.has_impossibility
    }

    pub fn set_impossibility(&mut self, value: bool) {
        self.has_impossibility = value;
    }

    /// Offer a repair of `node` (see `InconsistentNode::add_repair_set`) and keep the total
    /// cost in sync with the best repairs of the nodes.
    ///
    /// Returns `false` when the repair was not stored, including when `node` is not
    /// inconsistent in this world.
    pub fn add_repair_set(&mut self, node: NodeId, repair_set: RepairSet) -> bool {
        let Some(target) = self.nodes.get_mut(&node) else {
            return false;
        };
        let before = target.cost();
        if !target.add_repair_set(repair_set) {
            return false;
        }
        self.cost -= before;
        self.cost += target.cost();
        true
    }

    /// Compare the total repair costs of two worlds. `Less` means that `self` is cheaper.
    pub fn compare_repairs(&self, other: &InconsistencySolution) -> Ordering {
        self.cost.cmp(&other.cost)
    }

    /// A human readable summary of the repairs, one repair set per block.
    pub fn to_string(&self, network: &Network) -> String {
        let mut lines = Vec::new();
        for node in self.nodes.values() {
            let name = network.get_node_name(node.get_id());
            if !node.is_repaired() {
                lines.push(format!("{}: no repair", name));
                continue;
            }
            for (i, repair) in node.repair_sets().iter().enumerate() {
                lines.push(format!("{} #{}:", name, i + 1));
                if repair.repair_ops() > 0 {
                    lines.push(repair.to_string(network));
                }
            }
        }
        lines.join("\n")
    }
}
