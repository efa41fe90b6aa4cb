use crate::lattice::FunctionLattice;
use crate::oracle::{classify_function, Inconsistency};
use crate::repair::{
    Combinations, InconsistencySolution, RepairError, RepairSearch, RepairSet,
};
use crate::{should_log, BooleanFunction, Edge, Network, NodeId, Sign, LOG_VERBOSE};

/// **(internal)** The edge operations applied to a node in the current search branch.
///
/// Edges are kept as they were before the operation.
#[derive(Clone, Debug, Default)]
pub(super) struct EditContext {
    pub added: Vec<Edge>,
    pub removed: Vec<Edge>,
    pub flipped: Vec<Edge>,
}

impl EditContext {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.flipped.is_empty()
    }

    /// True if edges were added or removed.
    pub fn changes_topology(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }

    /// A `RepairSet` with all operations of this context and an optional new function.
    pub fn repair_set(&self, function: Option<BooleanFunction>) -> RepairSet {
        let mut set = RepairSet::new();
        if let Some(function) = function {
            set.add_repaired_function(function);
        }
        for edge in &self.flipped {
            set.add_flipped_edge(*edge);
        }
        for edge in &self.removed {
            set.add_removed_edge(*edge);
        }
        for edge in &self.added {
            set.add_added_edge(*edge);
        }
        set
    }
}

impl<L: FunctionLattice + ?Sized> RepairSearch<'_, L> {
    pub(super) fn log_essential(&self) -> bool {
        should_log(self.config.log_level)
    }

    pub(super) fn log_verbose(&self) -> bool {
        self.config.log_level >= LOG_VERBOSE
    }

    /// Repair all inconsistent nodes of the `solution`, one after another.
    ///
    /// The search stops at the first node which cannot be repaired: such a world is marked
    /// as impossible and will not be part of the result. The `network` is returned to its
    /// original state afterwards.
    pub fn repair_inconsistencies(
        &self,
        network: &mut Network,
        solution: &mut InconsistencySolution,
    ) -> Result<(), RepairError> {
        let nodes: Vec<NodeId> = solution.inconsistent_nodes().map(|n| n.get_id()).collect();
        for node in nodes {
            self.repair_node(network, solution, node)?;
            if solution.has_impossibility() {
                if self.log_essential() {
                    println!(
                        "Found a node with impossibility: {}.",
                        network.get_node_name(node)
                    );
                }
                return Ok(());
            }
            if self.log_verbose() {
                println!("Found a repair for node {}.", network.get_node_name(node));
            }
        }
        Ok(())
    }

    /// Find the cheapest repairs of a single `node` and store them in the `solution`.
    ///
    /// Topology candidates are tested in the order of an increasing number of edge
    /// additions and removals. Once some candidate of a given size is a repair, larger
    /// candidates are not considered. When a candidate changes the topology, the node
    /// starts from the disjunction of all its remaining regulators. If no candidate
    /// repairs the node, the solution is marked as impossible and `false` is returned.
    pub fn repair_node(
        &self,
        network: &mut Network,
        solution: &mut InconsistencySolution,
        node: NodeId,
    ) -> Result<bool, RepairError> {
        let original = network.get_function(node).clone();
        let original_regulators = original.regulators().to_vec();
        let removable: Vec<Edge> = original_regulators
            .iter()
            .filter_map(|r| network.find_edge(*r, node))
            .filter(|e| !e.is_fixed())
            .cloned()
            .collect();
        let addable: Vec<Edge> = network
            .nodes()
            .filter(|n| !original_regulators.contains(n) && network.find_edge(*n, node).is_none())
            .map(|n| Edge::new(n, node, Sign::Positive))
            .collect();

        let mut found = false;
        for budget in 0..=(removable.len() + addable.len()) {
            for n_add in 0..=budget.min(addable.len()) {
                let n_remove = budget - n_add;
                if n_remove > removable.len() {
                    continue;
                }
                if self.log_verbose() {
                    println!("Testing {} additions and {} removals.", n_add, n_remove);
                }
                for added in Combinations::new(&addable, n_add) {
                    for removed in Combinations::new(&removable, n_remove) {
                        let mut edit = network.edit();
                        for edge in &removed {
                            edit.remove_edge(edge.get_source(), edge.get_target())
                                .map_err(RepairError::InvalidEdit)?;
                        }
                        for edge in &added {
                            edit.add_edge(edge.get_source(), edge.get_target(), edge.get_sign())
                                .map_err(RepairError::InvalidEdit)?;
                        }
                        if budget > 0 {
                            let mut regulators: Vec<NodeId> = original_regulators
                                .iter()
                                .filter(|r| !removed.iter().any(|e| e.get_source() == **r))
                                .cloned()
                                .collect();
                            regulators.extend(added.iter().map(|e| e.get_source()));
                            edit.set_function(node, BooleanFunction::disjunction(node, &regulators));
                        }
                        let context = EditContext {
                            added: added.clone(),
                            removed,
                            flipped: Vec::new(),
                        };
                        let is_repair =
                            self.repair_flipping_edges(&mut edit, solution, node, &context)?;
                        edit.rollback();
                        if is_repair {
                            found = true;
                            if !self.config.all_opt {
                                return Ok(true);
                            }
                        }
                    }
                }
            }
            if found {
                break;
            }
        }
        if !found {
            solution.set_impossibility(true);
            if self.log_essential() {
                println!("Not possible to repair node {}.", network.get_node_name(node));
            }
        }
        Ok(found)
    }

    /// Try all combinations of sign flips of the (non-fixed) regulations of `node`, in the
    /// order of an increasing number of flips. When the node already has a repair, only
    /// combinations up to its number of flips are considered.
    fn repair_flipping_edges(
        &self,
        network: &mut Network,
        solution: &mut InconsistencySolution,
        node: NodeId,
        context: &EditContext,
    ) -> Result<bool, RepairError> {
        let function = network.get_function(node).clone();
        let flippable: Vec<Edge> = function
            .regulators()
            .iter()
            .filter_map(|r| network.find_edge(*r, node))
            .filter(|e| !e.is_fixed())
            .cloned()
            .collect();
        let mut iterations = flippable.len();
        if let Some(inconsistent) = solution.get_node(node) {
            if inconsistent.is_repaired() {
                iterations = iterations.min(inconsistent.cost().flip_ops);
            }
        }

        let mut found = false;
        for n_flips in 0..=iterations {
            if self.log_verbose() {
                println!("Testing {} edge flips.", n_flips);
            }
            for flipped in Combinations::new(&flippable, n_flips) {
                let mut edit = network.edit();
                for edge in &flipped {
                    edit.flip_edge(edge.get_source(), edge.get_target())
                        .map_err(RepairError::InvalidEdit)?;
                }
                let context = EditContext {
                    flipped,
                    ..context.clone()
                };
                let is_repair = self.repair_function(&edit, solution, node, &context)?;
                edit.rollback();
                if is_repair {
                    found = true;
                    if !self.config.all_opt {
                        return Ok(true);
                    }
                }
            }
            if found {
                break;
            }
        }
        Ok(found)
    }

    /// Decide whether the current edge operations alone repair the node, and if not,
    /// search for a replacement function.
    fn repair_function(
        &self,
        network: &Network,
        solution: &mut InconsistencySolution,
        node: NodeId,
        context: &EditContext,
    ) -> Result<bool, RepairError> {
        let Some(inconsistent) = solution.get_node(node) else {
            return Ok(false);
        };
        let topological_error = inconsistent.has_topological_error();
        let best = inconsistent.is_repaired().then(|| inconsistent.cost());
        let mut repair_type = inconsistent.repair_type();

        let function = network.get_function(node);
        if !context.is_empty() {
            repair_type = classify_function(network, solution.labeling(), function)?;
            if repair_type == Inconsistency::Consistent {
                if self.log_verbose() {
                    println!("Node {} is consistent after topological changes.", network.get_node_name(node));
                }
                let changed = context.changes_topology().then(|| function.clone());
                solution.add_repair_set(node, context.repair_set(changed));
                return Ok(true);
            }
        } else if topological_error {
            return Ok(false);
        }

        // A repair using only the current edge operations is already known.
        if let Some(best) = best {
            let add_remove = context.added.len() + context.removed.len();
            if best.add_remove_ops == add_remove
                && best.flip_ops == context.flipped.len()
                && best.repair_ops == add_remove + context.flipped.len()
            {
                return Ok(false);
            }
        }

        match repair_type {
            Inconsistency::DoubleInconsistent if context.changes_topology() => {
                // The function is already the disjunction of all regulators.
                Ok(false)
            }
            Inconsistency::DoubleInconsistent => {
                self.search_non_comparable(network, solution, node, context)
            }
            other => self.search_comparable(
                network,
                solution,
                node,
                context,
                other == Inconsistency::NeedGeneralization,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lattice::HasseDiagram;
    use crate::oracle::Inconsistency;
    use crate::repair::{InconsistencySolution, RepairConfig, RepairCost, RepairSearch};
    use crate::{BooleanFunction, Edge, Network, NodeId, Sign, UpdateType};
    use pretty_assertions::assert_eq;

    fn steady(solution: &mut InconsistencySolution, profile: &str, values: &[(NodeId, bool)]) {
        for (node, value) in values {
            solution.add_v_label(profile, *node, *value, 0);
        }
    }

    #[test]
    fn test_repair_by_flip() {
        let mut network = Network::new();
        let a = network.add_node("a").unwrap();
        let b = network.add_node("b").unwrap();
        network.add_edge(a, b, Sign::Positive).unwrap();
        network.add_regulator_to_term(b, 1, a).unwrap();
        let mut solution = InconsistencySolution::new();
        solution.add_particularization(b);
        steady(&mut solution, "p", &[(a, true), (b, false)]);

        let config = RepairConfig::default();
        let search = RepairSearch::new(&HasseDiagram, &config);
        assert!(search.repair_node(&mut network, &mut solution, b).unwrap());
        let repaired = solution.get_node(b).unwrap();
        assert_eq!(RepairCost::new(0, 1, 1), repaired.cost());
        assert_eq!(1, repaired.repair_sets().len());
        let repair = &repaired.repair_sets()[0];
        assert!(repair.flipped_edges().contains(&Edge::new(a, b, Sign::Positive)));
        assert!(repair.repaired_functions().is_empty());
        assert_eq!(Sign::Positive, network.find_edge(a, b).unwrap().get_sign());
    }

    #[test]
    fn test_fixed_edge_is_not_flipped() {
        let mut network = Network::new();
        let a = network.add_node("a").unwrap();
        let b = network.add_node("b").unwrap();
        network.add_edge(a, b, Sign::Positive).unwrap();
        network.set_fixed(a, b, true).unwrap();
        network.add_regulator_to_term(b, 1, a).unwrap();
        let mut solution = InconsistencySolution::new();
        solution.add_particularization(b);
        steady(&mut solution, "p", &[(a, true), (b, false)]);

        let config = RepairConfig::default();
        let search = RepairSearch::new(&HasseDiagram, &config);
        search.repair_node(&mut network, &mut solution, b).unwrap();
        // The regulation cannot change, so `b` gets a new regulator instead.
        let repaired = solution.get_node(b).unwrap();
        assert!(repaired.is_repaired());
        for repair in repaired.repair_sets() {
            assert!(repair.flipped_edges().iter().all(|e| e.get_source() != a));
            assert!(repair.removed_edges().is_empty());
        }
        assert!(network.find_edge(a, b).unwrap().is_fixed());
    }

    #[test]
    fn test_repair_by_adding_regulators() {
        let mut network = Network::new();
        let a = network.add_node("a").unwrap();
        let b = network.add_node("b").unwrap();
        let original_edges = network.edges();
        let mut solution = InconsistencySolution::new();
        solution.add_generalization(b);
        steady(&mut solution, "p", &[(a, true), (b, true)]);

        let config = RepairConfig::default();
        let search = RepairSearch::new(&HasseDiagram, &config);
        assert!(search.repair_node(&mut network, &mut solution, b).unwrap());
        let repaired = solution.get_node(b).unwrap();
        assert_eq!(RepairCost::new(1, 0, 2), repaired.cost());
        let added: Vec<Edge> = repaired
            .repair_sets()
            .iter()
            .flat_map(|r| r.added_edges().iter().cloned())
            .collect();
        assert_eq!(
            vec![Edge::new(a, b, Sign::Positive), Edge::new(b, b, Sign::Positive)],
            added
        );
        assert_eq!(
            &[BooleanFunction::disjunction(b, &[a])],
            repaired.repair_sets()[0].repaired_functions()
        );
        assert_eq!(original_edges, network.edges());
        assert!(network.get_function(b).is_empty());
        assert_eq!(RepairCost::new(1, 0, 2), solution.cost());
    }

    #[test]
    fn test_first_repair_only() {
        let mut network = Network::new();
        let a = network.add_node("a").unwrap();
        let b = network.add_node("b").unwrap();
        let mut solution = InconsistencySolution::new();
        solution.add_generalization(b);
        steady(&mut solution, "p", &[(a, true), (b, true)]);

        let config = RepairConfig {
            all_opt: false,
            ..RepairConfig::default()
        };
        let search = RepairSearch::new(&HasseDiagram, &config);
        assert!(search.repair_node(&mut network, &mut solution, b).unwrap());
        assert_eq!(1, solution.get_node(b).unwrap().repair_sets().len());
    }

    #[test]
    fn test_impossible_node() {
        let mut network = Network::new();
        let b = network.add_node("b").unwrap();
        network
            .add_observation("series", UpdateType::Synchronous)
            .unwrap();
        let mut solution = InconsistencySolution::new();
        solution.add_generalization(b);
        for (profile, first) in [("p1", false), ("p2", true)] {
            solution.add_v_label(profile, b, first, 0);
            solution.add_v_label(profile, b, true, 1);
        }

        let config = RepairConfig::default();
        let search = RepairSearch::new(&HasseDiagram, &config);
        search
            .repair_inconsistencies(&mut network, &mut solution)
            .unwrap();
        assert!(solution.has_impossibility());
        assert!(!solution.get_node(b).unwrap().is_repaired());
        assert_eq!(0, network.num_edges());
    }

    #[test]
    fn test_topological_error_needs_edit() {
        let mut network = Network::new();
        let a = network.add_node("a").unwrap();
        let b = network.add_node("b").unwrap();
        network.add_edge(a, b, Sign::Positive).unwrap();
        network.add_regulator_to_term(b, 1, a).unwrap();
        let mut solution = InconsistencySolution::new();
        solution.add_topological_error(b);
        steady(&mut solution, "p", &[(a, true), (b, true)]);
        assert_eq!(
            Inconsistency::Consistent,
            solution.get_node(b).unwrap().repair_type()
        );

        let config = RepairConfig::default();
        let search = RepairSearch::new(&HasseDiagram, &config);
        search.repair_node(&mut network, &mut solution, b).unwrap();
        let repaired = solution.get_node(b).unwrap();
        assert!(repaired.is_repaired());
        // Doing nothing is never a repair of a topological error.
        assert!(repaired.cost().topology_changes > 0);
    }
}
