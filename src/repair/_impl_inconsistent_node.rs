use crate::oracle::Inconsistency;
use crate::repair::{InconsistentNode, RepairCost, RepairSet};
use crate::NodeId;
use std::cmp::Ordering;

impl InconsistentNode {
    /// A node which needs generalization (`generalization = true`) or particularization.
    pub fn new(id: NodeId, generalization: bool) -> InconsistentNode {
        let repair_type = if generalization {
            Inconsistency::NeedGeneralization
        } else {
            Inconsistency::NeedParticularization
        };
        InconsistentNode {
            id,
            repair_type,
            topological_error: false,
            repair_sets: Vec::new(),
            cost: RepairCost::default(),
            repaired: false,
        }
    }

    /// A node whose function is consistent, but the regulations around it are not.
    pub fn topological(id: NodeId) -> InconsistentNode {
        InconsistentNode {
            repair_type: Inconsistency::Consistent,
            topological_error: true,
            ..InconsistentNode::new(id, false)
        }
    }

    pub fn get_id(&self) -> NodeId {
        self.id
    }

    pub fn repair_type(&self) -> Inconsistency {
        self.repair_type
    }

    pub fn set_repair_type(&mut self, repair_type: Inconsistency) {
        self.repair_type = repair_type;
    }

    pub fn has_topological_error(&self) -> bool {
        self.topological_error
    }

    pub fn set_topological_error(&mut self, value: bool) {
        self.topological_error = value;
    }

    pub fn is_repaired(&self) -> bool {
        self.repaired
    }

    /// The best repairs found so far. All of them have the same `cost`.
    pub fn repair_sets(&self) -> &[RepairSet] {
        &self.repair_sets
    }

    /// The cost of the best repairs, or zero if the node was not repaired yet.
    pub fn cost(&self) -> RepairCost {
        self.cost
    }

    /// Offer a new repair of this node.
    ///
    /// The first repair is always accepted. Afterwards, a cheaper repair replaces all stored
    /// ones, an equally expensive one is added next to them, and a more expensive one is
    /// ignored. Returns `true` if the repair was stored.
    pub fn add_repair_set(&mut self, repair_set: RepairSet) -> bool {
        let cost = repair_set.cost();
        if !self.repaired {
            self.repaired = true;
            self.cost = cost;
            self.repair_sets.push(repair_set);
            return true;
        }
        match cost.cmp(&self.cost) {
            Ordering::Greater => false,
            Ordering::Less => {
                self.cost = cost;
                self.repair_sets.clear();
                self.repair_sets.push(repair_set);
                true
            }
            Ordering::Equal => {
                if self.repair_sets.contains(&repair_set) {
                    false
                } else {
                    self.repair_sets.push(repair_set);
                    true
                }
            }
        }
    }
}
