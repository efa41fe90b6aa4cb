use crate::repair::RepairCost;
use std::cmp::Ordering;
use std::ops::{AddAssign, SubAssign};

impl RepairCost {
    pub fn new(add_remove_ops: usize, flip_ops: usize, repair_ops: usize) -> RepairCost {
        RepairCost {
            add_remove_ops,
            flip_ops,
            repair_ops,
            topology_changes: add_remove_ops + flip_ops,
        }
    }

    fn key(&self) -> (usize, usize, usize, usize) {
        (
            self.add_remove_ops,
            self.flip_ops,
            self.repair_ops,
            self.topology_changes,
        )
    }
}

impl PartialOrd for RepairCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RepairCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl AddAssign for RepairCost {
    fn add_assign(&mut self, rhs: Self) {
        self.add_remove_ops += rhs.add_remove_ops;
        self.flip_ops += rhs.flip_ops;
        self.repair_ops += rhs.repair_ops;
        self.topology_changes += rhs.topology_changes;
    }
}

impl SubAssign for RepairCost {
    fn sub_assign(&mut self, rhs: Self) {
        self.add_remove_ops -= rhs.add_remove_ops;
        self.flip_ops -= rhs.flip_ops;
        self.repair_ops -= rhs.repair_ops;
        self.topology_changes -= rhs.topology_changes;
    }
}
