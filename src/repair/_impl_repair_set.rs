use crate::repair::{RepairCost, RepairSet};
use crate::{BooleanFunction, Edge, Network};
use std::collections::BTreeSet;

impl RepairSet {
    pub fn new() -> RepairSet {
        RepairSet::default()
    }

    pub fn add_repaired_function(&mut self, function: BooleanFunction) {
        if !self.repaired_functions.contains(&function) {
            self.repaired_functions.push(function);
        }
    }

    pub fn add_flipped_edge(&mut self, edge: Edge) {
        self.flipped_edges.insert(edge);
    }

    pub fn add_removed_edge(&mut self, edge: Edge) {
        self.removed_edges.insert(edge);
    }

    pub fn add_added_edge(&mut self, edge: Edge) {
        self.added_edges.insert(edge);
    }

    pub fn repaired_functions(&self) -> &[BooleanFunction] {
        &self.repaired_functions
    }

    pub fn flipped_edges(&self) -> &BTreeSet<Edge> {
        &self.flipped_edges
    }

    pub fn removed_edges(&self) -> &BTreeSet<Edge> {
        &self.removed_edges
    }

    pub fn added_edges(&self) -> &BTreeSet<Edge> {
        &self.added_edges
    }

    pub fn topology_changes(&self) -> usize {
        self.flipped_edges.len() + self.removed_edges.len() + self.added_edges.len()
    }

    pub fn add_remove_ops(&self) -> usize {
        self.removed_edges.len() + self.added_edges.len()
    }

    pub fn flip_ops(&self) -> usize {
        self.flipped_edges.len()
    }

    pub fn repair_ops(&self) -> usize {
        self.repaired_functions.len() + self.topology_changes()
    }

    pub fn cost(&self) -> RepairCost {
        RepairCost::new(self.add_remove_ops(), self.flip_ops(), self.repair_ops())
    }

    /// Human readable description of the operations, one per line.
    pub fn to_string(&self, network: &Network) -> String {
        let edge = |e: &Edge| {
            format!(
                "({},{},{})",
                network.get_node_name(e.get_source()),
                network.get_node_name(e.get_target()),
                e.get_sign().to_code()
            )
        };
        let mut lines = Vec::new();
        for function in &self.repaired_functions {
            let node = network.get_node_name(function.get_target());
            lines.push(format!("F,{},{}", node, function.to_string(network)));
        }
        for e in &self.flipped_edges {
            lines.push(format!("E,{}", edge(e)));
        }
        for e in &self.removed_edges {
            lines.push(format!("R,{}", edge(e)));
        }
        for e in &self.added_edges {
            lines.push(format!("A,{}", edge(e)));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::repair::{RepairCost, RepairSet};
    use crate::{BooleanFunction, Edge, Network, Sign};

    fn check_counters(set: &RepairSet) {
        assert_eq!(
            set.repair_ops(),
            set.repaired_functions().len()
                + set.flipped_edges().len()
                + set.removed_edges().len()
                + set.added_edges().len()
        );
        assert_eq!(
            set.topology_changes(),
            set.flipped_edges().len() + set.removed_edges().len() + set.added_edges().len()
        );
    }

    #[test]
    fn test_counters_and_idempotence() {
        let mut network = Network::new();
        let a = network.add_node("a").unwrap();
        let b = network.add_node("b").unwrap();
        let ab = Edge::new(a, b, Sign::Positive);
        let ba = Edge::new(b, a, Sign::Negative);

        let mut set = RepairSet::new();
        check_counters(&set);
        set.add_flipped_edge(ab);
        check_counters(&set);
        set.add_flipped_edge(ab);
        check_counters(&set);
        set.add_added_edge(ba);
        set.add_added_edge(ba);
        set.add_removed_edge(ab);
        check_counters(&set);
        let f = BooleanFunction::disjunction(b, &[a]);
        set.add_repaired_function(f.clone());
        set.add_repaired_function(f);
        check_counters(&set);
        assert_eq!(RepairCost::new(2, 1, 4), set.cost());
        assert_eq!(3, set.topology_changes());

        network.add_edge(a, b, Sign::Positive).unwrap();
        assert_eq!(
            "F,b,(a)\nE,(a,b,1)\nR,(a,b,1)\nA,(b,a,0)",
            set.to_string(&network)
        );
    }
}
