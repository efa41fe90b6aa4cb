use crate::{BooleanFunction, Edge, Network, NetworkEdit, NodeId, Sign};
use std::ops::{Deref, DerefMut};

/// **(internal)** One recorded modification, stored together with what is needed to undo it.
#[derive(Clone, Debug)]
pub(crate) enum EditAction {
    Added(NodeId, NodeId),
    Removed(Edge),
    Flipped(NodeId, NodeId),
    Function(NodeId, BooleanFunction),
}

impl Network {
    /// Start a transaction over this network. Modifications made through the returned
    /// guard are reverted once the guard is dropped.
    pub fn edit(&mut self) -> NetworkEdit<'_> {
        NetworkEdit {
            network: self,
            undo: Vec::new(),
        }
    }
}

impl<'a> NetworkEdit<'a> {
    /// Add a new `source -> target` edge. See `Network::add_edge`.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, sign: Sign) -> Result<(), String> {
        self.network.add_edge(source, target, sign)?;
        self.undo.push(EditAction::Added(source, target));
        Ok(())
    }

    /// Remove the `source -> target` edge. See `Network::remove_edge`.
    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> Result<Edge, String> {
        let edge = self.network.remove_edge(source, target)?;
        self.undo.push(EditAction::Removed(edge));
        Ok(edge)
    }

    /// Invert the sign of the `source -> target` edge. See `Network::flip_edge`.
    pub fn flip_edge(&mut self, source: NodeId, target: NodeId) -> Result<Edge, String> {
        let edge = self.network.flip_edge(source, target)?;
        self.undo.push(EditAction::Flipped(source, target));
        Ok(edge)
    }

    /// Swap the function of `node`, returning the previous one.
    pub fn set_function(&mut self, node: NodeId, function: BooleanFunction) -> BooleanFunction {
        let previous = self.network.set_function(node, function);
        self.undo
            .push(EditAction::Function(node, previous.clone()));
        previous
    }

    /// The number of modifications that would be reverted by `rollback`.
    pub fn num_changes(&self) -> usize {
        self.undo.len()
    }

    /// Revert all modifications recorded so far, in reverse order. The guard stays usable.
    pub fn rollback(&mut self) {
        while let Some(action) = self.undo.pop() {
            match action {
                EditAction::Added(source, target) => {
                    self.network.take_edge(source, target);
                }
                EditAction::Removed(edge) => {
                    self.network.insert_edge(edge);
                }
                EditAction::Flipped(source, target) => {
                    // The edge was flipped by this guard and all later modifications
                    // are already reverted, so it still exists.
                    let flipped = self.network.flip_edge(source, target);
                    debug_assert!(flipped.is_ok());
                }
                EditAction::Function(node, function) => {
                    self.network.set_function(node, function);
                }
            }
        }
    }

    /// Keep all modifications made through this guard.
    pub fn commit(mut self) {
        self.undo.clear();
    }
}

impl Deref for NetworkEdit<'_> {
    type Target = Network;

    fn deref(&self) -> &Network {
        self.network
    }
}

impl DerefMut for NetworkEdit<'_> {
    fn deref_mut(&mut self) -> &mut Network {
        self.network
    }
}

impl Drop for NetworkEdit<'_> {
    fn drop(&mut self) {
        self.rollback();
    }
}

#[cfg(test)]
mod tests {
    use crate::{BooleanFunction, Network, Sign};
    use pretty_assertions::assert_eq;

    fn network() -> Network {
        let mut network = Network::new();
        let a = network.add_node("a").unwrap();
        let b = network.add_node("b").unwrap();
        let c = network.add_node("c").unwrap();
        network.add_edge(a, c, Sign::Positive).unwrap();
        network.add_edge(b, c, Sign::Negative).unwrap();
        network.set_fixed(b, c, true).unwrap();
        network.add_regulator_to_term(c, 1, a).unwrap();
        network.add_regulator_to_term(c, 2, b).unwrap();
        network
    }

    #[test]
    fn test_edit_is_reverted_on_drop() {
        let mut network = network();
        let original = network.clone();
        let a = network.find_node("a").unwrap();
        let b = network.find_node("b").unwrap();
        let c = network.find_node("c").unwrap();
        {
            let mut edit = network.edit();
            edit.remove_edge(b, c).unwrap();
            edit.flip_edge(a, c).unwrap();
            edit.add_edge(c, c, Sign::Positive).unwrap();
            edit.add_edge(b, c, Sign::Positive).unwrap();
            edit.set_function(c, BooleanFunction::disjunction(c, &[a, b, c]));
            assert!(edit.add_edge(a, c, Sign::Positive).is_err());
            assert_eq!(5, edit.num_changes());
            assert_eq!(&[a, b, c], edit.regulators(c));
            assert_eq!(3, edit.get_function(c).num_regulators());
        }
        assert_eq!(original.edges(), network.edges());
        assert_eq!(original.regulators(c), network.regulators(c));
        assert!(network.find_edge(b, c).unwrap().is_fixed());
        assert_eq!(original.get_function(c), network.get_function(c));
    }

    #[test]
    fn test_nested_edits() {
        let mut network = network();
        let original = network.clone();
        let a = network.find_node("a").unwrap();
        let c = network.find_node("c").unwrap();
        let mut outer = network.edit();
        outer.remove_edge(a, c).unwrap();
        {
            let mut inner = outer.edit();
            inner.add_edge(a, c, Sign::Negative).unwrap();
            assert_eq!(Sign::Negative, inner.find_edge(a, c).unwrap().get_sign());
        }
        assert!(outer.find_edge(a, c).is_none());
        outer.rollback();
        assert_eq!(0, outer.num_changes());
        drop(outer);
        assert_eq!(original.edges(), network.edges());
    }

    #[test]
    fn test_rollback_of_repeated_flips() {
        let mut network = network();
        let a = network.find_node("a").unwrap();
        let b = network.find_node("b").unwrap();
        let c = network.find_node("c").unwrap();
        let mut edit = network.edit();
        edit.flip_edge(a, c).unwrap();
        edit.flip_edge(b, c).unwrap();
        edit.flip_edge(a, c).unwrap();
        assert_eq!(Sign::Positive, edit.find_edge(a, c).unwrap().get_sign());
        assert_eq!(Sign::Positive, edit.find_edge(b, c).unwrap().get_sign());
        edit.rollback();
        assert_eq!(0, edit.num_changes());
        assert_eq!(Sign::Positive, edit.find_edge(a, c).unwrap().get_sign());
        assert_eq!(Sign::Negative, edit.find_edge(b, c).unwrap().get_sign());
    }

    #[test]
    fn test_commit_keeps_changes() {
        let mut network = network();
        let a = network.find_node("a").unwrap();
        let c = network.find_node("c").unwrap();
        let mut edit = network.edit();
        edit.flip_edge(a, c).unwrap();
        edit.commit();
        assert_eq!(Sign::Negative, network.find_edge(a, c).unwrap().get_sign());
    }
}
