use crate::{BooleanFunction, Clause, Network, NodeId};
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Construction of `BooleanFunction`s.
impl BooleanFunction {
    /// Create an empty function (no regulators, no terms) of the given `target` node.
    pub fn new(target: NodeId) -> BooleanFunction {
        BooleanFunction {
            target,
            regulators: Vec::new(),
            terms: BTreeMap::new(),
            clauses: OnceCell::new(),
        }
    }

    /// Build a function from its lattice form: the `regulators` fix the clause columns,
    /// every clause becomes one term (terms are numbered from `1`).
    pub fn from_clauses(
        target: NodeId,
        regulators: Vec<NodeId>,
        clauses: Vec<Clause>,
    ) -> BooleanFunction {
        let mut function = BooleanFunction::new(target);
        function.regulators = regulators;
        for (i, clause) in clauses.iter().enumerate() {
            let term = clause
                .indices()
                .into_iter()
                .map(|r| function.regulators[r])
                .collect();
            function.terms.insert(i + 1, term);
        }
        function
    }

    /// The function `r_1 || r_2 || ... || r_k`: every regulator forms its own term.
    pub fn disjunction(target: NodeId, regulators: &[NodeId]) -> BooleanFunction {
        let mut function = BooleanFunction::new(target);
        for (i, regulator) in regulators.iter().enumerate() {
            function.add_regulator_to_term(i + 1, *regulator);
        }
        function
    }

    /// The function `r_1 && r_2 && ... && r_k`: all regulators share one term.
    pub fn conjunction(target: NodeId, regulators: &[NodeId]) -> BooleanFunction {
        let mut function = BooleanFunction::new(target);
        for regulator in regulators {
            function.add_regulator_to_term(1, *regulator);
        }
        function
    }

    /// Add `regulator` to the term `term_id`, creating the term if needed. Inserting a
    /// regulator which is already part of the term does nothing.
    pub fn add_regulator_to_term(&mut self, term_id: usize, regulator: NodeId) {
        if !self.regulators.contains(&regulator) {
            self.regulators.push(regulator);
        }
        let term = self.terms.entry(term_id).or_default();
        if !term.contains(&regulator) {
            term.push(regulator);
            self.clauses = OnceCell::new();
        }
    }
}

/// Inspection of `BooleanFunction`s.
impl BooleanFunction {
    pub fn get_target(&self) -> NodeId {
        self.target
    }

    /// Regulators of this function in the order in which they were first added.
    pub fn regulators(&self) -> &[NodeId] {
        &self.regulators
    }

    pub fn num_regulators(&self) -> usize {
        self.regulators.len()
    }

    /// The position of `regulator` in the regulator list (its clause column).
    pub fn regulator_index(&self, regulator: NodeId) -> Option<usize> {
        self.regulators.iter().position(|r| *r == regulator)
    }

    pub fn terms(&self) -> &BTreeMap<usize, Vec<NodeId>> {
        &self.terms
    }

    /// True if this function has no terms, i.e. it does not determine the node's value.
    pub fn is_empty(&self) -> bool {
        self.clauses().is_empty()
    }

    /// The lattice element of this function: minimal clauses over the regulator list,
    /// built on first access.
    pub fn clauses(&self) -> &[Clause] {
        self.clauses.get_or_init(|| {
            let dimension = self.regulators.len();
            let clauses = self
                .terms
                .values()
                .filter(|term| !term.is_empty())
                .map(|term| {
                    let indices = term
                        .iter()
                        .filter_map(|r| self.regulator_index(*r))
                        .collect();
                    Clause::from_indices(dimension, indices)
                })
                .collect();
            Clause::minimize(clauses)
        })
    }

    /// Regulators which appear in the given clause of this function.
    pub fn clause_regulators(&self, clause: &Clause) -> Vec<NodeId> {
        clause
            .indices()
            .into_iter()
            .map(|i| self.regulators[i])
            .collect()
    }

    /// Render this function using node names from the given `network`.
    pub fn to_string(&self, network: &Network) -> String {
        if self.is_empty() {
            return "Empty function".to_string();
        }
        self.clauses()
            .iter()
            .map(|clause| {
                let names: Vec<&str> = self
                    .clause_regulators(clause)
                    .into_iter()
                    .map(|r| network.get_node_name(r))
                    .collect();
                format!("({})", names.join(" && "))
            })
            .collect::<Vec<_>>()
            .join(" || ")
    }
}

impl PartialEq for BooleanFunction {
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return self.is_empty() && other.is_empty();
        }
        self.regulators == other.regulators && self.clauses() == other.clauses()
    }
}

impl Eq for BooleanFunction {}

impl Hash for BooleanFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_empty() {
            0u8.hash(state);
        } else {
            1u8.hash(state);
            self.regulators.hash(state);
            self.clauses().hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{BooleanFunction, Clause, Network, NodeId, Sign};
    use std::collections::HashSet;

    fn network() -> Network {
        let mut network = Network::new();
        for name in ["a", "b", "c"] {
            network.add_node(name).unwrap();
        }
        network
    }

    #[test]
    fn test_term_structure() {
        let a = NodeId::from_index(0);
        let b = NodeId::from_index(1);
        let c = NodeId::from_index(2);
        let mut f = BooleanFunction::new(c);
        assert!(f.is_empty());
        f.add_regulator_to_term(1, b);
        f.add_regulator_to_term(1, a);
        f.add_regulator_to_term(1, a);
        f.add_regulator_to_term(2, b);
        assert_eq!(&[b, a], f.regulators());
        assert_eq!(vec![b, a], f.terms()[&1]);
        // (b && a) || b is absorbed into b alone.
        assert_eq!(&[Clause::from_indices(2, vec![0])], f.clauses());
        f.add_regulator_to_term(2, a);
        assert_eq!(&[Clause::from_indices(2, vec![0, 1])], f.clauses());
    }

    #[test]
    fn test_function_equality() {
        let a = NodeId::from_index(0);
        let b = NodeId::from_index(1);
        let c = NodeId::from_index(2);
        assert_eq!(BooleanFunction::new(a), BooleanFunction::new(b));
        let or = BooleanFunction::disjunction(c, &[a, b]);
        let and = BooleanFunction::conjunction(c, &[a, b]);
        assert_ne!(or, and);
        assert_ne!(or, BooleanFunction::new(c));
        let rebuilt = BooleanFunction::from_clauses(c, vec![a, b], or.clauses().to_vec());
        assert_eq!(or, rebuilt);
        let set: HashSet<BooleanFunction> = vec![
            or.clone(),
            rebuilt,
            BooleanFunction::new(a),
            BooleanFunction::new(b),
        ]
        .into_iter()
        .collect();
        assert_eq!(2, set.len());
    }

    #[test]
    fn test_function_to_string() {
        let mut network = network();
        let a = network.find_node("a").unwrap();
        let b = network.find_node("b").unwrap();
        let c = network.find_node("c").unwrap();
        network.add_edge(a, c, Sign::Positive).unwrap();
        network.add_edge(b, c, Sign::Negative).unwrap();
        let mut f = BooleanFunction::new(c);
        assert_eq!("Empty function", f.to_string(&network));
        f.add_regulator_to_term(1, a);
        f.add_regulator_to_term(1, b);
        f.add_regulator_to_term(2, c);
        assert_eq!("(a && b) || (c)", f.to_string(&network));
    }
}
