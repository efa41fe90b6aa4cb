use crate::lattice::FunctionLattice;
use crate::repair::RepairError;
use crate::{BooleanFunction, Network};
use biodivine_lib_bdd::{Bdd, BddPartialValuation, BddVariableSet};
use std::cmp::Ordering;

/// True if `function` lies in the lower half of its Hasse diagram, i.e. closer to the
/// conjunction of its regulators than to their disjunction.
///
/// With `exact` set, the function (under the current edge signs) is compiled into a BDD and
/// it is in the lower half when it has strictly more rejected than accepted inputs.
/// Otherwise the level of the function is compared with the middle level of the lattice.
pub fn is_in_bottom_half<L: FunctionLattice + ?Sized>(
    network: &Network,
    function: &BooleanFunction,
    lattice: &L,
    exact: bool,
) -> Result<bool, RepairError> {
    let dimension = function.num_regulators();
    match u16::try_from(dimension) {
        Ok(num_vars) if exact => {
            let vars = BddVariableSet::new_anonymous(num_vars);
            let bdd = function_to_bdd(network, function, &vars)?;
            Ok(bdd.not().exact_cardinality() > bdd.exact_cardinality())
        }
        _ => {
            let middle = lattice.middle_level(dimension);
            Ok(lattice.compare_to_levels(function, &middle) == Ordering::Less)
        }
    }
}

/// **(internal)** Build the BDD of `function` where the `i`-th BDD variable is the `i`-th
/// regulator of the function. Inhibitors contribute negative literals.
fn function_to_bdd(
    network: &Network,
    function: &BooleanFunction,
    vars: &BddVariableSet,
) -> Result<Bdd, RepairError> {
    let bdd_vars = vars.variables();
    let target = function.get_target();
    let mut result = vars.mk_false();
    for clause in function.clauses() {
        let mut literals = BddPartialValuation::empty();
        for i in clause.indices() {
            let regulator = function.regulators()[i];
            let edge = network
                .find_edge(regulator, target)
                .ok_or_else(|| RepairError::MissingEdge {
                    regulator: network.get_node_name(regulator).to_string(),
                    target: network.get_node_name(target).to_string(),
                })?;
            literals[bdd_vars[i]] = Some(edge.get_sign().required_value());
        }
        result = result.or(&vars.mk_conjunctive_clause(&literals));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::lattice::HasseDiagram;
    use crate::oracle::is_in_bottom_half;
    use crate::{BooleanFunction, Network, NodeId, Sign};

    fn network() -> (Network, Vec<NodeId>, NodeId) {
        let mut network = Network::new();
        let regulators: Vec<NodeId> = ["a", "b", "c"]
            .iter()
            .map(|name| network.add_node(name).unwrap())
            .collect();
        let target = network.add_node("t").unwrap();
        for r in &regulators {
            network.add_edge(*r, target, Sign::Positive).unwrap();
        }
        (network, regulators, target)
    }

    #[test]
    fn test_exact_half_determination() {
        let (network, regulators, target) = network();
        let and = BooleanFunction::conjunction(target, &regulators);
        let or = BooleanFunction::disjunction(target, &regulators);
        assert!(is_in_bottom_half(&network, &and, &HasseDiagram, true).unwrap());
        assert!(!is_in_bottom_half(&network, &or, &HasseDiagram, true).unwrap());
        // The majority function accepts exactly half of the inputs.
        let mut majority = BooleanFunction::new(target);
        for (term, (x, y)) in [(0, 1), (0, 2), (1, 2)].iter().enumerate() {
            majority.add_regulator_to_term(term + 1, regulators[*x]);
            majority.add_regulator_to_term(term + 1, regulators[*y]);
        }
        assert!(!is_in_bottom_half(&network, &majority, &HasseDiagram, true).unwrap());
    }

    #[test]
    fn test_approximate_half_determination() {
        let (network, regulators, target) = network();
        let and = BooleanFunction::conjunction(target, &regulators);
        let or = BooleanFunction::disjunction(target, &regulators);
        assert!(is_in_bottom_half(&network, &and, &HasseDiagram, false).unwrap());
        assert!(!is_in_bottom_half(&network, &or, &HasseDiagram, false).unwrap());
    }

    #[test]
    fn test_half_determination_uses_signs() {
        let (mut network, regulators, target) = network();
        // With inhibitors, (!a && !b && !c) still accepts a single input.
        for r in &regulators {
            network.flip_edge(*r, target).unwrap();
        }
        let and = BooleanFunction::conjunction(target, &regulators);
        assert!(is_in_bottom_half(&network, &and, &HasseDiagram, true).unwrap());
        network.remove_edge(regulators[0], target).unwrap();
        assert!(is_in_bottom_half(&network, &and, &HasseDiagram, true).is_err());
    }
}
