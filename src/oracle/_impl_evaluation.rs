use crate::repair::RepairError;
use crate::{BooleanFunction, Clause, Network, Valuation};

/// Decide whether `clause` of `function` is satisfied under `valuation`, given the signs
/// of the edges currently present in the `network`.
///
/// Every regulator of the clause must have value `1` when it is an activator and `0` when
/// it is an inhibitor. A regulator without an edge towards the function's target is a
/// modelling error (`RepairError::MissingEdge`). A regulator without a value in the
/// valuation is reported as `RepairError::MissingValue`.
pub fn clause_satisfiable(
    network: &Network,
    function: &BooleanFunction,
    clause: &Clause,
    valuation: &Valuation,
) -> Result<bool, RepairError> {
    let target = function.get_target();
    for regulator in function.clause_regulators(clause) {
        let edge = network
            .find_edge(regulator, target)
            .ok_or_else(|| RepairError::MissingEdge {
                regulator: network.get_node_name(regulator).to_string(),
                target: network.get_node_name(target).to_string(),
            })?;
        let value = valuation
            .get(&regulator)
            .ok_or_else(|| RepairError::MissingValue {
                node: network.get_node_name(regulator).to_string(),
            })?;
        if *value != edge.get_sign().required_value() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Output of `function` under `valuation`: true if any clause is satisfied.
///
/// A function without clauses does not determine the value, in which case `default`
/// is returned.
pub fn evaluate(
    network: &Network,
    function: &BooleanFunction,
    valuation: &Valuation,
    default: bool,
) -> Result<bool, RepairError> {
    if function.is_empty() {
        return Ok(default);
    }
    for clause in function.clauses() {
        if clause_satisfiable(network, function, clause, valuation)? {
            return Ok(true);
        }
    }
    Ok(false)
}
