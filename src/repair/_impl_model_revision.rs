use crate::lattice::FunctionLattice;
use crate::repair::{
    ConsistencyChecker, Optimization, RepairConfig, RepairError, RepairSearch, Revision,
};
use crate::{should_log, Network};
use std::cmp::Ordering;

/// Check the consistency of `network` and, if it is inconsistent, compute its minimal repairs.
///
/// Every candidate world proposed by the `checker` is repaired node by node (see
/// `RepairSearch::repair_inconsistencies`). Worlds with a node that cannot be repaired are
/// discarded, and the cheapest of the remaining worlds are returned. Unless `all_opt` is set,
/// the search stops at the first world which needs no edge operations at all.
///
/// The `network` is left unchanged.
pub fn model_revision<C, L>(
    network: &mut Network,
    checker: &C,
    lattice: &L,
    config: &RepairConfig,
) -> Result<Revision, RepairError>
where
    C: ConsistencyChecker + ?Sized,
    L: FunctionLattice + ?Sized,
{
    let check = checker.check_consistency(network)?;
    match check.optimization {
        Optimization::Consistent => {
            if should_log(config.log_level) {
                println!("The network is consistent.");
            }
            return Ok(Revision::Consistent);
        }
        Optimization::Unsatisfiable => return Err(RepairError::Unsatisfiable),
        Optimization::NotAttempted => {
            return Err(RepairError::SolverFailure(
                "The consistency check was not performed.".to_string(),
            ))
        }
        Optimization::Inconsistent(_) => {}
    }

    let mut solutions = check.solutions;
    if should_log(config.log_level) {
        println!("Found {} inconsistent world(s).", solutions.len());
    }

    let search = RepairSearch::new(lattice, config);
    let mut best: Option<usize> = None;
    let mut processed = 0;
    for i in 0..solutions.len() {
        processed = i + 1;
        search.repair_inconsistencies(network, &mut solutions[i])?;
        let solution = &solutions[i];
        if solution.has_impossibility() {
            continue;
        }
        if should_log(config.log_level) {
            println!("Repaired world {} with cost {:?}.", i, solution.cost());
        }
        let improves = match best {
            None => true,
            Some(b) => solution.compare_repairs(&solutions[b]) == Ordering::Less,
        };
        if improves {
            best = Some(i);
            if solution.cost().topology_changes == 0 && !config.all_opt {
                break;
            }
        }
    }

    let Some(best) = best else {
        if should_log(config.log_level) {
            println!("None of the {} world(s) can be repaired.", processed);
        }
        return Ok(Revision::Unrepairable);
    };
    let best_cost = solutions[best].cost();
    solutions.truncate(processed);

    let mut optimal = Vec::new();
    let mut sub_optimal = Vec::new();
    for (i, solution) in solutions.into_iter().enumerate() {
        if solution.has_impossibility() {
            continue;
        }
        if i == best || (config.all_opt && solution.cost() == best_cost) {
            optimal.push(solution);
        } else if config.show_sub_optimal && solution.cost() > best_cost {
            sub_optimal.push(solution);
        }
    }
    Ok(Revision::Repaired {
        optimal,
        sub_optimal,
    })
}
