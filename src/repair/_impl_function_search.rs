use crate::lattice::FunctionLattice;
use crate::oracle::{classify_function, is_function_consistent, is_in_bottom_half, Inconsistency};
use crate::repair::_impl_topology_search::EditContext;
use crate::repair::{InconsistencySolution, RepairError, RepairSearch};
use crate::{BooleanFunction, Network, NodeId};
use fxhash::FxHashSet;
use std::cmp::Ordering;
use std::collections::VecDeque;

/// **(internal)** A function waiting in the search queue.
struct SearchNode {
    function: BooleanFunction,
    distance: usize,
    /// The function was reached from a consistent function.
    known_consistent: bool,
}

impl SearchNode {
    fn new(function: BooleanFunction, distance: usize, known_consistent: bool) -> SearchNode {
        SearchNode {
            function,
            distance,
            known_consistent,
        }
    }
}

/// **(internal)** The consistent functions of the non-comparable search, bucketed by their
/// level relative to the original function.
#[derive(Default)]
struct LevelBuckets {
    equal: Vec<BooleanFunction>,
    below: Vec<BooleanFunction>,
    above: Vec<BooleanFunction>,
}

impl<L: FunctionLattice + ?Sized> RepairSearch<'_, L> {
    /// Replace the function of `node` by the closest consistent function which is strictly
    /// more general (`generalize`) or strictly more specific than the current one.
    ///
    /// The lattice is explored breadth-first, so the first consistent function has the
    /// minimal distance. With `show_all_functions`, all consistent functions at that
    /// distance are reported. Functions with fewer than two regulators have no comparable
    /// replacements.
    pub(super) fn search_comparable(
        &self,
        network: &Network,
        solution: &mut InconsistencySolution,
        node: NodeId,
        context: &EditContext,
        generalize: bool,
    ) -> Result<bool, RepairError> {
        let original = network.get_function(node);
        if original.num_regulators() < 2 {
            return Ok(false);
        }
        if self.log_verbose() {
            println!(
                "Searching for a {} function of {}: {}",
                if generalize { "more general" } else { "more specific" },
                network.get_node_name(node),
                original.to_string(network)
            );
        }

        let mut seen: FxHashSet<BooleanFunction> = FxHashSet::default();
        seen.insert(original.clone());
        let mut queue: VecDeque<SearchNode> = VecDeque::new();
        for function in self.lattice.replacements(original, generalize) {
            if seen.insert(function.clone()) {
                queue.push_back(SearchNode::new(function, 1, false));
            }
        }

        let mut best_distance: Option<usize> = None;
        let mut visited = 0;
        while let Some(candidate) = queue.pop_front() {
            if best_distance.map_or(false, |best| candidate.distance > best) {
                break;
            }
            visited += 1;
            if is_function_consistent(network, solution.labeling(), &candidate.function)? {
                if self.log_verbose() {
                    println!(
                        "Found consistent function at distance {}: {}",
                        candidate.distance,
                        candidate.function.to_string(network)
                    );
                }
                best_distance = Some(candidate.distance);
                solution.add_repair_set(node, context.repair_set(Some(candidate.function)));
                if !self.config.show_all_functions {
                    break;
                }
                continue;
            }
            if best_distance.is_some() {
                continue;
            }
            for function in self.lattice.replacements(&candidate.function, generalize) {
                if seen.insert(function.clone()) {
                    queue.push_back(SearchNode::new(function, candidate.distance + 1, false));
                }
            }
        }

        if self.log_verbose() {
            println!("Visited {} functions.", visited);
        }
        if best_distance.is_none() && self.config.force_optimum {
            return self.search_non_comparable(network, solution, node, context);
        }
        Ok(best_distance.is_some())
    }

    /// Replace the function of a double inconsistent `node` by a function which is not
    /// comparable with the current one.
    ///
    /// The search starts from the bottom (conjunction) or the top (disjunction) of the
    /// lattice over the same regulators and moves towards the other end. The direction
    /// follows the half of the lattice the original function lies in, so that the search
    /// starts on the same side. With `compare_level_function`, only the consistent
    /// functions closest in level to the original are reported (those on the same level
    /// if there are any). Otherwise every consistent function found is reported.
    pub(super) fn search_non_comparable(
        &self,
        network: &Network,
        solution: &mut InconsistencySolution,
        node: NodeId,
        context: &EditContext,
    ) -> Result<bool, RepairError> {
        let original = network.get_function(node);
        if original.num_regulators() < 2 {
            return Ok(false);
        }
        let level_compare = self.config.compare_level_function;
        let generalize = if level_compare {
            is_in_bottom_half(
                network,
                original,
                self.lattice,
                self.config.exact_middle_function_determination,
            )?
        } else {
            true
        };
        let start = if generalize {
            BooleanFunction::conjunction(node, original.regulators())
        } else {
            BooleanFunction::disjunction(node, original.regulators())
        };
        if self.log_verbose() {
            println!(
                "Searching for a non-comparable function of {} starting from {}.",
                network.get_node_name(node),
                start.to_string(network)
            );
        }

        let lattice = self.lattice;
        let mut seen: FxHashSet<BooleanFunction> = FxHashSet::default();
        seen.insert(start.clone());
        let mut queue = VecDeque::from([SearchNode::new(start, 0, false)]);
        let mut consistent: Vec<BooleanFunction> = Vec::new();
        let mut levels = LevelBuckets::default();
        let mut visited = 0;

        while let Some(candidate) = queue.pop_front() {
            visited += 1;
            let inconsistency = classify_function(network, solution.labeling(), &candidate.function)?;
            let is_consistent = inconsistency.is_consistent();
            if is_consistent {
                consistent.push(candidate.function.clone());
                if level_compare {
                    let cmp = lattice.compare_level(original, &candidate.function);
                    if cmp == Ordering::Equal {
                        levels.equal.push(candidate.function);
                        continue;
                    }
                    if !levels.equal.is_empty() {
                        if (generalize && cmp == Ordering::Less)
                            || (!generalize && cmp == Ordering::Greater)
                        {
                            continue;
                        }
                    } else if cmp == Ordering::Greater {
                        // Keep the highest consistent functions below the original.
                        Self::keep_closest(lattice, &mut levels.below, &candidate.function, Ordering::Less);
                        if !generalize {
                            continue;
                        }
                    } else {
                        // Keep the lowest consistent functions above the original.
                        Self::keep_closest(lattice, &mut levels.above, &candidate.function, Ordering::Greater);
                        if generalize {
                            continue;
                        }
                    }
                }
            } else {
                if candidate.known_consistent {
                    continue;
                }
                let wrong_direction = match inconsistency {
                    Inconsistency::DoubleInconsistent => true,
                    Inconsistency::NeedParticularization => generalize,
                    Inconsistency::NeedGeneralization => !generalize,
                    Inconsistency::Consistent => false,
                };
                if wrong_direction {
                    continue;
                }
                if level_compare && self.is_beyond_best(original, &candidate.function, &levels, generalize) {
                    continue;
                }
            }

            for function in lattice.replacements(&candidate.function, generalize) {
                if seen.insert(function.clone()) {
                    queue.push_back(SearchNode::new(function, candidate.distance + 1, is_consistent));
                }
            }
        }

        if self.log_verbose() {
            println!(
                "Visited {} functions, {} of them consistent.",
                visited,
                consistent.len()
            );
        }
        if consistent.is_empty() {
            return Ok(false);
        }
        let selected = if !level_compare {
            consistent
        } else if !levels.equal.is_empty() {
            levels.equal
        } else {
            let mut closest = levels.below;
            closest.append(&mut levels.above);
            closest
        };
        for function in selected {
            solution.add_repair_set(node, context.repair_set(Some(function)));
        }
        Ok(true)
    }

    /// **(internal)** Add `function` to `bucket` if it is as close, or replace the bucket if it
    /// is closer. The function is closer when `compare_level(bucket, function)` equals `closer`.
    fn keep_closest(
        lattice: &L,
        bucket: &mut Vec<BooleanFunction>,
        function: &BooleanFunction,
        closer: Ordering,
    ) {
        let Some(current) = bucket.first() else {
            bucket.push(function.clone());
            return;
        };
        let cmp = lattice.compare_level(current, function);
        if cmp == Ordering::Equal {
            bucket.push(function.clone());
        } else if cmp == closer {
            bucket.clear();
            bucket.push(function.clone());
        }
    }

    /// **(internal)** True if the inconsistent `candidate` already lies past the best
    /// consistent functions in the search direction, so its successors cannot be closer.
    fn is_beyond_best(
        &self,
        original: &BooleanFunction,
        candidate: &BooleanFunction,
        levels: &LevelBuckets,
        generalize: bool,
    ) -> bool {
        let lattice = self.lattice;
        if !levels.equal.is_empty() {
            let cmp = lattice.compare_level(candidate, original);
            if (generalize && cmp == Ordering::Greater) || (!generalize && cmp == Ordering::Less) {
                return true;
            }
        }
        if generalize {
            if let Some(above) = levels.above.first() {
                return lattice.compare_level(above, candidate) == Ordering::Less;
            }
        } else if let Some(below) = levels.below.first() {
            return lattice.compare_level(below, candidate) == Ordering::Greater;
        }
        false
    }
}
