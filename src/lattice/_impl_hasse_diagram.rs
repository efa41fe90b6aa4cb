use crate::bitvector::BitVector;
use crate::lattice::{FunctionLattice, HasseDiagram};
use crate::{BooleanFunction, Clause};
use fxhash::FxHashSet;
use std::collections::VecDeque;

impl HasseDiagram {
    pub fn new() -> HasseDiagram {
        HasseDiagram
    }

    /// True if the function given by `clauses` accepts no more inputs than the function
    /// given by `other`, i.e. every clause of `clauses` contains some clause of `other`.
    pub fn is_below(clauses: &[Clause], other: &[Clause]) -> bool {
        clauses
            .iter()
            .all(|clause| other.iter().any(|o| o.is_subset(clause)))
    }

    /// True if the function is not constant and every one of the `dimension` regulators
    /// appears in some clause.
    fn is_restricted(dimension: usize, clauses: &[Clause]) -> bool {
        !clauses.is_empty()
            && clauses.iter().all(|c| c.size() > 0)
            && (0..dimension).all(|i| clauses.iter().any(|c| c.contains(i)))
    }

    /// Minimal sets of regulators which intersect every clause (Berge's algorithm).
    fn minimal_transversals(dimension: usize, clauses: &[Clause]) -> Vec<Clause> {
        let mut transversals = vec![Clause::from_indices(dimension, Vec::new())];
        for clause in clauses {
            let mut extended = Vec::new();
            for transversal in transversals {
                if !transversal.signature().is_disjoint(clause.signature()) {
                    extended.push(transversal);
                } else {
                    for i in clause.indices() {
                        extended.push(transversal.with(i));
                    }
                }
            }
            transversals = Clause::minimize(extended);
        }
        transversals
    }

    /// Covers of the function in the diagram of all monotone functions (constants excluded).
    ///
    /// A parent adds one maximal rejected input `x` (the complement of a minimal transversal)
    /// to the accepted inputs, which absorbs all clauses containing `x`.
    fn all_parents(dimension: usize, clauses: &[Clause]) -> Vec<Vec<Clause>> {
        let mut result = Vec::new();
        for transversal in Self::minimal_transversals(dimension, clauses) {
            let x = Clause::from_signature(transversal.signature().complement());
            if x.size() == 0 {
                continue;
            }
            let mut parent: Vec<Clause> = clauses
                .iter()
                .filter(|c| !x.is_subset(c))
                .cloned()
                .collect();
            parent.push(x);
            result.push(Clause::minimize(parent));
        }
        result
    }

    /// A child removes one clause `c`; its one-regulator extensions which are not covered
    /// by another clause become new clauses.
    fn all_children(clauses: &[Clause]) -> Vec<Vec<Clause>> {
        let mut result = Vec::new();
        for (k, clause) in clauses.iter().enumerate() {
            let mut child: Vec<Clause> = clauses
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != k)
                .map(|(_, c)| c.clone())
                .collect();
            let extensions: Vec<Clause> = clause
                .signature()
                .zeros()
                .into_iter()
                .map(|i| clause.with(i))
                .filter(|extension| !child.iter().any(|o| o.is_subset(extension)))
                .collect();
            child.extend(extensions);
            if !child.is_empty() {
                result.push(Clause::minimize(child));
            }
        }
        result
    }

    /// Closest restricted functions above (`up`) or below the given function.
    fn restricted_covers(dimension: usize, clauses: &[Clause], up: bool) -> Vec<Vec<Clause>> {
        let mut visited: FxHashSet<Vec<Clause>> = FxHashSet::default();
        let mut queue: VecDeque<Vec<Clause>> = VecDeque::new();
        let mut found: Vec<Vec<Clause>> = Vec::new();
        visited.insert(clauses.to_vec());
        queue.push_back(clauses.to_vec());
        while let Some(state) = queue.pop_front() {
            let successors = if up {
                Self::all_parents(dimension, &state)
            } else {
                Self::all_children(&state)
            };
            for successor in successors {
                if !visited.insert(successor.clone()) {
                    continue;
                }
                if Self::is_restricted(dimension, &successor) {
                    found.push(successor);
                } else {
                    queue.push_back(successor);
                }
            }
        }
        // Only the closest ones are covers.
        let covers: Vec<Vec<Clause>> = found
            .iter()
            .filter(|g| {
                !found.iter().any(|h| {
                    h != *g
                        && if up {
                            Self::is_below(h, g)
                        } else {
                            Self::is_below(g, h)
                        }
                })
            })
            .cloned()
            .collect();
        covers
    }

    fn covers(function: &BooleanFunction, up: bool) -> Vec<BooleanFunction> {
        let dimension = function.num_regulators();
        Self::restricted_covers(dimension, function.clauses(), up)
            .into_iter()
            .map(|clauses| {
                BooleanFunction::from_clauses(
                    function.get_target(),
                    function.regulators().to_vec(),
                    clauses,
                )
            })
            .collect()
    }
}

impl FunctionLattice for HasseDiagram {
    /// `level[i]` is the number of clauses with `i + 1` regulators.
    fn level(&self, function: &BooleanFunction) -> Vec<usize> {
        let mut level = vec![0; function.num_regulators()];
        for clause in function.clauses() {
            if clause.size() > 0 {
                level[clause.size() - 1] += 1;
            }
        }
        level
    }

    /// The level of the threshold function which accepts every input with at least
    /// `(dimension + 1) / 2` active regulators.
    fn middle_level(&self, dimension: usize) -> Vec<usize> {
        let mut level = vec![0; dimension];
        if dimension > 0 {
            let threshold = (dimension + 1) / 2;
            // Exact up to well over a hundred regulators, saturated beyond that.
            let mut binomial = 1u128;
            for i in 0..threshold {
                binomial = binomial.saturating_mul((dimension - i) as u128) / (i + 1) as u128;
            }
            level[threshold - 1] = usize::try_from(binomial).unwrap_or(usize::MAX);
        }
        level
    }

    fn parents(&self, function: &BooleanFunction) -> Vec<BooleanFunction> {
        Self::covers(function, true)
    }

    fn children(&self, function: &BooleanFunction) -> Vec<BooleanFunction> {
        Self::covers(function, false)
    }
}
