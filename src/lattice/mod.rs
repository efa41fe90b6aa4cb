//! The partial order of monotone Boolean functions of a fixed set of regulators.
//!
//! A function `h` is below `g` when every input accepted by `h` is also accepted by `g`.
//! Moving to an immediate parent generalizes a function, moving to an immediate child
//! particularizes it. The repair search only relies on the `FunctionLattice` trait, so an
//! external implementation of the diagram can be plugged in. `HasseDiagram` is the default
//! implementation which computes the covers on demand.
//!
//! Besides the cover relation, every function has a *level*, a vector summarizing its
//! position in the diagram. Levels are compared lexicographically and are used to rank
//! non-comparable candidate functions by their distance from the original function.

use crate::BooleanFunction;
use std::cmp::Ordering;

/// **(internal)** Cover relation and levels of `HasseDiagram`.
mod _impl_hasse_diagram;

/// Capabilities of a Hasse diagram of monotone Boolean functions.
pub trait FunctionLattice {
    /// The level vector of `function`.
    fn level(&self, function: &BooleanFunction) -> Vec<usize>;

    /// The level vector of the function in the middle of the diagram of the given dimension.
    fn middle_level(&self, dimension: usize) -> Vec<usize>;

    /// Immediate generalizations of `function` with the same regulators.
    fn parents(&self, function: &BooleanFunction) -> Vec<BooleanFunction>;

    /// Immediate particularizations of `function` with the same regulators.
    fn children(&self, function: &BooleanFunction) -> Vec<BooleanFunction>;

    /// Compare the level of `function` with the given level vector.
    fn compare_to_levels(&self, function: &BooleanFunction, levels: &[usize]) -> Ordering {
        self.level(function).as_slice().cmp(levels)
    }

    /// Compare the levels of two functions. `Less` means that `a` lies lower than `b`.
    fn compare_level(&self, a: &BooleanFunction, b: &BooleanFunction) -> Ordering {
        self.compare_to_levels(a, &self.level(b))
    }

    /// Immediate neighbours in the direction of the search.
    fn replacements(&self, function: &BooleanFunction, generalize: bool) -> Vec<BooleanFunction> {
        if generalize {
            self.parents(function)
        } else {
            self.children(function)
        }
    }
}

/// The Hasse diagram of monotone functions in which every regulator is essential (each
/// regulator appears in some clause) and which are not constant.
///
/// Covers are computed by walking through the full diagram of monotone functions, skipping
/// functions outside of the restricted space, until the closest restricted functions are
/// reached.
#[derive(Clone, Copy, Debug, Default)]
pub struct HasseDiagram;
