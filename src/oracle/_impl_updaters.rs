use crate::oracle::{
    evaluate, AsynchronousUpdater, CompleteUpdater, Inconsistency, Labeling, SteadyStateUpdater,
    SynchronousUpdater, Updater,
};
use crate::repair::RepairError;
use crate::{BooleanFunction, Network, NodeId};

impl Updater for SteadyStateUpdater {
    fn classify(
        &self,
        network: &Network,
        labeling: &Labeling,
        function: &BooleanFunction,
        profile: &str,
    ) -> Result<Inconsistency, RepairError> {
        let target = function.get_target();
        let mut result = Inconsistency::Consistent;
        for time in labeling.time_points(profile) {
            let in_context = |e: RepairError| e.at(profile, time);
            let valuation = labeling
                .valuation(profile, time)
                .ok_or_else(|| missing(network, profile, time, target))?;
            let observed = observed_value(network, labeling, profile, time, target)?;
            // Without clauses, the node is expected to be inactive.
            let predicted = evaluate(network, function, valuation, false).map_err(in_context)?;
            result = result.merge(Inconsistency::of_mismatch(predicted, observed));
            if result == Inconsistency::DoubleInconsistent {
                break;
            }
        }
        Ok(result)
    }
}

impl Updater for SynchronousUpdater {
    fn classify(
        &self,
        network: &Network,
        labeling: &Labeling,
        function: &BooleanFunction,
        profile: &str,
    ) -> Result<Inconsistency, RepairError> {
        classify_time_series(network, labeling, function, profile, |_| true)
    }
}

impl Updater for AsynchronousUpdater {
    fn classify(
        &self,
        network: &Network,
        labeling: &Labeling,
        function: &BooleanFunction,
        profile: &str,
    ) -> Result<Inconsistency, RepairError> {
        let target = function.get_target();
        classify_time_series(network, labeling, function, profile, |time| {
            labeling.is_scheduled(time, profile, target)
        })
    }
}

impl Updater for CompleteUpdater {
    fn classify(
        &self,
        network: &Network,
        labeling: &Labeling,
        function: &BooleanFunction,
        profile: &str,
    ) -> Result<Inconsistency, RepairError> {
        let target = function.get_target();
        classify_time_series(network, labeling, function, profile, |time| {
            labeling.is_scheduled(time, profile, target)
        })
    }
}

/// **(internal)** Check every consecutive pair of time points `(t, t + 1)` of `profile`
/// for which `gate(t)` holds: the function evaluated at `t` must predict the value observed
/// at `t + 1`. An empty function keeps the value observed at `t`.
fn classify_time_series<G>(
    network: &Network,
    labeling: &Labeling,
    function: &BooleanFunction,
    profile: &str,
    gate: G,
) -> Result<Inconsistency, RepairError>
where
    G: Fn(usize) -> bool,
{
    let target = function.get_target();
    let mut result = Inconsistency::Consistent;
    for time in labeling.time_points(profile) {
        let Some(next) = labeling.valuation(profile, time + 1) else {
            continue;
        };
        if !gate(time) {
            continue;
        }
        let in_context = |e: RepairError| e.at(profile, time);
        let valuation = labeling
            .valuation(profile, time)
            .ok_or_else(|| missing(network, profile, time, target))?;
        let current = observed_value(network, labeling, profile, time, target)?;
        let observed = next
            .get(&target)
            .cloned()
            .ok_or_else(|| missing(network, profile, time + 1, target))?;
        let predicted = evaluate(network, function, valuation, current).map_err(in_context)?;
        result = result.merge(Inconsistency::of_mismatch(predicted, observed));
        if result == Inconsistency::DoubleInconsistent {
            break;
        }
    }
    Ok(result)
}

/// **(internal)** The observed value of `node`, or an error with full context.
fn observed_value(
    network: &Network,
    labeling: &Labeling,
    profile: &str,
    time: usize,
    node: NodeId,
) -> Result<bool, RepairError> {
    labeling
        .value(profile, time, node)
        .ok_or_else(|| missing(network, profile, time, node))
}

fn missing(network: &Network, profile: &str, time: usize, node: NodeId) -> RepairError {
    RepairError::MissingObservation {
        profile: profile.to_string(),
        time,
        node: network.get_node_name(node).to_string(),
    }
}

/// Classify `function` against every profile of the `labeling`, each interpreted by
/// its own semantics.
///
/// The result is consistent only if all profiles are. Mismatches in opposite directions
/// (possibly in different profiles) make the function double inconsistent, at which
/// point the evaluation stops.
pub fn classify_function(
    network: &Network,
    labeling: &Labeling,
    function: &BooleanFunction,
) -> Result<Inconsistency, RepairError> {
    let mut result = Inconsistency::Consistent;
    for profile in labeling.profiles() {
        let updater = labeling.resolve_semantics(network, profile)?.updater();
        result = result.merge(updater.classify(network, labeling, function, profile)?);
        if result == Inconsistency::DoubleInconsistent {
            break;
        }
    }
    Ok(result)
}

/// True if `function` reproduces every profile of the `labeling`.
pub fn is_function_consistent(
    network: &Network,
    labeling: &Labeling,
    function: &BooleanFunction,
) -> Result<bool, RepairError> {
    for profile in labeling.profiles() {
        let updater = labeling.resolve_semantics(network, profile)?.updater();
        if !updater.is_consistent(network, labeling, function, profile)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use crate::oracle::Inconsistency::*;
    use crate::oracle::{
        classify_function, is_function_consistent, Labeling, SteadyStateUpdater, Updater,
    };
    use crate::repair::RepairError;
    use crate::{BooleanFunction, Network, NodeId, Sign, UpdateType};

    /// Nodes `a`, `b` with `a -> b` (activation) and `f(b) = a`.
    fn activation() -> (Network, NodeId, NodeId) {
        let mut network = Network::new();
        let a = network.add_node("a").unwrap();
        let b = network.add_node("b").unwrap();
        network.add_edge(a, b, Sign::Positive).unwrap();
        network.add_regulator_to_term(b, 1, a).unwrap();
        (network, a, b)
    }

    fn steady_state(values: &[(NodeId, bool)]) -> Labeling {
        let mut labeling = Labeling::new();
        for (node, value) in values {
            labeling.add_value("p", 0, *node, *value);
        }
        labeling
    }

    #[test]
    fn test_steady_state_empty_function() {
        let (network, a, b) = activation();
        let empty = BooleanFunction::new(b);
        let off = steady_state(&[(a, true), (b, false)]);
        let on = steady_state(&[(a, true), (b, true)]);
        assert!(SteadyStateUpdater
            .is_consistent(&network, &off, &empty, "p")
            .unwrap());
        assert_eq!(
            NeedGeneralization,
            SteadyStateUpdater
                .classify(&network, &on, &empty, "p")
                .unwrap()
        );
    }

    #[test]
    fn test_steady_state_single_clause() {
        let (network, a, b) = activation();
        let f = network.get_function(b).clone();
        let on = steady_state(&[(a, true), (b, true)]);
        let off = steady_state(&[(a, true), (b, false)]);
        assert!(is_function_consistent(&network, &on, &f).unwrap());
        assert!(!is_function_consistent(&network, &off, &f).unwrap());
        assert_eq!(
            NeedParticularization,
            classify_function(&network, &off, &f).unwrap()
        );
    }

    #[test]
    fn test_flipped_edge_is_consistent() {
        let (mut network, a, b) = activation();
        let off = steady_state(&[(a, true), (b, false)]);
        network.flip_edge(a, b).unwrap();
        let f = network.get_function(b).clone();
        assert_eq!(Consistent, classify_function(&network, &off, &f).unwrap());
    }

    #[test]
    fn test_double_inconsistency_across_profiles() {
        let mut network = Network::new();
        let a = network.add_node("a").unwrap();
        let b = network.add_node("b").unwrap();
        let c = network.add_node("c").unwrap();
        network.add_edge(a, b, Sign::Positive).unwrap();
        network.add_edge(c, b, Sign::Positive).unwrap();
        let f = BooleanFunction::conjunction(b, &[a, c]);
        let mut labeling = Labeling::new();
        for (profile, va, vc, vb) in [("p1", true, false, true), ("p2", true, true, false)] {
            labeling.add_value(profile, 0, a, va);
            labeling.add_value(profile, 0, c, vc);
            labeling.add_value(profile, 0, b, vb);
        }
        assert_eq!(
            DoubleInconsistent,
            classify_function(&network, &labeling, &f).unwrap()
        );
    }

    /// `a` stays on, `b` switches on between the second and the third time point.
    fn series() -> Labeling {
        let mut labeling = Labeling::new();
        let a = NodeId::from_index(0);
        let b = NodeId::from_index(1);
        for (time, vb) in [(0, false), (1, false), (2, true)] {
            labeling.add_value("p", time, a, true);
            labeling.add_value("p", time, b, vb);
        }
        labeling.add_update(0, "p", a);
        labeling.add_update(1, "p", b);
        labeling
    }

    #[test]
    fn test_time_series_gating() {
        let (mut network, _, b) = activation();
        let f = network.get_function(b).clone();
        let labeling = series();

        // Synchronously, `b` should have switched on already at time 1.
        network
            .add_observation("sync", UpdateType::Synchronous)
            .unwrap();
        assert_eq!(
            NeedParticularization,
            classify_function(&network, &labeling, &f).unwrap()
        );

        // Asynchronously, `b` is only updated between 1 and 2, which is consistent.
        let mut labeling = labeling;
        labeling.set_semantics("p", UpdateType::Asynchronous);
        assert_eq!(Consistent, classify_function(&network, &labeling, &f).unwrap());
        labeling.set_semantics("p", UpdateType::Complete);
        assert!(is_function_consistent(&network, &labeling, &f).unwrap());
    }

    #[test]
    fn test_time_series_carries_value_of_empty_function() {
        let (network, _, b) = activation();
        let empty = BooleanFunction::new(b);
        let mut labeling = series();
        labeling.set_semantics("p", UpdateType::Synchronous);
        // The value of `b` changes at time 2, which an empty function cannot explain.
        assert_eq!(
            NeedGeneralization,
            classify_function(&network, &labeling, &empty).unwrap()
        );
        // Without any scheduled update, nothing constrains `b`.
        let mut unscheduled = Labeling::new();
        for time in labeling.time_points("p") {
            for node in network.nodes() {
                let value = labeling.value("p", time, node).unwrap();
                unscheduled.add_value("p", time, node, value);
            }
        }
        unscheduled.set_semantics("p", UpdateType::Asynchronous);
        assert_eq!(
            Consistent,
            classify_function(&network, &unscheduled, &empty).unwrap()
        );
    }

    #[test]
    fn test_single_time_point_of_time_series() {
        let (mut network, a, b) = activation();
        network
            .add_observation("series", UpdateType::Synchronous)
            .unwrap();
        let labeling = steady_state(&[(a, true), (b, false)]);
        let f = network.get_function(b).clone();
        // A single time point has no transition to contradict.
        assert_eq!(Consistent, classify_function(&network, &labeling, &f).unwrap());
        network
            .add_observation("fixed", UpdateType::SteadyState)
            .unwrap();
        assert_eq!(
            NeedParticularization,
            classify_function(&network, &labeling, &f).unwrap()
        );
    }

    #[test]
    fn test_missing_observation_has_context() {
        let (network, a, b) = activation();
        let f = network.get_function(b).clone();
        let labeling = steady_state(&[(b, true)]);
        assert_eq!(
            Err(RepairError::MissingObservation {
                profile: "p".to_string(),
                time: 0,
                node: "a".to_string()
            }),
            classify_function(&network, &labeling, &f)
        );
        let labeling = steady_state(&[(a, true)]);
        assert_eq!(
            Err(RepairError::MissingObservation {
                profile: "p".to_string(),
                time: 0,
                node: "b".to_string()
            }),
            classify_function(&network, &labeling, &f)
        );
    }
}
