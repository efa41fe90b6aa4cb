use crate::oracle::Labeling;
use crate::repair::RepairError;
use crate::{Network, NodeId, UpdateType, Valuation};

impl Labeling {
    pub fn new() -> Labeling {
        Labeling::default()
    }

    /// Record that `node` has `value` at `time` in `profile`.
    pub fn add_value(&mut self, profile: &str, time: usize, node: NodeId, value: bool) {
        self.values
            .entry(profile.to_string())
            .or_default()
            .entry(time)
            .or_default()
            .insert(node, value);
    }

    /// Schedule `node` for an update at `time` in `profile`. Repeated calls have no effect.
    pub fn add_update(&mut self, time: usize, profile: &str, node: NodeId) {
        let scheduled = self
            .updates
            .entry(time)
            .or_default()
            .entry(profile.to_string())
            .or_default();
        if !scheduled.contains(&node) {
            scheduled.push(node);
        }
    }

    /// Fix the semantics of `profile` instead of deriving it from the network.
    pub fn set_semantics(&mut self, profile: &str, update: UpdateType) {
        self.semantics.insert(profile.to_string(), update);
    }

    /// Names of all profiles with at least one observed time point, sorted.
    pub fn profiles(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|p| p.as_str())
    }

    /// Sorted time points observed in `profile`.
    pub fn time_points(&self, profile: &str) -> Vec<usize> {
        self.values
            .get(profile)
            .map(|times| times.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn num_time_points(&self, profile: &str) -> usize {
        self.values.get(profile).map(|t| t.len()).unwrap_or(0)
    }

    /// The values of all nodes at `time` in `profile`.
    pub fn valuation(&self, profile: &str, time: usize) -> Option<&Valuation> {
        self.values.get(profile)?.get(&time)
    }

    pub fn value(&self, profile: &str, time: usize, node: NodeId) -> Option<bool> {
        self.valuation(profile, time)?.get(&node).cloned()
    }

    /// Nodes scheduled for an update at `time` in `profile`.
    pub fn scheduled(&self, time: usize, profile: &str) -> &[NodeId] {
        self.updates
            .get(&time)
            .and_then(|profiles| profiles.get(profile))
            .map(|nodes| nodes.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_scheduled(&self, time: usize, profile: &str, node: NodeId) -> bool {
        self.scheduled(time, profile).contains(&node)
    }

    /// The explicitly assigned semantics of `profile`, if any.
    pub fn semantics(&self, profile: &str) -> Option<UpdateType> {
        self.semantics.get(profile).cloned()
    }

    /// Decide which semantics applies to `profile`.
    ///
    /// An explicit assignment wins. Otherwise a profile with a single time point is a steady
    /// state if the network has steady-state observations (or no time series at all), and
    /// every other profile is interpreted by the network's time-series semantics. A single
    /// time point interpreted as a time series has no transitions, so it never contradicts
    /// a function.
    pub fn resolve_semantics(
        &self,
        network: &Network,
        profile: &str,
    ) -> Result<UpdateType, RepairError> {
        if let Some(update) = self.semantics(profile) {
            return Ok(update);
        }
        let time_series = network.time_series_update();
        if self.num_time_points(profile) == 1
            && (network.has_steady_state_observations() || time_series.is_none())
        {
            return Ok(UpdateType::SteadyState);
        }
        time_series.ok_or_else(|| RepairError::UnknownSemantics {
            profile: profile.to_string(),
        })
    }
}
