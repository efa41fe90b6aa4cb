use crate::{ObservationSource, UpdateType};
use std::fmt::{Display, Error, Formatter};

impl UpdateType {
    /// True for the semantics that interpret profiles as time series.
    pub fn is_time_series(self) -> bool {
        self != UpdateType::SteadyState
    }
}

impl Display for UpdateType {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let name = match self {
            UpdateType::SteadyState => "steady-state",
            UpdateType::Synchronous => "synchronous",
            UpdateType::Asynchronous => "asynchronous",
            UpdateType::Complete => "complete",
        };
        write!(f, "{}", name)
    }
}

impl ObservationSource {
    pub fn new(name: &str, update: UpdateType) -> ObservationSource {
        ObservationSource {
            name: name.to_string(),
            update,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_update(&self) -> UpdateType {
        self.update
    }
}
