use crate::repair::{
    ConsistencyCheck, ConsistencyChecker, InconsistencySolution, Optimization, RepairError,
};
use crate::Network;

impl<F> ConsistencyChecker for F
where
    F: Fn(&Network) -> Result<ConsistencyCheck, RepairError>,
{
    fn check_consistency(&self, network: &Network) -> Result<ConsistencyCheck, RepairError> {
        self(network)
    }
}

impl Optimization {
    /// The integer code used by the checker: `0` consistent, a positive number of candidate
    /// worlds, `-1` unsatisfiable and `-2` not attempted.
    pub fn code(&self) -> i64 {
        match self {
            Optimization::Consistent => 0,
            Optimization::Inconsistent(count) => i64::try_from(*count).unwrap_or(i64::MAX),
            Optimization::Unsatisfiable => -1,
            Optimization::NotAttempted => -2,
        }
    }

    pub fn from_code(code: i64) -> Result<Optimization, String> {
        match code {
            0 => Ok(Optimization::Consistent),
            -1 => Ok(Optimization::Unsatisfiable),
            -2 => Ok(Optimization::NotAttempted),
            c if c > 0 => usize::try_from(c)
                .map(Optimization::Inconsistent)
                .map_err(|_| format!("Optimization code {} is too large.", c)),
            c => Err(format!("Unknown optimization code {}.", c)),
        }
    }
}

impl ConsistencyCheck {
    /// The result of a check which found the network consistent.
    pub fn consistent() -> ConsistencyCheck {
        ConsistencyCheck {
            solutions: Vec::new(),
            optimization: Optimization::Consistent,
        }
    }

    /// The result of a check which found the given candidate worlds.
    pub fn inconsistent(solutions: Vec<InconsistencySolution>) -> ConsistencyCheck {
        let optimization = if solutions.is_empty() {
            Optimization::Unsatisfiable
        } else {
            Optimization::Inconsistent(solutions.len())
        };
        ConsistencyCheck {
            solutions,
            optimization,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::repair::{ConsistencyCheck, ConsistencyChecker, Optimization, RepairError};
    use crate::Network;

    #[test]
    fn test_optimization_codes() {
        for code in [0, 3, -1, -2] {
            assert_eq!(code, Optimization::from_code(code).unwrap().code());
        }
        assert_eq!(Ok(Optimization::Inconsistent(2)), Optimization::from_code(2));
        assert!(Optimization::from_code(-3).is_err());
    }

    #[test]
    fn test_closure_checker() {
        let checker = |_: &Network| -> Result<ConsistencyCheck, RepairError> {
            Ok(ConsistencyCheck::consistent())
        };
        let check = checker.check_consistency(&Network::new()).unwrap();
        assert_eq!(Optimization::Consistent, check.optimization);
        assert_eq!(
            Optimization::Unsatisfiable,
            ConsistencyCheck::inconsistent(Vec::new()).optimization
        );
    }
}
