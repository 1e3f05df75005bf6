use thiserror::Error;

use crate::{core::hour::Hour, quantity::power::Watts};

/// Malformed input detected by the core. Fatal, never retried.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigurationError {
    #[error("two devices share the id `{0}`")]
    DuplicateDeviceId(String),

    #[error("no tariff interval covers hour {0}")]
    TariffGap(Hour),

    #[error("hour {0} is out of range 0..24")]
    HourOutOfRange(u8),

    #[error("duration {0} is out of range 1..=24")]
    DurationOutOfRange(u8),
}

/// Reason why the fast scheduler gave up.
///
/// This does not prove that no schedule exists.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FastInfeasibility {
    #[error("total device power {total} exceeds the ceiling {ceiling}")]
    TotalPowerExceedsCeiling { total: Watts, ceiling: Watts },

    #[error("device `{device_id}` has no legal start hour")]
    NoLegalStartHour { device_id: String },
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum FastError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("the fast scheduler is not applicable: {0}")]
    Infeasible(#[from] FastInfeasibility),
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ExactError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Proven: no assignment satisfies both the time windows and the power ceiling.
    #[error("no feasible schedule exists, the search ran dry at device `{device_id}`")]
    Infeasible { device_id: String },
}

/// Failures surfaced by the dispatcher.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum DispatchError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Only reachable when the fast scheduler is the sole strategy.
    #[error("the fast scheduler found no schedule: {0}")]
    InfeasibleFast(FastInfeasibility),

    #[error("no feasible schedule exists, the search ran dry at device `{device_id}`")]
    InfeasibleExact { device_id: String },
}

impl From<FastError> for DispatchError {
    fn from(error: FastError) -> Self {
        match error {
            FastError::Configuration(error) => Self::Configuration(error),
            FastError::Infeasible(reason) => Self::InfeasibleFast(reason),
        }
    }
}

impl From<ExactError> for DispatchError {
    fn from(error: ExactError) -> Self {
        match error {
            ExactError::Configuration(error) => Self::Configuration(error),
            ExactError::Infeasible { device_id } => Self::InfeasibleExact { device_id },
        }
    }
}
