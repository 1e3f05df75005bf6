use crate::{
    core::{device::Device, tariff::Tariff},
    quantity::power::Watts,
};

/// Everything a scheduler needs, already validated and normalized.
#[derive(Clone, Debug, PartialEq, bon::Builder)]
pub struct Problem {
    pub devices: Vec<Device>,
    pub tariff: Tariff,

    /// Household power ceiling, applies within every hour.
    pub max_power: Watts,
}
