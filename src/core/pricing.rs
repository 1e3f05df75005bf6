use crate::{
    core::{
        calendar::Calendar,
        device::Device,
        error::ConfigurationError,
        hour::{Hour, Hours},
        tariff::Tariff,
    },
    quantity::cost::Cost,
};

/// Cost of running the device alone, started at `start_hour`.
///
/// Sums the hourly energy times the hourly rate over every occupied hour.
pub fn run_cost(
    device: &Device,
    start_hour: Hour,
    tariff: &Tariff,
    calendar: &Calendar,
) -> Result<Cost, ConfigurationError> {
    let hourly_energy = device.power * Hours::ONE;
    calendar
        .occupied_hours(start_hour, device.duration)
        .iter()
        .map(|hour| tariff.rate_at(*hour).map(|rate| hourly_energy * rate))
        .sum()
}
