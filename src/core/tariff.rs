use crate::{
    core::{error::ConfigurationError, hour::Hour},
    quantity::rate::WattHourRate,
};

/// Price applicable within the half-open hour range `[from, to)`.
///
/// When `from > to`, the range wraps past midnight.
#[derive(Copy, Clone, Debug, PartialEq, bon::Builder)]
pub struct TariffInterval {
    pub from: Hour,
    pub to: Hour,
    pub rate: WattHourRate,
}

impl TariffInterval {
    pub fn contains(&self, hour: Hour) -> bool {
        if self.from < self.to {
            self.from <= hour && hour < self.to
        } else {
            self.from <= hour || hour < self.to
        }
    }
}

/// Tariff table normalized to per-watt-hour prices.
///
/// Expected to cover every hour of the day, which is only checked on lookup.
#[derive(Clone, Debug, Default, PartialEq, derive_more::From)]
pub struct Tariff(Vec<TariffInterval>);

impl Tariff {
    /// First interval, in table order, covering the hour.
    pub fn interval_at(&self, hour: Hour) -> Result<&TariffInterval, ConfigurationError> {
        self.0
            .iter()
            .find(|interval| interval.contains(hour))
            .ok_or(ConfigurationError::TariffGap(hour))
    }

    pub fn rate_at(&self, hour: Hour) -> Result<WattHourRate, ConfigurationError> {
        Ok(self.interval_at(hour)?.rate)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}
