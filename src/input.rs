use std::{fs, path::Path};

use crate::{
    core::{
        device::Device,
        hour::Hour,
        problem::Problem,
        tariff::{Tariff, TariffInterval},
    },
    prelude::*,
    quantity::{power::Watts, rate::KilowattHourRate},
};

/// Input document as it is stored on disk.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDocument {
    pub devices: Vec<Device>,
    pub rates: Vec<InputRate>,
    pub max_power: Watts,
}

#[derive(Copy, Clone, Debug, serde::Deserialize)]
pub struct InputRate {
    pub from: Hour,
    pub to: Hour,
    pub value: KilowattHourRate,
}

impl InputDocument {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let document: Self = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        info!(n_devices = document.devices.len(), n_rates = document.rates.len(), "loaded");
        Ok(document)
    }

    /// Validate the values and convert the rates into per-watt-hour prices.
    pub fn into_problem(self) -> Result<Problem> {
        for device in &self.devices {
            ensure!(
                device.power > Watts::ZERO,
                "device `{}` must have a positive power, got {}",
                device.id,
                device.power,
            );
        }
        ensure!(self.max_power > Watts::ZERO, "`maxPower` must be positive, got {}", self.max_power);
        ensure!(!self.rates.is_empty(), "at least one rate is required");
        for (index, rate) in self.rates.iter().enumerate() {
            ensure!(
                rate.value >= KilowattHourRate::ZERO,
                "rate #{index} ({}-{}) must not be negative, got {}",
                rate.from,
                rate.to,
                rate.value,
            );
        }

        let tariff = self
            .rates
            .into_iter()
            .map(|rate| TariffInterval { from: rate.from, to: rate.to, rate: rate.value.into() })
            .collect::<Vec<_>>();
        Ok(Problem { devices: self.devices, tariff: Tariff::from(tariff), max_power: self.max_power })
    }
}
