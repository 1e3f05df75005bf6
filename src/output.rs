use std::{collections::BTreeMap, fs, path::Path};

use crate::{core::solution::Schedule, prelude::*, quantity::cost::Cost};

/// Output document as it is stored on disk.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDocument {
    /// Device ids by hour, every hour present.
    pub schedule: BTreeMap<u8, Vec<String>>,

    pub consumed_energy: ConsumedEnergy,
}

#[derive(Debug, serde::Serialize)]
pub struct ConsumedEnergy {
    /// Total cost.
    pub value: Cost,

    /// Cost by device id.
    pub devices: BTreeMap<String, Cost>,
}

impl OutputDocument {
    /// Build the document with the costs rounded to the specified number of decimal places.
    pub fn new(schedule: &Schedule, precision: u32) -> Self {
        Self {
            schedule: schedule
                .hourly_device_ids
                .iter()
                .map(|(hour, device_ids)| (u8::from(hour), device_ids.clone()))
                .collect(),
            consumed_energy: ConsumedEnergy {
                value: schedule.total_cost.round_to(precision),
                devices: schedule
                    .device_runs
                    .iter()
                    .map(|(device_id, run)| (device_id.clone(), run.cost.round_to(precision)))
                    .collect(),
            },
        }
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn write_to(&self, path: &Path) -> Result {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).with_context(|| format!("failed to write `{}`", path.display()))?;
        info!("saved");
        Ok(())
    }
}
