//! Greedy scheduler for the case where the ceiling can never be hit.
//!
//! When even all devices together fit under the ceiling, the devices do not interact,
//! and each one can independently take its cheapest start hour.

use std::{collections::HashMap, time::Instant};

use crate::{
    core::{
        calendar::Calendar,
        device::{Device, Mode},
        error::{FastError, FastInfeasibility},
        hour::{Hour, Hours},
        ordering::ensure_unique_ids,
        pricing::run_cost,
        solution::{Assignment, Schedule, Solution, Statistics},
        tariff::Tariff,
    },
    prelude::*,
    quantity::{cost::Cost, power::Watts},
};

#[derive(bon::Builder)]
pub struct Fast<'a> {
    devices: &'a [Device],
    tariff: &'a Tariff,
    calendar: &'a Calendar,
    max_power: Watts,

    #[builder(default)]
    collect_statistics: bool,
}

impl Fast<'_> {
    #[instrument(skip_all, fields(n_devices = self.devices.len()))]
    pub fn solve(self) -> Result<Solution, FastError> {
        let started_at = Instant::now();
        ensure_unique_ids(self.devices)?;

        let total: Watts = self.devices.iter().map(|device| device.power).sum();
        if total > self.max_power {
            return Err(FastInfeasibility::TotalPowerExceedsCeiling {
                total,
                ceiling: self.max_power,
            }
            .into());
        }

        // Devices sharing the mode and duration share the best start hour as well.
        let mut best_start_hours = HashMap::<(Option<Mode>, Hours), Hour>::new();
        let mut assignments = Vec::with_capacity(self.devices.len());
        for device in self.devices {
            let key = (device.mode, device.duration);
            let start_hour = if let Some(start_hour) = best_start_hours.get(&key) {
                *start_hour
            } else {
                let start_hour = self.best_start_hour(device)?;
                best_start_hours.insert(key, start_hour);
                start_hour
            };
            let cost = run_cost(device, start_hour, self.tariff, self.calendar)?;
            debug!(device_id = %device.id, %start_hour, %cost, "placed");
            assignments.push(Assignment { device, start_hour, cost });
        }

        let schedule = Schedule::assemble(assignments, self.calendar);
        info!(total_cost = %schedule.total_cost, n_distinct_keys = best_start_hours.len(), "scheduled");

        let statistics = self.collect_statistics.then(|| Statistics {
            tied_optimal_count: None,
            final_frontier_size: None,
            elapsed: started_at.elapsed(),
        });
        Ok(Solution { schedule, statistics })
    }

    /// Earliest legal start hour with the minimal cost.
    fn best_start_hour(&self, device: &Device) -> Result<Hour, FastError> {
        let mut best: Option<(Hour, Cost)> = None;
        for start_hour in self.calendar.legal_start_hours(device.mode, device.duration) {
            let cost = run_cost(device, *start_hour, self.tariff, self.calendar)?;
            if best.is_none_or(|(_, best_cost)| cost.is_cheaper_than(best_cost)) {
                best = Some((*start_hour, cost));
            }
        }
        best.map(|(start_hour, _)| start_hour).ok_or_else(|| {
            FastInfeasibility::NoLegalStartHour { device_id: device.id.clone() }.into()
        })
    }
}
