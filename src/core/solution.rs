use std::{collections::BTreeMap, time::Duration};

use crate::{
    core::{
        calendar::Calendar,
        device::Device,
        hour::{Hour, Hours},
        hourly::Hourly,
    },
    quantity::cost::Cost,
};

/// Device started at the specified hour.
#[derive(Copy, Clone, Debug)]
pub struct Assignment<'a> {
    pub device: &'a Device,
    pub start_hour: Hour,

    /// Cost of running the device alone.
    pub cost: Cost,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DeviceRun {
    pub start_hour: Hour,
    pub duration: Hours,
    pub cost: Cost,
}

/// Final device schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    /// Ids of the devices running within each hour, sorted.
    pub hourly_device_ids: Hourly<Vec<String>>,

    /// Keyed by device id.
    pub device_runs: BTreeMap<String, DeviceRun>,

    pub total_cost: Cost,
}

impl Schedule {
    /// Lay the assignments out on the clock.
    ///
    /// The total cost is summed in the iteration order.
    pub fn assemble<'a>(
        assignments: impl IntoIterator<Item = Assignment<'a>>,
        calendar: &Calendar,
    ) -> Self {
        let mut hourly_device_ids = Hourly::<Vec<String>>::default();
        let mut device_runs = BTreeMap::new();
        let mut total_cost = Cost::ZERO;

        for Assignment { device, start_hour, cost } in assignments {
            for hour in calendar.occupied_hours(start_hour, device.duration) {
                hourly_device_ids[*hour].push(device.id.clone());
            }
            device_runs
                .insert(device.id.clone(), DeviceRun { start_hour, duration: device.duration, cost });
            total_cost += cost;
        }
        for (_, device_ids) in hourly_device_ids.iter_mut() {
            device_ids.sort_unstable();
        }

        Self { hourly_device_ids, device_runs, total_cost }
    }
}

/// Optional run statistics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Statistics {
    /// Number of final vertices sharing the minimal cost, branch-and-bound only.
    pub tied_optimal_count: Option<usize>,

    /// Number of vertices in the last tree row, branch-and-bound only.
    pub final_frontier_size: Option<usize>,

    pub elapsed: Duration,
}

#[derive(Clone, Debug)]
#[must_use]
pub struct Solution {
    pub schedule: Schedule,
    pub statistics: Option<Statistics>,
}
