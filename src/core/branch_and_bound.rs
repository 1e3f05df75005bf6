//! Exhaustive search over the start hours of every device, layer by layer.
//!
//! Each tree row corresponds to one device in the [`sort_devices`] order. Only the
//! current row is kept alive, the placements of its ancestors live in a compact
//! [`Lineage`] which is pruned after every row.

mod lineage;
mod vertex;

use std::time::Instant;

use bon::bon;

pub use self::vertex::Vertex;
use self::lineage::{Lineage, Link};
use crate::{
    core::{
        calendar::Calendar,
        device::Device,
        error::{ConfigurationError, ExactError},
        hour::Hour,
        ordering::sort_devices,
        pricing::run_cost,
        solution::{Assignment, Schedule, Solution, Statistics},
        tariff::Tariff,
    },
    prelude::*,
    quantity::{cost::Cost, power::Watts},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Progress {
    /// Another row has been built.
    Expanded { device_id: String, frontier_size: usize },

    /// Every device has been placed.
    Complete,
}

pub struct BranchAndBound<'a> {
    /// In the search order.
    devices: Vec<&'a Device>,

    tariff: &'a Tariff,
    calendar: &'a Calendar,
    max_power: Watts,
    collect_statistics: bool,

    /// Number of devices placed so far.
    depth: usize,

    frontier: Vec<Vertex>,
    lineage: Lineage,
    started_at: Instant,
}

#[bon]
impl<'a> BranchAndBound<'a> {
    #[builder]
    pub fn new(
        devices: &'a [Device],
        tariff: &'a Tariff,
        calendar: &'a Calendar,
        max_power: Watts,
        #[builder(default)] collect_statistics: bool,
    ) -> Result<Self, ConfigurationError> {
        let started_at = Instant::now();
        Ok(Self {
            devices: sort_devices(devices)?,
            tariff,
            calendar,
            max_power,
            collect_statistics,
            depth: 0,
            frontier: vec![Vertex::root()],
            lineage: Lineage::default(),
            started_at,
        })
    }
}

impl<'a> BranchAndBound<'a> {
    /// Devices in the order in which they get placed.
    #[cfg(test)]
    pub fn devices(&self) -> &[&'a Device] {
        &self.devices
    }

    #[cfg(test)]
    pub fn frontier(&self) -> &[Vertex] {
        &self.frontier
    }

    #[cfg(test)]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[cfg(test)]
    pub fn is_complete(&self) -> bool {
        self.depth == self.devices.len()
    }

    /// Start hour of the most recently placed device in the vertex.
    #[cfg(test)]
    pub fn start_hour_of(&self, vertex: &Vertex) -> Option<Hour> {
        vertex.link.map(|id| self.lineage.get(id).start_hour)
    }

    /// Build the next tree row and discard the current one.
    ///
    /// A child survives only while the summed power within the hours of the newly
    /// placed device stays under the ceiling. When no child survives, there is no way
    /// to place the device and the search fails.
    pub fn step(&mut self) -> Result<Progress, ExactError> {
        let Some(device) = self.devices.get(self.depth).copied() else {
            return Ok(Progress::Complete);
        };

        // Incremental costs only depend on the start hour, not on the parent.
        let start_costs = self
            .calendar
            .legal_start_hours(device.mode, device.duration)
            .iter()
            .map(|start_hour| {
                run_cost(device, *start_hour, self.tariff, self.calendar)
                    .map(|cost| (*start_hour, cost))
            })
            .collect::<Result<Vec<(Hour, Cost)>, _>>()?;

        let mut next_frontier = Vec::new();
        for parent in &self.frontier {
            for (start_hour, incremental_cost) in &start_costs {
                let occupied_hours = self.calendar.occupied_hours(*start_hour, device.duration);
                let child = parent.child(device.power, occupied_hours, *incremental_cost);
                if child.cumulative_max_power() > self.max_power {
                    continue;
                }
                let link = self.lineage.push(Link {
                    parent: parent.link,
                    depth: self.depth,
                    start_hour: *start_hour,
                    incremental_cost: *incremental_cost,
                });
                next_frontier.push(child.with_link(link));
            }
        }

        if next_frontier.is_empty() {
            return Err(ExactError::Infeasible { device_id: device.id.clone() });
        }

        self.frontier = next_frontier;
        self.lineage.retain_reachable(self.frontier.iter_mut().map(|vertex| &mut vertex.link));
        self.depth += 1;

        debug!(
            device_id = %device.id,
            depth = self.depth,
            frontier_size = self.frontier.len(),
            n_links = self.lineage.len(),
            "expanded",
        );
        Ok(Progress::Expanded {
            device_id: device.id.clone(),
            frontier_size: self.frontier.len(),
        })
    }

    /// Finish the remaining rows and pick the cheapest complete schedule.
    #[instrument(skip_all, fields(n_devices = self.devices.len()))]
    pub fn into_solution(mut self) -> Result<Solution, ExactError> {
        while let Progress::Expanded { .. } = self.step()? {}

        let Some((winner, tied_optimal_count)) = self.select() else {
            // Unreachable: a successful step never leaves the frontier empty.
            let device_id = self.devices.last().map(|device| device.id.clone()).unwrap_or_default();
            return Err(ExactError::Infeasible { device_id });
        };

        let mut assignments = self
            .lineage
            .ancestry(winner.link)
            .map(|link| Assignment {
                device: self.devices[link.depth],
                start_hour: link.start_hour,
                cost: link.incremental_cost,
            })
            .collect::<Vec<_>>();
        assignments.reverse();
        let schedule = Schedule::assemble(assignments, self.calendar);

        info!(
            total_cost = %schedule.total_cost,
            tied_optimal_count,
            frontier_size = self.frontier.len(),
            "optimized",
        );

        let statistics = self.collect_statistics.then(|| Statistics {
            tied_optimal_count: Some(tied_optimal_count),
            final_frontier_size: Some(self.frontier.len()),
            elapsed: self.started_at.elapsed(),
        });
        Ok(Solution { schedule, statistics })
    }

    /// Run the search to completion.
    pub fn solve(self) -> Result<Solution, ExactError> {
        self.into_solution()
    }

    /// First vertex with the minimal cost, and the number of vertices sharing that cost.
    fn select(&self) -> Option<(&Vertex, usize)> {
        let mut best: Option<&Vertex> = None;
        let mut n_tied = 0;
        for vertex in &self.frontier {
            match best {
                Some(current)
                    if !vertex.cumulative_cost().is_cheaper_than(current.cumulative_cost()) =>
                {
                    if vertex.cumulative_cost().is_close_to(current.cumulative_cost()) {
                        n_tied += 1;
                    }
                }
                _ => {
                    best = Some(vertex);
                    n_tied = 1;
                }
            }
        }
        best.map(|vertex| (vertex, n_tied))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::{
        device::Mode,
        hour::Hours,
        tariff::tests::{day_night_tariff, patchy_tariff},
    };

    fn device(id: &str, power: f64, duration: u8, mode: Option<Mode>) -> Device {
        Device::builder()
            .id(id)
            .power(Watts(power))
            .duration(Hours::try_from(duration).unwrap())
            .maybe_mode(mode)
            .build()
    }

    fn hour(hour: u8) -> Hour {
        Hour::try_from(hour).unwrap()
    }

    fn solve(devices: &[Device], tariff: &Tariff, max_power: f64) -> Result<Solution, ExactError> {
        let calendar = Calendar::new();
        BranchAndBound::builder()
            .devices(devices)
            .tariff(tariff)
            .calendar(&calendar)
            .max_power(Watts(max_power))
            .collect_statistics(true)
            .build()?
            .solve()
    }

    #[test]
    fn test_single_row() {
        let calendar = Calendar::new();
        let tariff = day_night_tariff();
        let devices = [device("washer", 100.0, 8, Some(Mode::Day))];
        let mut search = BranchAndBound::builder()
            .devices(&devices)
            .tariff(&tariff)
            .calendar(&calendar)
            .max_power(Watts(1000.0))
            .build()
            .unwrap();

        assert_eq!(search.frontier().len(), 1);
        assert_eq!(
            search.step().unwrap(),
            Progress::Expanded { device_id: "washer".to_owned(), frontier_size: 7 },
        );
        assert!(search.is_complete());

        let expected = [4.628, 4.52, 4.412, 4.412, 4.52, 4.628, 4.736];
        for ((vertex, expected_cost), start_hour) in search.frontier().iter().zip(expected).zip(7..)
        {
            assert_eq!(search.start_hour_of(vertex), Some(hour(start_hour)));
            assert_abs_diff_eq!(vertex.cumulative_cost().0, expected_cost, epsilon = 1e-9);
            assert_eq!(vertex.cumulative_max_power(), Watts(100.0));
            assert_eq!(vertex.cumulative_power().values().filter(|power| **power > Watts::ZERO).count(), 8);
        }

        assert_eq!(search.step().unwrap(), Progress::Complete);
    }

    #[test]
    fn test_step_by_step() {
        let calendar = Calendar::new();
        let tariff = day_night_tariff();
        let devices = [
            device("kettle", 100.0, 1, None),
            device("fridge", 100.0, 24, None),
            device("washer", 100.0, 8, Some(Mode::Day)),
        ];
        let mut search = BranchAndBound::builder()
            .devices(&devices)
            .tariff(&tariff)
            .calendar(&calendar)
            .max_power(Watts(1000.0))
            .build()
            .unwrap();

        let order = search.devices().iter().map(|device| device.id.as_str()).collect::<Vec<_>>();
        assert_eq!(order, ["fridge", "washer", "kettle"]);

        let mut frontier_sizes = Vec::new();
        while let Progress::Expanded { frontier_size, .. } = search.step().unwrap() {
            frontier_sizes.push(frontier_size);
        }
        assert_eq!(frontier_sizes, [1, 7, 7 * 24]);
        assert_eq!(search.depth(), 3);
    }

    #[test]
    fn test_single_device() {
        let solution =
            solve(&[device("washer", 100.0, 8, Some(Mode::Day))], &day_night_tariff(), 1000.0)
                .unwrap();
        assert_eq!(solution.schedule.device_runs["washer"].start_hour, hour(9));
        assert_abs_diff_eq!(solution.schedule.total_cost.0, 4.412, epsilon = 1e-9);

        let statistics = solution.statistics.unwrap();
        assert_eq!(statistics.tied_optimal_count, Some(2));
        assert_eq!(statistics.final_frontier_size, Some(7));
    }

    #[test]
    fn test_ceiling_forces_placement() {
        let devices = [
            device("fridge", 100.0, 24, None),
            device("washer", 100.0, 8, Some(Mode::Day)),
            device("dryer", 100.0, 6, Some(Mode::Day)),
        ];
        let calendar = Calendar::new();
        let tariff = day_night_tariff();
        let mut search = BranchAndBound::builder()
            .devices(&devices)
            .tariff(&tariff)
            .calendar(&calendar)
            .max_power(Watts(250.0))
            .collect_statistics(true)
            .build()
            .unwrap();

        search.step().unwrap();
        search.step().unwrap();
        search.step().unwrap();

        // Washer and dryer may only run back to back, within the day hours.
        let start_hours = search
            .frontier()
            .iter()
            .map(|vertex| search.start_hour_of(vertex).map(u8::from))
            .collect::<Vec<_>>();
        assert_eq!(start_hours, [Some(15), Some(7)]);
        assert_eq!(search.lineage.len(), 5);

        let solution = search.into_solution().unwrap();
        let schedule = &solution.schedule;
        assert_eq!(schedule.device_runs["fridge"].start_hour, hour(0));
        assert_eq!(schedule.device_runs["washer"].start_hour, hour(7));
        assert_eq!(schedule.device_runs["dryer"].start_hour, hour(15));
        assert_abs_diff_eq!(schedule.total_cost.0, 19.084, epsilon = 1e-9);
        assert_eq!(schedule.hourly_device_ids[hour(7)], ["fridge", "washer"]);
        assert_eq!(schedule.hourly_device_ids[hour(15)], ["dryer", "fridge"]);
        assert_eq!(schedule.hourly_device_ids[hour(22)], ["fridge"]);
        assert_eq!(solution.statistics.unwrap().tied_optimal_count, Some(2));
    }

    #[test]
    fn test_children_over_ceiling_are_dropped() {
        let calendar = Calendar::new();
        let tariff = day_night_tariff();
        let devices = [device("kettle", 100.0, 1, None), device("oven", 200.0, 14, Some(Mode::Day))];
        let mut search = BranchAndBound::builder()
            .devices(&devices)
            .tariff(&tariff)
            .calendar(&calendar)
            .max_power(Watts(250.0))
            .build()
            .unwrap();

        search.step().unwrap();
        assert_eq!(search.frontier()[0].cumulative_max_power(), Watts(200.0));

        // The kettle fits only outside the oven hours.
        assert_eq!(
            search.step().unwrap(),
            Progress::Expanded { device_id: "kettle".to_owned(), frontier_size: 10 },
        );
        for vertex in search.frontier() {
            assert_eq!(vertex.cumulative_max_power(), Watts(100.0));
            let start_hour = search.start_hour_of(vertex).unwrap();
            assert!(!start_hour.is_day(), "{start_hour}");
        }
        assert_eq!(search.lineage.len(), 11);
    }

    #[test]
    fn test_total_cost_is_sum_of_device_costs() {
        let devices = [
            device("fridge", 50.0, 24, None),
            device("heater", 1500.0, 3, Some(Mode::Night)),
            device("oven", 2000.0, 2, Some(Mode::Day)),
            device("kettle", 1000.0, 1, None),
        ];
        let solution = solve(&devices, &day_night_tariff(), 3500.0).unwrap();
        let schedule = &solution.schedule;
        let sum: Cost = schedule.device_runs.values().map(|run| run.cost).sum();
        assert_abs_diff_eq!(schedule.total_cost.0, sum.0, epsilon = 1e-9);
        assert_eq!(schedule.device_runs.len(), 4);
    }

    #[test]
    fn test_schedule_respects_ceiling() {
        let devices = [
            device("a", 1000.0, 3, None),
            device("b", 1000.0, 3, None),
            device("c", 1000.0, 3, None),
        ];
        let solution = solve(&devices, &day_night_tariff(), 2000.0).unwrap();
        for (hour, device_ids) in solution.schedule.hourly_device_ids.iter() {
            assert!(device_ids.len() <= 2, "hour {hour}: {device_ids:?}");
        }
    }

    #[test]
    fn test_infeasible_always_on() {
        let devices = [
            device("a", 2050.0, 24, None),
            device("b", 2050.0, 24, None),
            device("c", 2050.0, 24, None),
        ];
        assert_eq!(
            solve(&devices, &day_night_tariff(), 2100.0).unwrap_err(),
            ExactError::Infeasible { device_id: "b".to_owned() },
        );
    }

    #[test]
    fn test_infeasible_day_devices() {
        let devices = [
            device("a", 2050.0, 14, Some(Mode::Day)),
            device("b", 2050.0, 14, Some(Mode::Day)),
            device("c", 2050.0, 14, Some(Mode::Day)),
        ];
        assert!(matches!(
            solve(&devices, &day_night_tariff(), 2100.0),
            Err(ExactError::Infeasible { .. }),
        ));
    }

    #[test]
    fn test_tariff_gap() {
        let devices = [device("kettle", 100.0, 1, None)];
        assert_eq!(
            solve(&devices, &patchy_tariff(), 1000.0).unwrap_err(),
            ExactError::Configuration(ConfigurationError::TariffGap(hour(8))),
        );
    }

    #[test]
    fn test_duplicate_ids() {
        let devices = [device("twin", 100.0, 1, None), device("twin", 200.0, 2, None)];
        assert_eq!(
            solve(&devices, &day_night_tariff(), 1000.0).unwrap_err(),
            ExactError::Configuration(ConfigurationError::DuplicateDeviceId("twin".to_owned())),
        );
    }

    #[test]
    fn test_no_devices() {
        let solution = solve(&[], &day_night_tariff(), 1000.0).unwrap();
        assert!(solution.schedule.device_runs.is_empty());
        assert_eq!(solution.schedule.total_cost, Cost::ZERO);
        assert_eq!(solution.statistics.unwrap().tied_optimal_count, Some(1));
    }

    #[test]
    fn test_idempotent() {
        let devices = [
            device("fridge", 50.0, 24, None),
            device("washer", 2000.0, 3, Some(Mode::Day)),
            device("dryer", 2000.0, 3, Some(Mode::Day)),
            device("kettle", 1000.0, 1, None),
        ];
        let tariff = day_night_tariff();
        let first = solve(&devices, &tariff, 2100.0).unwrap();
        let second = solve(&devices, &tariff, 2100.0).unwrap();
        assert_eq!(first.schedule, second.schedule);
    }
}
