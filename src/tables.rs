use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    core::{
        dispatcher::{Run, RunOutcome},
        solution::Schedule,
    },
    quantity::cost::Cost,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_hourly_table(schedule: &Schedule) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Hour", "Period", "Devices"]);
    for (hour, device_ids) in schedule.hourly_device_ids.iter() {
        table.add_row(vec![
            Cell::new(hour),
            if hour.is_day() {
                Cell::new("day").fg(Color::DarkYellow)
            } else {
                Cell::new("night").fg(Color::Blue)
            },
            if device_ids.is_empty() {
                Cell::new("-").add_attribute(Attribute::Dim)
            } else {
                Cell::new(device_ids.iter().join(", "))
            },
        ]);
    }
    table
}

pub fn build_devices_table(schedule: &Schedule) -> Table {
    let mean_cost = if schedule.device_runs.is_empty() {
        Cost::ZERO
    } else {
        #[expect(clippy::cast_precision_loss)]
        let n_devices = schedule.device_runs.len() as f64;
        schedule.total_cost / n_devices
    };

    let mut table = new_table();
    table.set_header(vec!["Device", "Start", "End", "Cost"]);
    for (device_id, run) in &schedule.device_runs {
        let end_hour = run.start_hour.wrapping_add(run.duration.get());
        table.add_row(vec![
            Cell::new(device_id),
            Cell::new(run.start_hour),
            Cell::new(end_hour).add_attribute(Attribute::Dim),
            Cell::new(run.cost)
                .set_alignment(CellAlignment::Right)
                .fg(if run.cost > mean_cost { Color::Red } else { Color::Green }),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(schedule.total_cost)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn build_runs_table(runs: &[Run]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Algorithm", "Outcome", "Total cost", "Time", "Tied", "Frontier"]);
    for run in runs {
        let row = match &run.outcome {
            RunOutcome::Solved { total_cost, statistics } => vec![
                Cell::new(run.algorithm),
                Cell::new("solved").fg(Color::Green),
                Cell::new(total_cost).set_alignment(CellAlignment::Right),
                optional_cell(statistics.map(|statistics| format!("{:?}", statistics.elapsed))),
                optional_cell(statistics.and_then(|statistics| statistics.tied_optimal_count)),
                optional_cell(statistics.and_then(|statistics| statistics.final_frontier_size)),
            ],
            RunOutcome::Rejected(reason) => vec![
                Cell::new(run.algorithm),
                Cell::new(reason).fg(Color::Red),
                optional_cell(None::<Cost>),
                optional_cell(None::<String>),
                optional_cell(None::<usize>),
                optional_cell(None::<usize>),
            ],
        };
        table.add_row(row);
    }
    table
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    value.map_or_else(
        || Cell::new("-").add_attribute(Attribute::Dim),
        |value| Cell::new(value).set_alignment(CellAlignment::Right),
    )
}
