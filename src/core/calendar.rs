//! Hour-of-day arithmetic: which hours a device occupies and when it may start.

use crate::core::{
    device::Mode,
    hour::{Hour, Hours},
};

/// Hours occupied by a device started at `start_hour`, in chronological order.
pub fn occupied_hours(start_hour: Hour, duration: Hours) -> impl Iterator<Item = Hour> {
    (0..duration.get()).map(move |offset| start_hour.wrapping_add(offset))
}

/// Start hours at which the entire run stays within the mode's hours.
///
/// A device running the whole day may only start at midnight, since every start is equivalent.
pub fn legal_start_hours(mode: Option<Mode>, duration: Hours) -> Vec<Hour> {
    if duration.is_full_day() {
        return vec![Hour::MIDNIGHT];
    }
    match mode {
        Some(mode) => {
            let mode_hours = mode.hours().collect::<Vec<_>>();
            let n_starts = (mode_hours.len() + 1).saturating_sub(usize::from(duration.get()));
            mode_hours.into_iter().take(n_starts).collect()
        }
        None => Hour::all().collect(),
    }
}

/// Precomputed time calculus.
///
/// The answers only depend on their arguments, so the whole table is built once
/// and then shared read-only by any number of schedulers.
pub struct Calendar {
    /// Indexed by `start_hour × 24 + duration index`.
    occupied_hours: Vec<Vec<Hour>>,

    /// Indexed by `mode slot × 24 + duration index`.
    legal_start_hours: Vec<Vec<Hour>>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar {
    const MODES: [Option<Mode>; 3] = [None, Some(Mode::Day), Some(Mode::Night)];

    pub fn new() -> Self {
        let occupied_hours: Vec<Vec<Hour>> = Hour::all()
            .flat_map(|start_hour| {
                Hours::all().map(move |duration| {
                    occupied_hours(start_hour, duration).collect::<Vec<_>>()
                })
            })
            .collect();
        let legal_start_hours: Vec<Vec<Hour>> = Self::MODES
            .into_iter()
            .flat_map(|mode| Hours::all().map(move |duration| legal_start_hours(mode, duration)))
            .collect();
        Self { occupied_hours, legal_start_hours }
    }

    pub fn occupied_hours(&self, start_hour: Hour, duration: Hours) -> &[Hour] {
        &self.occupied_hours[start_hour.index() * Hour::N_HOURS + duration.index()]
    }

    pub fn legal_start_hours(&self, mode: Option<Mode>, duration: Hours) -> &[Hour] {
        let mode_slot = match mode {
            None => 0,
            Some(Mode::Day) => 1,
            Some(Mode::Night) => 2,
        };
        &self.legal_start_hours[mode_slot * Hour::N_HOURS + duration.index()]
    }
}
