use crate::{
    core::{branch_and_bound::lineage::LinkId, hour::Hour, hourly::Hourly},
    quantity::{cost::Cost, power::Watts},
};

/// Partial schedule: the devices placed so far.
///
/// The placement itself lives in the lineage, the vertex only keeps the aggregates.
#[derive(Clone, Debug)]
pub struct Vertex {
    /// Own placement, [`None`] for the empty schedule.
    pub(super) link: Option<LinkId>,

    cumulative_cost: Cost,

    /// Summed power of the placed devices within each hour.
    cumulative_power: Hourly<Watts>,

    /// Peak of [`Self::cumulative_power`] over the hours of the latest device.
    cumulative_max_power: Watts,
}

impl Vertex {
    pub fn root() -> Self {
        Self {
            link: None,
            cumulative_cost: Cost::ZERO,
            cumulative_power: Hourly::default(),
            cumulative_max_power: Watts::ZERO,
        }
    }

    pub const fn cumulative_cost(&self) -> Cost {
        self.cumulative_cost
    }

    #[cfg(test)]
    pub const fn cumulative_power(&self) -> &Hourly<Watts> {
        &self.cumulative_power
    }

    pub const fn cumulative_max_power(&self) -> Watts {
        self.cumulative_max_power
    }

    /// Place one more device on top of this partial schedule.
    ///
    /// The child is not linked yet: the caller links it once it survives the ceiling check.
    pub fn child(&self, power: Watts, occupied_hours: &[Hour], incremental_cost: Cost) -> Self {
        let mut cumulative_power = self.cumulative_power.clone();
        for hour in occupied_hours {
            cumulative_power[*hour] += power;
        }
        let cumulative_max_power = occupied_hours
            .iter()
            .map(|hour| cumulative_power[*hour])
            .max()
            .unwrap_or(Watts::ZERO);
        Self {
            link: None,
            cumulative_cost: self.cumulative_cost + incremental_cost,
            cumulative_power,
            cumulative_max_power,
        }
    }

    pub const fn with_link(mut self, link: LinkId) -> Self {
        self.link = Some(link);
        self
    }
}
