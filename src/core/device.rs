use std::fmt::{Display, Formatter};

use crate::{
    core::hour::{Hour, Hours},
    quantity::{energy::WattHours, power::Watts},
};

/// Time-of-day restriction of a device.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Only within `[7, 21)`.
    Day,

    /// Only within `[21, 7)`.
    Night,
}

impl Mode {
    pub const fn allows(self, hour: Hour) -> bool {
        match self {
            Self::Day => hour.is_day(),
            Self::Night => !hour.is_day(),
        }
    }

    /// The mode's hours in chronological order, starting from its first hour.
    pub fn hours(self) -> impl Iterator<Item = Hour> {
        let first_hour = match self {
            Self::Day => Hour::DAY_START,
            Self::Night => Hour::DAY_END,
        };
        (0..24)
            .map(move |offset| first_hour.wrapping_add(offset))
            .take_while(move |hour| self.allows(*hour))
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Night => write!(f, "night"),
        }
    }
}

/// Power consumer with a fixed run duration.
#[derive(Clone, Debug, PartialEq, bon::Builder, serde::Deserialize, serde::Serialize)]
pub struct Device {
    #[builder(into)]
    pub id: String,

    /// Human-readable label, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub name: Option<String>,

    pub power: Watts,

    pub duration: Hours,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
}

impl Device {
    /// Runs every hour of the day, so its start hour does not matter.
    pub const fn is_always_on(&self) -> bool {
        self.duration.is_full_day()
    }

    pub fn energy(&self) -> WattHours {
        self.power * self.duration
    }
}
