use std::fmt::{Display, Formatter};

use crate::core::error::ConfigurationError;

/// Hour of the day, `0..24`.
#[derive(
    Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Hour(u8);

impl Hour {
    pub const N_HOURS: usize = 24;
    pub const MIDNIGHT: Self = Self(0);

    /// First hour of the daytime.
    pub const DAY_START: Self = Self(7);

    /// First hour of the nighttime.
    pub const DAY_END: Self = Self(21);

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Hour that comes `n` hours later, wrapping past midnight.
    #[must_use]
    pub const fn wrapping_add(self, n: u8) -> Self {
        // Both remainders are under 24, so the sum fits into `u8`.
        Self((self.0 % 24 + n % 24) % 24)
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..24).map(Self)
    }

    /// Daytime is `[7, 21)` and does not cross midnight.
    #[must_use]
    pub const fn is_day(self) -> bool {
        self.0 >= Self::DAY_START.0 && self.0 < Self::DAY_END.0
    }
}

impl TryFrom<u8> for Hour {
    type Error = ConfigurationError;

    fn try_from(hour: u8) -> Result<Self, Self::Error> {
        if usize::from(hour) < Self::N_HOURS {
            Ok(Self(hour))
        } else {
            Err(ConfigurationError::HourOutOfRange(hour))
        }
    }
}

impl From<Hour> for u8 {
    fn from(hour: Hour) -> Self {
        hour.0
    }
}

impl Display for Hour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Run duration in whole hours, `1..=24`.
#[derive(
    Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Hours(u8);

impl Hours {
    pub const ONE: Self = Self(1);
    pub const FULL_DAY: Self = Self(24);

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index, handy for lookup tables.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    #[must_use]
    pub const fn is_full_day(self) -> bool {
        self.0 == Self::FULL_DAY.0
    }

    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (1..=24).map(Self)
    }
}

impl TryFrom<u8> for Hours {
    type Error = ConfigurationError;

    fn try_from(hours: u8) -> Result<Self, Self::Error> {
        if (1..=24).contains(&hours) {
            Ok(Self(hours))
        } else {
            Err(ConfigurationError::DurationOutOfRange(hours))
        }
    }
}

impl From<Hours> for u8 {
    fn from(hours: Hours) -> Self {
        hours.0
    }
}

impl Display for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h", self.0)
    }
}
