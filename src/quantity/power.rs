use std::ops::Mul;

use crate::{core::hour::Hours, quantity::energy::WattHours};

quantity!(Watts, via: f64, suffix: "W", precision: 0);

impl Watts {
    pub const ZERO: Self = Self(0.0);
}

impl Mul<Hours> for Watts {
    type Output = WattHours;

    fn mul(self, hours: Hours) -> Self::Output {
        WattHours(self.0 * f64::from(hours.get()))
    }
}
