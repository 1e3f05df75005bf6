use std::ops::Mul;

use crate::quantity::{cost::Cost, rate::WattHourRate};

quantity!(WattHours, via: f64, suffix: "Wh", precision: 0);

impl Mul<WattHourRate> for WattHours {
    type Output = Cost;

    fn mul(self, rate: WattHourRate) -> Self::Output {
        Cost(self.0 * rate.0)
    }
}
