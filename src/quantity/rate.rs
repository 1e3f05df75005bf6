quantity!(KilowattHourRate, via: f64, suffix: "/kWh", precision: 2);
quantity!(WattHourRate, via: f64, suffix: "/Wh", precision: 5);

impl KilowattHourRate {
    pub const ZERO: Self = Self(0.0);
}

impl From<KilowattHourRate> for WattHourRate {
    fn from(rate: KilowattHourRate) -> Self {
        Self(rate.0 / 1000.0)
    }
}
