quantity!(Cost, via: f64, suffix: "¤", precision: 4);

impl Cost {
    pub const ZERO: Self = Self(0.0);

    /// Tolerance under which two costs are considered equal.
    pub const EPSILON: Self = Self(1e-9);

    /// Round half away from zero to the specified number of decimal places.
    #[must_use]
    pub fn round_to(self, precision: u32) -> Self {
        let scale = 10_f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
        if scale.is_finite() { Self((self.0 * scale).round() / scale) } else { self }
    }

    /// Whether `self` is cheaper than `other` by more than [`Self::EPSILON`].
    pub fn is_cheaper_than(self, other: Self) -> bool {
        self + Self::EPSILON < other
    }

    pub fn is_close_to(self, other: Self) -> bool {
        (self.0 - other.0).abs() <= Self::EPSILON.0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_round_to() {
        assert_abs_diff_eq!((Cost(4.412) + Cost(1e-15)).round_to(8).0, 4.412);
        assert_abs_diff_eq!(Cost(0.123_456_789).round_to(3).0, 0.123);
        assert_abs_diff_eq!(Cost(0.0015).round_to(2).0, 0.0);
    }

    #[test]
    fn test_round_to_huge_precision() {
        assert_abs_diff_eq!(Cost(0.1).round_to(u32::MAX).0, 0.1);
    }

    #[test]
    fn test_is_cheaper_than() {
        assert!(Cost(1.0).is_cheaper_than(Cost(1.1)));
        assert!(!Cost(1.0).is_cheaper_than(Cost(1.0 + 1e-12)));
        assert!(!Cost(1.1).is_cheaper_than(Cost(1.0)));
    }

    #[test]
    fn test_is_close_to() {
        assert!((Cost(0.1) + Cost(0.2)).is_close_to(Cost(0.3)));
        assert!(!Cost(0.3).is_close_to(Cost(0.31)));
    }
}
