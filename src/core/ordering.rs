use std::cmp::Ordering;

use itertools::Itertools;

use crate::core::{device::Device, error::ConfigurationError};

/// Fail on the first id that appears more than once.
pub fn ensure_unique_ids(devices: &[Device]) -> Result<(), ConfigurationError> {
    match devices.iter().map(|device| device.id.as_str()).duplicates().next() {
        Some(id) => Err(ConfigurationError::DuplicateDeviceId(id.to_owned())),
        None => Ok(()),
    }
}

/// Order the devices so that the search tree gets pruned as early as possible.
///
/// In the order of precedence:
///
/// 1. Always-on devices, they contribute exactly one branch each.
/// 2. Mode-restricted devices, they have fewer legal start hours.
/// 3. Higher energy, those are more likely to hit the power ceiling.
/// 4. Ascending id, for determinism.
pub fn sort_devices(devices: &[Device]) -> Result<Vec<&Device>, ConfigurationError> {
    ensure_unique_ids(devices)?;
    Ok(devices.iter().sorted_by(|lhs, rhs| compare(lhs, rhs)).collect())
}

fn compare(lhs: &Device, rhs: &Device) -> Ordering {
    rhs.is_always_on()
        .cmp(&lhs.is_always_on())
        .then_with(|| rhs.mode.is_some().cmp(&lhs.mode.is_some()))
        .then_with(|| rhs.energy().cmp(&lhs.energy()))
        .then_with(|| lhs.id.cmp(&rhs.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{device::Mode, hour::Hours},
        quantity::power::Watts,
    };

    fn device(id: &str, power: f64, duration: u8, mode: Option<Mode>) -> Device {
        Device::builder()
            .id(id)
            .power(Watts(power))
            .duration(Hours::try_from(duration).unwrap())
            .maybe_mode(mode)
            .build()
    }

    fn ids(devices: &[&Device]) -> Vec<String> {
        devices.iter().map(|device| device.id.clone()).collect()
    }

    #[test]
    fn test_always_on_first() {
        let devices = [
            device("kettle", 2000.0, 1, Some(Mode::Day)),
            device("fridge", 50.0, 24, None),
        ];
        assert_eq!(ids(&sort_devices(&devices).unwrap()), ["fridge", "kettle"]);
    }

    #[test]
    fn test_restricted_before_unrestricted() {
        let devices = [
            device("heater", 2000.0, 5, None),
            device("washer", 100.0, 1, Some(Mode::Night)),
            device("dryer", 100.0, 1, Some(Mode::Day)),
        ];
        assert_eq!(ids(&sort_devices(&devices).unwrap()), ["dryer", "washer", "heater"]);
    }

    #[test]
    fn test_higher_energy_first() {
        let devices = [
            device("a", 100.0, 3, None),
            device("b", 1000.0, 1, None),
            device("c", 200.0, 2, None),
        ];
        assert_eq!(ids(&sort_devices(&devices).unwrap()), ["b", "c", "a"]);
    }

    #[test]
    fn test_id_breaks_ties() {
        let devices = [
            device("c", 100.0, 2, None),
            device("a", 200.0, 1, None),
            device("b", 50.0, 4, None),
        ];
        assert_eq!(ids(&sort_devices(&devices).unwrap()), ["a", "b", "c"]);
    }

    #[test]
    fn test_full_ordering() {
        let devices = [
            device("unrestricted-small", 10.0, 1, None),
            device("night", 500.0, 2, Some(Mode::Night)),
            device("always-on", 50.0, 24, None),
            device("day", 500.0, 4, Some(Mode::Day)),
            device("unrestricted-big", 3000.0, 2, None),
        ];
        assert_eq!(
            ids(&sort_devices(&devices).unwrap()),
            ["always-on", "day", "night", "unrestricted-big", "unrestricted-small"],
        );
    }

    #[test]
    fn test_duplicate_ids_with_different_attributes() {
        let devices = [
            device("twin", 100.0, 1, None),
            device("other", 300.0, 2, Some(Mode::Day)),
            device("twin", 2000.0, 24, None),
        ];
        assert_eq!(
            sort_devices(&devices),
            Err(ConfigurationError::DuplicateDeviceId("twin".to_owned())),
        );
    }

    #[test]
    fn test_empty() {
        assert!(sort_devices(&[]).unwrap().is_empty());
    }
}
