use crate::mac_address::MacAddress;
use crate::reading::{Observation, Reading};
use std::time::SystemTime;

/// A stable MAC address for unit tests.
pub const TEST_MAC: MacAddress = MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);

/// Build a `Reading` with all optional fields set to `None`.
///
/// Tests can override just the fields they care about.
pub fn base_reading() -> Reading {
    Reading {
        version: 1,
        flags: 0,
        temperature: None,
        humidity: None,
        movement: None,
        angle: None,
        battery_voltage: None,
        magnet: None,
        low_battery: false,
    }
}

/// Build an `Observation` of [`base_reading`] at a fixed timestamp, with no
/// RSSI.
pub fn observation_at(mac: MacAddress, timestamp: SystemTime) -> Observation {
    Observation {
        mac,
        timestamp,
        rssi: None,
        reading: base_reading(),
    }
}
