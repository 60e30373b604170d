//! Keyed store of sensors seen during the current run.
//!
//! The decoder itself is stateless, so "which sensors have we heard from,
//! and when" lives here, owned by the scan-ingestion loop. Consumers that
//! need identity over time (dashboards, bridges) key on the MAC address the
//! same way.

use crate::mac_address::MacAddress;
use crate::reading::{Observation, Reading};
use std::collections::HashMap;
use std::time::{Duration, SystemTime};

/// Per-device bookkeeping: when it appeared, when it last spoke, how many
/// readings it produced, and what the latest reading was.
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub first_seen: SystemTime,
    pub last_seen: SystemTime,
    pub reading_count: u64,
    pub last_reading: Reading,
}

/// Address-keyed store of every sensor observed in this run.
///
/// Updated only by the ingestion loop; the decoder never touches it.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: HashMap<MacAddress, DeviceRecord>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation. Returns `true` if this device has not been
    /// seen before in this run.
    pub fn observe(&mut self, observation: &Observation) -> bool {
        match self.devices.get_mut(&observation.mac) {
            Some(record) => {
                record.last_seen = observation.timestamp;
                record.reading_count += 1;
                record.last_reading = observation.reading.clone();
                false
            }
            None => {
                self.devices.insert(
                    observation.mac,
                    DeviceRecord {
                        first_seen: observation.timestamp,
                        last_seen: observation.timestamp,
                        reading_count: 1,
                        last_reading: observation.reading.clone(),
                    },
                );
                true
            }
        }
    }

    pub fn get(&self, mac: &MacAddress) -> Option<&DeviceRecord> {
        self.devices.get(mac)
    }

    /// Number of distinct sensors observed so far.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Drop devices not heard from within `timeout` of `now` and return
    /// their addresses. A device with a last-seen time in the future
    /// (clock adjustment) counts as fresh.
    pub fn prune_stale(&mut self, timeout: Duration, now: SystemTime) -> Vec<MacAddress> {
        let stale: Vec<MacAddress> = self
            .devices
            .iter()
            .filter(|(_, record)| {
                now.duration_since(record.last_seen)
                    .is_ok_and(|age| age > timeout)
            })
            .map(|(mac, _)| *mac)
            .collect();

        for mac in &stale {
            self.devices.remove(mac);
        }

        stale
    }
}
