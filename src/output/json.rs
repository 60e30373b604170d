//! JSON lines output formatter.
//!
//! Emits one self-contained JSON object per observation:
//!
//! ```json
//! {"device":{"address":"AA:BB:CC:DD:EE:FF","name":"Front Door","rssi":-67},
//!  "reading":{"version":1,"flags":183,"temperature":22.28,...},
//!  "timestamp":"2024-05-03T11:22:33Z"}
//! ```
//!
//! Fields absent from the advertisement are omitted from `reading` rather
//! than emitted as null.

use crate::output::OutputFormatter;
use crate::reading::Observation;
use serde_json::json;
use std::time::SystemTime;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Formatter producing one compact JSON object per observation.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

fn rfc3339(timestamp: SystemTime) -> String {
    OffsetDateTime::from(timestamp)
        .format(&Rfc3339)
        .expect("system time representable as RFC 3339")
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, observation: &Observation, name: &str) -> String {
        json!({
            "device": {
                "address": observation.mac.to_string(),
                "name": name,
                "rssi": observation.rssi,
            },
            "timestamp": rfc3339(observation.timestamp),
            "reading": observation.reading,
        })
        .to_string()
    }
}
