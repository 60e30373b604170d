//! `eye-listener` library.
//!
//! The binary (`src/main.rs`) is responsible for CLI parsing and process
//! exit codes. The core "business logic" lives in [`crate::app`] where it
//! can be tested deterministically with injected scanner + injected output
//! streams. The protocol decoder itself is [`crate::protocol::decode`], a
//! pure function with no Bluetooth dependencies.

pub mod alias;
pub mod app;
pub mod mac_address;
pub mod output;
pub mod protocol;
pub mod reading;
pub mod registry;
pub mod scanner;
pub mod throttle;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types at the crate root
pub use alias::{Alias, AliasMap, parse_alias, resolve_name, to_map};
pub use mac_address::MacAddress;
pub use output::OutputFormatter;
pub use output::json::JsonFormatter;
pub use protocol::{EYE_COMPANY_ID, PROTOCOL_VERSION, Reject, decode};
pub use reading::{MagnetState, Movement, MovementState, Observation, Reading, TiltAngle};
pub use registry::{DeviceRecord, DeviceRegistry};
pub use scanner::{Backend, ObservationResult, ScanError};
pub use throttle::{Throttle, parse_duration};
