//! BLE scanner abstraction for EYE sensors.
//!
//! A trait-less dispatch layer over the compiled-in Bluetooth backends.
//! Both backends feed raw manufacturer data into [`crate::protocol::decode`]
//! and emit observations on a bounded channel; everything protocol-specific
//! lives in the decoder.

#[cfg(feature = "bluer")]
pub mod bluer;

#[cfg(feature = "hci")]
pub mod hci;

use crate::protocol::Reject;
use crate::reading::Observation;
use thiserror::Error;
use tokio::sync::mpsc;

/// Convenience alias for decoded observations or decode rejections.
///
/// `Reject::NotOurDevice` never appears here: foreign advertisements are a
/// filter condition and the backends drop them before the channel. The
/// rejects that do arrive (short payload, unknown version) are forwarded
/// only in verbose mode.
pub type ObservationResult = Result<Observation, Reject>;

/// Error type for scanner operations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Bluetooth/adapter related error
    #[error("Bluetooth error: {0}")]
    Bluetooth(String),
    /// Payload rejection surfaced as a scan failure
    #[error("Decode error: {0}")]
    Decode(#[from] Reject),
    /// Backend not available (not compiled in)
    #[allow(dead_code)]
    #[error("Backend '{0}' not available (not compiled in)")]
    BackendNotAvailable(String),
}

/// Teltonika company identifier as it appears on the wire (little-endian),
/// used for advertisement pattern matching.
#[cfg(feature = "bluer")]
pub const EYE_COMPANY_ID_BYTES: [u8; 2] = [0x9A, 0x08];

/// Bluetooth manufacturer-specific data type (AD type 0xFF)
#[cfg(any(feature = "bluer", feature = "hci"))]
pub const MANUFACTURER_DATA_TYPE: u8 = 0xFF;

/// Channel buffer size for observation results.
pub const OBSERVATION_CHANNEL_BUFFER_SIZE: usize = 100;

/// Available scanner backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// BlueZ D-Bus backend (requires bluetoothd daemon)
    #[cfg(feature = "bluer")]
    Bluer,
    /// Raw HCI socket backend (direct kernel access, no daemon required)
    #[cfg(feature = "hci")]
    Hci,
}

impl Default for Backend {
    fn default() -> Self {
        #[cfg(feature = "bluer")]
        return Backend::Bluer;
        #[cfg(all(feature = "hci", not(feature = "bluer")))]
        return Backend::Hci;
        #[cfg(not(any(feature = "bluer", feature = "hci")))]
        compile_error!("At least one backend feature must be enabled");
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "bluer")]
            Backend::Bluer => write!(f, "bluer"),
            #[cfg(feature = "hci")]
            Backend::Hci => write!(f, "hci"),
            #[cfg(not(any(feature = "bluer", feature = "hci")))]
            _ => unreachable!("Backend enum has no variants when no backend features are enabled"),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            #[cfg(feature = "bluer")]
            "bluer" | "bluez" => Ok(Backend::Bluer),
            #[cfg(feature = "hci")]
            "hci" | "raw" => Ok(Backend::Hci),
            _ => Err(format!("Unknown backend: {}", s)),
        }
    }
}

/// Start scanning for EYE sensors using the specified backend.
///
/// Dispatches to the backend implementation and returns the receiving end
/// of the observation channel. Scanning continues until the process exits.
///
/// # Arguments
/// * `backend` - The scanner backend to use
/// * `verbose` - If true, decode rejections are sent as Err values;
///   otherwise they're silently dropped.
pub async fn start_scan(
    backend: Backend,
    verbose: bool,
) -> Result<mpsc::Receiver<ObservationResult>, ScanError> {
    match backend {
        #[cfg(feature = "bluer")]
        Backend::Bluer => bluer::start_scan(verbose).await,
        #[cfg(feature = "hci")]
        Backend::Hci => hci::start_scan(verbose).await,
    }
}
