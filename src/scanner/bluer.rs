//! BlueZ D-Bus backend for EYE sensor scanning.
//!
//! Uses the `bluer` crate to talk to the BlueZ daemon over D-Bus. An
//! advertisement monitor pattern narrows delivery to packets whose
//! manufacturer data starts with the Teltonika company identifier, so the
//! decoder sees mostly relevant traffic.

use super::{
    EYE_COMPANY_ID_BYTES, MANUFACTURER_DATA_TYPE, OBSERVATION_CHANNEL_BUFFER_SIZE,
    ObservationResult, ScanError,
};
use crate::mac_address::MacAddress;
use crate::protocol::{self, Reject};
use crate::reading::Observation;
use bluer::monitor::{Monitor, MonitorEvent, Pattern};
use bluer::{Adapter, Address, Session};
use futures::StreamExt;
use log::{debug, warn};
use tokio::sync::mpsc;

impl From<bluer::Error> for ScanError {
    fn from(err: bluer::Error) -> Self {
        ScanError::Bluetooth(err.to_string())
    }
}

/// Start scanning for EYE sensors using the BlueZ D-Bus backend.
///
/// Initializes the Bluetooth adapter and registers a passive advertisement
/// monitor. Decoded observations are sent through the returned channel.
/// Runs indefinitely until interrupted.
///
/// # Arguments
/// * `verbose` - If true, decode rejections are sent as Err values;
///   otherwise they're silently dropped.
pub async fn start_scan(verbose: bool) -> Result<mpsc::Receiver<ObservationResult>, ScanError> {
    let session = Session::new().await?;
    let adapter = session.default_adapter().await?;
    adapter.set_powered(true).await?;
    debug!("scanning via adapter {}", adapter.name());

    let (tx, rx) = mpsc::channel(OBSERVATION_CHANNEL_BUFFER_SIZE);

    // Match only advertisements whose manufacturer data leads with the
    // Teltonika company identifier (little-endian on the wire).
    let pattern = Pattern {
        data_type: MANUFACTURER_DATA_TYPE,
        start_position: 0,
        content: EYE_COMPANY_ID_BYTES.to_vec(),
    };

    let monitor_manager = adapter.monitor().await?;
    let mut monitor_handle = monitor_manager
        .register(Monitor {
            patterns: Some(vec![pattern]),
            ..Default::default()
        })
        .await?;

    // Spawn a task that owns all Bluetooth state and runs the event loop
    tokio::spawn(async move {
        // Keep all Bluetooth state alive by moving it into this task
        let _session = session;
        let _monitor_manager = monitor_manager;

        while let Some(event) = monitor_handle.next().await {
            if let MonitorEvent::DeviceFound(device_id) = event
                && let Err(e) = process_device(&adapter, device_id.device, &tx, verbose).await
            {
                // Adapter errors go to the operational log, never to the
                // observation channel.
                warn!("failed to process device: {e}");
            }
        }
    });

    Ok(rx)
}

/// Process a discovered Bluetooth device and extract EYE sensor readings.
///
/// Reads the device's manufacturer data and RSSI, runs every manufacturer
/// entry through the decoder, and forwards the outcome. Foreign company
/// identifiers are skipped silently.
async fn process_device(
    adapter: &Adapter,
    address: Address,
    tx: &mpsc::Sender<ObservationResult>,
    verbose: bool,
) -> Result<(), ScanError> {
    let device = adapter.device(address)?;
    let mac: MacAddress = address.into();

    let manufacturer_data = match device.manufacturer_data().await? {
        Some(data) => data,
        None => return Ok(()), // No manufacturer data available
    };

    let rssi = device.rssi().await?;

    for (company_id, payload) in &manufacturer_data {
        match protocol::decode(*company_id, payload) {
            Ok(reading) => {
                let _ = tx.send(Ok(Observation::new(mac, rssi, reading))).await;
            }
            Err(Reject::NotOurDevice(_)) => {
                debug!("ignoring manufacturer {company_id:#06x} from {mac}");
            }
            Err(reject) if verbose => {
                let _ = tx.send(Err(reject)).await;
            }
            Err(_) => {}
        }
    }

    Ok(())
}
