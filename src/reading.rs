//! Decoded EYE sensor reading and the observation envelope.

use crate::mac_address::MacAddress;
use serde::Serialize;

/// Moving/stationary state carried in the top bit of the movement counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementState {
    Moving,
    Stationary,
}

/// Movement counter field: state bit plus a 15-bit event count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Movement {
    pub state: MovementState,
    /// Number of movement events (0-32767, wraps around on the device).
    pub count: u16,
}

/// Pitch and roll reported by the tilt sensor, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TiltAngle {
    pub pitch: i8,
    pub roll: i16,
}

/// Logical door/window state inferred from the magnetic (reed) sensor.
///
/// The protocol reports whether a magnetic field is physically detected.
/// Mapping that onto open/closed has been inverted more than once in the
/// field, so the mapping lives in exactly one place:
/// [`MagnetState::from_field_detected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnetState {
    Open,
    Closed,
}

impl MagnetState {
    /// Canonical polarity: field detected means the magnet sits against the
    /// reed switch, i.e. the door/window is closed.
    pub fn from_field_detected(detected: bool) -> Self {
        if detected {
            MagnetState::Closed
        } else {
            MagnetState::Open
        }
    }
}

/// A decoded reading from a Teltonika EYE sensor advertisement.
///
/// Optional fields are present only when the corresponding flag bit was set
/// in the payload and enough bytes remained to read the value. Units:
/// - Temperature in Celsius (two decimal digits of precision)
/// - Humidity in percent (0-100 nominal, reported as-is)
/// - Tilt angles in degrees
/// - Battery voltage in Volts
///
/// A `Reading` is constructed once per decode and never mutated. It carries
/// no device identity; see [`Observation`] for the envelope that does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Protocol version byte (currently always 1).
    pub version: u8,
    /// Raw flags byte, kept for diagnostics.
    pub flags: u8,
    /// Temperature in Celsius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Relative humidity in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<u8>,
    /// Movement state and event count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement: Option<Movement>,
    /// Pitch and roll in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<TiltAngle>,
    /// Battery voltage in Volts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_voltage: Option<f64>,
    /// Door/window state from the magnetic sensor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnet: Option<MagnetState>,
    /// Low-battery indicator, independent of the voltage field.
    pub low_battery: bool,
}

/// A reading paired with where and when it was captured.
///
/// This is what flows through the scan pipeline. Tracking a sensor over time
/// is the consumer's job; the MAC address here is the key to do it with.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// MAC address of the advertising sensor.
    pub mac: MacAddress,
    /// When the advertisement was received.
    pub timestamp: std::time::SystemTime,
    /// Received signal strength in dBm, when the backend reports it.
    pub rssi: Option<i16>,
    /// The decoded sensor reading.
    pub reading: Reading,
}

impl Observation {
    /// Wrap a decoded reading with capture metadata, stamped with the
    /// current time.
    pub fn new(mac: MacAddress, rssi: Option<i16>, reading: Reading) -> Self {
        Self {
            mac,
            timestamp: std::time::SystemTime::now(),
            rssi,
            reading,
        }
    }
}
