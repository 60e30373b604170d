//! Decoder for the Teltonika EYE sensor advertisement payload.
//!
//! EYE sensors broadcast their readings as manufacturer-specific data in BLE
//! advertisements. The payload is a protocol-version byte, a flags byte, and
//! a variable-length tail whose contents are gated bit-by-bit by the flags.
//! [`decode`] turns one such payload into a [`Reading`] or rejects it with a
//! typed reason.

use crate::reading::{MagnetState, Movement, MovementState, Reading, TiltAngle};
use thiserror::Error;

/// Bluetooth company identifier of Teltonika Telematics.
///
/// Advertisements carry the identifier little-endian on the wire; this is
/// the numeric value used for manufacturer-data lookup.
pub const EYE_COMPANY_ID: u16 = 0x089A;

/// The only payload version this decoder understands. Advertisements with
/// any other version byte are rejected outright rather than half-parsed
/// under wrong assumptions.
pub const PROTOCOL_VERSION: u8 = 0x01;

// Flag bit positions, fixed by the device protocol (bit 0 = LSB).
const FLAG_TEMPERATURE: u8 = 0;
const FLAG_HUMIDITY: u8 = 1;
const FLAG_MAGNETIC_SENSOR: u8 = 2;
const FLAG_MAGNETIC_STATE: u8 = 3;
const FLAG_MOVEMENT_COUNTER: u8 = 4;
const FLAG_MOVEMENT_ANGLE: u8 = 5;
const FLAG_LOW_BATTERY: u8 = 6;
const FLAG_BATTERY_VOLTAGE: u8 = 7;

/// Mask for the 15-bit movement count; the remaining top bit is the
/// moving/stationary state.
const MOVEMENT_COUNT_MASK: u16 = 0x7FFF;

/// Reasons an advertisement payload is not decoded.
///
/// `NotOurDevice` is the common case on a busy radio and is a filter
/// outcome, not a fault: callers are expected to skip and keep scanning.
/// The other two indicate a payload that claimed to be ours but cannot be
/// safely interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Reject {
    /// Manufacturer id belongs to some other vendor.
    #[error("manufacturer id {0:#06x} is not a Teltonika EYE sensor")]
    NotOurDevice(u16),
    /// Payload is shorter than the two-byte header.
    #[error("payload too short: {0} bytes, need at least 2")]
    TooShort(usize),
    /// Payload version this decoder does not support.
    #[error("unsupported protocol version {0}")]
    UnsupportedVersion(u8),
}

fn flag_set(flags: u8, bit: u8) -> bool {
    flags & (1 << bit) != 0
}

/// Decode EYE manufacturer data into a [`Reading`].
///
/// Pure and stateless: no I/O, no shared state, safe to call concurrently.
/// The three header checks run in order and the first failure wins; a
/// rejected payload never yields a partial result.
///
/// Byte-width fields are consumed from a running cursor in flag-bit order
/// (temperature, humidity, movement counter, movement angle, battery
/// voltage). A flagged field with too few trailing bytes is left absent
/// without failing the decode and without advancing the cursor; devices
/// with shorter-than-expected payloads still produce the fields that did
/// fit. The magnetic and low-battery flags carry no payload bytes and are
/// read from the flags byte alone.
pub fn decode(manufacturer_id: u16, data: &[u8]) -> Result<Reading, Reject> {
    if manufacturer_id != EYE_COMPANY_ID {
        return Err(Reject::NotOurDevice(manufacturer_id));
    }
    if data.len() < 2 {
        return Err(Reject::TooShort(data.len()));
    }
    let version = data[0];
    if version != PROTOCOL_VERSION {
        return Err(Reject::UnsupportedVersion(version));
    }
    let flags = data[1];

    let mut reading = Reading {
        version,
        flags,
        temperature: None,
        humidity: None,
        movement: None,
        angle: None,
        battery_voltage: None,
        magnet: None,
        low_battery: flag_set(flags, FLAG_LOW_BATTERY),
    };

    let mut offset = 2;

    if flag_set(flags, FLAG_TEMPERATURE) && offset + 2 <= data.len() {
        // Big-endian hundredths of a degree Celsius.
        let raw = u16::from_be_bytes([data[offset], data[offset + 1]]);
        reading.temperature = Some(f64::from(raw) / 100.0);
        offset += 2;
    }

    if flag_set(flags, FLAG_HUMIDITY) && offset + 1 <= data.len() {
        // Percent, reported as-is; the device does not clamp to 0-100.
        reading.humidity = Some(data[offset]);
        offset += 1;
    }

    if flag_set(flags, FLAG_MOVEMENT_COUNTER) && offset + 2 <= data.len() {
        let raw = u16::from_be_bytes([data[offset], data[offset + 1]]);
        let state = if raw & !MOVEMENT_COUNT_MASK != 0 {
            MovementState::Moving
        } else {
            MovementState::Stationary
        };
        reading.movement = Some(Movement {
            state,
            count: raw & MOVEMENT_COUNT_MASK,
        });
        offset += 2;
    }

    if flag_set(flags, FLAG_MOVEMENT_ANGLE) && offset + 3 <= data.len() {
        let pitch = data[offset] as i8;
        let roll = i16::from_be_bytes([data[offset + 1], data[offset + 2]]);
        reading.angle = Some(TiltAngle { pitch, roll });
        offset += 3;
    }

    if flag_set(flags, FLAG_BATTERY_VOLTAGE) && offset + 1 <= data.len() {
        // Raw 0-255 maps to 2000-4550 mV in 10 mV steps.
        let millivolts = 2000 + u16::from(data[offset]) * 10;
        reading.battery_voltage = Some(f64::from(millivolts) / 1000.0);
    }

    if flag_set(flags, FLAG_MAGNETIC_SENSOR) {
        reading.magnet = Some(MagnetState::from_field_detected(flag_set(
            flags,
            FLAG_MAGNETIC_STATE,
        )));
    }

    Ok(reading)
}
