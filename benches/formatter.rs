//! Benchmark suite specifically for the JSON formatter.
//!
//! Isolates formatter performance from async runtime overhead to enable
//! precise measurement and optimization of the formatting logic.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use eye_listener::{
    AliasMap, JsonFormatter, MacAddress, MagnetState, Movement, MovementState, Observation,
    OutputFormatter, Reading, TiltAngle, resolve_name,
};
use std::collections::HashMap;
use std::time::SystemTime;

const TEST_MAC: MacAddress = MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);

/// Observation with every optional field populated.
fn full_observation() -> Observation {
    Observation {
        mac: TEST_MAC,
        timestamp: SystemTime::UNIX_EPOCH,
        rssi: Some(-67),
        reading: Reading {
            version: 1,
            flags: 0xB7,
            temperature: Some(22.28),
            humidity: Some(18),
            movement: Some(Movement {
                state: MovementState::Stationary,
                count: 3275,
            }),
            angle: Some(TiltAngle {
                pitch: 11,
                roll: -57,
            }),
            battery_voltage: Some(3.03),
            magnet: Some(MagnetState::Open),
            low_battery: false,
        },
    }
}

/// Observation from a minimal `01 00` payload.
fn minimal_observation() -> Observation {
    Observation {
        mac: TEST_MAC,
        timestamp: SystemTime::UNIX_EPOCH,
        rssi: None,
        reading: Reading {
            version: 1,
            flags: 0,
            temperature: None,
            humidity: None,
            movement: None,
            angle: None,
            battery_voltage: None,
            magnet: None,
            low_battery: false,
        },
    }
}

/// Benchmark formatter with different observation shapes
fn bench_format_observation_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_observation_shape");
    let formatter = JsonFormatter::new();
    let name = TEST_MAC.to_string();

    group.throughput(Throughput::Elements(1));

    let full = full_observation();
    group.bench_function("full", |b| {
        b.iter(|| {
            let output = formatter.format(black_box(&full), black_box(&name));
            black_box(output)
        })
    });

    let minimal = minimal_observation();
    group.bench_function("minimal", |b| {
        b.iter(|| {
            let output = formatter.format(black_box(&minimal), black_box(&name));
            black_box(output)
        })
    });

    group.finish();
}

/// Benchmark alias resolution (separate from formatting)
fn bench_alias_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("alias_resolution");

    group.throughput(Throughput::Elements(1));

    // No aliases - falls back to MAC string
    let empty_aliases: AliasMap = HashMap::new();
    group.bench_function("no_alias", |b| {
        b.iter(|| {
            let name = resolve_name(black_box(&TEST_MAC), black_box(&empty_aliases));
            black_box(name)
        })
    });

    // With alias for this MAC
    let mut aliases: AliasMap = HashMap::new();
    aliases.insert(TEST_MAC, "Front_Door".to_string());
    group.bench_function("with_alias", |b| {
        b.iter(|| {
            let name = resolve_name(black_box(&TEST_MAC), black_box(&aliases));
            black_box(name)
        })
    });

    // With many aliases (but not for this MAC - tests lookup miss)
    let mut many_aliases: AliasMap = HashMap::new();
    for i in 0..100u8 {
        let mac = MacAddress([0x00, 0x00, 0x00, 0x00, 0x00, i]);
        many_aliases.insert(mac, format!("Device_{}", i));
    }
    group.bench_function("miss_in_100", |b| {
        b.iter(|| {
            let name = resolve_name(black_box(&TEST_MAC), black_box(&many_aliases));
            black_box(name)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_format_observation_shapes,
    bench_alias_resolution
);
criterion_main!(benches);
