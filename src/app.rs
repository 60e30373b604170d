//! Core application runner (business logic) for `eye-listener`.
//!
//! This module is intentionally decoupled from CLI parsing and process exit
//! codes so it can be tested deterministically with an injected scanner and
//! injected output streams.

use crate::alias::{Alias, AliasMap};
use crate::output::OutputFormatter;
use crate::output::json::JsonFormatter;
use crate::reading::Observation;
use crate::registry::DeviceRegistry;
use crate::scanner::{Backend, ObservationResult, ScanError};
use crate::throttle::Throttle;
use clap::Parser;
use std::future::Future;
use std::io;
use std::io::Write;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Configuration for the core run loop.
#[derive(Parser, Debug, Clone)]
#[command(author, about, version)]
pub struct Options {
    /// Specify human-readable alias for a sensor.
    /// Format: --alias DE:AD:BE:EF:00:00=FrontDoor
    #[arg(long = "alias", value_parser = crate::alias::parse_alias, value_name = "ALIAS")]
    pub aliases: Vec<Alias>,

    /// Verbose output, report new sensors and payload rejections on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Throttle events per sensor to at most one per interval.
    /// Accepts duration with suffix: 3s, 1m, 500ms, 2h.
    /// Without suffix, value is interpreted as seconds.
    #[arg(long, value_parser = crate::throttle::parse_duration)]
    pub throttle: Option<Duration>,

    /// Bluetooth scanner backend to use
    #[arg(long, default_value_t, value_enum)]
    pub backend: Backend,
}

/// Errors returned by the core run loop.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Scanner abstraction to enable deterministic unit tests without Bluetooth hardware.
pub trait Scanner: Send + Sync {
    fn start_scan(
        &self,
        backend: Backend,
        verbose: bool,
    ) -> Pin<
        Box<dyn Future<Output = Result<mpsc::Receiver<ObservationResult>, ScanError>> + Send + '_>,
    >;
}

/// Real scanner implementation that delegates to the compiled-in backends.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealScanner;

impl Scanner for RealScanner {
    fn start_scan(
        &self,
        backend: Backend,
        verbose: bool,
    ) -> Pin<
        Box<dyn Future<Output = Result<mpsc::Receiver<ObservationResult>, ScanError>> + Send + '_>,
    > {
        Box::pin(async move { crate::scanner::start_scan(backend, verbose).await })
    }
}

fn write_observation(
    formatter: &dyn OutputFormatter,
    observation: &Observation,
    name: &str,
    out: &mut dyn Write,
) -> io::Result<()> {
    let line = formatter.format(observation, name);
    writeln!(out, "{line}")
}

/// Run the core processing loop, writing JSON lines to `out` and verbose
/// diagnostics to `err`.
///
/// Each observation is recorded in the devices-seen registry, throttled per
/// sensor when an interval is configured, and formatted onto `out`. Payload
/// rejections and newly discovered sensors are reported on `err` only when
/// `options.verbose` is true.
pub async fn run_with_io(
    options: Options,
    scanner: &dyn Scanner,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), RunError> {
    let aliases: AliasMap = crate::alias::to_map(&options.aliases);
    let formatter = JsonFormatter::new();

    // Create throttle if interval is specified
    let mut throttle = options.throttle.map(Throttle::new);
    let mut registry = DeviceRegistry::new();

    let mut observations = scanner.start_scan(options.backend, options.verbose).await?;

    while let Some(result) = observations.recv().await {
        match result {
            Ok(observation) => {
                if registry.observe(&observation) && options.verbose {
                    writeln!(err, "new sensor: {}", observation.mac)?;
                }

                let should_emit = throttle
                    .as_mut()
                    .is_none_or(|t: &mut Throttle| t.should_emit(observation.mac));

                if should_emit {
                    let name = crate::alias::resolve_name(&observation.mac, &aliases);
                    write_observation(&formatter, &observation, &name, out)?;
                }
            }
            Err(reject) => {
                if options.verbose {
                    writeln!(err, "{reject}")?;
                }
            }
        }
    }

    if options.verbose {
        writeln!(err, "scan ended, {} sensors observed", registry.len())?;
    }

    Ok(())
}
