//! # xrd-cli
//!
//! Command-line front end over [`xrd_codec`]. Reads one payload from a file
//! or standard input, converts it and returns the result for printing.
//!
//! Diagnostics go to stderr through `tracing`, so stdout only ever carries
//! the converted document.

pub mod config;

use anyhow::{Context, anyhow};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use xrd_codec::{Direction, converter_for};

pub use config::{CliConfig, DirectionArg};

/// Initializes logging on stderr.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("xrd_codec={},xrd_cli={}", level, level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Reads the whole payload from `path`, or from stdin when `None`.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read standard input")?;
            Ok(buffer)
        }
    }
}

/// Picks the conversion direction for `input`.
pub fn resolve_direction(arg: DirectionArg, input: &str) -> anyhow::Result<Direction> {
    if let Some(direction) = arg.fixed() {
        return Ok(direction);
    }
    Direction::detect(input).ok_or_else(|| {
        anyhow!("Cannot detect the payload format: expected JSON ('{{' or '[') or XML ('<')")
    })
}

/// Converts one payload according to the configuration.
///
/// With `legacy_payload` set, conversion failures are reported through the
/// legacy string contract instead of an error.
pub fn run(config: &CliConfig, input: &str) -> anyhow::Result<String> {
    let direction = resolve_direction(config.direction, input)?;
    info!(%direction, bytes = input.len(), "Converting payload");

    let converter = converter_for(direction, config.codec_options());
    if config.legacy_payload {
        return Ok(converter.convert_payload(input));
    }

    let output = converter
        .convert(input)
        .with_context(|| format!("Conversion {} failed", direction))?;
    debug!(bytes = output.len(), "Conversion finished");
    Ok(output)
}
