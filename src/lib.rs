//! # RetCal
//!
//! Retraction calibration G-code generator. Prints a grid of hollow-square
//! test pillars, each with a distinct combination of retraction distance
//! (X axis), retraction speed (Y axis), and nozzle temperature (Z bands),
//! so the best retraction settings can be read off the printed part.
//!
//! ## Architecture
//!
//! RetCal is organized as a workspace:
//!
//! 1. **retcal-core** - parameter model, tiling geometry, sweep coordination
//! 2. **retcal-gcode** - G-code encoding and program assembly
//! 3. **retcal-settings** - configuration overlay loading
//! 4. **retcal** - the command-line binary

pub use retcal_core::{
    band_temperature, layer_params, tile_params, AxisPlan, CalibrationError, CalibrationResult,
    DerivedConstants, Instruction, InstructionSink, LayerParams, ParameterError, Point,
    RecordingSink, SweepConfig, SweepCoordinator, TileParams,
};

pub use retcal_gcode::{GcodeWriter, ProgramGenerator};

pub use retcal_settings::{load_or_default, load_overlay, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr (stdout carries the generated G-code)
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
