//! # RetCal Core
//!
//! Parameter model, bed tiling geometry, and sweep coordination for the
//! retraction calibration pattern. The pattern is a grid of hollow-square
//! test pillars: retraction distance varies along X, retraction speed along
//! Y, and nozzle temperature in bands along Z.
//!
//! The core never produces machine text; it drives a typed
//! [`sink::InstructionSink`] that a consumer (such as `retcal-gcode`)
//! encodes however its controller expects.

pub mod error;
pub mod geometry;
pub mod params;
pub mod shape;
pub mod sink;
pub mod sweep;

pub use error::{CalibrationError, CalibrationResult, ParameterError, ParameterResult};
pub use geometry::{plan_axis, AxisPlan, Point};
pub use params::{
    band_temperature, layer_params, tile_params, DerivedConstants, LayerParams, SweepConfig,
    TileParams,
};
pub use shape::{emit_pillar, PillarSpec, BAND_MARKER_SHRINK};
pub use sink::{Instruction, InstructionSink, RecordingSink};
pub use sweep::SweepCoordinator;
