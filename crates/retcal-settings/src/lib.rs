//! # RetCal Settings
//!
//! Optional configuration overlay for the calibration generator: a JSON or
//! TOML file whose keys override [`retcal_core::SweepConfig`] defaults
//! field-wise.

pub mod error;
pub mod overlay;

pub use error::{SettingsError, SettingsResult};
pub use overlay::{load_or_default, load_overlay};
