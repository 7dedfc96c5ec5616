//! Sweep parameters and derived constants.
//!
//! `SweepConfig` holds every user-facing input: bed geometry, print
//! characteristics, the three sweep axes (retraction distance / retraction
//! speed / temperature), and machine environment values used by the program
//! prologue. `DerivedConstants` is computed from it exactly once, before the
//! sweep runs. Per-band, per-layer, and per-tile values are pure functions of
//! their indices so recomputation always yields the same result.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{ParameterError, ParameterResult};
use crate::geometry::{plan_axis, AxisPlan, Point};

/// Full sweep configuration.
///
/// Every field can be overridden individually from a settings overlay;
/// missing fields keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Bed width (mm).
    pub bed_size_x: f64,
    /// Bed depth (mm).
    pub bed_size_y: f64,
    /// Keep-out margin on both X edges (mm).
    pub margin_x: f64,
    /// Keep-out margin on both Y edges (mm).
    pub margin_y: f64,

    /// Nozzle diameter (mm).
    pub nozzle_diam: f64,
    /// Layer height (mm).
    pub layer_height: f64,
    /// Extrusion line width (mm).
    pub line_width: f64,
    /// Filament diameter (mm).
    pub filament_diam: f64,

    /// Retraction distance for tile column 0 (mm).
    pub ret_d_start: f64,
    /// Retraction distance increment per X tile (mm).
    pub ret_d_step: f64,
    /// Retraction speed for tile row 0 (mm/s).
    pub ret_spd_start: f64,
    /// Retraction speed increment per Y tile (mm/s).
    pub ret_spd_step: f64,
    /// Nozzle temperature for Z band 0 (Celsius).
    pub temp_start: f64,
    /// Temperature increment per Z band (Celsius, usually negative).
    pub temp_step: f64,

    /// Tile count along X (retraction distance axis).
    pub steps_x: u32,
    /// Tile count along Y (retraction speed axis).
    pub steps_y: u32,
    /// Temperature band count along Z.
    pub steps_z: u32,

    /// Side of the printed square pillar (mm).
    pub square_size: f64,
    /// Upper bound on the tile slot width/depth (mm).
    pub max_tile_span: f64,
    /// Height of one temperature band (mm).
    pub band_height: f64,

    /// Bed temperature (Celsius).
    pub temp_bed: f64,
    /// Fan PWM for the first layer (0-255).
    pub fan_spd_initial: u8,
    /// Fan PWM for all other layers (0-255).
    pub fan_spd_other: u8,

    /// Feedrate for non-extruding travel (mm/min).
    pub feed_travel: f64,
    /// Feedrate while printing (mm/min).
    pub feed_print: f64,
    /// Feedrate for layer changes (mm/min).
    pub feed_z: f64,

    /// Maximum X acceleration (mm/s^2).
    pub accel_x: f64,
    /// Maximum Y acceleration (mm/s^2).
    pub accel_y: f64,
    /// Maximum Z acceleration (mm/s^2).
    pub accel_z: f64,
    /// Maximum extruder acceleration (mm/s^2).
    pub accel_e: f64,
    /// Maximum X feedrate (mm/s).
    pub max_feed_x: f64,
    /// Maximum Y feedrate (mm/s).
    pub max_feed_y: f64,
    /// Maximum Z feedrate (mm/s).
    pub max_feed_z: f64,
    /// Maximum extruder feedrate (mm/s).
    pub max_feed_e: f64,

    /// Nozzle priming snippet emitted verbatim in the prologue.
    pub intro_prime: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            bed_size_x: 230.0,
            bed_size_y: 210.0,
            margin_x: 20.0,
            margin_y: 20.0,

            nozzle_diam: 0.4,
            layer_height: 0.16,
            line_width: 0.45,
            filament_diam: 1.75,

            ret_d_start: 1.0,
            ret_d_step: 0.25,
            ret_spd_start: 10.0,
            ret_spd_step: 2.5,
            temp_start: 210.0,
            temp_step: -5.0,

            steps_x: 20,
            steps_y: 20,
            steps_z: 5,

            square_size: 4.0,
            max_tile_span: 20.0,
            band_height: 5.0,

            temp_bed: 55.0,
            fan_spd_initial: 0,
            fan_spd_other: 127,

            feed_travel: 4800.0,
            feed_print: 3000.0,
            feed_z: 600.0,

            accel_x: 1000.0,
            accel_y: 1000.0,
            accel_z: 500.0,
            accel_e: 10000.0,
            max_feed_x: 120.0,
            max_feed_y: 120.0,
            max_feed_z: 10.0,
            max_feed_e: 120.0,

            intro_prime: "G1 Y-3.0 F1000.0 ; go outside print area\n\
                          G92 E0.0\n\
                          G1 X60.0 E9.0 F1000.0 ; intro line\n\
                          G1 X100.0 E12.5 F1000.0 ; intro line\n\
                          G92 E0.0"
                .to_string(),
        }
    }
}

impl SweepConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> ParameterResult<()> {
        for (name, value) in [
            ("bed_size_x", self.bed_size_x),
            ("bed_size_y", self.bed_size_y),
            ("layer_height", self.layer_height),
            ("line_width", self.line_width),
            ("filament_diam", self.filament_diam),
            ("square_size", self.square_size),
            ("max_tile_span", self.max_tile_span),
            ("band_height", self.band_height),
        ] {
            if value <= 0.0 {
                return Err(ParameterError::InvalidDimensions(format!(
                    "{} must be > 0, got {}",
                    name, value
                )));
            }
        }

        if self.margin_x < 0.0 || self.margin_y < 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "margin".to_string(),
                reason: "margins must be >= 0".to_string(),
            });
        }

        for (name, value) in [
            ("steps_x", self.steps_x),
            ("steps_y", self.steps_y),
            ("steps_z", self.steps_z),
        ] {
            if value == 0 {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: "step count must be >= 1".to_string(),
                });
            }
        }

        if self.bed_size_x <= 2.0 * self.margin_x || self.bed_size_y <= 2.0 * self.margin_y {
            return Err(ParameterError::InvalidDimensions(
                "margins leave no usable bed span".to_string(),
            ));
        }

        Ok(())
    }
}

/// Constants derived from a [`SweepConfig`] exactly once, before the sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedConstants {
    /// Tile slot placement along X.
    pub x_plan: AxisPlan,
    /// Tile slot placement along Y.
    pub y_plan: AxisPlan,
    /// Extruder feed per mm of planar travel (mm of filament / mm).
    pub e_per_mm: f64,
    /// Layer count in one temperature band.
    pub layers_per_band: u32,
}

impl DerivedConstants {
    /// Compute all derived constants.
    pub fn compute(cfg: &SweepConfig) -> Self {
        let x_plan = plan_axis(cfg.bed_size_x, cfg.margin_x, cfg.steps_x, cfg.max_tile_span);
        let y_plan = plan_axis(cfg.bed_size_y, cfg.margin_y, cfg.steps_y, cfg.max_tile_span);

        // Extrusion cross-section is a rectangle with semicircular ends:
        // area ~ h * (w - h * (1 - pi/4)). Dividing by the filament
        // cross-section gives filament feed per mm of travel.
        let mm3_per_mm =
            cfg.layer_height * (cfg.line_width - cfg.layer_height * (1.0 - 0.25 * PI));
        let filament_r = cfg.filament_diam / 2.0;
        let filament_area = PI * filament_r * filament_r;
        let e_per_mm = mm3_per_mm / filament_area;

        let layers_per_band = (cfg.band_height / cfg.layer_height).round().max(1.0) as u32;

        Self {
            x_plan,
            y_plan,
            e_per_mm,
            layers_per_band,
        }
    }

    /// Configuration sanity warnings.
    ///
    /// A pillar wider than its tile slot means neighbouring pillars overlap.
    /// This is reported but does not abort the run, so an operator can still
    /// get a (crowded) pattern out of an odd configuration.
    pub fn sanity_warnings(&self, cfg: &SweepConfig) -> Vec<String> {
        let mut warnings = Vec::new();
        if cfg.square_size >= self.x_plan.step {
            warnings.push(format!(
                "square_size {} is larger than the x tile slot width {}",
                cfg.square_size, self.x_plan.step
            ));
        }
        if cfg.square_size >= self.y_plan.step {
            warnings.push(format!(
                "square_size {} is larger than the y tile slot depth {}",
                cfg.square_size, self.y_plan.step
            ));
        }
        warnings
    }

    /// Total layer count for the whole pattern.
    pub fn total_layers(&self, cfg: &SweepConfig) -> u32 {
        self.layers_per_band * cfg.steps_z
    }
}

/// Nozzle temperature for a Z band.
pub fn band_temperature(cfg: &SweepConfig, z_index: u32) -> f64 {
    cfg.temp_start + cfg.temp_step * z_index as f64
}

/// Values recomputed once per layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerParams {
    /// Absolute layer index, counted across all bands.
    pub index: u32,
    /// Z coordinate of the layer (mm).
    pub coord_z: f64,
    /// Fan PWM for this layer (0 = off).
    pub fan_speed: u8,
}

/// Compute per-layer values from the absolute layer index.
pub fn layer_params(cfg: &SweepConfig, abs_index: u32) -> LayerParams {
    LayerParams {
        index: abs_index,
        coord_z: cfg.layer_height * (abs_index + 1) as f64,
        fan_speed: if abs_index == 0 {
            cfg.fan_spd_initial
        } else {
            cfg.fan_spd_other
        },
    }
}

/// Values recomputed once per tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileParams {
    pub x_index: u32,
    pub y_index: u32,
    pub z_index: u32,
    /// Tile slot origin on the bed.
    pub origin: Point,
    /// Retraction distance magnitude (mm); the sink applies the sign.
    pub ret_distance: f64,
    /// Retraction speed (mm/s).
    pub ret_speed: f64,
    /// Retraction feedrate (mm/min).
    pub ret_feed: f64,
}

/// Compute per-tile values from the tile indices.
pub fn tile_params(
    cfg: &SweepConfig,
    consts: &DerivedConstants,
    x_index: u32,
    y_index: u32,
    z_index: u32,
) -> TileParams {
    let ret_distance = cfg.ret_d_start + cfg.ret_d_step * x_index as f64;
    let ret_speed = cfg.ret_spd_start + cfg.ret_spd_step * y_index as f64;
    TileParams {
        x_index,
        y_index,
        z_index,
        origin: Point::new(
            consts.x_plan.slot_origin(x_index),
            consts.y_plan.slot_origin(y_index),
        ),
        ret_distance,
        ret_speed,
        // G-code feedrates are mm/min.
        ret_feed: ret_speed * 60.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SweepConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_steps() {
        let cfg = SweepConfig {
            steps_y: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_degenerate_margins() {
        let cfg = SweepConfig {
            margin_x: 120.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_tile_steps_follow_span_formula() {
        let cfg = SweepConfig::default();
        let consts = DerivedConstants::compute(&cfg);
        let expected_x = ((cfg.bed_size_x - 2.0 * cfg.margin_x) / cfg.steps_x as f64)
            .min(cfg.max_tile_span);
        let expected_y = ((cfg.bed_size_y - 2.0 * cfg.margin_y) / cfg.steps_y as f64)
            .min(cfg.max_tile_span);
        assert!((consts.x_plan.step - expected_x).abs() < 1e-12);
        assert!((consts.y_plan.step - expected_y).abs() < 1e-12);
        assert_eq!(consts.x_plan.start, cfg.margin_x);
        assert_eq!(consts.y_plan.start, cfg.margin_y);
    }

    #[test]
    fn test_e_per_mm_matches_flow_formula() {
        // 0.16mm layers, 0.45mm lines, 1.75mm filament.
        let cfg = SweepConfig::default();
        let consts = DerivedConstants::compute(&cfg);
        assert!((consts.e_per_mm - 0.027650062000232345).abs() < 1e-12);
    }

    #[test]
    fn test_layers_per_band_rounds() {
        let cfg = SweepConfig::default();
        let consts = DerivedConstants::compute(&cfg);
        // round(5 / 0.16) = 31
        assert_eq!(consts.layers_per_band, 31);
        assert_eq!(consts.total_layers(&cfg), 155);
    }

    #[test]
    fn test_band_temperature_is_linear() {
        let cfg = SweepConfig::default();
        for z in 0..cfg.steps_z {
            assert_eq!(band_temperature(&cfg, z), 210.0 - 5.0 * z as f64);
        }
    }

    #[test]
    fn test_layer_params() {
        let cfg = SweepConfig::default();
        let first = layer_params(&cfg, 0);
        assert!((first.coord_z - 0.16).abs() < 1e-12);
        assert_eq!(first.fan_speed, cfg.fan_spd_initial);

        let later = layer_params(&cfg, 10);
        assert!((later.coord_z - 0.16 * 11.0).abs() < 1e-12);
        assert_eq!(later.fan_speed, cfg.fan_spd_other);
    }

    #[test]
    fn test_tile_params_reference_values() {
        let cfg = SweepConfig::default();
        let consts = DerivedConstants::compute(&cfg);

        let t0 = tile_params(&cfg, &consts, 0, 0, 0);
        assert_eq!(t0.ret_distance, 1.0);
        assert_eq!(t0.ret_speed, 10.0);
        assert_eq!(t0.ret_feed, 600.0);
        assert_eq!(t0.origin, Point::new(20.0, 20.0));

        let t1 = tile_params(&cfg, &consts, 1, 0, 0);
        assert_eq!(t1.ret_distance, 1.25);
    }

    #[test]
    fn test_tile_params_axes_are_independent() {
        let cfg = SweepConfig::default();
        let consts = DerivedConstants::compute(&cfg);
        for y in 0..cfg.steps_y {
            let t = tile_params(&cfg, &consts, 3, y, 0);
            assert_eq!(t.ret_distance, 1.0 + 0.25 * 3.0);
        }
        for x in 0..cfg.steps_x {
            let t = tile_params(&cfg, &consts, x, 4, 2);
            assert_eq!(t.ret_speed, 10.0 + 2.5 * 4.0);
        }
    }

    #[test]
    fn test_recompute_is_stable() {
        let cfg = SweepConfig::default();
        let consts = DerivedConstants::compute(&cfg);
        let a = tile_params(&cfg, &consts, 7, 11, 3);
        let b = tile_params(&cfg, &consts, 7, 11, 3);
        assert_eq!(a, b);
        assert_eq!(DerivedConstants::compute(&cfg), consts);
    }

    #[test]
    fn test_sanity_warning_fires_for_oversized_square() {
        let cfg = SweepConfig {
            square_size: 12.0,
            ..Default::default()
        };
        let consts = DerivedConstants::compute(&cfg);
        // 9.5mm slots on the default bed, both axes fire.
        assert_eq!(consts.sanity_warnings(&cfg).len(), 2);
        assert!(DerivedConstants::compute(&SweepConfig::default())
            .sanity_warnings(&SweepConfig::default())
            .is_empty());
    }
}
