//! Sweep coordination.
//!
//! Drives the whole pattern in a single deterministic pass: temperature band
//! (Z) -> layer within the band -> tile row (Y) -> tile column (X). Band,
//! layer, and tile values are recomputed from their indices at each step.

use tracing::{debug, warn};

use crate::error::CalibrationResult;
use crate::params::{
    band_temperature, layer_params, tile_params, DerivedConstants, SweepConfig, TileParams,
};
use crate::shape::{emit_pillar, PillarSpec, BAND_MARKER_SHRINK};
use crate::sink::InstructionSink;

/// Walks the tile grid and pushes the instruction stream into a sink.
pub struct SweepCoordinator<'a> {
    cfg: &'a SweepConfig,
    consts: DerivedConstants,
}

impl<'a> SweepCoordinator<'a> {
    /// Validate the configuration and derive the sweep constants.
    ///
    /// Sanity warnings (pillars wider than their tile slot) are logged but
    /// do not fail construction; the pattern is still printable, just
    /// crowded.
    pub fn new(cfg: &'a SweepConfig) -> CalibrationResult<Self> {
        cfg.validate()?;
        let consts = DerivedConstants::compute(cfg);
        for warning in consts.sanity_warnings(cfg) {
            warn!("{}", warning);
        }
        debug!(
            tile_x_step = consts.x_plan.step,
            tile_y_step = consts.y_plan.step,
            e_per_mm = consts.e_per_mm,
            layers_per_band = consts.layers_per_band,
            "sweep constants derived"
        );
        Ok(Self { cfg, consts })
    }

    /// Derived constants for this sweep.
    pub fn constants(&self) -> &DerivedConstants {
        &self.consts
    }

    /// Emit the full calibration pattern.
    ///
    /// Per tile the order is fixed: travel to the slot origin, deretract,
    /// shells, retract. The trailing retract is what the next tile's travel
    /// relies on to not ooze.
    pub fn generate(&self, sink: &mut dyn InstructionSink) {
        let cfg = self.cfg;
        let consts = &self.consts;

        // The stream opens travelling to tile (0,0,0), so retract first.
        let first = tile_params(cfg, consts, 0, 0, 0);
        sink.retract(first.ret_distance, first.ret_feed);

        for z in 0..cfg.steps_z {
            let temp = band_temperature(cfg, z);
            sink.comment(&format!("band z={} nozzle_temp={}", z, temp));
            sink.set_nozzle_temp(temp);

            for band_layer in 0..consts.layers_per_band {
                let layer = layer_params(cfg, z * consts.layers_per_band + band_layer);
                sink.comment(&format!("layer {} z={:.3}", layer.index, layer.coord_z));
                sink.set_fan(layer.fan_speed);
                sink.set_layer(layer.coord_z, cfg.feed_z);

                // The first layer of a band gets shrunken shells as a
                // visual marker of the temperature change.
                let shrink = if band_layer == 0 { BAND_MARKER_SHRINK } else { 0.0 };

                for y in 0..cfg.steps_y {
                    for x in 0..cfg.steps_x {
                        let tile = tile_params(cfg, consts, x, y, z);
                        self.emit_tile(sink, &tile, shrink);
                    }
                }
            }
        }
    }

    fn emit_tile(&self, sink: &mut dyn InstructionSink, tile: &TileParams, shrink: f64) {
        let cfg = self.cfg;

        sink.comment(&format!(
            "tile x={} y={} z={} origin=({:.3}, {:.3}) ret_d={:.2}mm ret_spd={:.1}mm/s",
            tile.x_index, tile.y_index, tile.z_index, tile.origin.x, tile.origin.y,
            tile.ret_distance, tile.ret_speed
        ));

        sink.travel(tile.origin, cfg.feed_travel);
        sink.deretract(tile.ret_distance, tile.ret_feed);

        emit_pillar(
            sink,
            &PillarSpec {
                origin: tile.origin,
                square_size: cfg.square_size,
                line_width: cfg.line_width,
                shrink,
                e_per_mm: self.consts.e_per_mm,
                feed_travel: cfg.feed_travel,
                feed_print: cfg.feed_print,
            },
        );

        sink.retract(tile.ret_distance, tile.ret_feed);
    }
}
