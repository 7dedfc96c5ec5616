//! Calibration program assembly.
//!
//! Wraps the sweep's instruction stream with a commented configuration
//! header, a machine prologue (limits, heating, homing, priming), and an
//! epilogue that parks the head and shuts the heaters down.

use anyhow::Result;
use tracing::info;

use retcal_core::{SweepConfig, SweepCoordinator};

use crate::writer::GcodeWriter;

/// Generator for the complete retraction calibration G-code program.
pub struct ProgramGenerator {
    cfg: SweepConfig,
}

impl ProgramGenerator {
    pub fn new(cfg: SweepConfig) -> Self {
        Self { cfg }
    }

    /// Resolved configuration this program is generated from.
    pub fn config(&self) -> &SweepConfig {
        &self.cfg
    }

    /// Generate the full program.
    pub fn generate(&self) -> Result<String> {
        let coordinator = SweepCoordinator::new(&self.cfg)?;
        let consts = *coordinator.constants();

        let mut w = GcodeWriter::new();
        self.write_header(&mut w)?;
        self.write_prologue(&mut w);
        coordinator.generate(&mut w);
        self.write_epilogue(&mut w);

        info!(
            bands = self.cfg.steps_z,
            layers = consts.total_layers(&self.cfg),
            tiles = self.cfg.steps_x * self.cfg.steps_y * self.cfg.steps_z,
            "calibration program generated"
        );
        Ok(w.into_gcode())
    }

    /// Commented header echoing the fully resolved configuration.
    fn write_header(&self, w: &mut GcodeWriter) -> Result<()> {
        w.raw("; #############################################");
        w.raw("; retraction calibration pattern");
        w.raw(&format!("; generated by retcal {}", env!("CARGO_PKG_VERSION")));
        w.raw("; #############################################");
        w.raw("; settings:");

        let value = serde_json::to_value(&self.cfg)?;
        let map = value
            .as_object()
            .ok_or_else(|| anyhow::anyhow!("settings did not serialize to an object"))?;
        for (key, value) in map {
            let rendered = match value.as_str() {
                // Multi-line values continue as indented comment lines.
                Some(s) => s.replace('\n', "\n;     "),
                None => value.to_string(),
            };
            w.raw(&format!(";   {} = {}", key, rendered));
        }
        w.raw("; #############################################");
        w.blank();
        Ok(())
    }

    /// Machine setup: motion limits, heating, homing, nozzle priming.
    fn write_prologue(&self, w: &mut GcodeWriter) {
        let cfg = &self.cfg;
        w.raw(&format!(
            "M201 X{:.0} Y{:.0} Z{:.0} E{:.0} ; max accelerations, mm/s^2",
            cfg.accel_x, cfg.accel_y, cfg.accel_z, cfg.accel_e
        ));
        w.raw(&format!(
            "M203 X{:.0} Y{:.0} Z{:.0} E{:.0} ; max feedrates, mm/s",
            cfg.max_feed_x, cfg.max_feed_y, cfg.max_feed_z, cfg.max_feed_e
        ));
        w.raw("M107 ; fan off");
        w.raw(&format!("M104 S{:.0} ; set nozzle temp", cfg.temp_start));
        w.raw(&format!("M140 S{:.0} ; set bed temp", cfg.temp_bed));
        w.raw(&format!("M190 S{:.0} ; wait for bed temp", cfg.temp_bed));
        w.raw(&format!("M109 S{:.0} ; wait for nozzle temp", cfg.temp_start));
        w.raw("G28 ; home all axes");
        for line in cfg.intro_prime.lines() {
            w.raw(line);
        }
        w.raw("G21 ; millimeters");
        w.raw("G90 ; absolute coordinates");
        w.raw("M83 ; relative extrusion");
        w.blank();
    }

    /// Shutdown: heaters and fan off, raise and park the head.
    fn write_epilogue(&self, w: &mut GcodeWriter) {
        let cfg = &self.cfg;
        w.blank();
        w.raw("G4 ; wait for moves to finish");
        w.raw("M104 S0 ; nozzle off");
        w.raw("M140 S0 ; bed off");
        w.raw("M107 ; fan off");
        w.raw("G1 Z70 ; raise print head");
        w.raw(&format!("G1 X0 Y{:.0} ; present print", cfg.bed_size_y - 10.0));
        w.raw("M84 ; disable motors");
    }
}
