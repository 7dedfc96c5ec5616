//! G-code encoding of the instruction stream.

use retcal_core::{geometry::Point, sink::InstructionSink};

/// Instruction sink that appends one G-code line per instruction to an
/// internal buffer. Extrusion is relative (`M83` in the prologue), so E
/// words carry per-move filament lengths.
#[derive(Debug, Default)]
pub struct GcodeWriter {
    gcode: String,
}

impl GcodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pre-formatted line (prologue/epilogue blocks).
    pub fn raw(&mut self, line: &str) {
        self.gcode.push_str(line);
        self.gcode.push('\n');
    }

    /// Append an empty separator line.
    pub fn blank(&mut self) {
        self.gcode.push('\n');
    }

    pub fn as_str(&self) -> &str {
        &self.gcode
    }

    pub fn into_gcode(self) -> String {
        self.gcode
    }
}

impl InstructionSink for GcodeWriter {
    fn comment(&mut self, text: &str) {
        self.raw(&format!("; {}", text));
    }

    fn travel(&mut self, to: Point, feed: f64) {
        self.raw(&format!(
            "G1 X{:.3} Y{:.3} F{:.1} ; travel",
            to.x, to.y, feed
        ));
    }

    fn extrude(&mut self, to: Point, e: f64) {
        self.raw(&format!("G1 X{:.6} Y{:.6} E{:.6}", to.x, to.y, e));
    }

    fn retract(&mut self, distance: f64, feed: f64) {
        self.raw(&format!("G1 E{:.3} F{:.1} ; retract", -distance, feed));
    }

    fn deretract(&mut self, distance: f64, feed: f64) {
        self.raw(&format!("G1 E{:.3} F{:.1} ; deretract", distance, feed));
    }

    fn set_layer(&mut self, z: f64, feed: f64) {
        self.raw(&format!("G1 Z{:.3} F{:.1} ; layer change", z, feed));
    }

    fn set_fan(&mut self, speed: u8) {
        if speed == 0 {
            self.raw("M107 ; fan off");
        } else {
            self.raw(&format!("M106 S{} ; fan speed", speed));
        }
    }

    fn set_nozzle_temp(&mut self, celsius: f64) {
        self.raw(&format!("M104 S{:.0} ; nozzle temp", celsius));
    }

    fn set_speed(&mut self, value: f64) {
        self.raw(&format!("M204 S{:.3}", value));
    }
}
