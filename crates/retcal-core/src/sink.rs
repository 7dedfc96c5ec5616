//! Typed instruction sink.
//!
//! The sweep never builds machine text itself; it calls one method per
//! instruction kind on an [`InstructionSink`] and lets the sink decide how to
//! encode it. Retract/deretract distances are passed as positive magnitudes;
//! the retract is the negative extruder move.

use crate::geometry::Point;

/// Receiver for the instruction stream produced by the sweep.
pub trait InstructionSink {
    /// Free-form annotation, one line.
    fn comment(&mut self, text: &str);

    /// Non-extruding move to `to` at `feed` mm/min.
    fn travel(&mut self, to: Point, feed: f64);

    /// Extruding move to `to`, feeding `e` mm of filament.
    fn extrude(&mut self, to: Point, e: f64);

    /// Pull back `distance` mm of filament at `feed` mm/min.
    fn retract(&mut self, distance: f64, feed: f64);

    /// Push `distance` mm of filament back at `feed` mm/min.
    fn deretract(&mut self, distance: f64, feed: f64);

    /// Move the head to layer height `z` at `feed` mm/min.
    fn set_layer(&mut self, z: f64, feed: f64);

    /// Set the part fan PWM; 0 turns the fan off.
    fn set_fan(&mut self, speed: u8);

    /// Set the nozzle temperature without waiting.
    fn set_nozzle_temp(&mut self, celsius: f64);

    /// Select the motion speed limit used for the following moves.
    fn set_speed(&mut self, value: f64);
}

/// One captured instruction, for inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Comment(String),
    Travel { to: Point, feed: f64 },
    Extrude { to: Point, e: f64 },
    Retract { distance: f64, feed: f64 },
    Deretract { distance: f64, feed: f64 },
    SetLayer { z: f64, feed: f64 },
    SetFan { speed: u8 },
    SetNozzleTemp { celsius: f64 },
    SetSpeed { value: f64 },
}

/// Sink that records the instruction stream as typed values instead of
/// encoding it. Useful for pattern statistics and for tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    instructions: Vec<Instruction>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

impl InstructionSink for RecordingSink {
    fn comment(&mut self, text: &str) {
        self.instructions.push(Instruction::Comment(text.to_string()));
    }

    fn travel(&mut self, to: Point, feed: f64) {
        self.instructions.push(Instruction::Travel { to, feed });
    }

    fn extrude(&mut self, to: Point, e: f64) {
        self.instructions.push(Instruction::Extrude { to, e });
    }

    fn retract(&mut self, distance: f64, feed: f64) {
        self.instructions.push(Instruction::Retract { distance, feed });
    }

    fn deretract(&mut self, distance: f64, feed: f64) {
        self.instructions
            .push(Instruction::Deretract { distance, feed });
    }

    fn set_layer(&mut self, z: f64, feed: f64) {
        self.instructions.push(Instruction::SetLayer { z, feed });
    }

    fn set_fan(&mut self, speed: u8) {
        self.instructions.push(Instruction::SetFan { speed });
    }

    fn set_nozzle_temp(&mut self, celsius: f64) {
        self.instructions.push(Instruction::SetNozzleTemp { celsius });
    }

    fn set_speed(&mut self, value: f64) {
        self.instructions.push(Instruction::SetSpeed { value });
    }
}
