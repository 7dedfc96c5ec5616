//! # RetCal G-code
//!
//! Textual G-code encoding for the RetCal instruction stream, plus assembly
//! of the complete calibration program (header, prologue, sweep, epilogue).

pub mod program;
pub mod writer;

pub use program::ProgramGenerator;
pub use writer::GcodeWriter;
