use std::io::Write;
use std::path::PathBuf;

use retcal::{init_logging, load_or_default, ProgramGenerator};

fn main() -> anyhow::Result<()> {
    init_logging()?;

    // Optional overlay path as the only argument.
    let overlay = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));

    let cfg = load_or_default(&overlay)?;
    let gcode = ProgramGenerator::new(cfg).generate()?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(gcode.as_bytes())?;

    Ok(())
}
