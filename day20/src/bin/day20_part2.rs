use anyhow::{Context, Result};
use clap::Parser;
use day20::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let track = day20::read_racetrack(&input_path).with_context(|| {
        format!(
            "Failed to read racetrack from given file({}).",
            input_path.display()
        )
    })?;

    let threshold = args.threshold(50);
    let cheat_n = track.cheat_n(day20::LONG_CHEAT_LEN, threshold);
    println!(
        "There are {} cheats that save at least {} picoseconds.",
        cheat_n, threshold
    );

    Ok(())
}
