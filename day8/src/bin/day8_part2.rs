use anyhow::{Context, Result};
use clap::Parser;
use day8::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let map = day8::read_map(&input_path).with_context(|| {
        format!(
            "Failed to read antenna map from given file({}).",
            input_path.display()
        )
    })?;

    let antinodes = map.resonant_antinodes();
    println!(
        "There are {} unique locations within the map that contain a resonant antinode.",
        antinodes.len()
    );

    Ok(())
}
