use anyhow::{Context, Result};
use clap::Parser;
use day10::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let map = day10::read_map(&input_path).with_context(|| {
        format!(
            "Failed to read topographic map from given file({}).",
            input_path.display()
        )
    })?;

    let score_sum = map
        .trailheads()
        .into_iter()
        .map(|ind| map.score(ind))
        .sum::<usize>();
    println!(
        "The sum of the scores of all trailheads is {}.",
        score_sum
    );

    Ok(())
}
