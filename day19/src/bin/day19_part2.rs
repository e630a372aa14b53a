use anyhow::{Context, Result};
use clap::Parser;
use day19::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let (towels, designs) = day19::read_towels_designs(&input_path).with_context(|| {
        format!(
            "Failed to read towel patterns and designs from given file({}).",
            input_path.display()
        )
    })?;

    let arrangement_n = designs
        .iter()
        .map(|d| towels.arrangement_n(d))
        .sum::<u64>();
    println!(
        "The sum of the number of ways to make each design is {}.",
        arrangement_n
    );

    Ok(())
}
