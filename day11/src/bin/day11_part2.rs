use anyhow::{Context, Result};
use clap::Parser;
use day11::{CLIArgs, StoneCounter};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let stones = day11::read_stones(&input_path).with_context(|| {
        format!(
            "Failed to read stones from given file({}).",
            input_path.display()
        )
    })?;

    let blinks = args.blinks.unwrap_or(75);
    let count = StoneCounter::new().count_all(&stones, blinks);
    println!("There are {} stones after blinking {} times.", count, blinks);

    Ok(())
}
