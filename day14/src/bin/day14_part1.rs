use anyhow::{Context, Result};
use clap::Parser;
use day14::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let robots = day14::read_robots(&input_path).with_context(|| {
        format!(
            "Failed to read robots from given file({}).",
            input_path.display()
        )
    })?;

    let map = args.map().context("Invalid map size in given arguments")?;
    println!(
        "The safety factor(product of robots's count after moved in 4 quadrants) is {}.",
        map.safety_factor(&robots, 100)
    );

    Ok(())
}
