use anyhow::{Context, Result};
use clap::Parser;
use day6::{CLIArgs, Patrol};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let map = day6::read_map(&input_path).with_context(|| {
        format!(
            "Failed to read map from given file({}).",
            input_path.display()
        )
    })?;

    match map.patrol(None) {
        Patrol::Exit(visited) => println!(
            "The guard visits {} distinct positions before leaving the map.",
            visited.len()
        ),
        Patrol::Loop => eprintln!("The guard never leaves the given map."),
    }

    Ok(())
}
