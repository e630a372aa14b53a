use anyhow::{Context, Result};
use clap::Parser;
use day16::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let maze = day16::read_maze(&input_path).with_context(|| {
        format!(
            "Failed to read maze from given file({}).",
            input_path.display()
        )
    })?;

    if let Some(min_score) = maze.min_score() {
        println!("The minimum score of completing the maze is {}.", min_score);
    } else {
        eprintln!("There're no actions can complete the given maze.");
    }

    Ok(())
}
