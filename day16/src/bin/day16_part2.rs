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

    let positions = maze.best_path_positions();
    if positions.is_empty() {
        eprintln!("There're no actions can complete the given maze.");
    } else {
        println!(
            "There are {} positions in maze that's on at least one path with the minimum score.",
            positions.len()
        );
    }

    Ok(())
}
