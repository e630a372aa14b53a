use anyhow::{Context, Result};
use clap::Parser;
use day6::CLIArgs;

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

    let obstacles = map.loop_obstacles();
    for pos in &obstacles {
        log::debug!("Obstacle at {} makes the guard loop.", pos);
    }
    println!(
        "There are {} positions to place an obstruction that make the guard stuck in a loop.",
        obstacles.len()
    );

    Ok(())
}
