use anyhow::{Context, Result};
use clap::Parser;
use day15::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let (mut warehouse, moves) = day15::read_puzzle(&input_path).with_context(|| {
        format!(
            "Failed to read warehouse and moves from given file({}).",
            input_path.display()
        )
    })?;

    for dir in &moves {
        warehouse.move_robot(*dir);
    }
    log::debug!("Warehouse after {} moves:\n{}", moves.len(), warehouse);
    println!(
        "The sum of all boxes' GPS coordinates is {}.",
        warehouse.gps_sum()
    );

    Ok(())
}
