use anyhow::{Context, Result};
use clap::Parser;
use day13::{CLIArgs, PRESS_LIMIT};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let machines = day13::read_machines(&input_path).with_context(|| {
        format!(
            "Failed to read claw machines from given file({}).",
            input_path.display()
        )
    })?;

    let tokens = machines
        .iter()
        .filter_map(|m| m.min_tokens(Some(PRESS_LIMIT)))
        .sum::<i64>();
    println!(
        "The fewest tokens to win all possible prizes is {}.",
        tokens
    );

    Ok(())
}
