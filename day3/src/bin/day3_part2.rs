use anyhow::{Context, Result};
use clap::Parser;
use day3::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let memory = day3::read_memory(&input_path).with_context(|| {
        format!(
            "Failed to read memory from given file({}).",
            input_path.display()
        )
    })?;

    println!(
        "The total sum of enabled multiply instructions is {}.",
        memory.mul_sum_enable()
    );

    Ok(())
}
