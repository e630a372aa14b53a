use anyhow::{Context, Result};
use clap::Parser;
use day17::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let computer = day17::read_computer(&input_path).with_context(|| {
        format!(
            "Failed to read computer from given file({}).",
            input_path.display()
        )
    })?;

    let output = computer
        .run()
        .context("Failed to run program in given computer")?;
    println!(
        "The output of program in given computer is {}.",
        day17::format_output(&output)
    );

    Ok(())
}
