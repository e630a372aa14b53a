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

    match computer
        .self_printing_a()
        .context("Failed to search register A in given computer")?
    {
        Some(a) => println!(
            "The lowest value of register A that makes the program output itself is {}.",
            a
        ),
        None => eprintln!("No value of register A makes the program output itself."),
    }

    Ok(())
}
