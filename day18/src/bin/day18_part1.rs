use anyhow::{Context, Result};
use clap::Parser;
use day18::{CLIArgs, MemorySpace};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let bytes = day18::read_positions(&input_path).with_context(|| {
        format!(
            "Failed to read byte positions from given file({}).",
            input_path.display()
        )
    })?;

    let space = MemorySpace::new(args.size(), &bytes);
    let fallen_n = args.bytes().min(bytes.len());
    if let Some(steps_n) = space.min_steps_n(fallen_n) {
        println!(
            "The minimum number of steps to reach the exit after {} bytes have fallen is {}.",
            fallen_n, steps_n
        );
    } else {
        eprintln!(
            "There's no path to the exit after {} bytes have fallen.",
            fallen_n
        );
    }

    Ok(())
}
