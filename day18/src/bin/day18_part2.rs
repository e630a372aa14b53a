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
    if let Some(blocking_n) = space.blocking_byte_n(bytes.len()) {
        println!(
            "The first byte that cuts off the path to the exit is {}.",
            bytes[blocking_n - 1]
        );
    } else {
        eprintln!("The exit stays reachable after all bytes have fallen.");
    }

    Ok(())
}
