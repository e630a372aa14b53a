use anyhow::{Context, Result};
use clap::Parser;
use day24::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let circuit = day24::read_circuit(&input_path).with_context(|| {
        format!(
            "Failed to read circuit from given file({}).",
            input_path.display()
        )
    })?;

    let output = circuit
        .output()
        .context("Failed to simulate given circuit")?;
    println!("The decimal number output on the wires starting with z is {}.", output);

    Ok(())
}
