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

    let misplaced = circuit.misplaced_outputs();
    if misplaced.len() != day24::SWAPPED_OUTPUT_N {
        log::warn!(
            "Expect {} swapped gate outputs, found {}: {:?}.",
            day24::SWAPPED_OUTPUT_N,
            misplaced.len(),
            misplaced
        );
    }
    println!(
        "The wires involved in swaps, sorted by name, are {}.",
        misplaced.join(",")
    );

    Ok(())
}
