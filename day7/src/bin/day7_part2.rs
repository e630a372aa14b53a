use anyhow::{Context, Result};
use clap::Parser;
use day7::{CLIArgs, Operator};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let equations = day7::read_equations(&input_path).with_context(|| {
        format!(
            "Failed to read equations from given file({}).",
            input_path.display()
        )
    })?;

    let result = day7::calibration_result(
        &equations,
        &[Operator::Add, Operator::Multiply, Operator::Concat],
    );
    println!("The total calibration result is {}.", result);

    Ok(())
}
