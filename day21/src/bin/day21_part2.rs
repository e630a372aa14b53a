use anyhow::{Context, Result};
use clap::Parser;
use day21::{CLIArgs, KeypadChain};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let codes = day21::read_codes(&input_path).with_context(|| {
        format!(
            "Failed to read door codes from given file({}).",
            input_path.display()
        )
    })?;

    let mut chain = KeypadChain::new(day21::LONG_CHAIN_ROBOT_N);
    let mut complexity_sum = 0;
    for code in &codes {
        complexity_sum += chain
            .complexity(code)
            .with_context(|| format!("Failed to type code({}) through keypads.", code))?;
    }
    println!(
        "The sum of complexities of given codes with {} robot keypads is {}.",
        day21::LONG_CHAIN_ROBOT_N, complexity_sum
    );

    Ok(())
}
