use anyhow::{Context, Result};
use clap::Parser;
use day22::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let secrets = day22::read_secrets(&input_path).with_context(|| {
        format!(
            "Failed to read initial secret numbers from given file({}).",
            input_path.display()
        )
    })?;

    let sum = day22::secret_sum(&secrets, day22::SECRET_GENERATION_N);
    println!(
        "The sum of the {}th secret number of each buyer is {}.",
        day22::SECRET_GENERATION_N,
        sum
    );

    Ok(())
}
