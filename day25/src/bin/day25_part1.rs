use anyhow::{Context, Result};
use clap::Parser;
use day25::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let schematics = day25::read_schematics(&input_path).with_context(|| {
        format!(
            "Failed to read schematics from given file({}).",
            input_path.display()
        )
    })?;

    let pair_n = day25::fitting_pair_n(&schematics);
    println!(
        "There are {} unique lock/key pairs fitting together without overlapping.",
        pair_n
    );

    Ok(())
}
