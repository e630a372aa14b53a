use anyhow::{Context, Result};
use clap::Parser;
use day4::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let puzzle = day4::read_word_search(&input_path).with_context(|| {
        format!(
            "Failed to read word search from given file({}).",
            input_path.display()
        )
    })?;

    println!(
        "X-MAS appears {} times in given word search.",
        puzzle.x_mas_count()
    );

    Ok(())
}
