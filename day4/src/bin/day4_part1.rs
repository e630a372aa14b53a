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

    log::debug!("Grid dimensions: {}x{}.", puzzle.row_n(), puzzle.col_n());
    println!(
        "XMAS appears {} times in given word search.",
        puzzle.word_count("XMAS")
    );

    Ok(())
}
