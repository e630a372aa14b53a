use anyhow::{Context, Result};
use clap::Parser;
use day2::{CLIArgs, Report};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let reports = day2::read_reports(&input_path).with_context(|| {
        format!(
            "Failed to read reports from given file({}).",
            input_path.display()
        )
    })?;

    let safe_count = reports
        .iter()
        .filter(|r| Report::is_safe_with_dampener(r))
        .count();
    println!(
        "There are {} safe reports with the problem dampener.",
        safe_count
    );

    Ok(())
}
