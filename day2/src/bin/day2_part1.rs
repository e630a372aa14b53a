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

    for report in &reports {
        log::debug!(
            "{:?} -> {}",
            report.levels(),
            if report.is_safe() { "Safe" } else { "Unsafe" }
        );
    }
    let safe_count = reports.iter().filter(|r| r.is_safe()).count();
    println!("There are {} safe reports.", safe_count);

    Ok(())
}
