use anyhow::{Context, Result};
use clap::Parser;
use day5::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let (rules, updates) = day5::read_manual(&input_path).with_context(|| {
        format!(
            "Failed to read rules and updates from given file({}).",
            input_path.display()
        )
    })?;

    log::debug!(
        "Parsed {} rules and {} updates.",
        rules.len(),
        updates.len()
    );
    let mut middle_sum = 0;
    for update in &updates {
        if update.is_ordered(&rules) {
            log::debug!("{:?} is in right order.", update.pages());
            middle_sum += update.middle_page();
        }
    }
    println!(
        "The sum of middle page numbers from correctly-ordered updates is {}.",
        middle_sum
    );

    Ok(())
}
