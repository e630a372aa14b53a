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

    let middle_sum = updates
        .iter()
        .filter(|update| !update.is_ordered(&rules))
        .map(|update| {
            let fixed = update.fixed(&rules);
            log::debug!("{:?} -> {:?}", update.pages(), fixed.pages());
            fixed.middle_page()
        })
        .sum::<usize>();
    println!(
        "The sum of middle page numbers from fixed updates is {}.",
        middle_sum
    );

    Ok(())
}
