use anyhow::{Context, Result};
use clap::Parser;
use day12::{CLIArgs, Region};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let garden = day12::read_garden(&input_path).with_context(|| {
        format!(
            "Failed to read garden map from given file({}).",
            input_path.display()
        )
    })?;

    let total_price = garden.regions().iter().map(Region::bulk_price).sum::<usize>();
    println!(
        "The total price of fencing all regions with bulk discount is {}.",
        total_price
    );

    Ok(())
}
