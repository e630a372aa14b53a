use anyhow::{Context, Result};
use clap::Parser;
use day1::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let (list0, list1) = day1::read_lists(&input_path).with_context(|| {
        format!(
            "Failed to read location ID lists from given input file({}).",
            input_path.display()
        )
    })?;

    println!(
        "The total sum of differences between two given lists after sorted is {}.",
        day1::total_distance(&list0, &list1)
    );

    Ok(())
}
