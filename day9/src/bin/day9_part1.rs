use anyhow::{Context, Result};
use clap::Parser;
use day9::{CLIArgs, DiskMap};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let disk = day9::read_disk_map(&input_path).with_context(|| {
        format!(
            "Failed to read disk map from given file({}).",
            input_path.display()
        )
    })?;

    let blocks = disk.compact_blocks();
    log::debug!("Compacted disk: {}", day9::display_blocks(&blocks));
    println!(
        "The filesystem checksum after moving blocks is {}.",
        DiskMap::checksum(&blocks)
    );

    Ok(())
}
