use clap::Parser;
use std::path::PathBuf;

/// Convert a hex memory image (one word per line) into a MIF for a
/// 4096 x 32-bit memory block.
#[derive(Parser, Debug)]
#[command(name = "hex2mif", version, about)]
struct Cli {
    /// Input image; the output path replaces its first ".hex" with ".mif".
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .init();
    let cli = Cli::parse();

    let output = hex2mif::convert(&cli.input)?;
    log::info!("{} -> {}", cli.input.display(), output.display());
    Ok(())
}
