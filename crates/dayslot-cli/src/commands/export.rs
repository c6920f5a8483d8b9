//! Render a saved schedule file in another format.

use std::path::PathBuf;

use clap::Args;
use dayslot_core::export::{self, CategoryPalette, ExportFormat};
use dayslot_core::storage::schedule_file;
use dayslot_core::Config;

#[derive(Args)]
pub struct ExportArgs {
    /// Schedule written by `dayslot plan --output`
    #[arg(long)]
    schedule: PathBuf,
    /// Output format: csv, html, text or json
    #[arg(short, long, default_value = "text")]
    format: ExportFormat,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

pub fn run(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let rows = schedule_file::load_rows(&args.schedule)?;
    let config = Config::load()?;
    let palette = CategoryPalette::from_config(&config.categories);
    let rendered = export::render(&rows, args.format, &palette)?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            println!("Schedule exported to {}", path.display());
        }
        None if rendered.ends_with('\n') => print!("{rendered}"),
        None => println!("{rendered}"),
    }
    Ok(())
}
