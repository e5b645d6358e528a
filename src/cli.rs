use std::path::PathBuf;

use clap::Parser;

/// Single-screen, file-backed task list.
/// Storage defaults to ~/.taskblitz/tasks.json or a path passed via --store.
#[derive(Parser)]
#[command(name = "tblitz", version, about = "Personal task list with a live clock")]
pub struct Cli {
    /// Path to the JSON store file.
    #[arg(long)]
    pub store: Option<PathBuf>,
}
