//! # TaskBlitz
//!
//! A single-screen terminal task list with a live clock.
//!
//! ## Key Features
//!
//! - **One Screen**: input fields, clock, view tabs, and the task list live
//!   on a single interactive screen - no subcommands to remember
//! - **Optional Schedules**: tag any task with a date and time; a date
//!   without a time defaults to midnight
//! - **Two Views**: toggle between remaining and completed tasks, with live
//!   counts in the tab headers
//! - **Local File Storage**: the full task list is written to a single JSON
//!   file after every change and reloaded on start
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the task screen
//! tblitz
//!
//! # Use a specific store file
//! tblitz --store ./tasks.json
//! ```
//!
//! Press `h` inside the app for the full key reference. Data is stored in
//! `~/.taskblitz/tasks.json` unless `--store` says otherwise.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod clock;
    pub mod colors;
    pub mod enums;
    pub mod form;
    pub mod input;
    pub mod run;
}

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let store_path = cli.store.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let data_dir = PathBuf::from(home).join(".taskblitz");
        if let Err(e) = std::fs::create_dir_all(&data_dir) {
            eprintln!("Failed to create data directory {}: {}", data_dir.display(), e);
            std::process::exit(1);
        }
        data_dir.join("tasks.json")
    });

    if let Err(e) = tui::run::run(&store_path) {
        eprintln!("Terminal error: {}", e);
        std::process::exit(1);
    }
}
