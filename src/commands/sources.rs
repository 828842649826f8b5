//! Sources command implementation.

use anyhow::Result;
use std::path::Path;

use crate::commands::load_config;
use crate::utils::truncate;

/// Run the sources command
pub fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    println!();
    println!(" NAME                 FORMAT   ENABLED  URL");
    println!(" ──────────────────── ──────── ──────── ────────────────────────────────────────");
    for list in &config.lists {
        println!(
            " {:<20} {:<8} {:<8} {}",
            truncate(&list.name, 20),
            list.format.to_string(),
            if list.enabled { "yes" } else { "no" },
            truncate(&list.url, 60),
        );
    }
    println!();
    println!(
        " {} lists, {} enabled",
        config.lists.len(),
        config.enabled_lists().len()
    );
    println!();

    Ok(())
}
