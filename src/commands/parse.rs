//! Parse command implementation.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::detect::select_parser;
use crate::domain::Domain;
use crate::parser::ListFormat;

/// Run the parse command: print the sorted domains of a local list
pub fn run(file: &Path, format: ListFormat) -> Result<()> {
    let domains = extract(file, format)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for domain in domains {
        writeln!(out, "{}", domain)?;
    }
    out.flush()?;

    Ok(())
}

fn extract(file: &Path, format: ListFormat) -> Result<Vec<Domain>> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read list file: {:?}", file))?;

    let syntax = select_parser(format, &content);
    let mut domains: Vec<Domain> = syntax.parse(&content).into_iter().collect();
    domains.sort_unstable();

    info!(
        syntax = %syntax,
        domains = domains.len(),
        "Parsed {:?} as {}",
        file,
        syntax
    );

    Ok(domains)
}
