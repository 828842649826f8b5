//! Check command implementation.

use anyhow::Result;

use crate::domain::Domain;

/// Run the check command
pub fn run(token: &str) -> Result<()> {
    match Domain::parse(token) {
        Some(domain) => {
            println!("{} is a blockable domain (stored as {})", token, domain);
            Ok(())
        }
        None => anyhow::bail!("'{}' is not a blockable domain", token),
    }
}
