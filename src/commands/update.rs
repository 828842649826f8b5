//! Update command implementation.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::aggregator::{AggregateResult, Aggregator};
use crate::commands::load_config;
use crate::config::Config;
use crate::fetcher::{Fetch, HttpFetcher};
use crate::lock::LockGuard;
use crate::report::RunSummary;
use crate::serializer::{Branding, Serializer};
use crate::utils::{format_count_with_separator, write_atomic};

/// Where a run writes its artifacts
pub struct UpdateTargets {
    pub output: PathBuf,
    pub summary: PathBuf,
    pub dry_run: bool,
}

/// Run the update command
pub async fn run(
    dry_run: bool,
    output: Option<PathBuf>,
    summary: Option<PathBuf>,
    config_path: &Path,
) -> Result<()> {
    let config = load_config(config_path)?;

    let targets = UpdateTargets {
        output: output.unwrap_or_else(|| PathBuf::from(&config.settings.output_file)),
        summary: summary.unwrap_or_else(|| PathBuf::from(&config.settings.summary_file)),
        dry_run,
    };

    let fetcher = HttpFetcher::with_options(
        Duration::from_secs(config.settings.timeout_secs),
        &config.settings.user_agent,
    )?;

    let Some(result) = execute(&config, &fetcher, &targets).await? else {
        return Ok(());
    };

    println!();
    println!(
        "[OK] {} unique domains from {}/{} lists",
        format_count_with_separator(result.total_domains()),
        result.success_count(),
        result.outcomes.len()
    );
    if !dry_run {
        println!("[FILE] {}", targets.output.display());
    }

    Ok(())
}

/// Aggregate all enabled lists and write the artifacts.
///
/// Returns `None` when no list is enabled.
pub async fn execute(
    config: &Config,
    fetcher: &dyn Fetch,
    targets: &UpdateTargets,
) -> Result<Option<AggregateResult>> {
    let sources = config.enabled_lists();
    if sources.is_empty() {
        warn!("No lists enabled. Check your configuration.");
        return Ok(None);
    }

    // Held until the artifacts are written
    let _lock = if targets.dry_run {
        None
    } else {
        Some(LockGuard::acquire(&targets.output)?)
    };

    info!("Processing {} lists...", sources.len());

    let result = Aggregator::new(fetcher)
        .with_max_concurrent(config.settings.max_concurrent)
        .run(&sources)
        .await;

    if result.success_count() == 0 {
        warn!("No list could be fetched, the blocklist will only contain the preamble");
    }

    let output_name = targets
        .output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.settings.output_file.clone());
    let serializer = Serializer::with_branding(Branding::new(
        config.settings.repository_url.clone(),
        output_name,
    ));
    let rendered = serializer.render(&result.all_domains, result.generated_at);

    if targets.dry_run {
        info!(
            "Dry run: {} bytes rendered, nothing written",
            format_count_with_separator(rendered.len())
        );
        return Ok(Some(result));
    }

    write_atomic(&targets.output, rendered.as_bytes())?;
    info!(
        "Generated blocklist with {} domains in {:?}",
        format_count_with_separator(result.total_domains()),
        targets.output
    );

    RunSummary::from_result(&result, targets.output.display().to_string())
        .save(&targets.summary)?;

    Ok(Some(result))
}
