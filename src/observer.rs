//! Run observation hooks.
//!
//! Aggregation does not own any logger configuration. It reports what it
//! does to a [`RunObserver`] supplied by the caller; [`TracingObserver`]
//! forwards those events to `tracing` as structured fields.

use tracing::{debug, info, warn};

use crate::aggregator::{AggregateResult, SourceOutcome};
use crate::config::ListSource;
use crate::error::FetchError;
use crate::parser::Syntax;
use crate::utils::format_count;

/// Receives progress events from a run. All methods default to no-ops.
pub trait RunObserver: Send + Sync {
    /// A source is about to be fetched
    fn source_started(&self, _source: &ListSource) {}

    /// A source was fetched and parsed
    fn source_parsed(&self, _source: &ListSource, _syntax: Syntax, _outcome: &SourceOutcome) {}

    /// A source could not be fetched and was skipped
    fn source_failed(&self, _source: &ListSource, _error: &FetchError) {}

    /// All sources were processed
    fn run_completed(&self, _result: &AggregateResult) {}
}

/// Observer that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Observer that emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn source_started(&self, source: &ListSource) {
        debug!(source = %source.name, url = %source.url, "Fetching list");
    }

    fn source_parsed(&self, source: &ListSource, syntax: Syntax, outcome: &SourceOutcome) {
        info!(
            source = %source.name,
            syntax = %syntax,
            domains = outcome.domain_count,
            status = "success",
            "Parsed {} domains from {}",
            format_count(outcome.domain_count),
            source.name
        );
    }

    fn source_failed(&self, source: &ListSource, error: &FetchError) {
        warn!(
            source = %source.name,
            url = %source.url,
            status = "fetch_failed",
            error = %error,
            "Failed to fetch {}",
            source.name
        );
    }

    fn run_completed(&self, result: &AggregateResult) {
        info!(
            domains = result.all_domains.len(),
            sources = result.outcomes.len(),
            failed = result.failed_count(),
            "Aggregated {} unique domains",
            format_count(result.all_domains.len())
        );
    }
}
