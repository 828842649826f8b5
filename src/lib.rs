//! # hostmerge - Domain Blocklist Merger
//!
//! Fetches domain blocklists published as hosts files, AdBlock Plus filter
//! lists or plain domain lists, and merges them into one deduplicated,
//! sorted hosts file suitable for Pi-hole.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        hostmerge                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: update, parse, check, sources              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! │    └── Ordered list sources: name, url, format              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls)                                 │
//! │    └── Timeout, retry, size limits                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Detect + Parser                                            │
//! │    ├── hosts      (0.0.0.0 domain)                          │
//! │    ├── adblock    (||domain^)                               │
//! │    └── plain      (domain)                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Aggregator                                                 │
//! │    └── Ordered set union + per-source outcomes              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Serializer + Report                                        │
//! │    └── Sorted hosts file, JSON run summary                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use hostmerge::aggregator::Aggregator;
//! use hostmerge::config::Config;
//! use hostmerge::fetcher::HttpFetcher;
//! use hostmerge::serializer::render;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let fetcher = HttpFetcher::new()?;
//!
//!     let result = Aggregator::new(&fetcher)
//!         .run(&config.enabled_lists())
//!         .await;
//!
//!     let text = render(&result.all_domains, result.generated_at);
//!     std::fs::write("pihole_list.txt", text)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`aggregator`] - Ordered merge of per-source domain sets
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`detect`] - Syntax selection for fetched content
//! - [`domain`] - Domain normalization and validation
//! - [`error`] - Fetch error taxonomy
//! - [`fetcher`] - HTTP client for downloading lists
//! - [`lock`] - File locking against concurrent runs
//! - [`observer`] - Run events and their `tracing` sink
//! - [`parser`] - Hosts, AdBlock and plain list parsers
//! - [`report`] - JSON run summary
//! - [`serializer`] - Hosts file rendering
//! - [`utils`] - Formatting and atomic writes

pub mod aggregator;
pub mod cli;
pub mod commands;
pub mod config;
pub mod detect;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod lock;
pub mod observer;
pub mod parser;
pub mod report;
pub mod serializer;
pub mod utils;

pub use aggregator::{aggregate, AggregateResult, Aggregator, SourceOutcome, SourceStatus};
pub use config::{Config, ListSource};
pub use domain::{is_valid_domain, Domain, DomainSet};
pub use parser::{ListFormat, Syntax};
