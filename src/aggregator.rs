//! Merging of per-source domain sets.
//!
//! [`aggregate`] is the synchronous core: it folds already-fetched content
//! into one [`DomainSet`] in declared source order. [`Aggregator`] drives it
//! from a [`Fetch`] implementation, downloading several lists at once while
//! keeping the fold sequential and ordered.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::config::ListSource;
use crate::detect::select_parser;
use crate::domain::DomainSet;
use crate::error::FetchError;
use crate::fetcher::Fetch;
use crate::observer::{RunObserver, TracingObserver};

/// Default number of lists downloaded at the same time
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Result of processing a single source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Success,
    FetchFailed,
}

/// Per-source record of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOutcome {
    pub name: String,
    pub url: String,
    /// Domains extracted from this source alone, before merging
    #[serde(rename = "domains")]
    pub domain_count: usize,
    pub status: SourceStatus,
}

impl SourceOutcome {
    fn success(source: &ListSource, domain_count: usize) -> Self {
        Self {
            name: source.name.clone(),
            url: source.url.clone(),
            domain_count,
            status: SourceStatus::Success,
        }
    }

    fn fetch_failed(source: &ListSource) -> Self {
        Self {
            name: source.name.clone(),
            url: source.url.clone(),
            domain_count: 0,
            status: SourceStatus::FetchFailed,
        }
    }
}

/// Everything produced by one run
#[derive(Debug, Clone)]
pub struct AggregateResult {
    pub all_domains: DomainSet,
    /// One outcome per source, in declared order
    pub outcomes: Vec<SourceOutcome>,
    pub generated_at: DateTime<Utc>,
}

impl AggregateResult {
    pub fn total_domains(&self) -> usize {
        self.all_domains.len()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == SourceStatus::FetchFailed)
            .count()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.len() - self.failed_count()
    }
}

/// Fold fetched sources into a single result.
///
/// A failed fetch is recorded and skipped; it never aborts the run.
pub fn aggregate<'a, I>(
    fetched: I,
    generated_at: DateTime<Utc>,
    observer: &dyn RunObserver,
) -> AggregateResult
where
    I: IntoIterator<Item = (&'a ListSource, Result<String, FetchError>)>,
{
    let mut all_domains = DomainSet::new();
    let mut outcomes = Vec::new();

    for (source, content) in fetched {
        match content {
            Ok(content) => {
                let syntax = select_parser(source.format, &content);
                let domains = syntax.parse(&content);
                let outcome = SourceOutcome::success(source, domains.len());
                observer.source_parsed(source, syntax, &outcome);
                all_domains.extend(domains);
                outcomes.push(outcome);
            }
            Err(e) => {
                observer.source_failed(source, &e);
                outcomes.push(SourceOutcome::fetch_failed(source));
            }
        }
    }

    let result = AggregateResult {
        all_domains,
        outcomes,
        generated_at,
    };
    observer.run_completed(&result);
    result
}

/// Fetches sources and aggregates them.
pub struct Aggregator<'a> {
    fetcher: &'a dyn Fetch,
    observer: &'a dyn RunObserver,
    max_concurrent: usize,
}

impl<'a> Aggregator<'a> {
    pub fn new(fetcher: &'a dyn Fetch) -> Self {
        Self {
            fetcher,
            observer: &TracingObserver,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn RunObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Limit the number of downloads in flight (at least one)
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Fetch every source and merge the results.
    ///
    /// Downloads overlap, but results are yielded in declared order so
    /// the outcome sequence never depends on completion order.
    pub async fn run(&self, sources: &[ListSource]) -> AggregateResult {
        let fetched: Vec<Result<String, FetchError>> = stream::iter(sources.iter().map(|source| {
            self.observer.source_started(source);
            self.fetcher.fetch(&source.url)
        }))
        .buffered(self.max_concurrent)
        .collect()
        .await;

        aggregate(sources.iter().zip(fetched), Utc::now(), self.observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::MockFetch;
    use crate::observer::NoopObserver;
    use crate::parser::{ListFormat, Syntax};
    use std::sync::Mutex;

    fn source(name: &str, format: ListFormat) -> ListSource {
        ListSource::new(name, format!("https://example.com/{}", name), format)
    }

    fn failure(url: &str) -> FetchError {
        FetchError::Status {
            url: url.to_string(),
            status: 500,
        }
    }

    #[test]
    fn test_aggregate_union_and_counts() {
        let hosts = source("hosts", ListFormat::Auto);
        let adblock = source("adblock", ListFormat::Auto);
        let fetched = vec![
            (
                &hosts,
                Ok("127.0.0.1 localhost\n0.0.0.0 a.com\n0.0.0.0 shared.com\n".to_string()),
            ),
            (&adblock, Ok("||shared.com^\n||b.com^\n".to_string())),
        ];

        let result = aggregate(fetched, Utc::now(), &NoopObserver);

        assert_eq!(result.total_domains(), 3);
        assert_eq!(result.outcomes[0].domain_count, 2);
        // Own yield, not the post-union delta
        assert_eq!(result.outcomes[1].domain_count, 2);
        assert_eq!(result.success_count(), 2);
    }

    #[test]
    fn test_aggregate_fault_isolation() {
        let sources = [
            source("one", ListFormat::Plain),
            source("two", ListFormat::Plain),
            source("three", ListFormat::Plain),
        ];
        let fetched = vec![
            (&sources[0], Ok("one.example.com\n".to_string())),
            (&sources[1], Err(failure(&sources[1].url))),
            (&sources[2], Ok("three.example.com\n".to_string())),
        ];

        let result = aggregate(fetched, Utc::now(), &NoopObserver);

        let names: Vec<&str> = result.outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "three"]);
        assert_eq!(result.outcomes[1].status, SourceStatus::FetchFailed);
        assert_eq!(result.outcomes[1].domain_count, 0);
        assert_eq!(result.total_domains(), 2);
        assert_eq!(result.failed_count(), 1);
    }

    #[test]
    fn test_aggregate_all_failed() {
        let only = source("only", ListFormat::Auto);
        let result = aggregate(
            vec![(&only, Err(failure(&only.url)))],
            Utc::now(),
            &NoopObserver,
        );
        assert!(result.all_domains.is_empty());
        assert_eq!(result.outcomes.len(), 1);
    }

    #[test]
    fn test_aggregate_respects_declared_format() {
        // Would sniff as hosts, but declared plain
        let plain = source("plain", ListFormat::Plain);
        let content = "# 127.0.0.1\nplain.example.com\n".to_string();
        let result = aggregate(vec![(&plain, Ok(content))], Utc::now(), &NoopObserver);
        assert_eq!(result.total_domains(), 1);
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl RunObserver for RecordingObserver {
        fn source_parsed(&self, source: &ListSource, syntax: Syntax, outcome: &SourceOutcome) {
            self.events.lock().unwrap().push(format!(
                "parsed {} {} {}",
                source.name, syntax, outcome.domain_count
            ));
        }

        fn source_failed(&self, source: &ListSource, _error: &FetchError) {
            self.events
                .lock()
                .unwrap()
                .push(format!("failed {}", source.name));
        }

        fn run_completed(&self, result: &AggregateResult) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done {}", result.total_domains()));
        }
    }

    #[test]
    fn test_observer_receives_events_in_order() {
        let a = source("a", ListFormat::Auto);
        let b = source("b", ListFormat::Auto);
        let observer = RecordingObserver::default();

        aggregate(
            vec![
                (&a, Ok("||ads.example.com^\n".to_string())),
                (&b, Err(failure(&b.url))),
            ],
            Utc::now(),
            &observer,
        );

        let events = observer.events.lock().unwrap().clone();
        assert_eq!(events, vec!["parsed a adblock 1", "failed b", "done 1"]);
    }

    #[tokio::test]
    async fn test_aggregator_run_with_mock_fetcher() {
        let sources = vec![
            source("one", ListFormat::Hosts),
            source("two", ListFormat::Auto),
            source("three", ListFormat::Adblock),
        ];

        let mut fetcher = MockFetch::new();
        fetcher.expect_fetch().times(3).returning(|url| {
            if url.ends_with("/one") {
                Ok("0.0.0.0 one.example.com\n".to_string())
            } else if url.ends_with("/two") {
                Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
            } else {
                Ok("||three.example.com^\n".to_string())
            }
        });

        let result = Aggregator::new(&fetcher)
            .with_observer(&NoopObserver)
            .with_max_concurrent(2)
            .run(&sources)
            .await;

        let statuses: Vec<SourceStatus> = result.outcomes.iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![
                SourceStatus::Success,
                SourceStatus::FetchFailed,
                SourceStatus::Success
            ]
        );
        assert_eq!(result.total_domains(), 2);
    }

    /// Finishes later sources first
    struct ReversedLatencyFetcher;

    #[async_trait::async_trait]
    impl Fetch for ReversedLatencyFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            let (delay_ms, body) = if url.ends_with("/one") {
                (60, "one.example.com\n")
            } else if url.ends_with("/two") {
                (30, "two.example.com\n")
            } else {
                (0, "three.example.com\n")
            };
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
            Ok(body.to_string())
        }
    }

    #[tokio::test]
    async fn test_aggregator_run_keeps_declared_order() {
        let sources = vec![
            source("one", ListFormat::Plain),
            source("two", ListFormat::Plain),
            source("three", ListFormat::Plain),
        ];
        let observer = RecordingObserver::default();

        let result = Aggregator::new(&ReversedLatencyFetcher)
            .with_observer(&observer)
            .with_max_concurrent(3)
            .run(&sources)
            .await;

        let names: Vec<&str> = result.outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "three"]);
        assert_eq!(result.total_domains(), 3);

        let events = observer.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "parsed one plain 1",
                "parsed two plain 1",
                "parsed three plain 1",
                "done 3"
            ]
        );
    }

    #[tokio::test]
    async fn test_aggregator_run_empty_sources() {
        let fetcher = MockFetch::new();
        let result = Aggregator::new(&fetcher).run(&[]).await;
        assert!(result.outcomes.is_empty());
        assert!(result.all_domains.is_empty());
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = SourceOutcome::fetch_failed(&source("x", ListFormat::Auto));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "fetch_failed");
        assert_eq!(json["domains"], 0);
        assert_eq!(json["name"], "x");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::observer::NoopObserver;
    use crate::parser::{parse_plain, ListFormat};
    use proptest::prelude::*;

    fn list_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-f]{1,3}\\.(com|net)", 0..30)
    }

    proptest! {
        /// Global set equals the union of each source's own set
        #[test]
        fn prop_union(a in list_strategy(), b in list_strategy()) {
            let sa = ListSource::new("a", "https://example.com/a", ListFormat::Plain);
            let sb = ListSource::new("b", "https://example.com/b", ListFormat::Plain);
            let ca = a.join("\n");
            let cb = b.join("\n");

            let mut expected = parse_plain(&ca);
            expected.extend(parse_plain(&cb));

            let result = aggregate(
                vec![(&sa, Ok(ca.clone())), (&sb, Ok(cb.clone()))],
                Utc::now(),
                &NoopObserver,
            );
            prop_assert_eq!(result.all_domains, expected);
        }

        /// Running twice over the same content gives the same set
        #[test]
        fn prop_idempotent(a in list_strategy()) {
            let sa = ListSource::new("a", "https://example.com/a", ListFormat::Auto);
            let content = a.join("\n");
            let first = aggregate(vec![(&sa, Ok(content.clone()))], Utc::now(), &NoopObserver);
            let second = aggregate(vec![(&sa, Ok(content))], Utc::now(), &NoopObserver);
            prop_assert_eq!(first.all_domains, second.all_domains);
            prop_assert_eq!(first.outcomes, second.outcomes);
        }
    }
}
