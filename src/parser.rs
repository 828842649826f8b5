//! Domain extraction from the three supported list syntaxes.
//!
//! Every parser is best-effort: lines that do not match a recognized shape,
//! and candidates rejected by [`Domain::parse`], are skipped silently.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::{Domain, DomainSet};

/// Format declared for a source in the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    /// `0.0.0.0 domain` mappings
    Hosts,
    /// AdBlock Plus filter rules (`||domain^`)
    Adblock,
    /// One domain per line
    Plain,
    /// Sniff the content to pick one of the above
    #[default]
    Auto,
}

impl fmt::Display for ListFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ListFormat::Hosts => "hosts",
            ListFormat::Adblock => "adblock",
            ListFormat::Plain => "plain",
            ListFormat::Auto => "auto",
        };
        f.write_str(s)
    }
}

impl FromStr for ListFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hosts" => Ok(ListFormat::Hosts),
            "adblock" => Ok(ListFormat::Adblock),
            "plain" => Ok(ListFormat::Plain),
            "auto" => Ok(ListFormat::Auto),
            other => Err(format!(
                "Invalid format '{}'. Valid values: hosts, adblock, plain, auto",
                other
            )),
        }
    }
}

/// Concrete syntax used to extract domains from a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    Hosts,
    Adblock,
    Plain,
}

impl Syntax {
    /// Extract the domain set of `content` using this syntax.
    pub fn parse(self, content: &str) -> DomainSet {
        match self {
            Syntax::Hosts => parse_hosts(content),
            Syntax::Adblock => parse_adblock(content),
            Syntax::Plain => parse_plain(content),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Syntax::Hosts => "hosts",
            Syntax::Adblock => "adblock",
            Syntax::Plain => "plain",
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trimmed, non-empty lines that do not start with `comment`.
fn content_lines(content: &str, comment: char) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(move |line| !line.is_empty() && !line.starts_with(comment))
}

/// Drop a trailing `# comment`.
fn strip_inline_comment(s: &str) -> &str {
    s.split('#').next().unwrap_or_default().trim()
}

/// Parse hosts-file syntax: `<ip> <domain> [# comment]`.
///
/// Only the first hostname of each mapping is taken.
pub fn parse_hosts(content: &str) -> DomainSet {
    content_lines(content, '#')
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter_map(|candidate| Domain::parse(strip_inline_comment(candidate)))
        .collect()
}

/// Parse AdBlock Plus filter syntax.
///
/// Recognized shapes:
/// - `||domain^`
/// - `||domain^$modifiers` (everything after the first `^` is ignored)
/// - a bare rule with no `||`, `|` or `@@` prefix, taken whole
///
/// Exception rules (`@@`) are skipped, they do not remove domains matched
/// by other lines.
pub fn parse_adblock(content: &str) -> DomainSet {
    content_lines(content, '!')
        .filter_map(adblock_candidate)
        .filter_map(Domain::parse)
        .collect()
}

fn adblock_candidate(line: &str) -> Option<&str> {
    if let Some(rule) = line.strip_prefix("||") {
        // `||domain^` and `||domain^$...` both end the domain at the first `^`
        return rule.split_once('^').map(|(domain, _)| domain);
    }

    if line.starts_with('|') || line.starts_with("@@") {
        return None;
    }

    Some(line)
}

/// Parse a plain list: one domain per line, `#` comments.
pub fn parse_plain(content: &str) -> DomainSet {
    content_lines(content, '#')
        .map(strip_inline_comment)
        .filter_map(Domain::parse)
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn line_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z]{1,10}\\.(com|net|org)",
            "0\\.0\\.0\\.0 [a-z]{1,10}\\.com",
            "\\|\\|[a-z]{1,10}\\.com\\^",
            Just("# comment".to_string()),
            Just("! comment".to_string()),
            Just(String::new()),
            ".{0,20}",
        ]
    }

    proptest! {
        /// Parsers never panic and only ever yield valid domains
        #[test]
        fn prop_parsers_yield_valid_domains(lines in prop::collection::vec(line_strategy(), 0..50)) {
            let content = lines.join("\n");
            for syntax in [Syntax::Hosts, Syntax::Adblock, Syntax::Plain] {
                for domain in syntax.parse(&content) {
                    prop_assert!(crate::domain::is_valid_domain(domain.as_str()));
                }
            }
        }

        /// Line order does not affect the extracted set
        #[test]
        fn prop_parse_order_independent(lines in prop::collection::vec(line_strategy(), 0..30)) {
            let forward = lines.join("\n");
            let mut reversed_lines = lines.clone();
            reversed_lines.reverse();
            let reversed = reversed_lines.join("\n");
            for syntax in [Syntax::Hosts, Syntax::Adblock, Syntax::Plain] {
                prop_assert_eq!(syntax.parse(&forward), syntax.parse(&reversed));
            }
        }
    }
}
