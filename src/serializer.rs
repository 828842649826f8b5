//! Rendering of the merged blocklist as a Pi-hole compatible hosts file.
//!
//! Output is fully determined by the domain set, the timestamp and the
//! branding: domains are sorted bytewise, never in hash or insertion order.

use chrono::{DateTime, Utc};

use crate::domain::{Domain, DomainSet};
use crate::utils::format_count_with_separator;

/// Address every blocked domain is pointed at
pub const SINKHOLE_ADDRESS: &str = "0.0.0.0";

const TITLE: &str = "Auto-Generated Pi-hole Blocklist";

const TIMESTAMP_FORMAT: &str = "%d %B %Y %H:%M:%S (UTC)";

const SEPARATOR: &str = "# ===============================================================";

/// Loopback/broadcast entries written before the crawled domains on every run
pub const CANONICAL_PREAMBLE: &str = "\
127.0.0.1 localhost
127.0.0.1 localhost.localdomain
127.0.0.1 local
255.255.255.255 broadcasthost
::1 localhost
::1 ip6-localhost
::1 ip6-loopback
fe80::1%lo0 localhost
ff00::0 ip6-localnet
ff00::0 ip6-mcastprefix
ff02::1 ip6-allnodes
ff02::2 ip6-allrouters
ff02::2 ip6-allhosts
0.0.0.0 0.0.0.0

# Custom host records are listed here.

# End of custom host records.
# Start Auto-Generated Blocklist

#=====================================
";

const FOOTER: &str = "# End of auto-generated blocklist.\n";

/// Project links shown in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Branding {
    /// e.g. `https://github.com/owner/repo`
    pub repository_url: Option<String>,
    /// File name used to build the raw download link
    pub output_file: String,
}

impl Branding {
    pub fn new(repository_url: Option<String>, output_file: impl Into<String>) -> Self {
        Self {
            repository_url,
            output_file: output_file.into(),
        }
    }

    /// Direct download link, only derivable for GitHub repositories
    fn raw_url(&self, repository_url: &str) -> Option<String> {
        let repo = repository_url
            .strip_prefix("https://github.com/")?
            .trim_end_matches('/');
        if repo.is_empty() || self.output_file.is_empty() {
            return None;
        }
        Some(format!(
            "https://raw.githubusercontent.com/{}/master/{}",
            repo, self.output_file
        ))
    }
}

/// Renders a domain set into the final blocklist text.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    branding: Branding,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branding(branding: Branding) -> Self {
        Self { branding }
    }

    pub fn render(&self, domains: &DomainSet, timestamp: DateTime<Utc>) -> String {
        let mut sorted: Vec<&Domain> = domains.iter().collect();
        sorted.sort_unstable();

        // header + preamble are ~2 KB; each line is address + space + domain + newline
        let body_len: usize = sorted
            .iter()
            .map(|d| SINKHOLE_ADDRESS.len() + d.as_str().len() + 2)
            .sum();
        let mut out = String::with_capacity(2048 + body_len);

        self.write_header(&mut out, domains.len(), timestamp);
        out.push('\n');
        out.push_str(CANONICAL_PREAMBLE);
        out.push_str("# Title: ");
        out.push_str(TITLE);
        out.push_str("\n# Generated from multiple reputable sources\n\n");

        for domain in sorted {
            out.push_str(SINKHOLE_ADDRESS);
            out.push(' ');
            out.push_str(domain.as_str());
            out.push('\n');
        }

        out.push('\n');
        out.push_str(FOOTER);
        out
    }

    fn write_header(&self, out: &mut String, total: usize, timestamp: DateTime<Utc>) {
        let mut lines = vec![
            format!("# Title: {}", TITLE),
            "#".to_string(),
            "# This hosts file is a merged collection of hosts from reputable sources,".to_string(),
            "# automatically converted and updated".to_string(),
            "#".to_string(),
            format!("# Date: {}", timestamp.format(TIMESTAMP_FORMAT)),
            format!(
                "# Number of unique domains: {}",
                format_count_with_separator(total)
            ),
            "#".to_string(),
        ];

        if let Some(repository_url) = self.branding.repository_url.as_deref() {
            let repository_url = repository_url.trim_end_matches('/');
            if let Some(raw_url) = self.branding.raw_url(repository_url) {
                lines.push(format!(
                    "# Fetch the latest version of this file: {}",
                    raw_url
                ));
            }
            lines.push(format!("# Project home page: {}", repository_url));
            lines.push(format!("# Project releases: {}/releases", repository_url));
            lines.push("#".to_string());
        }

        lines.push(SEPARATOR.to_string());

        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }
}

/// Render with the default, unbranded header.
pub fn render(domains: &DomainSet, timestamp: DateTime<Utc>) -> String {
    Serializer::new().render(domains, timestamp)
}
