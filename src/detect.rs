//! Syntax selection for a fetched list.

use crate::parser::{ListFormat, Syntax};

/// Marker whose presence makes `auto` content parse as a hosts file
const HOSTS_MARKER: &str = "127.0.0.1";

/// Marker whose presence makes `auto` content parse as AdBlock rules
const ADBLOCK_MARKER: &str = "||";

/// Pick the syntax to parse `content` with.
///
/// An explicit format always wins. For [`ListFormat::Auto`] the content is
/// sniffed: the hosts marker is checked before the AdBlock marker, and
/// anything else falls back to a plain list. A hosts file without any
/// `127.0.0.1` line is therefore parsed as plain text.
pub fn select_parser(declared: ListFormat, content: &str) -> Syntax {
    match declared {
        ListFormat::Hosts => Syntax::Hosts,
        ListFormat::Adblock => Syntax::Adblock,
        ListFormat::Plain => Syntax::Plain,
        ListFormat::Auto => sniff(content),
    }
}

fn sniff(content: &str) -> Syntax {
    if content.contains(HOSTS_MARKER) {
        Syntax::Hosts
    } else if content.contains(ADBLOCK_MARKER) {
        Syntax::Adblock
    } else {
        Syntax::Plain
    }
}
