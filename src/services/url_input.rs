//! Address bar input handling.
//!
//! Typed input is either an address, which gets a protocol if it has none, or a
//! set of keywords, which becomes a search on the configured engine.

use std::sync::OnceLock;

use regex::Regex;
use url::{form_urlencoded, Url};

use crate::types::settings::SearchEngine;

/// Protocol prepended to addresses typed without one.
pub const DEFAULT_PROTOCOL: &str = "https://";

static ADDRESS_REGEX: OnceLock<Regex> = OnceLock::new();
static PROTOCOL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Optional http(s) prefix, dotted host, then at least one more url character.
fn address_regex() -> &'static Regex {
    ADDRESS_REGEX.get_or_init(|| {
        Regex::new(r"^(?:https?://)?[\w.-]+(?:\.[\w.-]+)+[\w\-._~:/?#\[\]@!&',;=.+]+$")
            .expect("Failed to compile address regex")
    })
}

fn protocol_regex() -> &'static Regex {
    PROTOCOL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z]*://").expect("Failed to compile protocol regex")
    })
}

impl SearchEngine {
    fn query_prefix(self) -> &'static str {
        match self {
            SearchEngine::Google => "https://www.google.com/search?q=",
            SearchEngine::DuckDuckGo => "https://duckduckgo.com/?q=",
        }
    }

    /// Search url for `query` on this engine.
    pub fn search_url(self, query: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!("{}{}", self.query_prefix(), encoded)
    }
}

/// Turns address bar input into a url to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResolver {
    search_engine: SearchEngine,
    default_protocol: String,
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new(SearchEngine::default())
    }
}

impl UrlResolver {
    pub fn new(search_engine: SearchEngine) -> Self {
        Self {
            search_engine,
            default_protocol: DEFAULT_PROTOCOL.to_string(),
        }
    }

    pub fn with_default_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.default_protocol = protocol.into();
        self
    }

    pub fn search_engine(&self) -> SearchEngine {
        self.search_engine
    }

    /// Resolves `input` to a url. Surrounding whitespace is ignored.
    pub fn resolve(&self, input: &str) -> String {
        let input = input.trim();
        if !address_regex().is_match(input) {
            return self.search_engine.search_url(input);
        }
        if protocol_regex().is_match(input) {
            input.to_string()
        } else {
            format!("{}{}", self.default_protocol, input)
        }
    }
}

/// Hostname of `url`, or `None` when it does not parse or has no host.
pub fn host(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_string)
}
