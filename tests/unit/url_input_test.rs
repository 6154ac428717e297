//! Address bar input resolution and host extraction.

use rstest::rstest;
use walletbrowser::services::url_input::{host, UrlResolver};
use walletbrowser::types::settings::SearchEngine;

#[rstest]
#[case("metamask.io", "https://metamask.io")]
#[case("  example.com  ", "https://example.com")]
#[case("www.google.com/search?q=eth", "https://www.google.com/search?q=eth")]
#[case("http://example.com", "http://example.com")]
#[case("https://app.uniswap.org/#/swap", "https://app.uniswap.org/#/swap")]
#[case("docs.example.co.uk/a-b_c~d", "https://docs.example.co.uk/a-b_c~d")]
fn test_addresses_get_a_protocol(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(UrlResolver::default().resolve(input), expected);
}

#[rstest]
#[case("ethereum", "https://www.google.com/search?q=ethereum")]
#[case("what is gas", "https://www.google.com/search?q=what+is+gas")]
#[case("localhost:8080", "https://www.google.com/search?q=localhost%3A8080")]
#[case("", "https://www.google.com/search?q=")]
fn test_keywords_become_google_search(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(UrlResolver::new(SearchEngine::Google).resolve(input), expected);
}

#[rstest]
#[case("defi", "https://duckduckgo.com/?q=defi")]
#[case("eth & btc", "https://duckduckgo.com/?q=eth+%26+btc")]
#[case("metamask.io", "https://metamask.io")]
fn test_duckduckgo_engine(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(UrlResolver::new(SearchEngine::DuckDuckGo).resolve(input), expected);
}

#[rstest]
#[case("https://app.uniswap.org/#/swap", Some("app.uniswap.org"))]
#[case("http://localhost:8080/x", Some("localhost"))]
#[case("https://User@Example.COM/path", Some("example.com"))]
#[case("about:newtab", None)]
#[case("not a url", None)]
fn test_host(#[case] url: &str, #[case] expected: Option<&str>) {
    assert_eq!(host(url).as_deref(), expected);
}
