use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_environment_uses_defaults() {
    let cfg = ClientConfig::from_lookup(|_| None);
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.request_timeout, Some(Duration::from_secs(30)));
    assert_eq!(cfg.drag_debounce, Duration::from_millis(300));
    assert_eq!(cfg.history_limit, 100);
}

#[test]
fn inkspire_url_wins_over_next_public_url() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("INKSPIRE_API_URL", "https://boards.example.com/"),
        ("NEXT_PUBLIC_API_URL", "http://other:9000"),
    ]));
    assert_eq!(cfg.api_url, "https://boards.example.com");
}

#[test]
fn next_public_url_is_the_fallback() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("NEXT_PUBLIC_API_URL", "http://backend:8001")]));
    assert_eq!(cfg.api_url, "http://backend:8001");
}

#[test]
fn blank_url_falls_back_to_default() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("INKSPIRE_API_URL", "   ")]));
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
}

#[test]
fn zero_timeout_disables_it() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("INKSPIRE_REQUEST_TIMEOUT_SECS", "0")]));
    assert!(cfg.request_timeout.is_none());
}

#[test]
fn numeric_overrides_are_applied() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("INKSPIRE_REQUEST_TIMEOUT_SECS", "5"),
        ("INKSPIRE_DRAG_DEBOUNCE_MS", "50"),
        ("INKSPIRE_HISTORY_LIMIT", "3"),
    ]));
    assert_eq!(cfg.request_timeout, Some(Duration::from_secs(5)));
    assert_eq!(cfg.drag_debounce, Duration::from_millis(50));
    assert_eq!(cfg.history_limit, 3);
}

#[test]
fn garbage_numbers_fall_back_to_defaults() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("INKSPIRE_DRAG_DEBOUNCE_MS", "soon"),
        ("INKSPIRE_HISTORY_LIMIT", "-1"),
    ]));
    assert_eq!(cfg.drag_debounce, Duration::from_millis(DEFAULT_DRAG_DEBOUNCE_MS));
    assert_eq!(cfg.history_limit, DEFAULT_HISTORY_LIMIT);
}

#[test]
fn with_api_url_trims_trailing_slash() {
    let cfg = ClientConfig::default().with_api_url("http://127.0.0.1:3000/");
    assert_eq!(cfg.api_url, "http://127.0.0.1:3000");
}
