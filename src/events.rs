// src/events.rs
//
// Event catalog: one record per archived event, oldest first.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    cache::Store,
    core::{links::LinkExtractor, net, sanitize::normalize_ws, scan},
    params::{self, Params},
    BoxError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub url: String,
    pub parsed_path: String,
    /// Observational only: recomputed against the store on every listing,
    /// never trusted from a cached catalog.
    #[serde(skip)]
    pub is_parsed: bool,
}

/// Build the catalog from the archive index text.
///
/// A link is an event when its label has at least two words and its target
/// contains an `/events/` segment; that filters out navigation chrome and
/// short labels. The archive lists newest first; the catalog is reversed so
/// events process oldest first.
pub fn extract_events(text: &str, base: &Url) -> Result<Vec<Event>, BoxError> {
    let mut events = Vec::new();
    for (link, label) in scan::scan(text, LinkExtractor::new())? {
        if label.split_whitespace().count() < 2 || !link.contains("/events/") {
            continue;
        }
        let id = match link.trim_end_matches('/').rsplit('/').next() {
            Some(seg) if !seg.is_empty() => seg.to_string(),
            _ => continue,
        };
        let url = base.join(&link)?;
        events.push(Event {
            parsed_path: format!("{}/{}.json", params::PARSED_DIR, id),
            id,
            // Labels spanning nested markup can carry inner newlines
            title: normalize_ws(&label),
            url: url.as_str().to_string(),
            is_parsed: false,
        });
    }
    events.reverse();
    Ok(events)
}

/// Fetch (or replay) the archive index and return the catalog.
/// The catalog itself is cached; `--no-html-cache` affects only the raw page.
pub fn get_events(store: &Store, params: &Params) -> Result<Vec<Event>, BoxError> {
    let base = Url::parse(params::RUNCITY_ROOT)?.join(params::ARCHIVE_PATH)?;
    let mut events = store.json(params::EVENTS_KEY, true, || {
        let text = store.text(params::ARCHIVE_HTML_KEY, params.html_cache, || {
            net::http_get(base.as_str())
        })?;
        extract_events(&text, &base)
    })?;
    for event in &mut events {
        event.is_parsed = store.exists(&event.parsed_path);
    }
    Ok(events)
}
