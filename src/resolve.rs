// src/resolve.rs
//
// Per-event resolution: confirm the event page links to the consolidated
// route listing, extract its entries and turn the coordinate-bearing ones
// into typed records.

use serde::{Deserialize, Serialize};
use tracing::error;
use url::Url;

use crate::{
    cache::Store,
    core::{links::LinkExtractor, net, routes::{RawRoute, RouteExtractor}, scan},
    events::Event,
    params::{self, Params},
    BoxError,
};

/// A checkpoint that survived filtering: coordinates parsed, link resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub url: String,
}

/// Resolve one event to its routes. Returns an empty list when the event
/// has no routes section; that is only worth an error log when the event
/// is not on the known route-less list.
pub fn parse_event(store: &Store, params: &Params, event: &Event) -> Result<Vec<Route>, BoxError> {
    let main_key = format!("{}/{}", params::EVENT_HTML_DIR, event.id);
    let main_text = store.text(&main_key, params.html_cache, || net::http_get(&event.url))?;

    let event_url = Url::parse(&event.url)?;
    let all_routes_url = event_url.join("routes/all/")?;

    let pairs = scan::scan(&main_text, LinkExtractor::new())?;
    if !confirm_routes_section(&pairs, &event_url, &all_routes_url)? {
        if !params::NO_ROUTE_EVENTS.contains(&event.id.as_str()) {
            error!("no routes found for {}, check {} manually", event.id, event.url);
        }
        return Ok(Vec::new());
    }

    let routes_key = format!("{}/{}", params::ROUTES_HTML_DIR, event.id);
    let routes_text = store.text(&routes_key, params.html_cache, || {
        net::http_get(all_routes_url.as_str())
    })?;
    let raw = scan::scan(&routes_text, RouteExtractor::new())?;
    convert_records(raw, &all_routes_url)
}

/// Look for a link whose label names the routes section. The canonical URL
/// is computed from the event URL, not from the page: the discovered link
/// only has to agree with it, and disagreement means the label heuristic
/// matched the wrong element — that aborts the run.
pub fn confirm_routes_section(
    pairs: &[(String, String)],
    event_url: &Url,
    all_routes_url: &Url,
) -> Result<bool, BoxError> {
    for (link, label) in pairs {
        if !params::ROUTE_SECTION_LABELS.contains(&label.trim()) {
            continue;
        }
        let discovered = format!("{}all/", event_url.join(link)?);
        if discovered != all_routes_url.as_str() {
            return Err(format!(
                "routes link {discovered} does not match expected {all_routes_url} \
                 for {event_url}"
            )
            .into());
        }
        return Ok(true);
    }
    Ok(false)
}

/// Keep entries carrying both coordinates; parse them and resolve links.
///
/// An entry missing either coordinate is an informational note embedded in
/// the list, not an error. An entry that has coordinates but an unparsable
/// value (or no link at all) signals a structural change on a page known to
/// have routes, and that is fatal.
pub fn convert_records(raw: Vec<RawRoute>, base: &Url) -> Result<Vec<Route>, BoxError> {
    let mut kept = Vec::new();
    for item in raw {
        let (Some(lat), Some(lon)) = (item.latitude(), item.longitude()) else {
            continue;
        };
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| format!("bad latitude {lat:?} on route {}", item.id))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| format!("bad longitude {lon:?} on route {}", item.id))?;
        let link = item
            .link
            .as_deref()
            .ok_or_else(|| format!("route {} has coordinates but no link", item.id))?;
        let url = base.join(link)?;
        kept.push(Route {
            id: item.id,
            title: item.title,
            description: item.description,
            latitude,
            longitude,
            url: url.as_str().to_string(),
        });
    }
    Ok(kept)
}
