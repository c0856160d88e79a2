// src/core/routes.rs
//
// Route extractor: rebuilds route/checkpoint records from the consolidated
// routes page. The records live in a `<dl class="route">` definition list:
// each `<dt id=...>` opens an entry, `<abbr class=... title=...>` elements
// inside it carry typed attributes (latitude, longitude, ...), and a
// `<dd class="description">` holds the entry's description text.
//
// Everything is inert until the list container is seen; a handful of
// boolean flags track which sub-element we are in, and the last record in
// the output vec is the one under construction.

use std::collections::BTreeMap;

use tracing::debug;

use super::scan::{attr, Attr, Extractor};

/// One entry as found in the markup. Coordinates (and any other `abbr`
/// classifications) stay raw attribute text here; whether a record without
/// them is kept is the caller's call, not ours.
#[derive(Debug, Clone, Default)]
pub struct RawRoute {
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub marks: BTreeMap<String, String>,
}

impl RawRoute {
    pub fn latitude(&self) -> Option<&str> {
        self.marks.get("latitude").map(String::as_str)
    }

    pub fn longitude(&self) -> Option<&str> {
        self.marks.get("longitude").map(String::as_str)
    }
}

pub struct RouteExtractor {
    routes: Vec<RawRoute>,
    in_routes: bool,
    in_a: bool,
    in_id: bool,
    in_description: bool,
}

impl RouteExtractor {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            in_routes: false,
            in_a: false,
            in_id: false,
            in_description: false,
        }
    }
}

impl Default for RouteExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for RouteExtractor {
    type Output = Vec<RawRoute>;

    fn start_tag(&mut self, tag: &str, attrs: &[Attr]) {
        if !self.in_routes {
            if tag == "dl" && attr(attrs, "class") == Some("route") {
                self.in_routes = true;
            }
            return;
        }
        debug!("BEG {} {:?} {} {}", tag, attrs, self.in_id, self.in_description);
        if tag == "a" {
            self.in_a = true;
        }
        if tag == "dt" {
            self.routes.push(RawRoute {
                id: attr(attrs, "id").unwrap_or_default().to_string(),
                ..RawRoute::default()
            });
            self.in_id = true;
        }
        if tag == "abbr" {
            if let Some(current) = self.routes.last_mut() {
                if let (Some(class), Some(title)) = (attr(attrs, "class"), attr(attrs, "title")) {
                    current.marks.insert(class.to_string(), title.to_string());
                }
            }
        }
        if tag == "dd" && attr(attrs, "class") == Some("description") {
            self.in_description = true;
        }
        if self.in_id && tag == "a" {
            if let Some(current) = self.routes.last_mut() {
                // First anchor in the entry's id section wins
                if current.link.is_none() {
                    if let Some(href) = attr(attrs, "href") {
                        current.link = Some(href.to_string());
                    }
                }
            }
        }
    }

    fn end_tag(&mut self, tag: &str) {
        if !self.in_routes {
            return;
        }
        debug!("END {}", tag);
        if tag == "dl" {
            self.in_routes = false;
        }
        if self.in_a && tag == "a" {
            self.in_a = false;
        }
        if self.in_id && tag == "dt" {
            self.in_id = false;
        }
        if self.in_description && tag == "dd" {
            self.in_description = false;
        }
    }

    fn text(&mut self, data: &str) {
        if !self.in_routes {
            return;
        }
        let data = data.trim();
        debug!("DAT {}", data);
        let (in_id, in_description, in_a) = (self.in_id, self.in_description, self.in_a);
        if let Some(current) = self.routes.last_mut() {
            // Link labels are suppressed; fragments append untrimmed between
            // each other (each fragment is trimmed, the sum never is)
            if in_id && !in_a {
                current.title.push_str(data);
            }
            if in_description && !in_a {
                current.description.push_str(data);
            }
        }
    }

    fn finish(self) -> Self::Output {
        self.routes
    }
}
