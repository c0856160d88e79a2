// src/params.rs

// Net config
pub const RUNCITY_ROOT: &str = "https://www.runcity.org/ru/";
pub const ARCHIVE_PATH: &str = "events/archive";

// Local cache layout. Keys ending in .json hold structured payloads,
// everything else is raw page text.
pub const EVENTS_KEY: &str = "cache/events.json";
pub const ARCHIVE_HTML_KEY: &str = "cache/events/archive.html";
pub const EVENT_HTML_DIR: &str = "cache/events";
pub const ROUTES_HTML_DIR: &str = "cache/routes_all";
pub const PARSED_DIR: &str = "cache/parsed";

// Output artifact
pub const POINTS_FILE: &str = "runcity_points.js";
pub const POINTS_FN: &str = "get_runcity_points";

/// Link labels that mark an event page's routes section. Exact match on the
/// trimmed link text; the site has used several synonyms over the years.
pub const ROUTE_SECTION_LABELS: [&str; 4] = [
    "Маршрут",
    "Маршруты",
    "Контрольные пункты",
    "Маршруты соренований",
];

/// Events with no published routes. Data table, not logic: an event listed
/// here yields an empty result silently; any other event without a routes
/// section is reported as an extraction gap.
pub const NO_ROUTE_EVENTS: [&str; 38] = [
    "pushkin2005",
    "dobrypiter2008",
    "dobrypiter2009",
    "ekb2009",
    "ekb2010",
    "magnitogorsk2011",
    "verhneuralsk2011",
    "ekb2011",
    "magnitogorsk2012",
    "concert2012",
    "metromsk2012",
    "victory2012",
    "ekb2012",
    "ufa2012",
    "deephigh2012",
    "metropolia2013",
    "magnitogorsk2013",
    "ekb2013",
    "college2013",
    "ufa2013",
    "constructivnoekb",
    "nizhnynovgorod2014",
    "magnitogorsk2014",
    "vuoksa2014",
    "ufa2014",
    "cleanpeterhof2015",
    "magnitogorsk2015",
    "verhneuralsk2015",
    "cleankuyvozi2015",
    "krapivin2016",
    "nizhnynovgorod2016",
    "ufa2016",
    "intellectuada2018autumn",
    "kazan2019",
    "intellectuada2021spring",
    "poets2021",
    "vdnh", // TODO: add subgames
    "onlineintegral2021",
];

#[derive(Clone)]
pub struct Params {
    pub list: bool,         // print the event catalog then exit
    pub update: bool,       // run the full pipeline, write the points script
    pub html_cache: bool,   // cache raw fetched pages
    pub result_cache: bool, // cache per-event extraction results
    pub verbose: bool,      // info-level logging
}

impl Params {
    pub fn new() -> Self {
        Self {
            list: false,
            update: false,
            html_cache: true,
            result_cache: true,
            verbose: false,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}
