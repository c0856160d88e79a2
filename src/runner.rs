// src/runner.rs
//
// Mode orchestration: the listing and the full update pipeline.
// Strictly sequential by design; events go through one at a time in
// catalog order and every fetch blocks until done.

use std::fs;

use crate::{
    cache::Store,
    events,
    geo::{points_script, Feature, FeatureCollection},
    params::{self, Params},
    resolve::{self, Route},
    BoxError,
};

/// Print `id, title, url, is_parsed` per event, tab-separated.
pub fn list_events(store: &Store, params: &Params) -> Result<(), BoxError> {
    println!("# id title url is_parsed");
    for event in events::get_events(store, params)? {
        println!(
            "{}\t{}\t{}\t{}",
            event.id, event.title, event.url, event.is_parsed
        );
    }
    Ok(())
}

/// Run the full pipeline and write the points script.
///
/// Per-event results pass through the cache keyed on the event id, so a
/// re-run after an interruption resumes from the last resolved event.
/// Feature ids are assigned 0..N-1 in processing order across the run.
pub fn update_events(store: &Store, params: &Params) -> Result<(), BoxError> {
    let mut features: Vec<Feature> = Vec::new();
    for event in events::get_events(store, params)? {
        let routes: Vec<Route> = store.json(&event.parsed_path, params.result_cache, || {
            resolve::parse_event(store, params, &event)
        })?;
        for route in &routes {
            features.push(Feature::new(features.len(), &event.title, route));
        }
    }
    let script = points_script(&FeatureCollection::new(features))?;
    fs::write(params::POINTS_FILE, script)?;
    Ok(())
}
