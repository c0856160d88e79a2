// tests/pipeline.rs
//
// Offline pipeline tests over canned markup: archive index → catalog →
// route extraction → conversion → aggregated feature collection, plus the
// cache behavior the pipeline leans on between runs.

use url::Url;

use runcity_scrape::cache::Store;
use runcity_scrape::core::routes::RouteExtractor;
use runcity_scrape::core::scan::scan;
use runcity_scrape::events::extract_events;
use runcity_scrape::geo::{points_script, Feature, FeatureCollection};
use runcity_scrape::resolve::{confirm_routes_section, convert_records, Route};

const ARCHIVE: &str = r#"
    <html><body>
    <a href="/ru/"><img src="logo.png"/></a>
    <a href="/ru/events/spb2021/">Autumn St Petersburg 2021</a>
    <a href="/ru/events/msk2020/">Moscow Classic 2020</a>
    <a href="/ru/news/">News</a>
    </body></html>
"#;

const ROUTES_PAGE: &str = r#"
    <html><body>
    <dl class="route">
      <dt id="cp01">
        <abbr class="latitude" title="55.75"></abbr>
        <abbr class="longitude" title="37.61"></abbr>
        KP-01 <a href="cp01/">card</a>
      </dt>
      <dd class="description">Red Square, north corner</dd>
      <dt id="note">Organizer's note, no coordinates</dt>
      <dd class="description">Bring water</dd>
      <dt id="cp02">
        <abbr class="latitude" title="55.70"></abbr>
        <abbr class="longitude" title="37.50"></abbr>
        KP-02 <a href="cp02/">card</a>
      </dt>
      <dd class="description">Park entrance</dd>
    </dl>
    </body></html>
"#;

fn archive_base() -> Url {
    Url::parse("https://www.runcity.org/ru/events/archive").unwrap()
}

fn event_routes(event_url: &str) -> Vec<Route> {
    let event_url = Url::parse(event_url).unwrap();
    let all = event_url.join("routes/all/").unwrap();
    let raw = scan(ROUTES_PAGE, RouteExtractor::new()).unwrap();
    convert_records(raw, &all).unwrap()
}

#[test]
fn catalog_is_oldest_first_and_absolute() {
    let events = extract_events(ARCHIVE, &archive_base()).unwrap();
    let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["msk2020", "spb2021"]);
    assert!(events.iter().all(|e| e.url.starts_with("https://")));
}

#[test]
fn routes_page_yields_only_coordinate_bearing_entries() {
    let routes = event_routes("https://www.runcity.org/ru/events/msk2020/");
    let ids: Vec<&str> = routes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["cp01", "cp02"]);
    assert_eq!(routes[0].latitude, 55.75);
    assert_eq!(
        routes[0].url,
        "https://www.runcity.org/ru/events/msk2020/routes/all/cp01/"
    );
    assert_eq!(routes[0].description, "Red Square, north corner");
}

#[test]
fn feature_ids_are_sequential_across_events() {
    let events = extract_events(ARCHIVE, &archive_base()).unwrap();
    let mut features = Vec::new();
    for event in &events {
        for route in event_routes(&event.url) {
            features.push(Feature::new(features.len(), &event.title, &route));
        }
    }
    let ids: Vec<usize> = features.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert!(features[0].properties.header.starts_with("Moscow Classic 2020:"));
    assert!(features[2].properties.header.starts_with("Autumn St Petersburg 2021:"));
}

#[test]
fn section_confirmation_against_canned_event_page() {
    let event_url = Url::parse("https://www.runcity.org/ru/events/msk2020/").unwrap();
    let all = event_url.join("routes/all/").unwrap();

    let page = r#"<a href="routes/">Контрольные пункты</a>"#;
    let pairs = scan(page, runcity_scrape::core::links::LinkExtractor::new()).unwrap();
    assert!(confirm_routes_section(&pairs, &event_url, &all).unwrap());

    let wrong = r#"<a href="/ru/events/spb2021/routes/">Маршруты</a>"#;
    let pairs = scan(wrong, runcity_scrape::core::links::LinkExtractor::new()).unwrap();
    assert!(confirm_routes_section(&pairs, &event_url, &all).is_err());
}

#[test]
fn cached_results_replay_without_the_producer() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    let routes = event_routes("https://www.runcity.org/ru/events/msk2020/");

    let first: Vec<Route> = store
        .json("cache/parsed/msk2020.json", true, || Ok(routes.clone()))
        .unwrap();
    let second: Vec<Route> = store
        .json("cache/parsed/msk2020.json", true, || {
            panic!("cached event must not be recomputed")
        })
        .unwrap();

    assert_eq!(first.len(), second.len());
    assert_eq!(first[0].id, second[0].id);
    assert_eq!(first[0].latitude, second[0].latitude);
    assert_eq!(first[1].url, second[1].url);
}

#[test]
fn two_runs_produce_byte_identical_artifacts() {
    let build = || {
        let events = extract_events(ARCHIVE, &archive_base()).unwrap();
        let mut features = Vec::new();
        for event in &events {
            for route in event_routes(&event.url) {
                features.push(Feature::new(features.len(), &event.title, &route));
            }
        }
        points_script(&FeatureCollection::new(features)).unwrap()
    };
    assert_eq!(build(), build());
    assert!(build().starts_with("function get_runcity_points() {return "));
}
