// src/geo.rs
//
// Output model: the aggregated dataset is a GeoJSON-shaped FeatureCollection
// wrapped in a small script so a map page can embed it directly.

use serde::{Deserialize, Serialize};

use crate::{params, resolve::Route, BoxError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: usize,
    pub geometry: Geometry,
    pub properties: Properties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

/// Balloon display strings for the map marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Properties {
    #[serde(rename = "balloonContentHeader")]
    pub header: String,
    #[serde(rename = "balloonContentBody")]
    pub body: String,
    #[serde(rename = "balloonContentFooter")]
    pub footer: String,
}

impl Feature {
    /// `id` is the running index across the whole run, in processing order.
    pub fn new(id: usize, event_title: &str, route: &Route) -> Self {
        Self {
            kind: s!("Feature"),
            id,
            geometry: Geometry {
                kind: s!("Point"),
                coordinates: [route.latitude, route.longitude],
            },
            properties: Properties {
                header: format!("{}: {}", event_title, route.title),
                body: route.description.clone(),
                footer: format!(r#"<a href="{0}">{0}</a>"#, route.url),
            },
        }
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: s!("FeatureCollection"),
            features,
        }
    }
}

/// The embeddable artifact: a zero-argument function returning the
/// collection.
pub fn points_script(collection: &FeatureCollection) -> Result<String, BoxError> {
    Ok(format!(
        "function {}() {{return {};}}",
        params::POINTS_FN,
        serde_json::to_string(collection)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Route {
        Route {
            id: s!("cp01"),
            title: s!("KP-01"),
            description: s!("Checkpoint 1"),
            latitude: 55.7,
            longitude: 37.6,
            url: s!("https://www.runcity.org/ru/events/msk2020/routes/all/cp01/"),
        }
    }

    #[test]
    fn feature_shape() {
        let f = Feature::new(3, "Moscow 2020", &route());
        assert_eq!(f.kind, "Feature");
        assert_eq!(f.id, 3);
        assert_eq!(f.geometry.kind, "Point");
        assert_eq!(f.geometry.coordinates, [55.7, 37.6]);
        assert_eq!(f.properties.header, "Moscow 2020: KP-01");
        assert_eq!(f.properties.body, "Checkpoint 1");
        assert!(f.properties.footer.starts_with("<a href=\"https://"));
        assert!(f.properties.footer.ends_with("</a>"));
    }

    #[test]
    fn script_wraps_the_collection_json() {
        let collection = FeatureCollection::new(vec![Feature::new(0, "E", &route())]);
        let script = points_script(&collection).unwrap();
        assert!(script.starts_with("function get_runcity_points() {return {"));
        assert!(script.ends_with(";}"));
        assert!(script.contains(r#""type":"FeatureCollection""#));
        assert!(script.contains(r#""balloonContentHeader":"E: KP-01""#));
    }

    #[test]
    fn display_names_serialize_as_the_map_expects() {
        let f = Feature::new(0, "E", &route());
        let json = serde_json::to_string(&f).unwrap();
        assert!(json.contains(r#""type":"Feature""#));
        assert!(json.contains(r#""type":"Point""#));
        assert!(json.contains(r#""balloonContentBody""#));
        assert!(json.contains(r#""balloonContentFooter""#));
        // round-trip keeps values
        let back: Feature = serde_json::from_str(&json).unwrap();
        assert_eq!(back.properties.header, f.properties.header);
        assert_eq!(back.geometry.coordinates, f.geometry.coordinates);
    }
}
