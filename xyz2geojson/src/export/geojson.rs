//! Construction des features GeoJSON

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use xyz::Point;

use crate::error::ConvertError;

/// Crée une feature Point `[longitude, latitude, altitude]`
///
/// Les propriétés conservent les valeurs source du point.
pub fn point_feature(point: &Point, longitude: f64, latitude: f64, elevation: f64) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("originalX".to_string(), JsonValue::from(point.x));
    properties.insert("originalY".to_string(), JsonValue::from(point.y));
    properties.insert("originalZ".to_string(), JsonValue::from(point.z));
    properties.insert("sourceLineNumber".to_string(), JsonValue::from(point.line));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            longitude, latitude, elevation,
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Assemble les features dans l'ordre reçu
pub fn feature_collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Sérialise une FeatureCollection en texte GeoJSON compact
pub fn to_geojson_string(collection: &FeatureCollection) -> Result<String, ConvertError> {
    serde_json::to_string(collection).map_err(|e| ConvertError::Serialization(e.to_string()))
}

/// Numéro de ligne source d'une feature produite par [`point_feature`]
pub fn source_line(feature: &Feature) -> Option<u64> {
    feature
        .properties
        .as_ref()?
        .get("sourceLineNumber")?
        .as_u64()
}
