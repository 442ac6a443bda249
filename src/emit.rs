use crate::config::Config;
use crate::record::{ShapeCollection, ShapeRecord};
use serde_json::{Map, Value};

fn feature_value(record: &ShapeRecord, target_field: &str) -> Value {
    let mut properties = Map::new();
    properties.insert(
        target_field.to_string(),
        Value::String(record.administrative_region.clone()),
    );
    let geometry = record
        .geometry
        .as_ref()
        .map_or(Value::Null, |g| g.as_value().clone());
    let mut feature = Map::new();
    feature.insert("type".to_string(), Value::String("Feature".to_string()));
    feature.insert("properties".to_string(), Value::Object(properties));
    feature.insert("geometry".to_string(), geometry);
    Value::Object(feature)
}

pub fn to_value(collection: &ShapeCollection, config: &Config) -> Value {
    let mut root = Map::new();
    root.insert(
        "type".to_string(),
        Value::String("FeatureCollection".to_string()),
    );
    if config.keep_crs {
        if let Some(crs) = &collection.crs {
            root.insert("crs".to_string(), crs.clone());
        }
    }
    let features = collection
        .records
        .iter()
        .map(|r| feature_value(r, &config.target_field))
        .collect();
    root.insert("features".to_string(), Value::Array(features));
    Value::Object(root)
}

/// Serializes the collection as a GeoJSON `FeatureCollection`, newline-terminated.
pub fn emit_geojson(collection: &ShapeCollection, config: &Config) -> String {
    let value = to_value(collection, config);
    let mut out = if config.pretty {
        format!("{:#}", value)
    } else {
        value.to_string()
    };
    out.push('\n');
    out
}
