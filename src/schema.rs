use crate::error::{Result, ShapeError};
use crate::record::{RawFeature, ShapeRecord};
use serde_json::Value;
use tracing::debug;

/// Moves `from` to `to` in every feature's properties. An existing `to`
/// property is overwritten by the renamed value.
pub fn rename(mut features: Vec<RawFeature>, from: &str, to: &str) -> Result<Vec<RawFeature>> {
    for (i, feature) in features.iter_mut().enumerate() {
        let value = feature
            .properties
            .shift_remove(from)
            .ok_or_else(|| ShapeError::Schema {
                record: i,
                field: from.to_string(),
                reason: "is missing",
            })?;
        feature.properties.insert(to.to_string(), value);
    }
    debug!(from, to, records = features.len(), "renamed field");
    Ok(features)
}

/// Keeps only `field` (which must be text) and the geometry of each feature.
pub fn project(features: Vec<RawFeature>, field: &str) -> Result<Vec<ShapeRecord>> {
    let mut records = Vec::with_capacity(features.len());
    for (i, mut feature) in features.into_iter().enumerate() {
        let name = match feature.properties.shift_remove(field) {
            Some(Value::String(s)) => s,
            Some(_) => {
                return Err(ShapeError::Schema {
                    record: i,
                    field: field.to_string(),
                    reason: "is not text",
                })
            }
            None => {
                return Err(ShapeError::Schema {
                    record: i,
                    field: field.to_string(),
                    reason: "is missing",
                })
            }
        };
        records.push(ShapeRecord {
            administrative_region: name,
            geometry: feature.geometry,
        });
    }
    Ok(records)
}
