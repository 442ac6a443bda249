use crate::error::{Result, ShapeError};
use crate::record::{Geometry, RawCollection, RawFeature};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

fn parse_feature(value: Value, index: usize, source_name: &str) -> Result<RawFeature> {
    let Value::Object(mut obj) = value else {
        return Err(ShapeError::data_format(
            source_name,
            format!("feature {} is not a JSON object", index),
        ));
    };

    match obj.get("type").and_then(Value::as_str) {
        Some("Feature") => {}
        other => {
            return Err(ShapeError::data_format(
                source_name,
                format!("feature {} has type {:?}, expected \"Feature\"", index, other),
            ))
        }
    }

    let geometry = match obj.shift_remove("geometry") {
        None => {
            return Err(ShapeError::data_format(
                source_name,
                format!("feature {} has no `geometry` member", index),
            ))
        }
        Some(Value::Null) => None,
        Some(g) => Some(Geometry::from_value(g).map_err(|msg| {
            ShapeError::data_format(source_name, format!("feature {}: {}", index, msg))
        })?),
    };

    let properties: IndexMap<String, Value> = match obj.shift_remove("properties") {
        None | Some(Value::Null) => IndexMap::new(),
        Some(Value::Object(props)) => props.into_iter().collect(),
        Some(_) => {
            return Err(ShapeError::data_format(
                source_name,
                format!("feature {} has non-object `properties`", index),
            ))
        }
    };

    Ok(RawFeature {
        properties,
        geometry,
    })
}

fn take_crs(obj: &mut Map<String, Value>) -> Option<Value> {
    match obj.shift_remove("crs") {
        Some(Value::Null) | None => None,
        crs => crs,
    }
}

/// Parses a GeoJSON `FeatureCollection` (or a lone `Feature`) into raw features.
pub fn stage1(text: &str, source_name: &str) -> Result<RawCollection> {
    let root: Value = serde_json::from_str(text)
        .map_err(|e| ShapeError::data_format(source_name, format!("invalid JSON: {}", e)))?;

    let Value::Object(mut obj) = root else {
        return Err(ShapeError::data_format(
            source_name,
            "top-level value is not a JSON object",
        ));
    };

    let crs = take_crs(&mut obj);
    let type_name = obj
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default();

    let features = match type_name.as_str() {
        "FeatureCollection" => {
            let Some(Value::Array(items)) = obj.shift_remove("features") else {
                return Err(ShapeError::data_format(
                    source_name,
                    "FeatureCollection has no `features` array",
                ));
            };
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| parse_feature(item, i, source_name))
                .collect::<Result<Vec<_>>>()?
        }
        "Feature" => vec![parse_feature(Value::Object(obj), 0, source_name)?],
        other => {
            return Err(ShapeError::data_format(
                source_name,
                format!("expected a FeatureCollection or Feature, found type {:?}", other),
            ))
        }
    };

    debug!(source = source_name, features = features.len(), "parsed features");
    Ok(RawCollection { crs, features })
}
