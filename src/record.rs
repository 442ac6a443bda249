//! Data types passed between the preparation stages.

use indexmap::IndexMap;
use serde_json::Value;

/// GeoJSON geometry types accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    pub fn from_type_name(name: &str) -> Option<GeometryKind> {
        match name {
            "Point" => Some(GeometryKind::Point),
            "MultiPoint" => Some(GeometryKind::MultiPoint),
            "LineString" => Some(GeometryKind::LineString),
            "MultiLineString" => Some(GeometryKind::MultiLineString),
            "Polygon" => Some(GeometryKind::Polygon),
            "MultiPolygon" => Some(GeometryKind::MultiPolygon),
            "GeometryCollection" => Some(GeometryKind::GeometryCollection),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        }
    }
}

/// A validated GeoJSON geometry. The JSON object is kept verbatim so it
/// round-trips unchanged; only its shape is checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    kind: GeometryKind,
    raw: Value,
}

impl Geometry {
    pub fn from_value(value: Value) -> Result<Geometry, String> {
        let kind = check_geometry(&value)?;
        Ok(Geometry { kind, raw: value })
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn into_value(self) -> Value {
        self.raw
    }
}

fn check_geometry(value: &Value) -> Result<GeometryKind, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "geometry is not a JSON object".to_string())?;
    let type_name = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| "geometry has no `type`".to_string())?;
    let kind = GeometryKind::from_type_name(type_name)
        .ok_or_else(|| format!("unsupported geometry type `{}`", type_name))?;

    if kind == GeometryKind::GeometryCollection {
        let members = obj
            .get("geometries")
            .and_then(Value::as_array)
            .ok_or_else(|| "GeometryCollection has no `geometries` array".to_string())?;
        for member in members {
            check_geometry(member)?;
        }
    } else if !obj.get("coordinates").is_some_and(Value::is_array) {
        return Err(format!("{} has no `coordinates` array", kind.as_str()));
    }
    Ok(kind)
}

/// A feature as read from disk, before any schema change.
#[derive(Debug, Clone)]
pub struct RawFeature {
    pub properties: IndexMap<String, Value>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone)]
pub struct RawCollection {
    pub crs: Option<Value>,
    pub features: Vec<RawFeature>,
}

/// One prepared feature: the region name and its untouched geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    pub administrative_region: String,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeCollection {
    /// Coordinate reference system header shared by every record.
    pub crs: Option<Value>,
    pub records: Vec<ShapeRecord>,
}

impl ShapeCollection {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
