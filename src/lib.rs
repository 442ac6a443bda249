pub mod config;
pub mod emit;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod record;
pub mod schema;

use config::Config;
use error::{Result, ShapeError};
use normalize::TransliterationWarning;
use record::ShapeCollection;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

static RE_SHAPES_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(json|geojson)$").unwrap());

/// Prepared shapes plus the non-fatal transliteration warnings raised on the way.
#[derive(Debug, Clone, Default)]
pub struct Prepared {
    pub shapes: ShapeCollection,
    pub warnings: Vec<TransliterationWarning>,
}

pub fn prepare(text: &str, config: &Config) -> Result<Prepared> {
    prepare_named(text, "<input>", config)
}

/// Runs every stage on one GeoJSON document. `source_name` only labels errors.
pub fn prepare_named(text: &str, source_name: &str, config: &Config) -> Result<Prepared> {
    // Stage 1
    let raw = parse::stage1(text, source_name)?;

    // Stage 2
    let features = schema::rename(raw.features, &config.source_field, &config.target_field)?;

    // Stage 3
    let mut records = schema::project(features, &config.target_field)?;

    // Stage 4
    let warnings = normalize::stage4(&mut records);
    if config.strict && !warnings.is_empty() {
        return Err(ShapeError::Strict {
            count: warnings.len(),
        });
    }

    info!(
        source = source_name,
        records = records.len(),
        warnings = warnings.len(),
        "prepared shapes"
    );
    Ok(Prepared {
        shapes: ShapeCollection {
            crs: raw.crs,
            records,
        },
        warnings,
    })
}

pub fn load(path: &Path, config: &Config) -> Result<Prepared> {
    let name = path.display().to_string();
    let text = fs::read_to_string(path)
        .map_err(|e| ShapeError::data_format(&name, format!("cannot read: {}", e)))?;
    prepare_named(&text, &name, config)
}

/// Loads several files in order into one collection. All inputs must agree
/// on the CRS header (files without one are fine).
pub fn load_all(paths: &[PathBuf], config: &Config) -> Result<Prepared> {
    let mut merged = Prepared::default();
    for path in paths {
        let Prepared { shapes, warnings } = load(path, config)?;
        if let Some(crs) = shapes.crs {
            if let Some(current) = &merged.shapes.crs {
                if *current != crs {
                    return Err(ShapeError::data_format(
                        &path.display().to_string(),
                        format!("CRS {} differs from earlier input CRS {}", crs, current),
                    ));
                }
            } else {
                merged.shapes.crs = Some(crs);
            }
        }
        let offset = merged.shapes.records.len();
        merged
            .warnings
            .extend(warnings.into_iter().map(|w| TransliterationWarning {
                record: w.record + offset,
                ..w
            }));
        merged.shapes.records.extend(shapes.records);
        debug!(path = %path.display(), total = merged.shapes.len(), "merged input");
    }
    Ok(merged)
}

pub fn write_geojson(path: &Path, shapes: &ShapeCollection, config: &Config) -> Result<()> {
    fs::write(path, emit::emit_geojson(shapes, config)).map_err(|source| ShapeError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Expands directories into the shapes files under them. A missing input is a
/// `DataFormat` error, like any absent input file.
pub fn list_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = Vec::new();

    for p in inputs {
        let unreadable =
            |e: std::io::Error| ShapeError::data_format(&p.display().to_string(), e.to_string());
        if p.is_dir() {
            for entry in fs::read_dir(p).map_err(unreadable)? {
                let sub_path = entry.map_err(unreadable)?.path();
                if sub_path.is_dir() {
                    out.extend(list_files(&[sub_path])?);
                } else if is_shapes_file(&sub_path) {
                    out.push(sub_path);
                }
            }
        } else if p.is_file() {
            // Explicitly named files are taken whatever their extension.
            out.push(p.clone());
        } else {
            return Err(ShapeError::data_format(
                &p.display().to_string(),
                "no such file or directory",
            ));
        }
    }

    out.sort();
    Ok(out)
}

fn is_shapes_file(path: &Path) -> bool {
    path.is_file() && path.to_str().is_some_and(|s| RE_SHAPES_FILE.is_match(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": 7,
             "properties": {"nomera": "Москва", "codra": 1, "area_km2": 2511.0},
             "geometry": {"type": "Polygon", "coordinates": [[[37.3, 55.5], [37.9, 55.5], [37.9, 55.9], [37.3, 55.5]]]}},
            {"type": "Feature",
             "properties": {"nomera": "Île-de-France"},
             "geometry": {"type": "MultiPolygon", "coordinates": [[[[2.0, 48.5], [2.6, 48.5], [2.6, 49.0], [2.0, 48.5]]]]}}
        ]
    }"#;

    #[test]
    fn test_simple_prepare() {
        let prepared = prepare(SAMPLE, &Config::default()).unwrap();
        let names: Vec<&str> = prepared
            .shapes
            .records
            .iter()
            .map(|r| r.administrative_region.as_str())
            .collect();
        assert_eq!(names, vec!["MOSKVA", "ILE-DE-FRANCE"]);
        assert!(prepared.warnings.is_empty());
    }

    #[test]
    fn test_determinism() {
        let config = Config::default();
        let r1 = emit::emit_geojson(&prepare(SAMPLE, &config).unwrap().shapes, &config);
        let r2 = emit::emit_geojson(&prepare(SAMPLE, &config).unwrap().shapes, &config);
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_missing_source_field_fails_whole_run() {
        let text = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"nomera": "Centro"}, "geometry": null},
            {"type": "Feature", "properties": {"name": "Norte"}, "geometry": null}
        ]}"#;
        let err = prepare(text, &Config::default()).unwrap_err();
        assert!(matches!(err, ShapeError::Schema { record: 1, .. }));
    }

    #[test]
    fn test_custom_fields() {
        let text = r#"{"type": "Feature", "properties": {"NM_RA": "Tijuca"}, "geometry": null}"#;
        let config = Config {
            source_field: "NM_RA".to_string(),
            target_field: "region".to_string(),
            ..Config::default()
        };
        let prepared = prepare(text, &config).unwrap();
        assert_eq!(prepared.shapes.records[0].administrative_region, "TIJUCA");
    }

    #[test]
    fn test_strict_rejects_lossy_names() {
        let text = r#"{"type": "Feature", "properties": {"nomera": "Q\u0301"}, "geometry": null}"#;
        assert_eq!(prepare(text, &Config::default()).unwrap().warnings.len(), 1);

        let config = Config {
            strict: true,
            ..Config::default()
        };
        let err = prepare(text, &config).unwrap_err();
        assert!(matches!(err, ShapeError::Strict { count: 1 }));
    }

    #[test]
    fn test_strict_rejects_placeholder_characters() {
        let text = r#"{"type": "Feature", "properties": {"nomera": "Zona \u0241"}, "geometry": null}"#;
        let prepared = prepare(text, &Config::default()).unwrap();
        assert_eq!(prepared.warnings.len(), 1);
        assert_eq!(prepared.warnings[0].character, '\u{0241}');

        let config = Config {
            strict: true,
            ..Config::default()
        };
        let err = prepare(text, &config).unwrap_err();
        assert!(matches!(err, ShapeError::Strict { count: 1 }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("shapes.json"), &Config::default()).unwrap_err();
        assert!(matches!(err, ShapeError::DataFormat { .. }));
    }

    #[test]
    fn test_list_files_filters_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("b.geojson"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(nested.join("a.JSON"), "{}").unwrap();

        let files = list_files(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files, vec![dir.path().join("b.geojson"), nested.join("a.JSON")]);
    }

    #[test]
    fn test_list_files_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_files(&[dir.path().join("absent.json")]).unwrap_err();
        assert!(matches!(err, ShapeError::DataFormat { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
