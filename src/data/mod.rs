use std::collections::HashSet;
use std::fs;
use std::path::Path;

use geojson::{Feature, GeoJson, Geometry, Value};
use log::{debug, info, warn};

use crate::catalog::{Catalog, Category, GeometryKind, Record, RecordGeometry};
use crate::error::CatalogError;
use crate::map::{Basemap, GeoPoint, LineString};

/// The built-in location catalog, compiled into the binary.
const EMBEDDED_LOCATIONS: &str = include_str!("../../assets/locations.json");

/// Load the catalog compiled into the binary. The asset is validated at
/// startup like any external file would be.
pub fn embedded_catalog() -> Result<Catalog, CatalogError> {
    parse_catalog(EMBEDDED_LOCATIONS)
}

/// Load a catalog from a GeoJSON file on disk.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Parse a catalog from GeoJSON text. Every feature must carry `category`,
/// `id`, `title` and `description` properties; geometry must match the
/// category's kind (Point, or a two-position LineString for routes); ids must
/// be unique within their category.
pub fn parse_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let geojson: GeoJson = content.parse()?;
    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        _ => {
            return Err(CatalogError::BadGeometry {
                feature: 0,
                reason: "expected a FeatureCollection",
            })
        }
    };

    let mut catalog = Catalog::default();
    let mut seen: HashSet<(Category, u32)> = HashSet::new();

    for (index, feature) in features.iter().enumerate() {
        let slug = str_property(feature, index, "category")?;
        let category = Category::from_slug(slug).ok_or_else(|| CatalogError::UnknownCategory {
            feature: index,
            slug: slug.to_string(),
        })?;
        let id = id_property(feature, index)?;
        let title = str_property(feature, index, "title")?.to_string();
        let description = str_property(feature, index, "description")?.to_string();
        let geometry = parse_geometry(feature, index, category.geometry_kind())?;

        if !seen.insert((category, id)) {
            return Err(CatalogError::DuplicateId { category, id });
        }

        catalog.push(
            category,
            Record {
                id,
                title,
                description,
                geometry,
            },
        );
    }

    info!("catalog loaded: {} records", catalog.len());
    for category in Category::ALL {
        debug!(
            "  {}: {} records",
            category.slug(),
            catalog.records(category).len()
        );
    }
    Ok(catalog)
}

fn property<'a>(feature: &'a Feature, name: &str) -> Option<&'a serde_json::Value> {
    feature.properties.as_ref()?.get(name)
}

fn str_property<'a>(
    feature: &'a Feature,
    index: usize,
    name: &'static str,
) -> Result<&'a str, CatalogError> {
    let value = property(feature, name).ok_or(CatalogError::MissingProperty {
        feature: index,
        property: name,
    })?;
    value.as_str().ok_or(CatalogError::InvalidProperty {
        feature: index,
        property: name,
    })
}

fn id_property(feature: &Feature, index: usize) -> Result<u32, CatalogError> {
    let value = property(feature, "id").ok_or(CatalogError::MissingProperty {
        feature: index,
        property: "id",
    })?;
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(CatalogError::InvalidProperty {
            feature: index,
            property: "id",
        })
}

fn parse_geometry(
    feature: &Feature,
    index: usize,
    kind: GeometryKind,
) -> Result<RecordGeometry, CatalogError> {
    let geometry = feature.geometry.as_ref().ok_or(CatalogError::BadGeometry {
        feature: index,
        reason: "missing geometry",
    })?;

    match (kind, &geometry.value) {
        (GeometryKind::Point, Value::Point(coords)) => geo_point(coords)
            .map(RecordGeometry::Point)
            .ok_or(CatalogError::BadGeometry {
                feature: index,
                reason: "point needs lon and lat",
            }),
        (GeometryKind::Line, Value::LineString(positions)) => {
            if positions.len() != 2 {
                return Err(CatalogError::BadGeometry {
                    feature: index,
                    reason: "route lines need exactly two positions",
                });
            }
            let from = geo_point(&positions[0]).ok_or(CatalogError::BadGeometry {
                feature: index,
                reason: "position needs lon and lat",
            })?;
            let to = geo_point(&positions[1]).ok_or(CatalogError::BadGeometry {
                feature: index,
                reason: "position needs lon and lat",
            })?;
            Ok(RecordGeometry::Line(from, to))
        }
        (GeometryKind::Point, _) => Err(CatalogError::BadGeometry {
            feature: index,
            reason: "expected a Point",
        }),
        (GeometryKind::Line, _) => Err(CatalogError::BadGeometry {
            feature: index,
            reason: "expected a LineString",
        }),
    }
}

fn geo_point(coords: &[f64]) -> Option<GeoPoint> {
    if coords.len() >= 2 {
        Some(GeoPoint::new(coords[0], coords[1]))
    } else {
        None
    }
}

/// Load coastline GeoJSON files from a directory. Files that fail to parse
/// are skipped with a warning; an unreadable directory yields an empty
/// basemap (the caller falls back to the builtin one).
pub fn load_basemap(dir: &Path) -> Basemap {
    let mut basemap = Basemap::default();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("cannot read basemap dir {}: {err}", dir.display());
            return basemap;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let is_geojson = path
            .extension()
            .map(|ext| ext == "json" || ext == "geojson")
            .unwrap_or(false);
        if !is_geojson {
            continue;
        }

        match load_coastline_file(&mut basemap, &path) {
            Ok(count) => info!("loaded {count} coastlines from {}", path.display()),
            Err(err) => warn!("skipping {}: {err}", path.display()),
        }
    }

    basemap
}

fn load_coastline_file(basemap: &mut Basemap, path: &Path) -> Result<usize, CatalogError> {
    let content = fs::read_to_string(path)?;
    let geojson: GeoJson = content.parse()?;
    let mut count = 0;
    collect_lines(&geojson, &mut |line| {
        basemap.add_coastline(line);
        count += 1;
    });
    Ok(count)
}

/// Extract line features from any GeoJSON shape (polygons contribute their
/// exterior rings).
fn collect_lines<F>(geojson: &GeoJson, add_line: &mut F)
where
    F: FnMut(LineString),
{
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(geometry) = &feature.geometry {
                    collect_geometry_lines(geometry, add_line);
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = &feature.geometry {
                collect_geometry_lines(geometry, add_line);
            }
        }
        GeoJson::Geometry(geometry) => collect_geometry_lines(geometry, add_line),
    }
}

fn collect_geometry_lines<F>(geometry: &Geometry, add_line: &mut F)
where
    F: FnMut(LineString),
{
    let to_line =
        |coords: &[Vec<f64>]| coords.iter().filter_map(|c| geo_point(c)).collect::<Vec<_>>();

    match &geometry.value {
        Value::LineString(coords) => add_line(to_line(coords)),
        Value::MultiLineString(lines) => {
            for coords in lines {
                add_line(to_line(coords));
            }
        }
        Value::Polygon(rings) => {
            if let Some(exterior) = rings.first() {
                add_line(to_line(exterior));
            }
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                if let Some(exterior) = rings.first() {
                    add_line(to_line(exterior));
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_geometry_lines(g, add_line);
            }
        }
        _ => {}
    }
}

/// Simplified coastlines of the Eastern Mediterranean and Red Sea region,
/// used when no basemap directory is given so the screen is never blank.
pub fn builtin_basemap() -> Basemap {
    let mut basemap = Basemap::default();

    // Egyptian Mediterranean coast, west to east
    basemap.add_coastline(to_linestring(&[
        (25.2, 31.4),
        (27.0, 31.1),
        (28.5, 31.0),
        (29.5, 31.1),
        (29.9, 31.2),
        (30.4, 31.5),
        (31.0, 31.6),
        (31.8, 31.5),
        (32.3, 31.3),
        (33.1, 31.1),
        (34.2, 31.3),
    ]));

    // Suez Canal
    basemap.add_coastline(to_linestring(&[
        (32.30, 31.27),
        (32.32, 30.85),
        (32.27, 30.60),
        (32.33, 30.40),
        (32.43, 30.25),
        (32.55, 30.00),
        (32.57, 29.93),
    ]));

    // Gulf of Suez west shore and Red Sea coast
    basemap.add_coastline(to_linestring(&[
        (32.57, 29.93),
        (32.40, 29.55),
        (32.64, 29.05),
        (32.90, 28.70),
        (33.10, 28.40),
        (33.55, 27.82),
        (33.80, 27.30),
        (33.95, 26.90),
        (34.05, 26.55),
        (34.35, 25.60),
        (34.90, 24.80),
        (35.50, 24.00),
        (35.80, 23.00),
    ]));

    // Sinai peninsula: Gulf of Suez east shore, around Ras Mohammed, up the
    // Gulf of Aqaba
    basemap.add_coastline(to_linestring(&[
        (32.60, 29.90),
        (32.72, 29.45),
        (32.90, 29.00),
        (33.20, 28.50),
        (33.55, 28.05),
        (33.92, 27.73),
        (34.25, 27.80),
        (34.45, 28.10),
        (34.65, 28.60),
        (34.80, 29.10),
        (34.90, 29.50),
    ]));

    // Levant coast
    basemap.add_coastline(to_linestring(&[
        (34.2, 31.3),
        (34.5, 31.6),
        (34.9, 32.4),
        (35.0, 33.0),
        (35.2, 33.3),
        (35.6, 33.9),
        (35.9, 34.6),
    ]));

    // Cyprus
    basemap.add_coastline(to_linestring(&[
        (32.3, 35.2),
        (33.0, 35.4),
        (34.0, 35.6),
        (34.6, 35.3),
        (33.7, 34.95),
        (32.9, 34.65),
        (32.3, 34.7),
        (32.3, 35.2),
    ]));

    // Anatolian south coast
    basemap.add_coastline(to_linestring(&[
        (30.0, 36.3),
        (31.5, 36.1),
        (33.0, 36.1),
        (34.5, 36.6),
        (36.0, 36.8),
    ]));

    // Red Sea east (Arabian) coast
    basemap.add_coastline(to_linestring(&[
        (34.95, 29.35),
        (35.0, 28.5),
        (35.5, 27.5),
        (36.5, 26.5),
        (37.2, 25.5),
        (38.0, 24.5),
        (38.8, 23.5),
    ]));

    basemap
}

fn to_linestring(points: &[(f64, f64)]) -> LineString {
    points.iter().map(|&(lon, lat)| GeoPoint::new(lon, lat)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = embedded_catalog().unwrap();
        assert!(!catalog.is_empty());
        for category in Category::ALL {
            assert!(
                !catalog.records(category).is_empty(),
                "category {category:?} has no records"
            );
        }
    }

    #[test]
    fn test_embedded_geometry_kinds_match_categories() {
        let catalog = embedded_catalog().unwrap();
        for record in catalog.records(Category::Routes) {
            assert!(matches!(record.geometry, RecordGeometry::Line(_, _)));
        }
        for category in [Category::Ports, Category::Cities, Category::Landmarks] {
            for record in catalog.records(category) {
                assert!(matches!(record.geometry, RecordGeometry::Point(_)));
            }
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let content = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature",
                 "properties": {"category": "cities", "id": 1, "title": "أ", "description": "وصف"},
                 "geometry": {"type": "Point", "coordinates": [31.2, 30.0]}},
                {"type": "Feature",
                 "properties": {"category": "cities", "id": 1, "title": "ب", "description": "وصف"},
                 "geometry": {"type": "Point", "coordinates": [32.3, 30.6]}}
            ]
        }"#;
        assert!(matches!(
            parse_catalog(content),
            Err(CatalogError::DuplicateId {
                category: Category::Cities,
                id: 1
            })
        ));
    }

    #[test]
    fn test_route_needs_two_positions() {
        let content = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature",
                 "properties": {"category": "routes", "id": 1, "title": "مسار", "description": "وصف"},
                 "geometry": {"type": "LineString",
                              "coordinates": [[31.2, 30.0], [32.3, 30.6], [33.0, 31.0]]}}
            ]
        }"#;
        assert!(matches!(
            parse_catalog(content),
            Err(CatalogError::BadGeometry { .. })
        ));
    }

    #[test]
    fn test_unknown_category_slug_rejected() {
        let content = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature",
                 "properties": {"category": "roads", "id": 1, "title": "أ", "description": "وصف"},
                 "geometry": {"type": "Point", "coordinates": [31.2, 30.0]}}
            ]
        }"#;
        assert!(matches!(
            parse_catalog(content),
            Err(CatalogError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_missing_property_rejected() {
        let content = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature",
                 "properties": {"category": "cities", "id": 1, "title": "أ"},
                 "geometry": {"type": "Point", "coordinates": [31.2, 30.0]}}
            ]
        }"#;
        assert!(matches!(
            parse_catalog(content),
            Err(CatalogError::MissingProperty {
                property: "description",
                ..
            })
        ));
    }

    #[test]
    fn test_builtin_basemap_covers_default_view() {
        let basemap = builtin_basemap();
        assert!(basemap.has_data());
        assert!(basemap.coastline_count() >= 5);
    }
}
