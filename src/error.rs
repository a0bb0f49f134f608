use thiserror::Error;

/// Errors raised while loading the location catalog or basemap data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Error reading an asset from the FS.
    #[error("failed to read data file")]
    Io(#[from] std::io::Error),
    /// Malformed GeoJSON.
    #[error("failed to parse GeoJSON")]
    Parse(#[from] geojson::Error),
    /// A feature is missing a required property.
    #[error("feature {feature} is missing property {property:?}")]
    MissingProperty { feature: usize, property: &'static str },
    /// A property is present but has the wrong type or value.
    #[error("feature {feature} has invalid property {property:?}")]
    InvalidProperty { feature: usize, property: &'static str },
    /// Unknown category slug in the asset.
    #[error("feature {feature} has unknown category {slug:?}")]
    UnknownCategory { feature: usize, slug: String },
    /// Geometry does not match the category's kind (point records need one
    /// position, line records exactly two).
    #[error("feature {feature} has unsupported geometry: {reason}")]
    BadGeometry { feature: usize, reason: &'static str },
    /// Two records in one category share an id.
    #[error("duplicate id {id} in category {category:?}")]
    DuplicateId { category: crate::catalog::Category, id: u32 },
}
