pub mod geometry;
mod layer;
mod projection;
mod renderer;

pub use layer::{Layer, LayerSet};
pub use projection::{GeoBounds, GeoPoint, Viewport};
pub use renderer::{render_overlay, Basemap, LineString, MarkerLabels};
