use std::f64::consts::PI;

/// A geographic position in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    /// Longitude (-180 to 180)
    pub lon: f64,
    /// Latitude (-90 to 90)
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Axis-aligned geographic bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    /// Degenerate bounds covering a single point.
    pub fn of_point(p: GeoPoint) -> Self {
        Self {
            min_lon: p.lon,
            min_lat: p.lat,
            max_lon: p.lon,
            max_lat: p.lat,
        }
    }

    /// Grow the bounds to include `p`.
    pub fn extend(&mut self, p: GeoPoint) {
        self.min_lon = self.min_lon.min(p.lon);
        self.min_lat = self.min_lat.min(p.lat);
        self.max_lon = self.max_lon.max(p.lon);
        self.max_lat = self.max_lat.max(p.lat);
    }

    /// Merge another bounds into this one.
    pub fn merge(&mut self, other: GeoBounds) {
        self.extend(GeoPoint::new(other.min_lon, other.min_lat));
        self.extend(GeoPoint::new(other.max_lon, other.max_lat));
    }

    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lon >= self.min_lon
            && p.lon <= self.max_lon
            && p.lat >= self.min_lat
            && p.lat <= self.max_lat
    }
}

/// Normalized Web Mercator x for a longitude (0.0 at -180°, 1.0 at 180°).
fn mercator_x(lon: f64) -> f64 {
    (lon + 180.0) / 360.0
}

/// Normalized Web Mercator y for a latitude (0.0 at the north clip edge).
fn mercator_y(lat: f64) -> f64 {
    let lat_rad = lat.to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0
}

/// Inverse of [`mercator_y`].
fn mercator_lat(y: f64) -> f64 {
    (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees()
}

/// Viewport over the map: visible area, zoom level, and canvas size in
/// Braille pixels. Zoom 1.0 shows the whole world across the canvas width.
#[derive(Clone, Debug)]
pub struct Viewport {
    pub center: GeoPoint,
    /// Zoom level (higher = more zoomed in)
    pub zoom: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl Viewport {
    pub const MIN_ZOOM: f64 = 0.5;
    pub const MAX_ZOOM: f64 = 200.0;
    /// Cap applied when fitting the viewport to drawn geometry, so a single
    /// marker does not zoom in to street level.
    pub const MAX_FIT_ZOOM: f64 = 48.0;
    /// Fraction of the canvas that fitted bounds may occupy.
    const FIT_MARGIN: f64 = 0.85;

    pub fn new(center: GeoPoint, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
        }
    }

    /// Pan the viewport by a pixel delta.
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let scale = 360.0 / (self.zoom * self.width.max(1) as f64);
        self.center.lon += dx as f64 * scale;
        self.center.lat -= dy as f64 * scale * 0.5; // Mercator distortion

        if self.center.lon > 180.0 {
            self.center.lon -= 360.0;
        } else if self.center.lon < -180.0 {
            self.center.lon += 360.0;
        }
        self.center.lat = self.center.lat.clamp(-85.0, 85.0);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.5).min(Self::MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.5).max(Self::MIN_ZOOM);
    }

    /// Zoom towards a specific pixel location, keeping the geography under
    /// that pixel fixed.
    pub fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        let anchor = self.unproject(px, py);
        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);

        let (new_px, new_py) = self.project(anchor);
        self.pan(new_px - px, new_py - py);
    }

    /// Project a geographic position to canvas pixel coordinates.
    pub fn project(&self, p: GeoPoint) -> (i32, i32) {
        let scale = self.zoom * self.width as f64;
        let px =
            (mercator_x(p.lon) - mercator_x(self.center.lon)) * scale + self.width as f64 / 2.0;
        let py =
            (mercator_y(p.lat) - mercator_y(self.center.lat)) * scale + self.height as f64 / 2.0;
        (px as i32, py as i32)
    }

    /// Unproject canvas pixel coordinates back to a geographic position.
    pub fn unproject(&self, px: i32, py: i32) -> GeoPoint {
        let scale = self.zoom * self.width.max(1) as f64;
        let x = (px as f64 - self.width as f64 / 2.0) / scale + mercator_x(self.center.lon);
        let y = (py as f64 - self.height as f64 / 2.0) / scale + mercator_y(self.center.lat);
        GeoPoint::new(x * 360.0 - 180.0, mercator_lat(y))
    }

    /// Re-center and zoom so `bounds` fits inside the canvas, capped at
    /// `max_zoom`. Degenerate (single-point) bounds center the view at the
    /// cap instead of zooming without limit.
    pub fn fit_bounds(&mut self, bounds: GeoBounds, max_zoom: f64) {
        let y_min = mercator_y(bounds.max_lat);
        let y_max = mercator_y(bounds.min_lat);

        self.center.lon = (bounds.min_lon + bounds.max_lon) / 2.0;
        self.center.lat = mercator_lat((y_min + y_max) / 2.0);

        let dx = mercator_x(bounds.max_lon) - mercator_x(bounds.min_lon);
        let dy = y_max - y_min;
        let width = self.width.max(1) as f64;
        let height = self.height.max(1) as f64;

        // Pixel extent at zoom z is dx * z * width horizontally and
        // dy * z * width vertically; keep both within the margin.
        let zoom_x = if dx > 0.0 {
            Self::FIT_MARGIN / dx
        } else {
            f64::INFINITY
        };
        let zoom_y = if dy > 0.0 {
            Self::FIT_MARGIN * height / (width * dy)
        } else {
            f64::INFINITY
        };

        self.zoom = zoom_x
            .min(zoom_y)
            .min(max_zoom)
            .clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    /// Check if a projected point is on (or just off) the canvas.
    pub fn is_visible(&self, px: i32, py: i32) -> bool {
        px >= -10 && px < self.width as i32 + 10 && py >= -10 && py < self.height as i32 + 10
    }

    /// Rough bounding-box visibility check for a line segment.
    pub fn segment_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let min_x = p1.0.min(p2.0);
        let max_x = p1.0.max(p2.0);
        let min_y = p1.1.min(p2.1);
        let max_y = p1.1.max(p2.1);

        max_x >= 0 && min_x < self.width as i32 && max_y >= 0 && min_y < self.height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_center_lands_mid_canvas() {
        let vp = Viewport::new(GeoPoint::new(0.0, 0.0), 1.0, 100, 100);
        assert_eq!(vp.project(GeoPoint::new(0.0, 0.0)), (50, 50));
    }

    #[test]
    fn test_project_unproject_roundtrip() {
        let vp = Viewport::new(GeoPoint::new(32.24, 30.11), 12.0, 200, 120);
        let p = GeoPoint::new(31.23, 30.04);
        let (px, py) = vp.project(p);
        let back = vp.unproject(px, py);
        assert!((back.lon - p.lon).abs() < 0.5);
        assert!((back.lat - p.lat).abs() < 0.5);
    }

    #[test]
    fn test_pan_moves_center() {
        let mut vp = Viewport::new(GeoPoint::new(0.0, 0.0), 1.0, 100, 100);
        vp.pan(10, 0);
        assert!(vp.center.lon > 0.0);
        vp.pan(0, -10);
        assert!(vp.center.lat > 0.0);
    }

    #[test]
    fn test_pan_wraps_longitude() {
        let mut vp = Viewport::new(GeoPoint::new(179.0, 0.0), 1.0, 100, 100);
        vp.pan(1000, 0);
        assert!(vp.center.lon >= -180.0 && vp.center.lon <= 180.0);
    }

    #[test]
    fn test_fit_bounds_contains_corners() {
        let mut vp = Viewport::new(GeoPoint::new(0.0, 0.0), 1.0, 200, 120);
        let mut bounds = GeoBounds::of_point(GeoPoint::new(29.92, 31.20));
        bounds.extend(GeoPoint::new(33.98, 26.73));
        vp.fit_bounds(bounds, Viewport::MAX_FIT_ZOOM);

        for corner in [
            GeoPoint::new(bounds.min_lon, bounds.min_lat),
            GeoPoint::new(bounds.min_lon, bounds.max_lat),
            GeoPoint::new(bounds.max_lon, bounds.min_lat),
            GeoPoint::new(bounds.max_lon, bounds.max_lat),
        ] {
            let (px, py) = vp.project(corner);
            assert!(px >= 0 && px < 200, "corner x {px} outside canvas");
            assert!(py >= 0 && py < 120, "corner y {py} outside canvas");
        }
    }

    #[test]
    fn test_fit_bounds_single_point_caps_zoom() {
        let mut vp = Viewport::new(GeoPoint::new(0.0, 0.0), 1.0, 200, 120);
        let p = GeoPoint::new(31.23, 30.04);
        vp.fit_bounds(GeoBounds::of_point(p), Viewport::MAX_FIT_ZOOM);

        assert_eq!(vp.zoom, Viewport::MAX_FIT_ZOOM);
        let (px, py) = vp.project(p);
        assert!((px - 100).abs() <= 1, "point x {px} not centered");
        assert!((py - 60).abs() <= 1, "point y {py} not centered");
    }

    #[test]
    fn test_zoom_limits() {
        let mut vp = Viewport::new(GeoPoint::new(0.0, 0.0), 1.0, 100, 100);
        for _ in 0..100 {
            vp.zoom_out();
        }
        assert_eq!(vp.zoom, Viewport::MIN_ZOOM);
        for _ in 0..100 {
            vp.zoom_in();
        }
        assert_eq!(vp.zoom, Viewport::MAX_ZOOM);
    }
}
