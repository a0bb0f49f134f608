use crate::braille::BrailleCanvas;
use crate::map::geometry::{draw_dashed_line, draw_line, draw_pin};
use crate::map::layer::{Layer, LayerSet};
use crate::map::projection::{GeoPoint, Viewport};

/// A geographic polyline (sequence of positions).
pub type LineString = Vec<GeoPoint>;

/// Dash pattern for route lines, in Braille pixels.
const ROUTE_DASH: (u32, u32) = (4, 2);

/// The background coastline geometry the overlays are drawn on top of.
#[derive(Default)]
pub struct Basemap {
    coastlines: Vec<LineString>,
}

impl Basemap {
    pub fn add_coastline(&mut self, line: LineString) {
        self.coastlines.push(line);
    }

    pub fn has_data(&self) -> bool {
        !self.coastlines.is_empty()
    }

    pub fn coastline_count(&self) -> usize {
        self.coastlines.len()
    }

    /// Draw all coastlines into `canvas`.
    pub fn render(&self, canvas: &mut BrailleCanvas, viewport: &Viewport) {
        for line in &self.coastlines {
            draw_linestring(canvas, line, viewport);
        }
    }
}

/// Draw a linestring with viewport culling.
fn draw_linestring(canvas: &mut BrailleCanvas, line: &[GeoPoint], viewport: &Viewport) {
    if line.len() < 2 {
        return;
    }

    let mut prev: Option<(i32, i32)> = None;
    for &p in line {
        let (px, py) = viewport.project(p);

        if let Some((prev_x, prev_y)) = prev {
            let dist = ((px - prev_x).abs() + (py - prev_y).abs()) as usize;
            if dist < viewport.width && viewport.segment_might_be_visible((prev_x, prev_y), (px, py))
            {
                draw_line(canvas, prev_x, prev_y, px, py);
            }
        }
        prev = Some((px, py));
    }
}

/// Marker title cells collected during overlay rendering, in character
/// coordinates, for the UI to draw next to the pins.
pub type MarkerLabels = Vec<(u16, u16, String)>;

/// Draw the displayed layer set into `canvas` and collect marker labels.
/// Route lines are dashed; their endpoint markers are separate layers.
pub fn render_overlay(
    canvas: &mut BrailleCanvas,
    layers: &LayerSet,
    viewport: &Viewport,
    show_labels: bool,
) -> MarkerLabels {
    let mut labels = Vec::new();

    for layer in layers.iter() {
        match layer {
            Layer::Marker {
                position, title, ..
            } => {
                let (px, py) = viewport.project(*position);
                if !viewport.is_visible(px, py) {
                    continue;
                }
                draw_pin(canvas, px, py);

                if show_labels && px >= 0 && py >= 0 {
                    let char_x = (px / 2) as u16;
                    let char_y = (py / 4) as u16;
                    if let Some(label_x) = char_x.checked_add(2) {
                        labels.push((label_x, char_y, title.clone()));
                    }
                }
            }
            Layer::Line { from, to, .. } => {
                let a = viewport.project(*from);
                let b = viewport.project(*to);
                if viewport.segment_might_be_visible(a, b) {
                    draw_dashed_line(canvas, a.0, a.1, b.0, b.1, ROUTE_DASH.0, ROUTE_DASH.1);
                }
            }
        }
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MarkerColor;

    fn viewport() -> Viewport {
        Viewport::new(GeoPoint::new(32.0, 30.0), 12.0, 120, 80)
    }

    fn canvas() -> BrailleCanvas {
        BrailleCanvas::new(60, 20)
    }

    fn non_empty_cells(canvas: &BrailleCanvas) -> usize {
        canvas
            .rows()
            .flat_map(|row| row.chars().collect::<Vec<_>>())
            .filter(|&c| c != '\u{2800}')
            .count()
    }

    #[test]
    fn test_basemap_renders_visible_coastline() {
        let mut basemap = Basemap::default();
        basemap.add_coastline(vec![GeoPoint::new(31.0, 30.0), GeoPoint::new(33.0, 30.5)]);
        assert!(basemap.has_data());

        let mut canvas = canvas();
        basemap.render(&mut canvas, &viewport());
        assert!(non_empty_cells(&canvas) > 0);
    }

    #[test]
    fn test_overlay_draws_marker_and_label() {
        let mut layers = LayerSet::default();
        layers.push(Layer::Marker {
            position: GeoPoint::new(32.0, 30.0),
            title: "القاهرة".to_string(),
            description: String::new(),
            color: MarkerColor::Red,
        });

        let mut canvas = canvas();
        let labels = render_overlay(&mut canvas, &layers, &viewport(), true);
        assert!(non_empty_cells(&canvas) > 0);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].2, "القاهرة");
    }

    #[test]
    fn test_overlay_skips_offscreen_marker() {
        let mut layers = LayerSet::default();
        layers.push(Layer::Marker {
            position: GeoPoint::new(-74.0, 40.7),
            title: "بعيد".to_string(),
            description: String::new(),
            color: MarkerColor::Green,
        });

        let mut canvas = canvas();
        let labels = render_overlay(&mut canvas, &layers, &viewport(), true);
        assert_eq!(non_empty_cells(&canvas), 0);
        assert!(labels.is_empty());
    }

    #[test]
    fn test_overlay_draws_route_line() {
        let mut layers = LayerSet::default();
        layers.push(Layer::Line {
            from: GeoPoint::new(31.5, 30.2),
            to: GeoPoint::new(32.5, 29.8),
            color: MarkerColor::Blue,
        });

        let mut canvas = canvas();
        let labels = render_overlay(&mut canvas, &layers, &viewport(), true);
        assert!(non_empty_cells(&canvas) > 0);
        assert!(labels.is_empty());
    }
}
