use crate::catalog::MarkerColor;
use crate::map::{GeoBounds, GeoPoint};

/// One visual object currently drawn on the map.
#[derive(Clone, Debug)]
pub enum Layer {
    Marker {
        position: GeoPoint,
        title: String,
        description: String,
        color: MarkerColor,
    },
    Line {
        from: GeoPoint,
        to: GeoPoint,
        color: MarkerColor,
    },
}

impl Layer {
    pub fn bounds(&self) -> GeoBounds {
        match self {
            Layer::Marker { position, .. } => GeoBounds::of_point(*position),
            Layer::Line { from, to, .. } => {
                let mut bounds = GeoBounds::of_point(*from);
                bounds.extend(*to);
                bounds
            }
        }
    }
}

/// The group of layers currently displayed. Exactly one such group is live at
/// a time; every selection change clears it before drawing anew.
#[derive(Default, Debug)]
pub struct LayerSet {
    layers: Vec<Layer>,
}

impl LayerSet {
    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Remove all layers. Safe to call when nothing is displayed.
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Combined bounds of all layer geometry, `None` when empty.
    pub fn bounds(&self) -> Option<GeoBounds> {
        let mut iter = self.layers.iter();
        let mut bounds = iter.next()?.bounds();
        for layer in iter {
            bounds.merge(layer.bounds());
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(lon: f64, lat: f64) -> Layer {
        Layer::Marker {
            position: GeoPoint::new(lon, lat),
            title: "ميناء".to_string(),
            description: String::new(),
            color: MarkerColor::Green,
        }
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut set = LayerSet::default();
        set.clear();
        assert!(set.is_empty());
        set.push(marker(32.3, 31.2));
        set.clear();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.bounds(), None);
    }

    #[test]
    fn test_bounds_cover_all_layers() {
        let mut set = LayerSet::default();
        set.push(marker(29.9, 31.2));
        set.push(marker(32.5, 29.9));
        set.push(Layer::Line {
            from: GeoPoint::new(31.2, 30.0),
            to: GeoPoint::new(33.9, 26.7),
            color: MarkerColor::Blue,
        });

        let bounds = set.bounds().unwrap();
        assert!(bounds.contains(GeoPoint::new(29.9, 31.2)));
        assert!(bounds.contains(GeoPoint::new(32.5, 29.9)));
        assert!(bounds.contains(GeoPoint::new(33.9, 26.7)));
        assert_eq!(bounds.min_lat, 26.7);
        assert_eq!(bounds.max_lat, 31.2);
    }
}
