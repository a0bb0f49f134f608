use crate::map::{GeoBounds, GeoPoint};

/// The four fixed record categories. Each category owns one static record
/// table, one marker color and one geometry kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Ports,
    Cities,
    Routes,
    Landmarks,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Ports,
        Category::Cities,
        Category::Routes,
        Category::Landmarks,
    ];

    /// Fallback when a selection key is not recognized.
    pub const DEFAULT: Category = Category::Landmarks;

    /// Parse a legacy numeric selection key ("1".."4"). Unknown keys fall
    /// back to the default category.
    pub fn from_key(key: &str) -> Self {
        match key {
            "1" => Category::Ports,
            "2" => Category::Cities,
            "3" => Category::Routes,
            "4" => Category::Landmarks,
            other => {
                log::warn!("unknown category key {other:?}, using default");
                Category::DEFAULT
            }
        }
    }

    /// Parse a catalog asset slug. Strict: unknown slugs are a load error.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "ports" => Some(Category::Ports),
            "cities" => Some(Category::Cities),
            "routes" => Some(Category::Routes),
            "landmarks" => Some(Category::Landmarks),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Category::Ports => "ports",
            Category::Cities => "cities",
            Category::Routes => "routes",
            Category::Landmarks => "landmarks",
        }
    }

    /// Display title (Arabic, as shown in the selector).
    pub fn title(&self) -> &'static str {
        match self {
            Category::Ports => "موانئ",
            Category::Cities => "مدن",
            Category::Routes => "مسارات",
            Category::Landmarks => "معالم",
        }
    }

    pub fn color(&self) -> MarkerColor {
        match self {
            Category::Ports => MarkerColor::Green,
            Category::Cities => MarkerColor::Red,
            Category::Routes => MarkerColor::Blue,
            Category::Landmarks => MarkerColor::Orange,
        }
    }

    pub fn geometry_kind(&self) -> GeometryKind {
        match self {
            Category::Routes => GeometryKind::Line,
            _ => GeometryKind::Point,
        }
    }
}

/// Marker/line display color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerColor {
    Green,
    Red,
    Blue,
    Orange,
}

impl MarkerColor {
    pub fn name(&self) -> &'static str {
        match self {
            MarkerColor::Green => "green",
            MarkerColor::Red => "red",
            MarkerColor::Blue => "blue",
            MarkerColor::Orange => "orange",
        }
    }
}

/// Whether a category's records are single points or two-point lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    Line,
}

/// Record geometry, tagged so drawing code matches exhaustively instead of
/// branching on coordinate-array shape.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordGeometry {
    Point(GeoPoint),
    Line(GeoPoint, GeoPoint),
}

impl RecordGeometry {
    pub fn bounds(&self) -> GeoBounds {
        match self {
            RecordGeometry::Point(p) => GeoBounds::of_point(*p),
            RecordGeometry::Line(a, b) => {
                let mut bounds = GeoBounds::of_point(*a);
                bounds.extend(*b);
                bounds
            }
        }
    }
}

/// One immutable location or route record.
#[derive(Clone, Debug)]
pub struct Record {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub geometry: RecordGeometry,
}

/// Item selector within a category: everything, or one record by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemSelection {
    All,
    Id(u32),
}

/// The static record tables, partitioned by category. Built once at startup,
/// never mutated afterwards.
#[derive(Debug, Default)]
pub struct Catalog {
    ports: Vec<Record>,
    cities: Vec<Record>,
    routes: Vec<Record>,
    landmarks: Vec<Record>,
}

impl Catalog {
    pub fn push(&mut self, category: Category, record: Record) {
        self.table_mut(category).push(record);
    }

    pub fn records(&self, category: Category) -> &[Record] {
        match category {
            Category::Ports => &self.ports,
            Category::Cities => &self.cities,
            Category::Routes => &self.routes,
            Category::Landmarks => &self.landmarks,
        }
    }

    pub fn find(&self, category: Category, id: u32) -> Option<&Record> {
        self.records(category).iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.records(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table_mut(&mut self, category: Category) -> &mut Vec<Record> {
        match category {
            Category::Ports => &mut self.ports,
            Category::Cities => &mut self.cities,
            Category::Routes => &mut self.routes,
            Category::Landmarks => &mut self.landmarks,
        }
    }
}
