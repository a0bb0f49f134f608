use log::debug;

use crate::catalog::{Catalog, Category, ItemSelection, Record, RecordGeometry};
use crate::map::{Basemap, GeoPoint, Layer, LayerSet, Viewport};

/// Default view: the Suez Canal region.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(32.2444456, 30.1113889);
pub const DEFAULT_ZOOM: f64 = 10.0;

/// Width of the selector sidebar in terminal columns.
pub const SIDEBAR_WIDTH: u16 = 30;

/// Which selector list receives keyboard input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Categories,
    Items,
}

/// Result of an item selection.
#[derive(Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Number of layers drawn.
    Drawn(usize),
    /// The id does not exist in the active category; nothing was drawn.
    NotFound(u32),
}

/// The map screen: selection state, the displayed layer set, and the
/// viewport. All mutation happens on the UI thread in response to input
/// events.
pub struct App {
    pub viewport: Viewport,
    pub basemap: Basemap,
    catalog: Catalog,
    pub category: Category,
    pub item: ItemSelection,
    pub layers: LayerSet,
    /// User-visible message, e.g. when a selected id does not exist.
    pub notice: Option<String>,
    pub focus: Focus,
    pub category_cursor: usize,
    pub item_cursor: usize,
    pub show_labels: bool,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
}

impl App {
    pub fn new(catalog: Catalog, basemap: Basemap, width: usize, height: usize) -> Self {
        let (pixel_width, pixel_height) = map_pixel_size(width, height);
        Self {
            viewport: Viewport::new(DEFAULT_CENTER, DEFAULT_ZOOM, pixel_width, pixel_height),
            basemap,
            catalog,
            category: Category::Ports,
            item: ItemSelection::All,
            layers: LayerSet::default(),
            notice: None,
            focus: Focus::Categories,
            category_cursor: 0,
            item_cursor: 0,
            show_labels: true,
            should_quit: false,
            last_mouse: None,
        }
    }

    /// Update viewport size when the terminal resizes.
    pub fn resize(&mut self, width: usize, height: usize) {
        let (pixel_width, pixel_height) = map_pixel_size(width, height);
        self.viewport.width = pixel_width;
        self.viewport.height = pixel_height;
    }

    /// The record table of the active category.
    pub fn records(&self) -> &[Record] {
        self.catalog.records(self.category)
    }

    /// Activate a category: item selection resets to All and the display is
    /// cleared. Nothing is drawn until an item is selected.
    pub fn select_category(&mut self, category: Category) {
        debug!("category selected: {:?}", category);
        self.category = category;
        self.item = ItemSelection::All;
        self.item_cursor = 0;
        self.clear_display();
    }

    /// Draw the layers for an item selection, replacing whatever was
    /// displayed, and fit the viewport to the drawn geometry. An unknown id
    /// leaves the display empty and surfaces a notice.
    pub fn select_item(&mut self, selection: ItemSelection) -> SelectionOutcome {
        self.clear_display();
        self.item = selection;

        match selection {
            ItemSelection::All => {
                let records: Vec<Record> = self.records().to_vec();
                for record in &records {
                    self.draw_record(record);
                }
            }
            ItemSelection::Id(id) => {
                let Some(record) = self.catalog.find(self.category, id).cloned() else {
                    self.notice = Some(format!("العنصر {id} غير موجود"));
                    return SelectionOutcome::NotFound(id);
                };
                self.draw_record(&record);
            }
        }

        if let Some(bounds) = self.layers.bounds() {
            self.viewport.fit_bounds(bounds, Viewport::MAX_FIT_ZOOM);
        }
        debug!(
            "drawn {} {} layers for {:?}",
            self.layers.len(),
            self.category.color().name(),
            selection
        );
        SelectionOutcome::Drawn(self.layers.len())
    }

    /// Remove everything from the map. Safe to call when nothing is shown.
    pub fn clear_display(&mut self) {
        self.layers.clear();
        self.notice = None;
    }

    fn draw_record(&mut self, record: &Record) {
        let color = self.category.color();
        match &record.geometry {
            RecordGeometry::Point(position) => {
                self.layers.push(Layer::Marker {
                    position: *position,
                    title: record.title.clone(),
                    description: record.description.clone(),
                    color,
                });
            }
            RecordGeometry::Line(from, to) => {
                self.layers.push(Layer::Line {
                    from: *from,
                    to: *to,
                    color,
                });
                for endpoint in [*to, *from] {
                    self.layers.push(Layer::Marker {
                        position: endpoint,
                        title: record.title.clone(),
                        description: record.description.clone(),
                        color,
                    });
                }
            }
        }
    }

    /// The record shown in the details panel, when a single item is selected.
    pub fn selected_record(&self) -> Option<&Record> {
        match self.item {
            ItemSelection::Id(id) => self.catalog.find(self.category, id),
            ItemSelection::All => None,
        }
    }

    // ----- selector navigation -----

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Categories => Focus::Items,
            Focus::Items => Focus::Categories,
        };
    }

    /// Number of rows in the item list: the All sentinel plus one per record.
    pub fn item_rows(&self) -> usize {
        self.records().len() + 1
    }

    pub fn cursor_up(&mut self) {
        match self.focus {
            Focus::Categories => {
                self.category_cursor = self.category_cursor.saturating_sub(1);
            }
            Focus::Items => {
                self.item_cursor = self.item_cursor.saturating_sub(1);
            }
        }
    }

    pub fn cursor_down(&mut self) {
        match self.focus {
            Focus::Categories => {
                self.category_cursor = (self.category_cursor + 1).min(Category::ALL.len() - 1);
            }
            Focus::Items => {
                self.item_cursor = (self.item_cursor + 1).min(self.item_rows() - 1);
            }
        }
    }

    /// Apply the focused list's cursor as a selection.
    pub fn apply_selection(&mut self) {
        match self.focus {
            Focus::Categories => {
                self.select_category(Category::ALL[self.category_cursor]);
                self.focus = Focus::Items;
            }
            Focus::Items => {
                let selection = if self.item_cursor == 0 {
                    ItemSelection::All
                } else {
                    match self.records().get(self.item_cursor - 1) {
                        Some(record) => ItemSelection::Id(record.id),
                        None => ItemSelection::All,
                    }
                };
                self.select_item(selection);
            }
        }
    }

    // ----- map navigation -----

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Re-fit the viewport to whatever is currently drawn.
    pub fn refit(&mut self) {
        if let Some(bounds) = self.layers.bounds() {
            self.viewport.fit_bounds(bounds, Viewport::MAX_FIT_ZOOM);
        }
    }

    /// Zoom towards a terminal cell within the map pane.
    pub fn zoom_at_cell(&mut self, col: u16, row: u16, factor: f64) {
        if let Some((px, py)) = map_cell_to_pixel(col, row) {
            self.viewport.zoom_at(px, py, factor);
        }
    }

    /// Handle mouse drag panning.
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            // Less sensitive when zoomed out
            let scale = if self.viewport.zoom < 2.0 { 2 } else { 3 };
            self.pan(dx * scale, dy * scale);
        }
        self.last_mouse = Some((x, y));
    }

    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ----- status bar text -----

    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    pub fn center_coords(&self) -> String {
        let c = self.viewport.center;
        format!(
            "{:.1}°{}, {:.1}°{}",
            c.lat.abs(),
            if c.lat >= 0.0 { "N" } else { "S" },
            c.lon.abs(),
            if c.lon >= 0.0 { "E" } else { "W" }
        )
    }
}

/// Braille pixel size of the map pane for a terminal of `width` x `height`
/// characters: the sidebar, the pane border and the status bar are excluded.
fn map_pixel_size(width: usize, height: usize) -> (usize, usize) {
    let inner_width = width.saturating_sub(SIDEBAR_WIDTH as usize + 2);
    let inner_height = height.saturating_sub(3); // border + status bar
    (inner_width * 2, inner_height * 4)
}

/// Convert a terminal cell to Braille pixel coordinates within the map pane,
/// `None` when the cell is over the sidebar or border.
fn map_cell_to_pixel(col: u16, row: u16) -> Option<(i32, i32)> {
    let col = col.checked_sub(SIDEBAR_WIDTH + 1)?;
    let row = row.checked_sub(1)?;
    Some((col as i32 * 2, row as i32 * 4))
}
