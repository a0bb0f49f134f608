use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Widget, Wrap},
    Frame,
};

use crate::app::{App, Focus, SIDEBAR_WIDTH};
use crate::braille::BrailleCanvas;
use crate::catalog::{Category, MarkerColor};
use crate::map::{render_overlay, MarkerLabels};

/// Render the whole screen: selector sidebar, map pane, status bar.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(columns[1]);

    render_sidebar(frame, app, columns[0]);
    render_map(frame, app, rows[0]);
    render_status_bar(frame, app, rows[1]);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(area);

    render_category_list(frame, app, rows[0]);
    render_item_list(frame, app, rows[1]);
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_category_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = Category::ALL
        .iter()
        .map(|category| {
            let marker = if *category == app.category { "● " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(marker_color(category.color()))),
                Span::raw(category.title()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(app.focus == Focus::Categories))
                .title(" التصنيف "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.category_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_item_list(frame: &mut Frame, app: &App, area: Rect) {
    let mut items = vec![ListItem::new("الكل")];
    items.extend(
        app.records()
            .iter()
            .map(|record| ListItem::new(record.title.clone())),
    );

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(app.focus == Focus::Items))
                .title(" العنصر "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.item_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " الخريطة ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // Braille gives 2x4 pixels per character
    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let mut base_canvas = BrailleCanvas::new(inner.width as usize, inner.height as usize);
    app.basemap.render(&mut base_canvas, &viewport);

    let mut overlay_canvas = BrailleCanvas::new(inner.width as usize, inner.height as usize);
    let labels = render_overlay(&mut overlay_canvas, &app.layers, &viewport, app.show_labels);

    let widget = MapWidget {
        base_canvas,
        overlay_canvas,
        overlay_color: marker_color(app.category.color()),
        labels,
    };
    frame.render_widget(widget, inner);

    render_details(frame, app, inner);
}

/// Details panel for the selected record: the popup analog, anchored to the
/// bottom of the map pane.
fn render_details(frame: &mut Frame, app: &App, map_area: Rect) {
    let Some(record) = app.selected_record() else {
        return;
    };
    if map_area.height < 6 {
        return;
    }

    let height = 4;
    let panel = Rect {
        x: map_area.x + 1,
        y: map_area.y + map_area.height - height - 1,
        width: map_area.width.saturating_sub(2),
        height,
    };

    let color = marker_color(app.category.color());
    let text = vec![
        Line::from(Span::styled(
            record.title.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(record.description.clone()),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(paragraph, panel);
}

/// Map widget: basemap and overlay Braille canvases rendered in their own
/// colors, with marker titles overlaid as text.
struct MapWidget {
    base_canvas: BrailleCanvas,
    overlay_canvas: BrailleCanvas,
    overlay_color: Color,
    labels: MarkerLabels,
}

impl MapWidget {
    fn render_canvas(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (row_idx, row) in canvas.rows().enumerate() {
            if row_idx >= area.height as usize {
                break;
            }
            let y = area.y + row_idx as u16;

            for (col_idx, ch) in row.chars().enumerate() {
                if col_idx >= area.width as usize {
                    break;
                }
                // Skip empty Braille cells so lower layers show through
                if ch == '\u{2800}' {
                    continue;
                }
                let x = area.x + col_idx as u16;
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Self::render_canvas(&self.base_canvas, Color::Cyan, area, buf);
        Self::render_canvas(&self.overlay_canvas, self.overlay_color, area, buf);

        let label_style = Style::default().fg(Color::White);
        for (lx, ly, text) in &self.labels {
            if *lx >= area.width || *ly >= area.height {
                continue;
            }
            let y = area.y + *ly;
            let max_len = (area.width - *lx) as usize;
            for (i, ch) in text.chars().take(max_len.min(24)).enumerate() {
                let x = area.x + *lx + i as u16;
                if x < area.x + area.width {
                    buf[(x, y)].set_char(ch).set_style(label_style);
                }
            }
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let category_color = marker_color(app.category.color());

    let mut spans = vec![
        Span::styled(" تكبير: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.category.title(), Style::default().fg(category_color)),
        Span::styled(
            format!(" ({}) ", app.layers.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if let Some(notice) = &app.notice {
        spans.push(Span::styled(
            format!(" {notice} "),
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::styled(
        "| Tab:تبديل ↑↓:تنقل Enter:اختيار hjkl:تحريك +/-:تكبير f:ملاءمة q:خروج",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Terminal color for a marker color.
fn marker_color(color: MarkerColor) -> Color {
    match color {
        MarkerColor::Green => Color::Green,
        MarkerColor::Red => Color::Red,
        MarkerColor::Blue => Color::Blue,
        MarkerColor::Orange => Color::Rgb(255, 165, 0),
    }
}
