mod app;
mod braille;
mod catalog;
mod data;
mod error;
mod map;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

/// Terminal map viewer for categorized locations and routes.
#[derive(Parser)]
#[command(name = "mawaqi", version, about)]
struct Args {
    /// GeoJSON catalog file overriding the embedded one
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Directory with coastline GeoJSON files for the basemap
    #[arg(long)]
    basemap: Option<PathBuf>,
    /// Category to preselect, as a numeric key "1".."4" (unknown keys fall
    /// back to the default category)
    #[arg(long)]
    category: Option<String>,
    /// Item id to preselect within the category, or "all"
    #[arg(long)]
    item: Option<String>,
}

fn parse_item(value: &str) -> Result<catalog::ItemSelection> {
    // "0" is the legacy sentinel for the whole category
    if value == "all" || value == "0" {
        return Ok(catalog::ItemSelection::All);
    }
    let id = value
        .parse::<u32>()
        .with_context(|| format!("item must be a record id or \"all\", got {value:?}"))?;
    Ok(catalog::ItemSelection::Id(id))
}

fn main() -> Result<()> {
    // Logs go to stderr, away from the ratatui screen on stdout
    env_logger::init();
    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => data::load_catalog(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => data::embedded_catalog().context("loading embedded catalog")?,
    };
    if catalog.is_empty() {
        log::warn!("catalog has no records, the item lists will be empty");
    }

    let basemap = match &args.basemap {
        Some(dir) => {
            let basemap = data::load_basemap(dir);
            if basemap.has_data() {
                basemap
            } else {
                log::warn!("no usable basemap data, falling back to the builtin coastlines");
                data::builtin_basemap()
            }
        }
        None => data::builtin_basemap(),
    };
    log::debug!("basemap: {} coastlines", basemap.coastline_count());

    let start_category = args.category.as_deref().map(catalog::Category::from_key);
    let start_item = args.item.as_deref().map(parse_item).transpose()?;

    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, catalog, basemap, start_category, start_item);

    // Restore the terminal even when the loop failed
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn run(
    terminal: &mut DefaultTerminal,
    catalog: catalog::Catalog,
    basemap: map::Basemap,
    start_category: Option<catalog::Category>,
    start_item: Option<catalog::ItemSelection>,
) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(catalog, basemap, size.width as usize, size.height as usize);

    if let Some(category) = start_category {
        app.select_category(category);
        app.category_cursor = catalog::Category::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
    }
    if let Some(item) = start_item {
        app.select_item(item);
    }

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        handle_key(&mut app, key.code);
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width as usize, height as usize),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Selector navigation
        KeyCode::Tab => app.focus_next(),
        KeyCode::Up => app.cursor_up(),
        KeyCode::Down => app.cursor_down(),
        KeyCode::Enter => app.apply_selection(),

        // Pan with hjkl
        KeyCode::Char('h') => app.pan(-10, 0),
        KeyCode::Char('l') => app.pan(10, 0),
        KeyCode::Char('k') => app.pan(0, -6),
        KeyCode::Char('j') => app.pan(0, 6),

        // Zoom
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

        // Re-fit to the drawn layers
        KeyCode::Char('f') => app.refit(),

        // Toggle marker labels
        KeyCode::Char('L') => app.show_labels = !app.show_labels,

        // Clear the display
        KeyCode::Char('c') => app.clear_display(),

        _ => {}
    }
}

/// Mouse: scroll to zoom at the cursor, drag to pan.
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_at_cell(mouse.column, mouse.row, 1.5),
        MouseEventKind::ScrollDown => app.zoom_at_cell(mouse.column, mouse.row, 1.0 / 1.5),
        MouseEventKind::Down(MouseButton::Left) => {
            app.last_mouse = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.handle_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_drag();
        }
        _ => {}
    }
}
