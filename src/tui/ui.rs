//! UI rendering

use super::app::{App, Mode};
use gridcalc_core::{CellRef, View};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Cell, Paragraph, Row, Table},
};

pub(crate) const FORMULA_BAR_HEIGHT: u16 = 1;
pub(crate) const GRID_MIN_HEIGHT: u16 = 3;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const ROW_HEADER_WIDTH: u16 = 2;
pub(crate) const GRID_COLUMN_SPACING: u16 = 1;

const FORMULAS_MARKER: &str = "(formulas)";

/// Foreground/background pair for one cell look.
#[derive(Clone, Copy)]
struct Palette {
    normal: Style,
    focused: Style,
}

const OK_STYLE: Palette = Palette {
    normal: Style::new().fg(Color::Black).bg(Color::Gray),
    focused: Style::new().fg(Color::White).bg(Color::LightBlue),
};

const ERROR_STYLE: Palette = Palette {
    normal: Style::new().fg(Color::Black).bg(Color::LightCyan),
    focused: Style::new().fg(Color::White).bg(Color::LightRed),
};

const BORDER_STYLE: Style = Style::new().fg(Color::Blue).bg(Color::LightYellow);

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORMULA_BAR_HEIGHT),
            Constraint::Min(GRID_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = split_main_chunks(f.area());

    // Update visible dimensions based on actual size
    let grid_area = chunks[1];
    let available_width =
        grid_area.width.saturating_sub(ROW_HEADER_WIDTH) as usize;
    let available_height = grid_area.height.saturating_sub(1) as usize; // header

    app.visible_cols = (available_width / (app.col_width + GRID_COLUMN_SPACING as usize)).max(1);
    app.visible_rows = available_height.max(1);
    app.update_viewport();

    draw_formula_bar(f, app, chunks[0]);
    draw_grid(f, app, chunks[1]);

    // The grid pass is what raises this frame's errors.
    app.status_message = app.doc.frame_message(app.current_cell_ref());
    draw_status_bar(f, app, chunks[2]);
}

fn draw_formula_bar(f: &mut Frame, app: &App, area: Rect) {
    let content = match app.mode {
        Mode::Edit | Mode::SaveAs => {
            // Insert cursor marker at cursor position
            let (before, after) = app.edit_buffer.split_at(app.edit_cursor);
            let prompt = if app.mode == Mode::SaveAs { "Write to" } else { "?" };
            format!("{} {}│{}", prompt, before, after)
        }
        Mode::Normal => app.doc.text_of(app.current_cell_ref()).to_string(),
    };

    let paragraph = Paragraph::new(content).style(OK_STYLE.normal);
    f.render_widget(paragraph, area);
}

/// Header label of a visible column; the first one carries the view marker.
fn column_label(view: View, col: usize, first: bool, width: usize) -> String {
    if first && view == View::Formulas && width > FORMULAS_MARKER.len() {
        let rest = width - FORMULAS_MARKER.len();
        format!("{}{:>rest$}", FORMULAS_MARKER, col, rest = rest)
    } else {
        format!("{:>width$}", col, width = width)
    }
}

fn visible_range(start: usize, count: usize, max: usize) -> std::ops::Range<usize> {
    start..(start + count).min(max)
}

fn draw_grid(f: &mut Frame, app: &mut App, area: Rect) {
    let cols = visible_range(app.viewport_col, app.visible_cols, app.doc.cols());
    let rows = visible_range(app.viewport_row, app.visible_rows, app.doc.rows());

    let mut header_cells = vec![Cell::from("")];
    for col in cols.clone() {
        header_cells.push(Cell::from(column_label(
            app.view,
            col,
            col == cols.start,
            app.col_width,
        )));
    }
    let header = Row::new(header_cells).height(1).style(BORDER_STYLE);

    let focus = app.current_cell_ref();
    let mut table_rows = Vec::new();
    for row in rows {
        let mut cells = vec![Cell::from(format!("{:>2}", row)).style(BORDER_STYLE)];
        for col in cols.clone() {
            let at = CellRef::new(row, col);
            let shown = app.doc.cell_display(at, app.view, app.col_width);
            let palette = if shown.is_error { ERROR_STYLE } else { OK_STYLE };
            let style = if at == focus {
                palette.focused
            } else {
                palette.normal
            };
            cells.push(Cell::from(shown.text).style(style));
        }
        table_rows.push(Row::new(cells));
    }

    let mut widths = vec![Constraint::Length(ROW_HEADER_WIDTH)];
    widths.extend(cols.map(|_| Constraint::Length(app.col_width as u16)));

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(Block::default().style(BORDER_STYLE))
        .column_spacing(GRID_COLUMN_SPACING);

    f.render_widget(table, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let content = if app.status_message.is_empty() && app.mode == Mode::Normal {
        app.keymap.status_hint().to_string()
    } else {
        app.status_message.clone()
    };
    let modified = if app.doc.modified { " [+]" } else { "" };
    let paragraph = Paragraph::new(format!("{}{}", content, modified)).style(OK_STYLE.normal);
    f.render_widget(paragraph, area);
}
