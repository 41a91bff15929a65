use ratatui::{
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::input::KEY_HELP;
use crate::mode::Mode;
use crate::table::field::{field_block, FieldPart};
use crate::table::{Direction, FilterMode, Table, TablePart};

/// Smallest table window that is drawn
pub const MIN_WIN_ROWS: usize = 2;
pub const MIN_WIN_COLS: usize = 1;

/// Lines around the table window: title, filter line and footer
pub const CHROME_LINES: u16 = 3;

const HLINE: char = '-';
const VLINE: char = '|';
const CORNER: char = '+';

/// One cell (column) or line (row) range of the table window along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Border,
    Field { index: usize, part: FieldPart },
}

/// Splits an axis of the window into borders and visible fields. A forward
/// part has a border before each field, a backward part after each field.
/// The field at the far end gets a second border if it is not truncated.
pub fn axis_segments(part: &TablePart, sizes: &[usize]) -> Vec<Segment> {
    if sizes.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(2 * (part.last - part.first + 1) + 1);

    for index in part.first..=part.last {
        let field = Segment::Field {
            index,
            part: FieldPart::from_table_part(part, index, sizes[index]),
        };

        match part.direction {
            Direction::Forward => {
                segments.push(Segment::Border);
                segments.push(field);
                if part.is_not_truncated_and_last(index) {
                    segments.push(Segment::Border);
                }
            }
            Direction::Backward => {
                if part.is_not_truncated_and_first(index) {
                    segments.push(Segment::Border);
                }
                segments.push(field);
                segments.push(Segment::Border);
            }
        }
    }
    segments
}

/// The horizontal border of a column. The ends of the border of the sorted
/// column show the sort direction, e.g. `>----->`.
pub fn hline(table: &Table, col: usize, width: usize) -> String {
    let border = if table.sort.active && table.sort.column == col {
        match table.sort.direction {
            Direction::Forward => '>',
            Direction::Backward => '<',
        }
    } else {
        HLINE
    };

    match width {
        0 => String::new(),
        1 => border.to_string(),
        _ => {
            let mut line = String::with_capacity(width);
            line.push(border);
            line.extend(std::iter::repeat(HLINE).take(width - 2));
            line.push(border);
            line
        }
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_title(frame, app, chunks[0]);

    let (win_rows, win_cols) = app.view.win_size();
    if win_rows < MIN_WIN_ROWS || win_cols < MIN_WIN_COLS {
        return;
    }

    render_table(frame, app, chunks[1]);
    render_filter_line(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);

    if app.mode == Mode::Help {
        render_help(frame, app);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let table = &app.table;

    let mut title = format!(
        " {} | {} rows x {} columns",
        app.source,
        table.no_rows(),
        table.no_columns()
    );
    if table.show_header {
        title.push_str(" | header");
    }
    if table.sort.active {
        let order = match table.sort.direction {
            Direction::Forward => "ascending",
            Direction::Backward => "descending",
        };
        title.push_str(&format!(" | sorted by column {} {}", table.sort.column + 1, order));
    }

    let paragraph = Paragraph::new(title).style(app.style.title_bar());
    frame.render_widget(paragraph, area);
}

/// Draws the visible part of the table, including the header and the field
/// cursor.
fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let table = &app.table;
    let view = &app.view;
    let border_style = app.style.border();

    let row_segments = axis_segments(&view.rows, &table.height);
    let col_segments = axis_segments(&view.cols, &table.width);

    let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);

    for row_segment in &row_segments {
        match *row_segment {
            Segment::Border => {
                let spans: Vec<Span> = col_segments
                    .iter()
                    .map(|col_segment| match *col_segment {
                        Segment::Border => Span::styled(CORNER.to_string(), border_style),
                        Segment::Field { index, part } => {
                            Span::styled(hline(table, index, part.size), border_style)
                        }
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
            Segment::Field { index: row, part: row_part } => {
                let blocks: Vec<Option<Vec<String>>> = col_segments
                    .iter()
                    .map(|col_segment| match *col_segment {
                        Segment::Border => None,
                        Segment::Field { index: col, part: col_part } => {
                            Some(field_block(table.field(row, col), row_part, col_part))
                        }
                    })
                    .collect();

                for line_index in 0..row_part.size {
                    let spans: Vec<Span> = col_segments
                        .iter()
                        .zip(&blocks)
                        .map(|(col_segment, block)| match (*col_segment, block) {
                            (Segment::Field { index: col, .. }, Some(block)) => {
                                let style = app.style.field(
                                    table.is_field_header(row),
                                    view.is_cursor(row, col),
                                    table.is_match(row, col),
                                );
                                Span::styled(block[line_index].clone(), style)
                            }
                            _ => Span::styled(VLINE.to_string(), border_style),
                        })
                        .collect();
                    lines.push(Line::from(spans));
                }
            }
        }
    }

    let paragraph = Paragraph::new(lines).style(app.style.field(false, false, false));
    frame.render_widget(paragraph, area);
}

fn render_filter_line(frame: &mut Frame, app: &App, area: Rect) {
    let filter = &app.table.filter;

    let line = if app.mode == Mode::Filter {
        let label = match app.prompt.mode {
            FilterMode::Search => "Search: ",
            FilterMode::Filter => "Filter: ",
        };
        let x = area.x + (label.len() + app.prompt.buffer.chars().count()) as u16;
        frame.set_cursor(x.min(area.right().saturating_sub(1)), area.y);

        Line::from(vec![
            Span::styled(label, app.style.filter_prompt()),
            Span::raw(app.prompt.buffer.clone()),
            Span::raw(format!("  [{}]", app.prompt.settings())),
        ])
    } else if filter.active {
        Line::from(vec![
            Span::styled(format!("{}: ", filter.mode.display_name()), app.style.filter_prompt()),
            Span::raw(format!("'{}'", filter.query)),
            Span::raw(format!(
                "  [{}] {} matches",
                if filter.case_sensitive { "match case" } else { "ignore case" },
                filter.count
            )),
        ])
    } else {
        Line::default()
    };

    frame.render_widget(Paragraph::new(line).style(app.style.filter_line()), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let cursor = &app.view.cursor;
    let position = if app.table.is_empty() {
        String::new()
    } else {
        format!(
            "row {}/{} col {}/{} ",
            cursor.row + 1,
            app.table.no_rows(),
            cursor.col + 1,
            app.table.no_columns()
        )
    };

    let mode = format!(" {} ", app.mode.display_name());
    let message = app.message.as_deref().unwrap_or("");
    let padding = (area.width as usize)
        .saturating_sub(mode.len() + message.chars().count() + 1)
        .saturating_sub(position.len());

    let footer = Line::from(vec![
        Span::styled(mode, app.style.filter_prompt().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(message.to_string(), app.style.message_warning()),
        Span::raw(" ".repeat(padding)),
        Span::raw(position),
    ]);

    frame.render_widget(Paragraph::new(footer).style(app.style.footer()), area);
}

fn render_help(frame: &mut Frame, app: &App) {
    let key_width = KEY_HELP.iter().map(|(keys, _)| keys.len()).max().unwrap_or(0);

    let lines: Vec<Line> = KEY_HELP
        .iter()
        .map(|(keys, text)| Line::from(format!(" {:width$}  {} ", keys, text, width = key_width)))
        .collect();

    let width = lines.iter().map(|line| line.width()).max().unwrap_or(0) as u16 + 2;
    let height = lines.len() as u16 + 2;
    let area = centered_rect(width, height, frame.size());

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .style(app.style.help())
            .block(Block::default().borders(Borders::ALL).title(" Help ")),
        area,
    );
}

/// A rect of the given size centered in `area`, clipped to it
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Style, Theme};
    use crate::table::tablepart::Truncated;
    use ratatui::{backend::TestBackend, style::Color, Terminal};

    fn make_app(records: &[&[&str]], width: u16, height: u16) -> App {
        let records = records
            .iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect();
        let mut app = App::new(Table::new(records), "test.csv".to_string(), Style::with_theme(Theme::light()));
        app.resize(width, height);
        app
    }

    fn draw(app: &App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();

        (0..height)
            .map(|y| (0..width).map(|x| buffer.get(x, y).symbol().to_string()).collect())
            .collect()
    }

    #[test]
    fn test_hline() {
        let mut table = Table::new(vec![vec!["a".to_string(), "b".to_string()]]);
        assert_eq!(hline(&table, 0, 4), "----");

        table.sort.update(0, Direction::Forward);
        assert_eq!(hline(&table, 0, 4), ">-->");
        assert_eq!(hline(&table, 0, 1), ">");
        assert_eq!(hline(&table, 0, 0), "");
        assert_eq!(hline(&table, 1, 2), "--");

        table.sort.update(0, Direction::Backward);
        assert_eq!(hline(&table, 0, 2), "<<");
    }

    #[test]
    fn test_axis_segments_forward() {
        let mut part = TablePart::new();
        part.update(&[2, 3, 4], 0, Direction::Forward, 10);

        // |xx|xxx|xx
        assert_eq!(part.truncated, Some(Truncated { index: 2, size: 2 }));
        assert_eq!(
            axis_segments(&part, &[2, 3, 4]),
            vec![
                Segment::Border,
                Segment::Field { index: 0, part: FieldPart { start: 0, size: 2 } },
                Segment::Border,
                Segment::Field { index: 1, part: FieldPart { start: 0, size: 3 } },
                Segment::Border,
                Segment::Field { index: 2, part: FieldPart { start: 0, size: 2 } },
            ]
        );
    }

    #[test]
    fn test_axis_segments_backward() {
        let mut part = TablePart::new();
        part.update(&[2, 3, 4], 2, Direction::Backward, 7);

        // x|xxxx| with the middle field cut at its start
        assert_eq!(part.truncated, Some(Truncated { index: 1, size: 1 }));
        assert_eq!(
            axis_segments(&part, &[2, 3, 4]),
            vec![
                Segment::Field { index: 1, part: FieldPart { start: 2, size: 1 } },
                Segment::Border,
                Segment::Field { index: 2, part: FieldPart { start: 0, size: 4 } },
                Segment::Border,
            ]
        );
    }

    #[test]
    fn test_axis_segments_fit() {
        let mut part = TablePart::new();
        part.update(&[1, 2], 0, Direction::Forward, 10);

        let segments = axis_segments(&part, &[1, 2]);
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0], Segment::Border);
        assert_eq!(segments[4], Segment::Border);
        assert!(axis_segments(&TablePart::new(), &[]).is_empty());
    }

    #[test]
    fn test_render_table() {
        let app = make_app(&[&["a", "b"], &["1", "22"]], 10, 8);
        let screen = draw(&app, 10, 8);

        assert!(screen[0].starts_with(" test.csv"));
        assert_eq!(&screen[1][..6], "+-+--+");
        assert_eq!(&screen[2][..6], "|a|b |");
        assert_eq!(&screen[3][..6], "+-+--+");
        assert_eq!(&screen[4][..6], "|1|22|");
        assert_eq!(&screen[5][..6], "+-+--+");
    }

    #[test]
    fn test_render_cursor_and_sort() {
        let mut app = make_app(&[&["a", "b"], &["1", "c"]], 10, 8);
        app.table.sort.update(1, Direction::Forward);
        app.view.update_filter_sort(&mut app.table, false);

        let mut terminal = Terminal::new(TestBackend::new(10, 8)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let buffer = terminal.backend().buffer();

        let border: String = (0..5).map(|x| buffer.get(x, 1).symbol().to_string()).collect();
        assert_eq!(border, "+-+>+");

        assert_eq!(buffer.get(1, 2).symbol(), "a");
        assert_eq!(buffer.get(1, 2).bg, Color::Blue);
        assert_eq!(buffer.get(3, 2).symbol(), "b");
        assert_ne!(buffer.get(3, 2).bg, Color::Blue);
    }

    #[test]
    fn test_render_footer() {
        let mut app = make_app(&[&["a", "b"], &["1", "22"]], 40, 8);
        app.message = Some("2 matches".to_string());
        let screen = draw(&app, 40, 8);

        assert!(screen[7].starts_with(" TABLE  2 matches"));
        assert!(screen[7].ends_with("row 1/2 col 1/2 "));

        app.mode = Mode::Filter;
        let screen = draw(&app, 40, 8);
        assert!(screen[7].starts_with(" FILTER "));
    }

    #[test]
    fn test_render_too_small() {
        let app = make_app(&[&["a", "b"], &["1", "22"]], 10, 4);
        let screen = draw(&app, 10, 4);

        assert!(screen[0].starts_with(" test.csv"));
        assert!(screen[1..].iter().all(|line| line.trim().is_empty()));
    }
}
