use std::io;
use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, info};

use crate::input::{map_key, Request};
use crate::mode::filter::FilterPrompt;
use crate::mode::{Mode, PromptResult};
use crate::style::Style;
use crate::table::{Direction, FilterStatus, Table, TableView};
use crate::ui::{self, CHROME_LINES};

pub struct App {
    pub table: Table,
    pub view: TableView,
    pub style: Style,
    pub mode: Mode,
    pub prompt: FilterPrompt,
    /// File name or `stdin`, shown in the title
    pub source: String,
    pub message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(table: Table, source: String, style: Style) -> Self {
        Self {
            table,
            view: TableView::new(0, 0),
            style,
            mode: Mode::default(),
            prompt: FilterPrompt::new(),
            source,
            message: None,
            should_quit: false,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let size = terminal.size()?;
        self.resize(size.width, size.height);

        while !self.should_quit {
            terminal.draw(|f| ui::render(f, self))?;

            if poll(Duration::from_millis(250))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.message = None;
                        self.handle_key(key);
                    }
                    Event::Resize(width, height) => self.resize(width, height),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Applies the terminal size. The table window is the terminal without
    /// the title, filter and footer lines.
    pub fn resize(&mut self, width: u16, height: u16) {
        let win_rows = height.saturating_sub(CHROME_LINES) as usize;
        let win_cols = width as usize;
        if self.view.win_size() != (win_rows, win_cols) {
            self.view.resize(&self.table, win_rows, win_cols);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Help => self.mode = Mode::Table,
            Mode::Filter => match self.prompt.handle_key(key) {
                PromptResult::Continue => {}
                PromptResult::Apply => {
                    self.mode = Mode::Table;
                    self.prompt.apply_to(&mut self.table.filter);
                    let status = self.view.update_filter_sort(&mut self.table, true);
                    self.report_filter(status);
                }
                PromptResult::Cancel => self.mode = Mode::Table,
            },
            Mode::Table => {
                if let Some(request) = map_key(key) {
                    self.handle_request(request);
                }
            }
        }
    }

    pub fn handle_request(&mut self, request: Request) {
        debug!(?request, "request");

        match request {
            Request::Move(step) => {
                self.view.move_cursor(&self.table, step);
            }
            Request::PageUp => {
                self.view.page_up(&self.table);
            }
            Request::PageDown => {
                self.view.page_down(&self.table);
            }
            Request::Home => {
                self.view.home(&self.table);
            }
            Request::End => {
                self.view.end(&self.table);
            }
            Request::NextMatch | Request::PrevMatch => {
                let direction = match request {
                    Request::PrevMatch => Direction::Backward,
                    _ => Direction::Forward,
                };
                if !self.view.prev_next(&self.table, direction) {
                    self.message = Some("No active search".to_string());
                }
            }
            Request::OpenFilter => self.mode = Mode::Filter,
            Request::ClearQuery => self.prompt.clear(),
            Request::Reset => {
                self.prompt.clear();
                if self.table.filter.active {
                    self.view.reset_filter(&mut self.table);
                    info!("filter reset");
                }
            }
            Request::Sort(direction) => {
                self.table.sort.update(self.view.cursor.col, direction);
                self.view.update_filter_sort(&mut self.table, false);
            }
            Request::ToggleSort => {
                self.table.sort.toggle(self.view.cursor.col);
                self.view.update_filter_sort(&mut self.table, false);
            }
            Request::ToggleHelp => self.mode = Mode::Help,
            Request::Quit => self.should_quit = true,
        }
    }

    fn report_filter(&mut self, status: FilterStatus) {
        self.message = match status {
            FilterStatus::Inactive => None,
            FilterStatus::Matches(count) => Some(format!("{} matches", count)),
            FilterStatus::NoMatch => Some(format!("No match for '{}'", self.table.filter.query)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Theme;
    use crate::table::tableview::Move;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn make_app() -> App {
        let records = [
            ["id", "name", "code"],
            ["1", "abcd", "ABCD"],
            ["2", "efgh", "XfgX"],
            ["3", "ixxl", "ijXX"],
            ["4", "mnop", "XXOP"],
        ]
        .iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect();

        let mut table = Table::new(records);
        table.show_header = true;

        let mut app = App::new(table, "test".to_string(), Style::with_theme(Theme::mono()));
        app.resize(80, 24);
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn cursor(app: &App) -> (usize, usize) {
        (app.view.cursor.row, app.view.cursor.col)
    }

    #[test]
    fn test_filter_prompt_flow() {
        let mut app = make_app();

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Filter);

        type_str(&mut app, "xx");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Table);
        assert_eq!(app.table.no_rows(), 3);
        assert_eq!(cursor(&app), (1, 1));
        assert_eq!(app.message.as_deref(), Some("3 matches"));

        app.handle_request(Request::NextMatch);
        assert_eq!(cursor(&app), (1, 2));
        app.handle_request(Request::NextMatch);
        assert_eq!(cursor(&app), (2, 2));
        app.handle_request(Request::NextMatch);
        assert_eq!(cursor(&app), (1, 1));
        app.handle_request(Request::PrevMatch);
        assert_eq!(cursor(&app), (2, 2));

        press(&mut app, KeyCode::Esc);
        assert!(!app.table.filter.active);
        assert_eq!(app.table.no_rows(), 5);
        assert_eq!(cursor(&app), (2, 2));
        assert!(app.prompt.buffer.is_empty());
    }

    #[test]
    fn test_no_match() {
        let mut app = make_app();
        app.handle_request(Request::Move(Move::Down));

        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "zzz");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.message.as_deref(), Some("No match for 'zzz'"));
        assert!(!app.view.cursor.visible);
        assert_eq!(cursor(&app), (1, 0));
        assert_eq!(app.table.no_rows(), 5);

        app.handle_request(Request::Move(Move::Down));
        assert!(app.view.cursor.visible);
    }

    #[test]
    fn test_cancel_filter() {
        let mut app = make_app();

        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "abcd");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.mode, Mode::Table);
        assert!(!app.table.filter.active);
        assert_eq!(app.prompt.buffer, "abcd");
    }

    #[test]
    fn test_no_active_search() {
        let mut app = make_app();
        app.handle_request(Request::NextMatch);
        assert_eq!(app.message.as_deref(), Some("No active search"));
        assert_eq!(cursor(&app), (0, 0));
    }

    #[test]
    fn test_sort_requests() {
        let mut app = make_app();

        app.handle_request(Request::Sort(Direction::Backward));
        assert!(app.table.sort.active);
        assert_eq!(app.table.field(0, 0), "id");
        assert_eq!(app.table.field(1, 0), "4");
        assert_eq!(app.table.field(4, 0), "1");

        app.handle_request(Request::Sort(Direction::Backward));
        assert!(!app.table.sort.active);
        assert_eq!(app.table.field(1, 0), "1");

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.table.sort.direction, Direction::Forward);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.table.sort.direction, Direction::Backward);
        assert_eq!(app.table.field(1, 0), "4");
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = make_app();

        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, Mode::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode, Mode::Table);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_resize() {
        let mut app = make_app();
        assert_eq!(app.view.win_size(), (21, 80));

        app.resize(20, 4);
        assert_eq!(app.view.win_size(), (1, 20));

        app.resize(10, 2);
        assert_eq!(app.view.win_size(), (0, 10));
    }
}
