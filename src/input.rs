use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::table::tableview::Move;
use crate::table::Direction;

/// Logical requests of the table window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    Move(Move),
    PageUp,
    PageDown,
    Home,
    End,
    NextMatch,
    PrevMatch,
    /// Open the filter prompt
    OpenFilter,
    /// Clear the query of the filter prompt, keeping the table state
    ClearQuery,
    /// Clear the query and show all rows
    Reset,
    /// Sort the rows by the cursor column, a repeated request restores the
    /// original order
    Sort(Direction),
    /// Sort by the cursor column, a repeated request reverses the order
    ToggleSort,
    ToggleHelp,
    Quit,
}

/// Check for escape key (Esc or Ctrl+[)
pub fn is_escape(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('[') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Maps a key of the table window to a request. Unbound keys are ignored.
pub fn map_key(key: KeyEvent) -> Option<Request> {
    if is_escape(key) {
        return Some(Request::Reset);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let request = match key.code {
        KeyCode::Up => Request::Move(Move::Up),
        KeyCode::Down => Request::Move(Move::Down),
        KeyCode::Left => Request::Move(Move::Left),
        KeyCode::Right => Request::Move(Move::Right),
        KeyCode::PageUp => Request::PageUp,
        KeyCode::PageDown => Request::PageDown,
        KeyCode::Home => Request::Home,
        KeyCode::End => Request::End,

        KeyCode::Char('n') if ctrl => Request::NextMatch,
        KeyCode::Char('p') if ctrl => Request::PrevMatch,
        KeyCode::Char('f') if ctrl => Request::OpenFilter,
        KeyCode::Char('x') if ctrl => Request::ClearQuery,
        KeyCode::Char('s') if ctrl => Request::Sort(Direction::Forward),
        KeyCode::Char('r') if ctrl => Request::Sort(Direction::Backward),
        KeyCode::Char('h') if ctrl => Request::ToggleHelp,
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => Request::Quit,

        KeyCode::Char('/') => Request::OpenFilter,
        KeyCode::Char('s') => Request::ToggleSort,
        KeyCode::Char('?') => Request::ToggleHelp,
        KeyCode::Char('q') => Request::Quit,
        _ => return None,
    };
    Some(request)
}

/// Key bindings shown by the help popup
pub const KEY_HELP: &[(&str, &str)] = &[
    ("arrows", "move the cursor"),
    ("PgUp / PgDn", "scroll one page"),
    ("Home / End", "first / last field"),
    ("Ctrl-F, /", "search or filter"),
    ("Ctrl-N / Ctrl-P", "next / previous match"),
    ("Ctrl-X", "clear the query"),
    ("Esc", "clear the query and show all rows"),
    ("Ctrl-S / Ctrl-R", "sort column ascending / descending"),
    ("s", "sort column, again to reverse"),
    ("?, Ctrl-H", "toggle this help"),
    ("q, Ctrl-Q, Ctrl-C", "quit"),
];
