use tracing::debug;

use super::filter::FilterStatus;
use super::table::Table;
use super::tablepart::TablePart;
use super::Direction;

/// The field cursor. The position is always a valid (row, col) of the
/// current view of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
    /// False while the last search or filter request had no match
    pub visible: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            row: 0,
            col: 0,
            visible: true,
        }
    }
}

/// A single step of the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// View state for the table: the cursor and the visible part of the table in
/// a window of `win_rows` x `win_cols` cells.
#[derive(Debug, Clone)]
pub struct TableView {
    pub cursor: Cursor,
    pub rows: TablePart,
    pub cols: TablePart,
    win_rows: usize,
    win_cols: usize,
}

impl TableView {
    pub fn new(win_rows: usize, win_cols: usize) -> Self {
        Self {
            cursor: Cursor::default(),
            rows: TablePart::new(),
            cols: TablePart::new(),
            win_rows,
            win_cols,
        }
    }

    pub fn win_size(&self) -> (usize, usize) {
        (self.win_rows, self.win_cols)
    }

    pub fn is_cursor(&self, row: usize, col: usize) -> bool {
        self.cursor.visible && self.cursor.row == row && self.cursor.col == col
    }

    /// Ensure cursor is within table bounds
    pub fn clamp_cursor(&mut self, table: &Table) {
        self.cursor.row = self.cursor.row.min(table.no_rows().saturating_sub(1));
        self.cursor.col = self.cursor.col.min(table.no_columns().saturating_sub(1));
    }

    fn update_rows(&mut self, table: &Table, anchor: usize, direction: Direction) {
        self.rows.update(&table.height, anchor, direction, self.win_rows);
    }

    fn update_cols(&mut self, table: &Table, anchor: usize, direction: Direction) {
        self.cols.update(&table.width, anchor, direction, self.win_cols);
    }

    /// Switches the direction of a part if an end of the table is fully
    /// visible and recomputes it from its start.
    fn adjust_rows(&mut self, table: &Table) -> bool {
        let adjusted = self.rows.adjust_dir_on_resize(table.no_rows().saturating_sub(1));
        if adjusted {
            self.update_rows(table, self.rows.start(), self.rows.direction);
        }
        adjusted
    }

    fn adjust_cols(&mut self, table: &Table) -> bool {
        let adjusted = self.cols.adjust_dir_on_resize(table.no_columns().saturating_sub(1));
        if adjusted {
            self.update_cols(table, self.cols.start(), self.cols.direction);
        }
        adjusted
    }

    /// Recomputes both parts anchored at the cursor. The default is to show
    /// the cursor in the upper left corner, if the rest of the table allows
    /// it.
    pub fn set_cursor(&mut self, table: &Table, direction: Direction) {
        debug_assert!(
            table.is_empty() || (self.cursor.row < table.no_rows() && self.cursor.col < table.no_columns()),
            "cursor {:?} outside of the table",
            self.cursor
        );

        self.update_rows(table, self.cursor.row, direction);
        self.update_cols(table, self.cursor.col, direction);

        self.adjust_rows(table);
        self.adjust_cols(table);
    }

    /// Called if the rows or columns of the table changed, after loading,
    /// filtering or sorting.
    pub fn on_table_change(&mut self, table: &Table) {
        self.clamp_cursor(table);
        self.set_cursor(table, Direction::Forward);
    }

    /// Applies a new window size. The parts keep their start and direction if
    /// possible, but the cursor stays visible.
    pub fn resize(&mut self, table: &Table, win_rows: usize, win_cols: usize) {
        self.win_rows = win_rows;
        self.win_cols = win_cols;
        debug!(win_rows, win_cols, "table view resized");

        self.update_rows(table, self.rows.start(), self.rows.direction);
        if !self.adjust_rows(table) {
            if self.rows.is_index_before_first(self.cursor.row) {
                self.update_rows(table, self.cursor.row, Direction::Forward);
            } else if self.rows.is_index_after_last(self.cursor.row) {
                self.update_rows(table, self.cursor.row, Direction::Backward);
            }
        }

        self.update_cols(table, self.cols.start(), self.cols.direction);
        if !self.adjust_cols(table) {
            if self.cols.is_index_before_first(self.cursor.col) {
                self.update_cols(table, self.cursor.col, Direction::Forward);
            } else if self.cols.is_index_after_last(self.cursor.col) {
                self.update_cols(table, self.cursor.col, Direction::Backward);
            }
        }
    }

    /// Moves the cursor one field. A move over the edge of the table is
    /// ignored and returns false.
    pub fn move_cursor(&mut self, table: &Table, step: Move) -> bool {
        let blocked = match step {
            Move::Up => self.cursor.row == 0,
            Move::Down => self.cursor.row + 1 >= table.no_rows(),
            Move::Left => self.cursor.col == 0,
            Move::Right => self.cursor.col + 1 >= table.no_columns(),
        };
        if table.is_empty() || blocked {
            return false;
        }
        self.cursor.visible = true;

        match step {
            Move::Up => {
                self.cursor.row -= 1;
                if self.rows.is_index_before_first(self.cursor.row) {
                    self.update_rows(table, self.cursor.row, Direction::Forward);
                }
            }
            Move::Down => {
                self.cursor.row += 1;
                if self.rows.is_index_after_last(self.cursor.row) {
                    self.update_rows(table, self.cursor.row, Direction::Backward);
                }
            }
            Move::Left => {
                self.cursor.col -= 1;
                if self.cols.is_index_before_first(self.cursor.col) {
                    self.update_cols(table, self.cursor.col, Direction::Forward);
                }
            }
            Move::Right => {
                self.cursor.col += 1;
                if self.cols.is_index_after_last(self.cursor.col) {
                    self.update_cols(table, self.cursor.col, Direction::Backward);
                }
            }
        }
        true
    }

    /// True if the cursor row is the only visible row, so a page step has to
    /// leave it.
    fn is_single_row_page(&self) -> bool {
        self.rows.first == self.cursor.row && self.rows.last == self.cursor.row
    }

    /// Moves the cursor to the first visible row, which becomes the last
    /// visible row of the new page.
    pub fn page_up(&mut self, table: &Table) -> bool {
        if table.is_empty() || self.cursor.row == 0 {
            return false;
        }
        self.cursor.visible = true;
        self.cursor.row = if self.is_single_row_page() {
            self.cursor.row - 1
        } else {
            self.rows.first
        };
        self.update_rows(table, self.cursor.row, Direction::Backward);
        self.adjust_rows(table);
        true
    }

    /// Moves the cursor to the last visible row, which becomes the first
    /// visible row of the new page.
    pub fn page_down(&mut self, table: &Table) -> bool {
        if table.is_empty() || self.cursor.row + 1 >= table.no_rows() {
            return false;
        }
        self.cursor.visible = true;
        self.cursor.row = if self.is_single_row_page() {
            self.cursor.row + 1
        } else {
            self.rows.last
        };
        self.update_rows(table, self.cursor.row, Direction::Forward);
        self.adjust_rows(table);
        true
    }

    pub fn home(&mut self, table: &Table) -> bool {
        if table.is_empty() || (self.cursor.row == 0 && self.cursor.col == 0) {
            return false;
        }
        self.cursor.visible = true;
        self.cursor.row = 0;
        self.cursor.col = 0;
        self.set_cursor(table, Direction::Forward);
        true
    }

    pub fn end(&mut self, table: &Table) -> bool {
        if table.is_empty() {
            return false;
        }
        let last = (table.no_rows() - 1, table.no_columns() - 1);
        if (self.cursor.row, self.cursor.col) == last {
            return false;
        }
        self.cursor.visible = true;
        (self.cursor.row, self.cursor.col) = last;
        self.set_cursor(table, Direction::Backward);
        true
    }

    /// Moves the cursor to the next or previous match. Returns false if no
    /// search or filter is active.
    pub fn prev_next(&mut self, table: &Table, direction: Direction) -> bool {
        match table.prev_next(self.cursor.row, self.cursor.col, direction) {
            Some((row, col)) => {
                self.cursor = Cursor { row, col, visible: true };
                self.set_cursor(table, direction);
                true
            }
            None => false,
        }
    }

    /// Applies the sort and filter state of the table and resynchronizes the
    /// cursor. After a successful new filter the cursor is on the first
    /// match, otherwise it keeps its position (clamped to the table).
    pub fn update_filter_sort(&mut self, table: &mut Table, filter_changed: bool) -> FilterStatus {
        let status = table.update_filter_sort();
        self.sync(table, status, filter_changed);
        status
    }

    /// Deactivates the filter of the table, the cursor keeps its position
    pub fn reset_filter(&mut self, table: &mut Table) -> FilterStatus {
        let status = table.reset_filter();
        self.sync(table, status, false);
        status
    }

    fn sync(&mut self, table: &Table, status: FilterStatus, filter_changed: bool) {
        match status {
            FilterStatus::Matches(_) if filter_changed => {
                if let Some(&(row, col)) = table.matches().first() {
                    self.cursor = Cursor { row, col, visible: true };
                }
            }
            FilterStatus::NoMatch => self.cursor.visible = false,
            _ => self.cursor.visible = true,
        }

        self.on_table_change(table);
    }
}
