use tracing::{debug, info};

use super::dimensions::{column_widths, row_heights};
use super::filter::{FilterState, FilterStatus};
use super::header;
use super::sort::{sort_rows, SortState};

/// The table data. The records are owned by the table and never change after
/// loading. Sorting and filtering only change `rows`, the record indices of
/// the current view, so all row indices outside of this module are indices
/// into `rows`.
#[derive(Debug, Clone)]
pub struct Table {
    pub(crate) records: Vec<Vec<String>>,
    pub(crate) rows: Vec<usize>,
    no_columns: usize,
    /// Width of each column: the widest line of its fields, at least 1
    pub width: Vec<usize>,
    /// Height of each row of the view: the line count of its highest field
    pub height: Vec<usize>,
    pub show_header: bool,
    pub sort: SortState,
    pub filter: FilterState,
    pub(crate) matches: Vec<(usize, usize)>,
}

impl Table {
    /// Creates a table from records of equal length
    pub fn new(records: Vec<Vec<String>>) -> Self {
        let no_columns = records.first().map(|r| r.len()).unwrap_or(0);
        debug_assert!(
            records.iter().all(|r| r.len() == no_columns),
            "records with different lengths"
        );

        let mut table = Self {
            rows: (0..records.len()).collect(),
            records,
            no_columns,
            width: Vec::new(),
            height: Vec::new(),
            show_header: false,
            sort: SortState::new(),
            filter: FilterState::new(),
            matches: Vec::new(),
        };
        table.recompute_dimensions();
        table
    }

    /// Resets the header flag and the sort and filter state
    pub fn set_defaults(&mut self) {
        self.show_header = false;
        self.sort = SortState::new();
        self.filter = FilterState::new();
        self.reset_rows();
    }

    /// Restores the original row order and drops the sort and filter results.
    /// Has to be called after a structural change like switching the header.
    pub fn reset_rows(&mut self) {
        self.rows = (0..self.records.len()).collect();
        self.sort.set_inactive();
        self.filter.set_inactive();
        self.matches.clear();
        self.recompute_dimensions();
    }

    /// Uses the header heuristic to set the header flag
    pub fn detect_header(&mut self) -> bool {
        self.show_header = header::has_header(&self.records, self.no_columns);
        info!(show_header = self.show_header, "header detected");
        self.show_header
    }

    pub fn no_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn no_columns(&self) -> usize {
        self.no_columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.no_columns == 0
    }

    pub fn field(&self, row: usize, col: usize) -> &str {
        &self.records[self.rows[row]][col]
    }

    /// True if the field is in the header row
    pub fn is_field_header(&self, row: usize) -> bool {
        self.show_header && row == 0
    }

    /// Number of leading rows that are excluded from sorting and matching
    pub(crate) fn header_offset(&self) -> usize {
        usize::from(self.show_header && !self.rows.is_empty())
    }

    /// Recomputes the rows of the view from the sort and filter state: the
    /// original order is filtered and then sorted. A filter or search without
    /// matches is deactivated and reported as `FilterStatus::NoMatch`.
    pub fn update_filter_sort(&mut self) -> FilterStatus {
        self.rows = (0..self.records.len()).collect();
        self.matches.clear();

        let mut status = FilterStatus::Inactive;

        if self.filter.is_filtering() && !self.filter_rows(&self.filter.matcher()) {
            status = FilterStatus::NoMatch;
        }

        if self.sort.active && self.sort.column < self.no_columns {
            let offset = self.header_offset();
            sort_rows(&self.records, &mut self.rows[offset..], self.sort.column, self.sort.direction);
        }

        if self.filter.active && status != FilterStatus::NoMatch {
            self.collect_matches(&self.filter.matcher());
            status = match self.matches.len() {
                0 => FilterStatus::NoMatch,
                count => FilterStatus::Matches(count),
            };
        }

        match status {
            FilterStatus::NoMatch => {
                info!(query = self.filter.query.as_str(), "no match");
                self.filter.set_inactive();
                self.matches.clear();
            }
            FilterStatus::Matches(count) => {
                self.filter.count = count;
                info!(
                    query = self.filter.query.as_str(),
                    mode = self.filter.mode.display_name(),
                    count,
                    rows = self.rows.len(),
                    "filter applied"
                );
            }
            FilterStatus::Inactive => {}
        }

        self.recompute_dimensions();
        status
    }

    /// Deactivates the filter and restores the rows (keeping an active sort)
    pub fn reset_filter(&mut self) -> FilterStatus {
        self.filter.set_inactive();
        self.update_filter_sort()
    }

    fn recompute_dimensions(&mut self) {
        self.width = column_widths(&self.records, &self.rows, self.no_columns);
        self.height = row_heights(&self.records, &self.rows, self.no_columns);
        debug!(rows = self.rows.len(), columns = self.no_columns, "dimensions recomputed");
    }
}
