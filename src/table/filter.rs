//! Search and filter functionality for Table

use tracing::debug;

use super::table::Table;
use super::Direction;

/// Search keeps all rows and only marks the matching fields, filter removes
/// the rows without a matching field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Search,
    Filter,
}

impl FilterMode {
    pub fn toggle(self) -> Self {
        match self {
            FilterMode::Search => FilterMode::Filter,
            FilterMode::Filter => FilterMode::Search,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FilterMode::Search => "search",
            FilterMode::Filter => "filter",
        }
    }
}

/// The requested search or filter. Like the sort state it only records the
/// intent, `Table::update_filter_sort` applies it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub query: String,
    pub active: bool,
    pub mode: FilterMode,
    pub case_sensitive: bool,
    /// Number of matching fields of the last update
    pub count: usize,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new query. An empty query deactivates the filter.
    pub fn set(&mut self, query: &str, mode: FilterMode, case_sensitive: bool) {
        self.query = query.to_string();
        self.mode = mode;
        self.case_sensitive = case_sensitive;
        self.active = !query.is_empty();
        self.count = 0;
    }

    pub fn set_inactive(&mut self) {
        self.active = false;
        self.count = 0;
    }

    /// True if non matching rows are removed from the table
    pub fn is_filtering(&self) -> bool {
        self.active && self.mode == FilterMode::Filter
    }

    pub fn matcher(&self) -> Matcher {
        Matcher::new(&self.query, self.case_sensitive)
    }
}

/// The outcome of applying a filter state to a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStatus {
    Inactive,
    Matches(usize),
    NoMatch,
}

/// Substring matcher with the query prepared for the comparison
#[derive(Debug, Clone)]
pub struct Matcher {
    needle: String,
    case_sensitive: bool,
}

impl Matcher {
    pub fn new(query: &str, case_sensitive: bool) -> Self {
        let needle = if case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        };
        Self { needle, case_sensitive }
    }

    pub fn is_match(&self, text: &str) -> bool {
        if self.case_sensitive {
            text.contains(&self.needle)
        } else {
            text.to_lowercase().contains(&self.needle)
        }
    }
}

impl Table {
    /// Removes the rows without a matching field from the active rows. The
    /// header row, if shown, is always kept. Returns false if no row matches,
    /// in which case the rows are left unchanged.
    pub(crate) fn filter_rows(&mut self, matcher: &Matcher) -> bool {
        let offset = self.header_offset();
        let records = &self.records;

        let kept: Vec<usize> = self.rows[offset..]
            .iter()
            .copied()
            .filter(|&row| records[row].iter().any(|field| matcher.is_match(field)))
            .collect();

        if kept.is_empty() {
            return false;
        }

        self.rows.truncate(offset);
        self.rows.extend(kept);
        true
    }

    /// Collects the positions of all matching fields of the active rows in
    /// row-major order. The header row is never a match.
    pub(crate) fn collect_matches(&mut self, matcher: &Matcher) {
        let offset = self.header_offset();
        let records = &self.records;

        self.matches = self.rows[offset..]
            .iter()
            .enumerate()
            .flat_map(move |(idx, &row)| {
                records[row]
                    .iter()
                    .enumerate()
                    .filter(move |(_, field)| matcher.is_match(field))
                    .map(move |(col, _)| (idx + offset, col))
            })
            .collect();

        debug!(query = matcher.needle.as_str(), count = self.matches.len(), "matches collected");
    }

    /// Positions of the matching fields, sorted in row-major order
    pub fn matches(&self) -> &[(usize, usize)] {
        &self.matches
    }

    pub fn is_match(&self, row: usize, col: usize) -> bool {
        self.filter.active && self.matches.binary_search(&(row, col)).is_ok()
    }

    /// Returns the next or previous match relative to a position, wrapping
    /// around at the ends. Returns None if the filter is inactive.
    pub fn prev_next(&self, row: usize, col: usize, direction: Direction) -> Option<(usize, usize)> {
        if !self.filter.active || self.matches.is_empty() {
            return None;
        }

        let pos = (row, col);
        let found = match direction {
            Direction::Forward => self
                .matches
                .iter()
                .find(|&&m| m > pos)
                .or_else(|| self.matches.first()),
            Direction::Backward => self
                .matches
                .iter()
                .rev()
                .find(|&&m| m < pos)
                .or_else(|| self.matches.last()),
        };

        found.copied()
    }
}
