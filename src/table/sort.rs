//! Sorting functionality for Table

use std::cmp::Ordering;

use tracing::debug;

use super::Direction;

/// The requested sorting of the table. It only records the intent, the rows
/// are reordered by `Table::update_filter_sort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: usize,
    pub direction: Direction,
    pub active: bool,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests sorting by a column. Repeating the active request switches
    /// the sorting off, which restores the original row order.
    pub fn update(&mut self, column: usize, direction: Direction) {
        if self.active && self.column == column && self.direction == direction {
            self.active = false;
        } else {
            self.column = column;
            self.direction = direction;
            self.active = true;
        }
    }

    /// Requests sorting by a column, flipping the direction if the column is
    /// already sorted.
    pub fn toggle(&mut self, column: usize) {
        if self.active && self.column == column {
            self.direction = self.direction.reverse();
        } else {
            self.column = column;
            self.direction = Direction::Forward;
            self.active = true;
        }
    }

    pub fn set_inactive(&mut self) {
        self.active = false;
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parses the longest leading decimal number of a string (after optional
/// leading whitespace). Returns the finite value and the unparsed suffix.
///
/// ```text
/// "100.20 Euro" => (100.2, " Euro")
/// "1e3kg"       => (1000.0, "kg")
/// "Euro"        => None
/// ```
pub fn parse_number_prefix(text: &str) -> Option<(f64, &str)> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    if bytes.get(end) == Some(&b'.') {
        let frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if end == 0 || !bytes[..end].iter().any(u8::is_ascii_digit) {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    let value: f64 = trimmed[..end].parse().ok()?;
    value.is_finite().then(|| (value, &trimmed[end..]))
}

/// Numeric keys of a column: every non-empty field has to start with a number
/// and all of them have to share the same suffix (like " Euro"). Empty fields
/// have no key. Returns None if the column is not numeric.
fn numeric_keys(records: &[Vec<String>], rows: &[usize], column: usize) -> Option<Vec<Option<f64>>> {
    let mut suffix: Option<&str> = None;
    let mut keys = Vec::with_capacity(rows.len());

    for &row in rows {
        let text = records[row][column].as_str();
        if text.is_empty() {
            keys.push(None);
            continue;
        }

        let (value, rest) = parse_number_prefix(text)?;
        match suffix {
            None => suffix = Some(rest),
            Some(expected) if expected != rest => {
                debug!(text, expected, "suffix differs, no numeric sort");
                return None;
            }
            _ => {}
        }
        keys.push(Some(value));
    }

    Some(keys)
}

/// Compares two numeric keys. Empty fields are sorted to the end in both
/// directions.
fn compare_numeric(a: Option<f64>, b: Option<f64>, direction: Direction) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => direction.apply(a.partial_cmp(&b).unwrap_or(Ordering::Equal)),
    }
}

/// Sorts row handles by the text of a column. A numeric sort is used if the
/// whole column is numeric, a plain string sort otherwise. Both are stable, so
/// equal fields keep their relative order.
pub fn sort_rows(records: &[Vec<String>], rows: &mut [usize], column: usize, direction: Direction) {
    match numeric_keys(records, rows, column) {
        Some(keys) => {
            debug!(column, direction = direction.as_str(), "sort by numerical values");

            let mut keyed: Vec<(usize, Option<f64>)> = rows.iter().copied().zip(keys).collect();
            keyed.sort_by(|&(_, a), &(_, b)| compare_numeric(a, b, direction));

            for (slot, (row, _)) in rows.iter_mut().zip(keyed) {
                *slot = row;
            }
        }
        None => {
            debug!(column, direction = direction.as_str(), "sort by string values");

            rows.sort_by(|&a, &b| direction.apply(records[a][column].cmp(&records[b][column])));
        }
    }
}
