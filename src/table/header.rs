//! Guesses whether the first row of a table is a header.
//!
//! For each column the first row is compared with the statistics of the
//! remaining rows. A header usually differs from the data below it in length
//! or in the share of digits, like `Number` above `1, 2, 4, 8`.

use tracing::debug;

/// A numeric characteristic of a field
pub type Feature = fn(&str) -> f64;

/// Length of the field in chars
pub fn str_len(text: &str) -> f64 {
    text.chars().count() as f64
}

/// Ratio of the ASCII digits to the length of the field, 0 for an empty field
pub fn digit_ratio(text: &str) -> f64 {
    let len = text.chars().count();
    if len == 0 {
        return 0.0;
    }
    let digits = text.chars().filter(char::is_ascii_digit).count();
    digits as f64 / len as f64
}

/// Mean of a feature over the data rows of a column (all rows but the first)
pub fn column_mean(records: &[Vec<String>], column: usize, feature: Feature) -> f64 {
    let data = &records[1..];
    let sum: f64 = data.iter().map(|row| feature(&row[column])).sum();
    sum / data.len() as f64
}

/// Population standard deviation of a feature over the data rows of a column
pub fn column_std_dev(records: &[Vec<String>], column: usize, feature: Feature, mean: f64) -> f64 {
    let data = &records[1..];
    let sum: f64 = data
        .iter()
        .map(|row| {
            let diff = feature(&row[column]) - mean;
            diff * diff
        })
        .sum();
    (sum / data.len() as f64).sqrt()
}

/// True if the feature of the first row is more than one standard deviation
/// away from the mean of the data rows of the column.
pub fn check_column_characteristic(records: &[Vec<String>], column: usize, feature: Feature) -> bool {
    if records.len() < 2 {
        return false;
    }

    let mean = column_mean(records, column, feature);
    let std_dev = column_std_dev(records, column, feature, mean);
    let value = feature(&records[0][column]);

    (value - mean).abs() > std_dev
}

/// Returns true if a strict majority of the columns vote for a header. A
/// column votes for a header if its length or its digit ratio deviates.
pub fn has_header(records: &[Vec<String>], no_columns: usize) -> bool {
    if records.len() < 2 || no_columns == 0 {
        return false;
    }

    let votes = (0..no_columns)
        .filter(|&column| {
            check_column_characteristic(records, column, str_len)
                || check_column_characteristic(records, column, digit_ratio)
        })
        .count();

    let result = votes * 2 > no_columns;
    debug!(votes, no_columns, result, "header heuristic");
    result
}
