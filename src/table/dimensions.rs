use rayon::prelude::*;

use std::cmp;

use super::field::field_dimension;

/// Threshold for using parallel processing (rows * cols)
const PARALLEL_THRESHOLD: usize = 10_000;

/// Width of each column over the given rows: the widest field line, at least
/// 1 so the cursor field can always be displayed.
/// Uses parallel processing for large tables
pub fn column_widths(records: &[Vec<String>], rows: &[usize], no_columns: usize) -> Vec<usize> {
    let widen = |mut acc: Vec<usize>, row_idx: &usize| {
        for (acc_w, field) in acc.iter_mut().zip(records[*row_idx].iter()) {
            *acc_w = cmp::max(*acc_w, field_dimension(field).0);
        }
        acc
    };

    let widths = if rows.len() * no_columns >= PARALLEL_THRESHOLD {
        rows.par_iter()
            .fold(|| vec![0; no_columns], widen)
            .reduce(
                || vec![0; no_columns],
                |a, b| a.iter().zip(b.iter()).map(|(x, y)| cmp::max(*x, *y)).collect(),
            )
    } else {
        rows.iter().fold(vec![0; no_columns], widen)
    };

    widths.into_iter().map(|w| w.max(1)).collect()
}

/// Height of each row: the line count of its highest field, at least 1
pub fn row_heights(records: &[Vec<String>], rows: &[usize], no_columns: usize) -> Vec<usize> {
    let height = |row_idx: &usize| {
        records[*row_idx]
            .iter()
            .map(|field| field_dimension(field).1)
            .max()
            .unwrap_or(1)
            .max(1)
    };

    if rows.len() * no_columns >= PARALLEL_THRESHOLD {
        rows.par_iter().map(height).collect()
    } else {
        rows.iter().map(height).collect()
    }
}
