//! Field layout: turns the text of one cell into fixed size display lines.

use unicode_width::UnicodeWidthChar;

use super::tablepart::TablePart;
use super::Direction;

/// Display width of a single char. Control chars are shown as one blank cell.
#[inline]
pub fn char_width(c: char) -> usize {
    if c.is_control() {
        1
    } else {
        c.width().unwrap_or(0)
    }
}

/// Display width of a single line of text
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Returns (width, height) of a field: the width of its longest line and the
/// number of lines. An empty field has width 0 and height 1.
pub fn field_dimension(text: &str) -> (usize, usize) {
    text.split('\n')
        .fold((0, 0), |(width, height), line| {
            (width.max(display_width(line)), height + 1)
        })
}

/// The visible part of a field along one axis, in display cells (columns) or
/// lines (rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPart {
    pub start: usize,
    pub size: usize,
}

impl FieldPart {
    pub fn full(size: usize) -> Self {
        Self { start: 0, size }
    }

    /// Computes the visible part of the field at `index` with the full size
    /// `size`. Only the truncated field of a table part is cut: at its start
    /// for a backward part, at its end for a forward part.
    pub fn from_table_part(part: &TablePart, index: usize, size: usize) -> Self {
        match part.truncated {
            Some(truncated) if truncated.index == index => {
                let visible = truncated.size.min(size);
                let start = match part.direction {
                    Direction::Forward => 0,
                    Direction::Backward => size - visible,
                };
                Self { start, size: visible }
            }
            _ => Self::full(size),
        }
    }
}

/// Restartable producer of the display lines of a field. Each call to `next`
/// consumes one source line and returns its visible columns, padded with
/// blanks to exactly `part.size` cells. The producer yields exactly as many
/// lines as the field has; an empty field yields one blank line.
#[derive(Debug, Clone)]
pub struct FieldLines<'a> {
    lines: std::str::Split<'a, char>,
    part: FieldPart,
}

impl<'a> FieldLines<'a> {
    pub fn new(text: &'a str, part: FieldPart) -> Self {
        Self {
            lines: text.split('\n'),
            part,
        }
    }
}

impl Iterator for FieldLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let line = self.lines.next()?;
        Some(cut_line(line, self.part))
    }
}

/// Cuts the display columns `[start, start + size)` out of a line. A wide char
/// that is only partly inside the range is replaced by blanks.
pub fn cut_line(line: &str, part: FieldPart) -> String {
    let end = part.start + part.size;
    let mut out = String::with_capacity(part.size);
    let mut used = 0;
    let mut col = 0;

    for c in line.chars() {
        if col >= end {
            break;
        }
        let w = char_width(c);

        if col >= part.start && col + w <= end {
            out.push(if c.is_control() { ' ' } else { c });
            used += w;
        } else if col + w > part.start {
            let visible = (col + w).min(end) - col.max(part.start);
            out.extend(std::iter::repeat(' ').take(visible));
            used += visible;
        }
        col += w;
    }

    out.extend(std::iter::repeat(' ').take(part.size.saturating_sub(used)));
    out
}

/// The block of a field inside the window: `row_part.size` lines, each
/// `col_part.size` cells wide. Fields lower than their row are padded with
/// blank lines.
pub fn field_block(text: &str, row_part: FieldPart, col_part: FieldPart) -> Vec<String> {
    let mut block: Vec<String> = FieldLines::new(text, col_part)
        .skip(row_part.start)
        .take(row_part.size)
        .collect();

    block.resize(row_part.size, " ".repeat(col_part.size));
    block
}
