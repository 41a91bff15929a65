//! The visible part of a table along one axis (rows or columns).
//!
//! Each visible field takes its size plus one border cell. The part starts
//! with an extra border on the side of its anchor, so a window of size `n`
//! holds fields whose sizes plus borders add up to at most `n`:
//!
//! ```text
//!  1234567890   <- window size 10, forward from index 0
//!  |****|*|**   <- sizes [4, 1, 3], index 2 is truncated to 2 cells
//! ```

use tracing::debug;

use super::Direction;

/// The field on the far edge of a part that is only partly visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncated {
    pub index: usize,
    /// Number of visible cells of the field
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TablePart {
    pub first: usize,
    pub last: usize,
    pub truncated: Option<Truncated>,
    /// Forward parts are anchored at `first` and cut at `last`, backward
    /// parts are anchored at `last` and cut at `first`.
    pub direction: Direction,
}

impl Default for TablePart {
    fn default() -> Self {
        Self::new()
    }
}

impl TablePart {
    pub fn new() -> Self {
        Self {
            first: 0,
            last: 0,
            truncated: None,
            direction: Direction::Forward,
        }
    }

    /// Recomputes the part for the field `sizes`, so that `anchor` is visible
    /// and the fields fill a window of `win_size` cells, scanning from the
    /// anchor in `direction`. If the scan hits the end of the table before the
    /// window is full, the part is filled from that end in the opposite
    /// direction instead, which keeps the anchor fully visible.
    pub fn update(&mut self, sizes: &[usize], anchor: usize, direction: Direction, win_size: usize) {
        if sizes.is_empty() {
            *self = Self::new();
            return;
        }
        debug_assert!(anchor < sizes.len(), "anchor {} outside of 0..{}", anchor, sizes.len());
        let anchor = anchor.min(sizes.len() - 1);

        let (part, filled) = Self::fill(sizes, anchor, direction, win_size);
        if filled {
            *self = part;
        } else {
            let boundary = match direction {
                Direction::Forward => sizes.len() - 1,
                Direction::Backward => 0,
            };
            let (mut part, filled) = Self::fill(sizes, boundary, direction.reverse(), win_size);
            if !filled {
                // The whole table fits into the window.
                part.direction = direction;
            }
            *self = part;
        }

        debug!(
            first = self.first,
            last = self.last,
            truncated = ?self.truncated,
            direction = self.direction.as_str(),
            anchor,
            win_size,
            "table part updated"
        );
    }

    /// Greedy scan from `anchor`. Returns the part and whether the window was
    /// filled before the scan ran off the table.
    fn fill(sizes: &[usize], anchor: usize, direction: Direction, win_size: usize) -> (Self, bool) {
        let mut part = Self {
            first: anchor,
            last: anchor,
            truncated: None,
            direction,
        };

        // the border on the anchor side
        let mut used = 1;
        let mut index = anchor;

        loop {
            let size = sizes[index];

            if used + size + 1 <= win_size {
                used += size + 1;
                part.include(index);
            } else {
                let visible = win_size.saturating_sub(used);
                if visible > 0 || index == anchor {
                    part.include(index);
                    part.truncated = Some(Truncated { index, size: visible });
                }
                return (part, true);
            }

            if used >= win_size {
                return (part, true);
            }

            match direction.step(index, sizes.len()) {
                Some(next) => index = next,
                None => return (part, false),
            }
        }
    }

    fn include(&mut self, index: usize) {
        self.first = self.first.min(index);
        self.last = self.last.max(index);
    }

    /// The anchor side index of the part
    pub fn start(&self) -> usize {
        match self.direction {
            Direction::Forward => self.first,
            Direction::Backward => self.last,
        }
    }

    pub fn is_truncated(&self, index: usize) -> bool {
        self.truncated.is_some_and(|t| t.index == index)
    }

    /// True if the index is not fully visible because it is before the part
    /// or it is the truncated first field.
    pub fn is_index_before_first(&self, index: usize) -> bool {
        index < self.first || (index == self.first && self.is_truncated(index))
    }

    /// True if the index is not fully visible because it is after the part or
    /// it is the truncated last field.
    pub fn is_index_after_last(&self, index: usize) -> bool {
        index > self.last || (index == self.last && self.is_truncated(index))
    }

    /// True if the index is the last field and it ends with a border
    pub fn is_not_truncated_and_last(&self, index: usize) -> bool {
        index == self.last && !self.is_truncated(index)
    }

    /// True if the index is the first field and it starts with a border
    pub fn is_not_truncated_and_first(&self, index: usize) -> bool {
        index == self.first && !self.is_truncated(index)
    }

    /// Checks whether a table end is completely visible on the side opposite
    /// to the anchor. In that case the direction is switched, so the part is
    /// anchored at that end and a growing window reveals fields on the other
    /// side instead of empty space. Returns true if the direction changed and
    /// the part has to be recomputed from `start()`.
    pub fn adjust_dir_on_resize(&mut self, index_max: usize) -> bool {
        if self.truncated.is_some() {
            return false;
        }

        let adjust = match self.direction {
            Direction::Forward => self.last == index_max && self.first > 0,
            Direction::Backward => self.first == 0 && self.last < index_max,
        };

        if adjust {
            self.direction = self.direction.reverse();
            debug!(direction = self.direction.as_str(), "table part direction adjusted");
        }
        adjust
    }

    /// Number of cells a field takes in the window including its borders
    pub fn field_cells(&self, index: usize, size: usize) -> usize {
        let size = match self.truncated {
            Some(t) if t.index == index => t.size,
            _ => size,
        };
        let borders = match self.direction {
            Direction::Forward => 1 + usize::from(self.is_not_truncated_and_last(index)),
            Direction::Backward => 1 + usize::from(self.is_not_truncated_and_first(index)),
        };
        size + borders
    }
}
