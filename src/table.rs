pub mod dimensions;
pub mod field;
pub mod filter;
pub mod header;
pub mod sort;
pub mod table;
pub mod tablepart;
pub mod tableview;

pub use filter::{FilterMode, FilterState, FilterStatus};
pub use table::Table;
pub use tablepart::TablePart;
pub use tableview::TableView;

/// Direction of a scan, a sort or a cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Apply the direction to an ascending comparison result
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Direction::Forward => ordering,
            Direction::Backward => ordering.reverse(),
        }
    }

    /// Next index in this direction, or None past either end of `0..count`
    pub fn step(self, index: usize, count: usize) -> Option<usize> {
        match self {
            Direction::Forward => (index + 1 < count).then_some(index + 1),
            Direction::Backward => index.checked_sub(1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}
