use crate::view::path::{FieldPath, Record};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// The active field path and direction used to order a collection
/// view. `path = None` means no ordering: the comparator treats all
/// pairs as equal, and a stable sort leaves input order untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortSpec {
    pub path: Option<FieldPath>,
    pub direction: Direction,
}

impl SortSpec {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn ascending(path: impl Into<FieldPath>) -> Self {
        SortSpec {
            path: Some(path.into()),
            direction: Direction::Ascending,
        }
    }

    pub fn descending(path: impl Into<FieldPath>) -> Self {
        SortSpec {
            path: Some(path.into()),
            direction: Direction::Descending,
        }
    }

    /// Order relation over two records. Ties are `Equal` in both
    /// directions, so flipping the direction never reorders ties.
    pub fn compare<R: Record>(&self, a: &R, b: &R) -> Ordering {
        let Some(path) = &self.path else {
            return Ordering::Equal;
        };
        let ordering = a.resolve(path).compare(&b.resolve(path));
        match self.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// Stable sort of a borrowed record list according to `sort`.
pub fn sort_records<R: Record>(records: &mut [&R], sort: &SortSpec) {
    records.sort_by(|a, b| sort.compare(*a, *b));
}
