//! Tri-state column sort.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Sort state of a single column. Clicking a sortable header advances it
/// `Unsorted -> Ascending -> Descending -> Unsorted`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortState {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl SortState {
    /// The state after one more header click.
    pub fn next(self) -> Self {
        match self {
            Self::Unsorted => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Unsorted,
        }
    }

    /// Apply this direction to an ascending comparison of two present values.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Descending => ordering.reverse(),
            Self::Unsorted | Self::Ascending => ordering,
        }
    }
}

/// Compare optional keys so that missing values sort last in either direction.
pub fn compare_nulls_last<T: Ord>(a: Option<&T>, b: Option<&T>, state: SortState) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => state.apply(a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
