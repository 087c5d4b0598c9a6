use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based `(line, column)` location in a line model.
///
/// Columns count UTF-16 code units, so the column after the last character of
/// a line is `1 + utf16_len(line)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line_number: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line_number: usize, column: usize) -> Self {
        Self {
            line_number,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.line_number, self.column)
    }
}

/// An ordered `start..end` range between two positions, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    /// Builds a selection, swapping the endpoints if they are out of order.
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn from_coords(
        start_line: usize,
        start_column: usize,
        end_line: usize,
        end_column: usize,
    ) -> Self {
        Self::new(
            Position::new(start_line, start_column),
            Position::new(end_line, end_column),
        )
    }

    /// A caret at `position`.
    pub fn collapsed(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The overlap of two selections, or `None` when they are disjoint.
    #[must_use]
    pub fn intersect(&self, other: &Selection) -> Option<Selection> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Selection { start, end })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} -> {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_order_by_line_then_column() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert!(Position::new(3, 2) < Position::new(3, 4));
    }

    #[test]
    fn selection_normalises_reversed_endpoints() {
        let sel = Selection::from_coords(5, 3, 2, 1);
        assert_eq!(sel.start, Position::new(2, 1));
        assert_eq!(sel.end, Position::new(5, 3));
    }

    #[test]
    fn intersect_overlapping() {
        let page = Selection::from_coords(11, 1, 21, 1);
        let before = Selection::from_coords(1, 1, 12, 4);
        assert_eq!(
            page.intersect(&before),
            Some(Selection::from_coords(11, 1, 12, 4))
        );
    }

    #[test]
    fn intersect_touching_is_empty_selection() {
        let a = Selection::from_coords(1, 1, 3, 1);
        let b = Selection::from_coords(3, 1, 4, 1);
        let overlap = a.intersect(&b).unwrap();
        assert!(overlap.is_empty());
    }

    #[test]
    fn intersect_disjoint() {
        let a = Selection::from_coords(1, 1, 2, 1);
        let b = Selection::from_coords(5, 1, 6, 1);
        assert_eq!(a.intersect(&b), None);
    }
}
