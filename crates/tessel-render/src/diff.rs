#![forbid(unsafe_code)]

//! Cell updates produced by [`Buffer::diff`](crate::buffer::Buffer::diff).
//!
//! A diff is an ordered list of [`BufferDiff`] entries in row-major order.
//! Backends usually group consecutive entries into [`ChangeRun`]s so that a
//! single cursor move precedes each run of adjacent cells.

use std::ops::Range;

use crate::cell::Cell;

/// One cell that must be redrawn, in absolute terminal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferDiff<'a> {
    pub column: u16,
    pub row: u16,
    pub cell: &'a Cell,
}

/// A maximal group of updates that can be written without moving the cursor.
///
/// Each update starts where the previous one's symbol ended. `updates`
/// indexes into the slice passed to [`runs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRun {
    pub row: u16,
    /// Column of the first update.
    pub start: u16,
    /// Column just past the last symbol.
    pub end: u16,
    pub updates: Range<usize>,
}

impl ChangeRun {
    /// Number of cell updates in the run.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

fn symbol_end(update: &BufferDiff<'_>) -> u16 {
    let width = u16::try_from(update.cell.width()).unwrap_or(u16::MAX);
    update.column.saturating_add(width)
}

/// Group `updates` into cursor-contiguous runs, preserving order.
#[must_use]
pub fn runs(updates: &[BufferDiff<'_>]) -> Vec<ChangeRun> {
    let mut runs: Vec<ChangeRun> = Vec::new();
    for (i, update) in updates.iter().enumerate() {
        let end = symbol_end(update);
        if let Some(run) = runs.last_mut()
            && run.row == update.row
            && run.end == update.column
        {
            run.end = end;
            run.updates.end = i + 1;
            continue;
        }
        runs.push(ChangeRun {
            row: update.row,
            start: update.column,
            end,
            updates: i..i + 1,
        });
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_updates_have_no_runs() {
        assert!(runs(&[]).is_empty());
    }

    #[test]
    fn adjacent_cells_share_a_run() {
        let a = Cell::new("a");
        let wide = Cell::new("称");
        let updates = [
            BufferDiff { column: 2, row: 0, cell: &a },
            BufferDiff { column: 3, row: 0, cell: &wide },
            BufferDiff { column: 5, row: 0, cell: &a },
            BufferDiff { column: 7, row: 0, cell: &a },
            BufferDiff { column: 8, row: 1, cell: &a },
        ];
        let runs = runs(&updates);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], ChangeRun {
            row: 0,
            start: 2,
            end: 6,
            updates: 0..3,
        });
        assert_eq!(runs[1].updates, 3..4);
        assert_eq!((runs[2].row, runs[2].start, runs[2].len()), (1, 8, 1));
    }

    #[test]
    fn row_change_breaks_run_even_when_columns_line_up() {
        let a = Cell::new("a");
        let updates = [
            BufferDiff { column: 0, row: 0, cell: &a },
            BufferDiff { column: 1, row: 1, cell: &a },
        ];
        assert_eq!(runs(&updates).len(), 2);
    }
}
