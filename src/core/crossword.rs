use crate::domain::model::{
    upper_letter, CrosswordLayout, CrosswordOrientation, Grid, LayoutEntry, MAX_GRID_DIMENSION,
};
use crate::utils::error::{PuzzleError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// 起點已經在格子外
    OriginOutOfBounds,
    /// 起點合法，但字詞超出邊界
    SpanOutOfBounds,
    /// 佈局尺寸超過上限
    GridTooLarge,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::OriginOutOfBounds => f.write_str("start position outside the grid"),
            RejectReason::SpanOutOfBounds => f.write_str("word runs past the grid edge"),
            RejectReason::GridTooLarge => f.write_str("layout grid is too large"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    pub answer: String,
    pub reason: RejectReason,
}

impl fmt::Display for RejectedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.answer, self.reason)
    }
}

#[derive(Debug, Clone)]
pub struct Materialized {
    pub grid: Grid,
    pub rejected: Vec<RejectedEntry>,
}

/// Rasterizes an externally computed crossword layout into a letter grid.
///
/// Positions come from the layout as-is; nothing here searches for crossings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosswordGridMaterializer;

impl CrosswordGridMaterializer {
    pub fn new() -> Self {
        Self
    }

    /// Fails on a zero-sized layout, which no solver output should have, and on
    /// layouts wider or taller than [`MAX_GRID_DIMENSION`].
    pub fn check_layout(&self, layout: &CrosswordLayout) -> Result<()> {
        if layout.rows == 0 || layout.cols == 0 {
            return Err(PuzzleError::InvalidLayout {
                message: format!("layout declares a {}x{} grid", layout.rows, layout.cols),
            });
        }
        if layout.rows > MAX_GRID_DIMENSION || layout.cols > MAX_GRID_DIMENSION {
            return Err(PuzzleError::InvalidLayout {
                message: format!(
                    "layout declares a {}x{} grid, limit is {} per side",
                    layout.rows, layout.cols, MAX_GRID_DIMENSION
                ),
            });
        }
        Ok(())
    }

    pub fn materialize(&self, layout: &CrosswordLayout) -> Grid {
        self.materialize_with_report(layout).grid
    }

    pub fn materialize_with_report(&self, layout: &CrosswordLayout) -> Materialized {
        let mut rejected = Vec::new();
        let mut grid = match Grid::try_blank(layout.rows, layout.cols) {
            Ok(grid) => grid,
            Err(e) => {
                tracing::warn!("Skipping whole layout: {}", e);
                rejected.extend(layout.entries.iter().filter(|entry| is_drawn(entry)).map(
                    |entry| RejectedEntry {
                        answer: entry.answer.clone(),
                        reason: RejectReason::GridTooLarge,
                    },
                ));
                return Materialized {
                    grid: Grid::blank(0, 0),
                    rejected,
                };
            }
        };

        for entry in layout.entries.iter().filter(|entry| is_drawn(entry)) {
            let answer: Vec<char> = entry.answer.chars().map(upper_letter).collect();
            match span(entry, answer.len(), &grid) {
                Ok(cells) => {
                    for ((row, col), letter) in cells.into_iter().zip(answer) {
                        grid.set(row, col, letter);
                    }
                }
                Err(reason) => {
                    tracing::warn!("Skipping layout entry '{}': {}", entry.answer, reason);
                    rejected.push(RejectedEntry {
                        answer: entry.answer.clone(),
                        reason,
                    });
                }
            }
        }

        Materialized { grid, rejected }
    }
}

fn is_drawn(entry: &LayoutEntry) -> bool {
    entry.orientation != CrosswordOrientation::None && !entry.answer.is_empty()
}

/// 1-based layout coordinate to a 0-based index, `None` when below 1.
fn to_index(coordinate: i64) -> Option<usize> {
    coordinate
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
}

/// Cells `(row, col)` covered by `entry`, or why it cannot be drawn.
fn span(
    entry: &LayoutEntry,
    len: usize,
    grid: &Grid,
) -> std::result::Result<Vec<(usize, usize)>, RejectReason> {
    let (Some(col), Some(row)) = (to_index(entry.startx), to_index(entry.starty)) else {
        return Err(RejectReason::OriginOutOfBounds);
    };
    if !grid.in_bounds(row, col) {
        return Err(RejectReason::OriginOutOfBounds);
    }

    let (row_step, col_step) = match entry.orientation {
        CrosswordOrientation::Across => (0, 1),
        CrosswordOrientation::Down => (1, 0),
        CrosswordOrientation::None => (0, 0),
    };

    let cells: Vec<(usize, usize)> = (0..len)
        .map(|i| (row + i * row_step, col + i * col_step))
        .collect();
    if cells.iter().all(|&(r, c)| grid.in_bounds(r, c)) {
        Ok(cells)
    } else {
        Err(RejectReason::SpanOutOfBounds)
    }
}
