use crate::utils::error::{PuzzleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 單邊最多的格數，外部輸入的尺寸超過就拒絕
pub const MAX_GRID_DIMENSION: usize = 1000;

/// 字詞與提示，`word` 保留原始拼寫（可能含空白）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    #[serde(default)]
    pub clue: String,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, clue: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            clue: clue.into(),
        }
    }

    /// 放入格子用的版本：移除所有空白
    pub fn clean_word(&self) -> String {
        strip_whitespace(&self.word)
    }

    pub fn clean_len(&self) -> usize {
        self.word.chars().filter(|c| !c.is_whitespace()).count()
    }
}

pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Uppercases a single letter, keeping it a single cell.
///
/// Letters whose uppercase form expands to several chars (e.g. `ß`) are kept as-is.
pub fn upper_letter(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoupOrientation {
    Horizontal,
    Vertical,
    Diagonal,
}

impl SoupOrientation {
    pub const ALL: [SoupOrientation; 3] = [
        SoupOrientation::Horizontal,
        SoupOrientation::Vertical,
        SoupOrientation::Diagonal,
    ];

    /// (row, col) step per letter
    pub fn step(self) -> (usize, usize) {
        match self {
            SoupOrientation::Horizontal => (0, 1),
            SoupOrientation::Vertical => (1, 0),
            SoupOrientation::Diagonal => (1, 1),
        }
    }
}

impl fmt::Display for SoupOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SoupOrientation::Horizontal => "horizontal",
            SoupOrientation::Vertical => "vertical",
            SoupOrientation::Diagonal => "diagonal",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrosswordOrientation {
    Across,
    Down,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementResult {
    pub word: WordEntry,
    pub start_row: usize,
    pub start_col: usize,
    pub orientation: SoupOrientation,
    pub sequence_number: usize,
}

impl PlacementResult {
    /// 1-based column, matching the crossword layout convention
    pub fn startx(&self) -> usize {
        self.start_col + 1
    }

    pub fn starty(&self) -> usize {
        self.start_row + 1
    }

    /// Grid coordinates `(row, col)` covered by this placement, in letter order.
    pub fn cells(&self) -> Vec<(usize, usize)> {
        let (row_step, col_step) = self.orientation.step();
        (0..self.word.clean_len())
            .map(|i| (self.start_row + i * row_step, self.start_col + i * col_step))
            .collect()
    }
}

/// 每個字詞的放置結果：成功放入，或在所有嘗試後被略過
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed(PlacementResult),
    Skipped { word: WordEntry, attempts: usize },
}

impl PlacementOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementOutcome::Placed(_))
    }
}

/// Character matrix shared by both puzzle kinds. `None` marks a blank cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<String>>", try_from = "Vec<Vec<String>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows. Use [`Grid::try_blank`] for sizes read
    /// from input.
    pub fn blank(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Like [`Grid::blank`], but rejects grids wider or taller than
    /// [`MAX_GRID_DIMENSION`] before allocating.
    pub fn try_blank(rows: usize, cols: usize) -> Result<Self> {
        if rows > MAX_GRID_DIMENSION || cols > MAX_GRID_DIMENSION {
            return Err(PuzzleError::ValidationError {
                message: format!(
                    "{}x{} grid exceeds the {} cells per side limit",
                    rows, cols, MAX_GRID_DIMENSION
                ),
            });
        }
        Ok(Self::blank(rows, cols))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if self.in_bounds(row, col) {
            self.cells[row * self.cols + col]
        } else {
            None
        }
    }

    /// Writes `letter` uppercased. Out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, letter: char) {
        if self.in_bounds(row, col) {
            self.cells[row * self.cols + col] = Some(upper_letter(letter));
        }
    }

    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn blank_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Cells of one row, `None` when `row` is out of range.
    pub fn row(&self, row: usize) -> Option<&[Option<char>]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.cells.get(start..start + self.cols)
    }

    /// Row as text, blanks rendered as `blank`. Empty for rows out of range.
    pub fn row_string(&self, row: usize, blank: char) -> String {
        self.row(row)
            .unwrap_or_default()
            .iter()
            .map(|c| c.unwrap_or(blank))
            .collect()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Option<char>> {
        self.cells.iter_mut()
    }

    /// `Some(true)` if `guess` matches the stored letter, `None` for blank or
    /// out-of-range cells.
    pub fn check_cell(&self, row: usize, col: usize, guess: char) -> Option<bool> {
        self.get(row, col)
            .map(|letter| letter == upper_letter(guess))
    }

    /// Letter cells that `attempt` gets wrong or leaves blank, as `(row, col)`.
    pub fn mismatches(&self, attempt: &Grid) -> Vec<(usize, usize)> {
        let mut wrong = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let Some(letter) = self.get(row, col) else {
                    continue;
                };
                match attempt.get(row, col) {
                    Some(guess) if upper_letter(guess) == letter => {}
                    _ => wrong.push((row, col)),
                }
            }
        }
        wrong
    }
}

impl From<Grid> for Vec<Vec<String>> {
    fn from(grid: Grid) -> Self {
        (0..grid.rows)
            .map(|row| {
                grid.row(row)
                    .unwrap_or_default()
                    .iter()
                    .map(|cell| cell.map(String::from).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

impl TryFrom<Vec<Vec<String>>> for Grid {
    type Error = String;

    fn try_from(rows: Vec<Vec<String>>) -> std::result::Result<Self, Self::Error> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut grid = Grid::blank(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    cols
                ));
            }
            for (c, cell) in row.iter().enumerate() {
                let mut chars = cell.chars();
                match (chars.next(), chars.next()) {
                    (None, _) => {}
                    (Some(letter), None) => grid.set(r, c, letter),
                    _ => return Err(format!("cell ({}, {}) holds more than one letter", r, c)),
                }
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            writeln!(f, "{}", self.row_string(row, '.'))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub answer: String,
    pub startx: i64,
    pub starty: i64,
    pub orientation: CrosswordOrientation,
    #[serde(default)]
    pub clue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

/// 外部佈局求解器的輸出
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswordLayout {
    pub rows: usize,
    pub cols: usize,
    #[serde(rename = "result", alias = "placements")]
    pub entries: Vec<LayoutEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_word_strips_all_whitespace() {
        let entry = WordEntry::new("ice  cream\tcone", "dessert");
        assert_eq!(entry.clean_word(), "icecreamcone");
        assert_eq!(entry.clean_len(), 12);
    }

    #[test]
    fn test_clean_len_counts_chars_not_bytes() {
        let entry = WordEntry::new("кошка", "животное");
        assert_eq!(entry.clean_len(), 5);
    }

    #[test]
    fn test_upper_letter_keeps_single_cell() {
        assert_eq!(upper_letter('ж'), 'Ж');
        assert_eq!(upper_letter('a'), 'A');
        assert_eq!(upper_letter('ß'), 'ß');
    }

    #[test]
    fn test_grid_json_shape_uses_empty_strings_for_blanks() {
        let mut grid = Grid::blank(2, 2);
        grid.set(0, 0, 'a');
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json, serde_json::json!([["A", ""], ["", ""]]));

        let back: Grid = serde_json::from_value(json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_row_out_of_range_is_none() {
        let mut grid = Grid::blank(2, 2);
        grid.set(1, 0, 'b');

        assert_eq!(grid.row(1), Some(&[Some('B'), None][..]));
        assert_eq!(grid.row(2), None);
        assert_eq!(grid.row_string(7, '.'), "");
    }

    #[test]
    fn test_try_blank_rejects_oversized_grids() {
        assert!(Grid::try_blank(MAX_GRID_DIMENSION, MAX_GRID_DIMENSION).is_ok());
        assert!(Grid::try_blank(usize::MAX, 3).is_err());
        assert!(matches!(
            Grid::try_blank(3, MAX_GRID_DIMENSION + 1),
            Err(PuzzleError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_grid_rejects_ragged_rows() {
        let rows = vec![vec!["A".to_string()], vec![]];
        assert!(Grid::try_from(rows).is_err());
    }

    #[test]
    fn test_check_cell_and_mismatches() {
        let mut solution = Grid::blank(1, 3);
        solution.set(0, 0, 'C');
        solution.set(0, 1, 'A');
        solution.set(0, 2, 'T');

        assert_eq!(solution.check_cell(0, 1, 'a'), Some(true));
        assert_eq!(solution.check_cell(0, 1, 'o'), Some(false));
        assert_eq!(solution.check_cell(3, 3, 'a'), None);

        let mut attempt = Grid::blank(1, 3);
        attempt.set(0, 0, 'c');
        attempt.set(0, 1, 'u');
        assert_eq!(solution.mismatches(&attempt), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_layout_accepts_result_or_placements() {
        let json = r#"{"rows": 3, "cols": 3, "result": [
            {"answer": "CAT", "startx": 1, "starty": 1, "orientation": "across"}
        ]}"#;
        let layout: CrosswordLayout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.entries.len(), 1);
        assert_eq!(layout.entries[0].orientation, CrosswordOrientation::Across);

        let aliased = json.replace("result", "placements");
        let layout: CrosswordLayout = serde_json::from_str(&aliased).unwrap();
        assert_eq!(layout.entries[0].answer, "CAT");
    }

    #[test]
    fn test_placement_cells_follow_orientation() {
        let placement = PlacementResult {
            word: WordEntry::new("dog", ""),
            start_row: 2,
            start_col: 4,
            orientation: SoupOrientation::Diagonal,
            sequence_number: 1,
        };
        assert_eq!(placement.cells(), vec![(2, 4), (3, 5), (4, 6)]);
        assert_eq!((placement.startx(), placement.starty()), (5, 3));
    }
}
