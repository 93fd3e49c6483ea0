//! Word-search ("word soup") generation.
//!
//! Words are placed longest first, each one at a random orientation and start
//! cell, retrying up to [`SoupSettings::max_attempts`] times. A candidate span is
//! accepted when every cell on it is blank or already holds the same letter.
//! Words that never fit are reported as [`PlacementOutcome::Skipped`]; the
//! remaining blank cells are filled with random letters from the alphabet.

use crate::domain::model::{
    strip_whitespace, upper_letter, Grid, PlacementOutcome, PlacementResult, SoupOrientation,
    WordEntry,
};
use crate::utils::error::{PuzzleError, Result};
use rand::Rng;
use std::cmp::Reverse;

/// 33 uppercase Cyrillic letters, the default filler alphabet
pub const CYRILLIC_ALPHABET: &str = "АБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ";
pub const DEFAULT_MIN_GRID_SIZE: usize = 20;
pub const DEFAULT_PADDING: usize = 5;
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoupSettings {
    /// Smallest side length of the square grid.
    pub min_grid_size: usize,
    /// Extra cells added to the longest word's length.
    pub padding: usize,
    /// Random attempts per word before it is skipped.
    pub max_attempts: usize,
    /// Letters used to fill cells no word covers.
    pub alphabet: Vec<char>,
}

impl Default for SoupSettings {
    fn default() -> Self {
        Self {
            min_grid_size: DEFAULT_MIN_GRID_SIZE,
            padding: DEFAULT_PADDING,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            alphabet: CYRILLIC_ALPHABET.chars().collect(),
        }
    }
}

impl SoupSettings {
    pub fn with_alphabet(mut self, alphabet: &str) -> Self {
        self.alphabet = strip_whitespace(alphabet).chars().map(upper_letter).collect();
        self
    }

    /// `max(min_grid_size, longest clean word + padding)`
    ///
    /// Not capped here; [`WordSoupPlacer::place`] refuses sizes above
    /// [`crate::domain::model::MAX_GRID_DIMENSION`].
    pub fn grid_size_for(&self, words: &[WordEntry]) -> usize {
        let longest = words.iter().map(WordEntry::clean_len).max().unwrap_or(0);
        self.min_grid_size.max(longest.saturating_add(self.padding))
    }
}

#[derive(Debug, Clone)]
pub struct WordSoup {
    pub grid: Grid,
    /// Accepted words, in acceptance order.
    pub placements: Vec<PlacementResult>,
    pub skipped: Vec<WordEntry>,
    pub grid_size: usize,
}

impl WordSoup {
    /// Finds the placed word spelled by `selected`, read forward or backward.
    pub fn find_selection(&self, selected: &str) -> Option<&PlacementResult> {
        let wanted: String = strip_whitespace(selected).chars().map(upper_letter).collect();
        if wanted.is_empty() {
            return None;
        }
        let reversed: String = wanted.chars().rev().collect();

        self.placements.iter().find(|placement| {
            let word: String = placement.word.clean_word().chars().map(upper_letter).collect();
            word == wanted || word == reversed
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct WordSoupPlacer {
    settings: SoupSettings,
}

impl WordSoupPlacer {
    pub fn new(settings: SoupSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SoupSettings {
        &self.settings
    }

    pub fn place<R: Rng>(&self, words: &[WordEntry], rng: &mut R) -> Result<WordSoup> {
        if words.is_empty() {
            return Err(PuzzleError::EmptyWordList);
        }
        if let Some(index) = words.iter().position(|w| w.clean_len() == 0) {
            return Err(PuzzleError::EmptyWord { index });
        }
        if self.settings.alphabet.is_empty() {
            return Err(PuzzleError::ConfigValidationError {
                field: "soup.alphabet".to_string(),
                message: "filler alphabet cannot be empty".to_string(),
            });
        }

        let grid_size = self.settings.grid_size_for(words);
        let mut grid = Grid::try_blank(grid_size, grid_size)?;

        // 長的字先放，排序是穩定的
        let mut ordered: Vec<&WordEntry> = words.iter().collect();
        ordered.sort_by_key(|w| Reverse(w.clean_len()));

        let mut placements = Vec::with_capacity(words.len());
        let mut skipped = Vec::new();

        for word in ordered {
            match self.place_word(&mut grid, word, placements.len() + 1, rng) {
                PlacementOutcome::Placed(placement) => placements.push(placement),
                PlacementOutcome::Skipped { word, attempts } => {
                    tracing::debug!(
                        "Skipping '{}' after {} placement attempts",
                        word.word,
                        attempts
                    );
                    skipped.push(word);
                }
            }
        }

        self.fill_blanks(&mut grid, rng);

        tracing::debug!(
            "Word soup {}x{}: {} placed, {} skipped",
            grid_size,
            grid_size,
            placements.len(),
            skipped.len()
        );

        Ok(WordSoup {
            grid,
            placements,
            skipped,
            grid_size,
        })
    }

    /// Tries to place one word into a square `grid`, writing it on success.
    pub fn place_word<R: Rng>(
        &self,
        grid: &mut Grid,
        word: &WordEntry,
        sequence_number: usize,
        rng: &mut R,
    ) -> PlacementOutcome {
        let letters: Vec<char> = word.clean_word().chars().map(upper_letter).collect();
        let grid_size = grid.rows().min(grid.cols());

        if !letters.is_empty() && letters.len() <= grid_size {
            for _ in 0..self.settings.max_attempts {
                let orientation = SoupOrientation::ALL[rng.gen_range(0..SoupOrientation::ALL.len())];
                let (row, col) = random_start(grid_size, letters.len(), orientation, rng);

                if can_place(grid, &letters, row, col, orientation) {
                    write_letters(grid, &letters, row, col, orientation);
                    return PlacementOutcome::Placed(PlacementResult {
                        word: word.clone(),
                        start_row: row,
                        start_col: col,
                        orientation,
                        sequence_number,
                    });
                }
            }
        }

        PlacementOutcome::Skipped {
            word: word.clone(),
            attempts: self.settings.max_attempts,
        }
    }

    fn fill_blanks<R: Rng>(&self, grid: &mut Grid, rng: &mut R) {
        let alphabet = &self.settings.alphabet;
        for cell in grid.cells_mut().filter(|cell| cell.is_none()) {
            *cell = Some(alphabet[rng.gen_range(0..alphabet.len())]);
        }
    }
}

/// Start `(row, col)` for a span of `len` cells.
///
/// The constrained axis draws from `[0, grid_size - len)`; when the word is as
/// long as the grid the only start is 0.
fn random_start<R: Rng>(
    grid_size: usize,
    len: usize,
    orientation: SoupOrientation,
    rng: &mut R,
) -> (usize, usize) {
    let constrained = (grid_size - len).max(1);
    match orientation {
        SoupOrientation::Horizontal => (rng.gen_range(0..grid_size), rng.gen_range(0..constrained)),
        SoupOrientation::Vertical => (rng.gen_range(0..constrained), rng.gen_range(0..grid_size)),
        SoupOrientation::Diagonal => (rng.gen_range(0..constrained), rng.gen_range(0..constrained)),
    }
}

fn can_place(
    grid: &Grid,
    letters: &[char],
    row: usize,
    col: usize,
    orientation: SoupOrientation,
) -> bool {
    let (row_step, col_step) = orientation.step();
    let last = letters.len().saturating_sub(1);
    if !grid.in_bounds(row + last * row_step, col + last * col_step) {
        return false;
    }

    letters.iter().enumerate().all(|(i, &letter)| {
        match grid.get(row + i * row_step, col + i * col_step) {
            None => true,
            Some(existing) => existing == letter,
        }
    })
}

fn write_letters(
    grid: &mut Grid,
    letters: &[char],
    row: usize,
    col: usize,
    orientation: SoupOrientation,
) {
    let (row_step, col_step) = orientation.step();
    for (i, &letter) in letters.iter().enumerate() {
        grid.set(row + i * row_step, col + i * col_step, letter);
    }
}
