use crate::core::clues::ClueSheet;
use crate::domain::model::{
    CrosswordLayout, CrosswordOrientation, Grid, PlacementResult, WordEntry,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PuzzleKind {
    #[serde(alias = "word_soup")]
    Wordsoup,
    Crossword,
}

/// extract 階段的結果
#[derive(Debug, Clone)]
pub struct PuzzleRequest {
    pub kind: PuzzleKind,
    pub words: Vec<WordEntry>,
    pub layout: Option<CrosswordLayout>,
}

/// 給顯示端用的填字字詞：保留原始拼寫與去空白的答案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordWord {
    pub word: String,
    pub clean_answer: String,
    pub clue: String,
    pub startx: i64,
    pub starty: i64,
    pub orientation: CrosswordOrientation,
    pub position: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PuzzleDocument {
    #[serde(rename_all = "camelCase")]
    Wordsoup {
        grid: Grid,
        words: Vec<PlacementResult>,
        skipped: Vec<WordEntry>,
        grid_size: usize,
        clues: ClueSheet,
        generated_at: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Crossword {
        grid: Grid,
        words: Vec<CrosswordWord>,
        layout: CrosswordLayout,
        rejected: Vec<String>,
        clues: ClueSheet,
        generated_at: DateTime<Utc>,
    },
}

impl PuzzleDocument {
    pub fn grid(&self) -> &Grid {
        match self {
            PuzzleDocument::Wordsoup { grid, .. } | PuzzleDocument::Crossword { grid, .. } => grid,
        }
    }

    pub fn kind(&self) -> PuzzleKind {
        match self {
            PuzzleDocument::Wordsoup { .. } => PuzzleKind::Wordsoup,
            PuzzleDocument::Crossword { .. } => PuzzleKind::Crossword,
        }
    }

    pub fn word_count(&self) -> usize {
        match self {
            PuzzleDocument::Wordsoup { words, .. } => words.len(),
            PuzzleDocument::Crossword { words, .. } => words.len(),
        }
    }
}

/// transform 階段的結果，load 會把它寫成各種格式
#[derive(Debug, Clone)]
pub struct RenderedPuzzle {
    pub document: PuzzleDocument,
    pub json_output: String,
    pub csv_output: String,
    pub tsv_output: String,
}
