pub mod clues;
pub mod crossword;
pub mod engine;
pub mod export;
pub mod word_soup;

pub use crate::domain::document::{PuzzleDocument, PuzzleKind, PuzzleRequest, RenderedPuzzle};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
pub use crossword::{CrosswordGridMaterializer, Materialized, RejectedEntry};
pub use word_soup::{SoupSettings, WordSoup, WordSoupPlacer};
