pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::app::pipelines::PuzzlePipeline;
pub use crate::config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::core::{
    engine::PuzzleEngine, CrosswordGridMaterializer, SoupSettings, WordSoup, WordSoupPlacer,
};
pub use crate::domain::model::{
    CrosswordLayout, CrosswordOrientation, Grid, LayoutEntry, PlacementOutcome, PlacementResult,
    SoupOrientation, WordEntry,
};
pub use crate::utils::error::{PuzzleError, Result};
