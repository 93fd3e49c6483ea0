pub mod puzzle_pipeline;

pub use puzzle_pipeline::{parse_layout, parse_word_list, PuzzlePipeline};
