pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use crate::core::word_soup::{
        SoupSettings, CYRILLIC_ALPHABET, DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_GRID_SIZE,
        DEFAULT_PADDING,
    };
    use crate::core::{ConfigProvider, PuzzleKind};
    use crate::core::export::SUPPORTED_FORMATS;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate, DEFAULT_MAX_FILE_SIZE_BYTES};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "puzzle-gen")]
    #[command(about = "Build word-search and crossword grids from word lists")]
    pub struct CliConfig {
        #[arg(long, value_enum, default_value = "wordsoup")]
        pub kind: PuzzleKind,

        /// JSON array of {"word", "clue"} objects
        #[arg(long)]
        pub words: Option<String>,

        /// Crossword layout JSON ({"rows", "cols", "result"})
        #[arg(long)]
        pub layout: Option<String>,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_delimiter = ',', default_value = "json")]
        pub output_formats: Vec<String>,

        /// Seed for reproducible word soups
        #[arg(long)]
        pub seed: Option<u64>,

        #[arg(long, default_value_t = DEFAULT_MIN_GRID_SIZE)]
        pub min_grid_size: usize,

        #[arg(long, default_value_t = DEFAULT_PADDING)]
        pub padding: usize,

        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        pub max_attempts: usize,

        #[arg(long, default_value = CYRILLIC_ALPHABET)]
        pub alphabet: String,

        /// File name stem for the written outputs
        #[arg(long, default_value = "puzzle")]
        pub bundle_name: String,

        #[arg(long, help = "Bundle all outputs into one zip file")]
        pub compress: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn puzzle_kind(&self) -> PuzzleKind {
            self.kind
        }

        fn words_file(&self) -> Option<&str> {
            self.words.as_deref()
        }

        fn layout_file(&self) -> Option<&str> {
            self.layout.as_deref()
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn soup_settings(&self) -> SoupSettings {
            SoupSettings {
                min_grid_size: self.min_grid_size,
                padding: self.padding,
                max_attempts: self.max_attempts,
                ..SoupSettings::default()
            }
            .with_alphabet(&self.alphabet)
        }

        fn seed(&self) -> Option<u64> {
            self.seed
        }

        fn compress(&self) -> bool {
            self.compress
        }

        fn bundle_name(&self) -> &str {
            &self.bundle_name
        }

        fn max_file_size_bytes(&self) -> u64 {
            DEFAULT_MAX_FILE_SIZE_BYTES
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("output_path", &self.output_path)?;
            validation::validate_one_of("output_formats", &self.output_formats, &SUPPORTED_FORMATS)?;
            validation::validate_positive_number("max_attempts", self.max_attempts, 1)?;
            validation::validate_positive_number("min_grid_size", self.min_grid_size, 1)?;
            validation::validate_non_empty_string("alphabet", &self.alphabet)?;
            validation::validate_non_empty_string("bundle_name", &self.bundle_name)?;

            match self.kind {
                PuzzleKind::Wordsoup => {
                    let words = validation::validate_required_field("words", &self.words)?;
                    validation::validate_file_extensions("words", std::slice::from_ref(words), &["json"])?;
                }
                PuzzleKind::Crossword => {
                    let layout = validation::validate_required_field("layout", &self.layout)?;
                    validation::validate_file_extensions("layout", std::slice::from_ref(layout), &["json"])?;
                    if let Some(words) = &self.words {
                        validation::validate_file_extensions("words", std::slice::from_ref(words), &["json"])?;
                    }
                }
            }
            Ok(())
        }
    }

}
