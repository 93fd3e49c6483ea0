use crate::core::export::SUPPORTED_FORMATS;
use crate::core::word_soup::{SoupSettings, DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_GRID_SIZE, DEFAULT_PADDING};
use crate::core::{ConfigProvider, PuzzleKind};
use crate::utils::error::{PuzzleError, Result};
use crate::utils::validation::{self, Validate, DEFAULT_MAX_FILE_SIZE_BYTES};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub puzzle: PuzzleConfig,
    pub input: InputConfig,
    pub soup: Option<SoupConfig>,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub name: String,
    pub kind: PuzzleKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub words_file: Option<String>,
    pub layout_file: Option<String>,
    pub max_file_size_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoupConfig {
    pub min_grid_size: Option<usize>,
    pub padding: Option<usize>,
    pub max_attempts: Option<usize>,
    pub alphabet: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compress: Option<bool>,
    pub bundle_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// "compact" (預設) 或 "json"
    pub format: Option<String>,
    pub level: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| PuzzleError::ConfigError {
                message: format!("cannot read {}: {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PuzzleError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PUZZLE_OUTPUT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("puzzle.name", &self.puzzle.name)?;
        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_one_of(
            "output.output_formats",
            &self.output.output_formats,
            &SUPPORTED_FORMATS,
        )?;

        let settings = self.soup_settings();
        validation::validate_positive_number("soup.max_attempts", settings.max_attempts, 1)?;
        validation::validate_positive_number("soup.min_grid_size", settings.min_grid_size, 1)?;
        if settings.alphabet.is_empty() {
            return Err(PuzzleError::InvalidConfigValueError {
                field: "soup.alphabet".to_string(),
                value: String::new(),
                reason: "Alphabet needs at least one letter".to_string(),
            });
        }

        match self.puzzle.kind {
            PuzzleKind::Wordsoup => {
                let words =
                    validation::validate_required_field("input.words_file", &self.input.words_file)?;
                validation::validate_file_extensions(
                    "input.words_file",
                    std::slice::from_ref(words),
                    &["json"],
                )?;
            }
            PuzzleKind::Crossword => {
                let layout = validation::validate_required_field(
                    "input.layout_file",
                    &self.input.layout_file,
                )?;
                validation::validate_file_extensions(
                    "input.layout_file",
                    std::slice::from_ref(layout),
                    &["json"],
                )?;
                if let Some(words) = &self.input.words_file {
                    validation::validate_file_extensions(
                        "input.words_file",
                        std::slice::from_ref(words),
                        &["json"],
                    )?;
                }
            }
        }

        if let Some(logging) = &self.logging {
            if let Some(format) = &logging.format {
                validation::validate_one_of(
                    "logging.format",
                    std::slice::from_ref(format),
                    &["compact", "json"],
                )?;
            }
        }

        Ok(())
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|format| format == "json")
            .unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn puzzle_kind(&self) -> PuzzleKind {
        self.puzzle.kind
    }

    fn words_file(&self) -> Option<&str> {
        self.input.words_file.as_deref()
    }

    fn layout_file(&self) -> Option<&str> {
        self.input.layout_file.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.output_formats
    }

    fn soup_settings(&self) -> SoupSettings {
        let defaults = SoupSettings::default();
        let Some(soup) = &self.soup else {
            return defaults;
        };

        let settings = SoupSettings {
            min_grid_size: soup.min_grid_size.unwrap_or(DEFAULT_MIN_GRID_SIZE),
            padding: soup.padding.unwrap_or(DEFAULT_PADDING),
            max_attempts: soup.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            ..defaults
        };
        match &soup.alphabet {
            Some(alphabet) => settings.with_alphabet(alphabet),
            None => settings,
        }
    }

    fn seed(&self) -> Option<u64> {
        self.soup.as_ref().and_then(|s| s.seed)
    }

    fn compress(&self) -> bool {
        self.output.compress.unwrap_or(false)
    }

    fn bundle_name(&self) -> &str {
        self.output.bundle_name.as_deref().unwrap_or("puzzle")
    }

    fn max_file_size_bytes(&self) -> u64 {
        self.input
            .max_file_size_bytes
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_BYTES)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
