use thiserror::Error;

#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Word list is empty")]
    EmptyWordList,

    #[error("Word #{index} is empty after removing whitespace")]
    EmptyWord { index: usize },

    #[error("Invalid word list: {message}")]
    InvalidWordList { message: String },

    #[error("Invalid crossword layout: {message}")]
    InvalidLayout { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, PuzzleError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Serialization,
    Configuration,
    Input,
    Generation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PuzzleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PuzzleError::IoError(_) | PuzzleError::ZipError(_) => ErrorCategory::Io,
            PuzzleError::CsvError(_) | PuzzleError::SerializationError(_) => {
                ErrorCategory::Serialization
            }
            PuzzleError::ConfigError { .. }
            | PuzzleError::ConfigValidationError { .. }
            | PuzzleError::InvalidConfigValueError { .. }
            | PuzzleError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PuzzleError::InvalidWordList { .. }
            | PuzzleError::InvalidLayout { .. }
            | PuzzleError::ValidationError { .. } => ErrorCategory::Input,
            PuzzleError::EmptyWordList | PuzzleError::EmptyWord { .. } => {
                ErrorCategory::Generation
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Generation => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Serialization => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PuzzleError::IoError(_) => "檢查輸入檔案是否存在，以及輸出目錄是否可寫入",
            PuzzleError::ZipError(_) => "關閉壓縮 (--compress=false) 後重試",
            PuzzleError::CsvError(_) | PuzzleError::SerializationError(_) => {
                "確認輸入是合法的 JSON 格式"
            }
            PuzzleError::ConfigError { .. }
            | PuzzleError::ConfigValidationError { .. }
            | PuzzleError::InvalidConfigValueError { .. } => "檢查配置檔案或命令列參數",
            PuzzleError::MissingConfigError { .. } => "補上缺少的配置欄位",
            PuzzleError::EmptyWordList => "字詞清單至少需要一個項目",
            PuzzleError::EmptyWord { .. } => "移除空白字詞後重試",
            PuzzleError::InvalidWordList { .. } => {
                "字詞清單必須是 [{\"word\": ..., \"clue\": ...}] 形式的陣列"
            }
            PuzzleError::InvalidLayout { .. } => "重新產生填字遊戲佈局",
            PuzzleError::ValidationError { .. } => "修正輸入資料後重試",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Serialization => format!("Could not read or write puzzle data: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Input rejected: {}", self),
            ErrorCategory::Generation => format!("Puzzle could not be generated: {}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_violations_are_generation_errors() {
        assert_eq!(PuzzleError::EmptyWordList.category(), ErrorCategory::Generation);
        assert_eq!(
            PuzzleError::EmptyWord { index: 2 }.severity(),
            ErrorSeverity::Medium
        );
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = PuzzleError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "words.json",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("File access failed"));
    }
}
