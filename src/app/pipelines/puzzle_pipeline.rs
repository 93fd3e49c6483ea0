use crate::core::clues::{annotate_layout, ClueSheet};
use crate::core::export::{self, files_for, zip_bundle};
use crate::core::{
    ConfigProvider, CrosswordGridMaterializer, Materialized, Pipeline, PuzzleDocument, PuzzleKind,
    PuzzleRequest, RenderedPuzzle, Storage, WordSoupPlacer,
};
use crate::domain::model::{CrosswordLayout, WordEntry};
use crate::utils::error::{PuzzleError, Result};
use crate::utils::validation::validate_file_size;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;

/// Reads a word list, builds the requested puzzle and writes it out.
pub struct PuzzlePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PuzzlePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn read_input(&self, field: &str, path: &str) -> Result<Vec<u8>> {
        tracing::debug!("Reading {} from: {}", field, path);
        let data = self.storage.read_file(path).await?;
        validate_file_size(path, data.len() as u64, self.config.max_file_size_bytes())?;
        Ok(data)
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.config.seed() {
            Some(seed) => {
                tracing::debug!("Using fixed seed {}", seed);
                ChaCha8Rng::seed_from_u64(seed)
            }
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// Parses a `[{"word": ..., "clue": ...}]` array.
///
/// Every item must be an object with a string `word` that is not blank once
/// whitespace is removed; `clue` may be missing but must be a string when present.
pub fn parse_word_list(data: &[u8]) -> Result<Vec<WordEntry>> {
    let value: serde_json::Value = serde_json::from_slice(data)?;
    let serde_json::Value::Array(items) = value else {
        return Err(PuzzleError::InvalidWordList {
            message: "expected a JSON array".to_string(),
        });
    };
    if items.is_empty() {
        return Err(PuzzleError::EmptyWordList);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let serde_json::Value::Object(obj) = item else {
                return Err(PuzzleError::InvalidWordList {
                    message: format!("item {} is not an object", index),
                });
            };
            let word = match obj.get("word") {
                Some(serde_json::Value::String(word)) => word.clone(),
                _ => {
                    return Err(PuzzleError::InvalidWordList {
                        message: format!("item {} has no string 'word'", index),
                    })
                }
            };
            let clue = match obj.get("clue") {
                None | Some(serde_json::Value::Null) => String::new(),
                Some(serde_json::Value::String(clue)) => clue.clone(),
                Some(_) => {
                    return Err(PuzzleError::InvalidWordList {
                        message: format!("item {} has a non-string 'clue'", index),
                    })
                }
            };

            let entry = WordEntry::new(word, clue);
            if entry.clean_len() == 0 {
                return Err(PuzzleError::EmptyWord { index });
            }
            Ok(entry)
        })
        .collect()
}

pub fn parse_layout(data: &[u8]) -> Result<CrosswordLayout> {
    serde_json::from_slice(data).map_err(|e| PuzzleError::InvalidLayout {
        message: e.to_string(),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PuzzlePipeline<S, C> {
    async fn extract(&self) -> Result<PuzzleRequest> {
        let kind = self.config.puzzle_kind();
        tracing::info!("📥 Extracting input for {:?}", kind);

        let words = match self.config.words_file() {
            Some(path) => parse_word_list(&self.read_input("word list", path).await?)?,
            None if kind == PuzzleKind::Wordsoup => {
                return Err(PuzzleError::MissingConfigError {
                    field: "words_file".to_string(),
                })
            }
            None => Vec::new(),
        };

        let layout = match (kind, self.config.layout_file()) {
            (PuzzleKind::Crossword, Some(path)) => {
                Some(parse_layout(&self.read_input("layout", path).await?)?)
            }
            (PuzzleKind::Crossword, None) => {
                return Err(PuzzleError::MissingConfigError {
                    field: "layout_file".to_string(),
                })
            }
            (PuzzleKind::Wordsoup, _) => None,
        };

        tracing::info!("📊 Extracted {} words", words.len());
        Ok(PuzzleRequest {
            kind,
            words,
            layout,
        })
    }

    async fn transform(&self, request: PuzzleRequest) -> Result<RenderedPuzzle> {
        tracing::info!("🔧 Building {:?} grid", request.kind);
        let generated_at = chrono::Utc::now();

        let document = match request.kind {
            PuzzleKind::Wordsoup => {
                let placer = WordSoupPlacer::new(self.config.soup_settings());
                let soup = placer.place(&request.words, &mut self.rng())?;

                for word in &soup.skipped {
                    tracing::warn!("⚠️ Could not place '{}', leaving it out", word.word);
                }

                PuzzleDocument::Wordsoup {
                    clues: ClueSheet::for_soup(&soup.placements),
                    grid: soup.grid,
                    words: soup.placements,
                    skipped: soup.skipped,
                    grid_size: soup.grid_size,
                    generated_at,
                }
            }
            PuzzleKind::Crossword => {
                let layout = request.layout.ok_or_else(|| PuzzleError::MissingConfigError {
                    field: "layout_file".to_string(),
                })?;
                let materializer = CrosswordGridMaterializer::new();
                materializer.check_layout(&layout)?;

                let Materialized { grid, rejected } = materializer.materialize_with_report(&layout);
                let words = annotate_layout(&layout, &request.words);

                PuzzleDocument::Crossword {
                    clues: ClueSheet::for_crossword(&words),
                    grid,
                    words,
                    layout,
                    rejected: rejected.iter().map(ToString::to_string).collect(),
                    generated_at,
                }
            }
        };

        tracing::info!(
            "✅ Transform complete: {} words on the grid",
            document.word_count()
        );
        export::render(document, true)
    }

    async fn load(&self, rendered: RenderedPuzzle) -> Result<String> {
        let stem = self.config.bundle_name();
        let files = files_for(&rendered, stem, self.config.output_formats());
        if files.is_empty() {
            return Err(PuzzleError::ValidationError {
                message: "no supported output format requested".to_string(),
            });
        }

        if self.config.compress() {
            let output_path = self.output_file(&format!("{}.zip", stem));
            tracing::debug!("Creating ZIP file with {} files", files.len());
            let zip_data = zip_bundle(&files)?;
            self.storage.write_file(&output_path, &zip_data).await?;
            tracing::info!("📦 Bundle saved: {}", output_path);
            return Ok(output_path);
        }

        let mut written = Vec::with_capacity(files.len());
        for (name, contents) in &files {
            let path = self.output_file(name);
            self.storage.write_file(&path, contents.as_bytes()).await?;
            tracing::debug!("Wrote {}", path);
            written.push(path);
        }

        tracing::info!("💾 Saved {} file(s)", written.len());
        Ok(written.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::word_soup::SoupSettings;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                PuzzleError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        kind: PuzzleKind,
        words_file: Option<String>,
        layout_file: Option<String>,
        output_formats: Vec<String>,
        compress: bool,
        max_file_size_bytes: u64,
    }

    impl MockConfig {
        fn soup() -> Self {
            Self {
                kind: PuzzleKind::Wordsoup,
                words_file: Some("words.json".to_string()),
                layout_file: None,
                output_formats: vec!["json".to_string(), "csv".to_string()],
                compress: false,
                max_file_size_bytes: 1024,
            }
        }

        fn crossword() -> Self {
            Self {
                kind: PuzzleKind::Crossword,
                layout_file: Some("layout.json".to_string()),
                ..Self::soup()
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn puzzle_kind(&self) -> PuzzleKind {
            self.kind
        }

        fn words_file(&self) -> Option<&str> {
            self.words_file.as_deref()
        }

        fn layout_file(&self) -> Option<&str> {
            self.layout_file.as_deref()
        }

        fn output_path(&self) -> &str {
            "out"
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn soup_settings(&self) -> SoupSettings {
            SoupSettings::default().with_alphabet("Z")
        }

        fn seed(&self) -> Option<u64> {
            Some(17)
        }

        fn compress(&self) -> bool {
            self.compress
        }

        fn bundle_name(&self) -> &str {
            "puzzle"
        }

        fn max_file_size_bytes(&self) -> u64 {
            self.max_file_size_bytes
        }
    }

    const WORDS: &str = r#"[
        {"word": "Ice Cream", "clue": "Cold dessert"},
        {"word": "cat", "clue": "Purrs"},
        {"word": "dog"}
    ]"#;

    const LAYOUT: &str = r#"{"rows": 3, "cols": 3, "result": [
        {"answer": "CAT", "startx": 1, "starty": 1, "orientation": "across", "position": 1},
        {"answer": "ANT", "startx": 2, "starty": 1, "orientation": "down", "position": 2},
        {"answer": "DOGS", "startx": 1, "starty": 3, "orientation": "across", "position": 3}
    ]}"#;

    #[test]
    fn test_parse_word_list_accepts_missing_clue() {
        let words = parse_word_list(WORDS.as_bytes()).unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words[2], WordEntry::new("dog", ""));
    }

    #[test]
    fn test_parse_word_list_rejects_bad_shapes() {
        assert!(matches!(
            parse_word_list(br#"{"word": "cat"}"#),
            Err(PuzzleError::InvalidWordList { .. })
        ));
        assert!(matches!(parse_word_list(b"[]"), Err(PuzzleError::EmptyWordList)));
        assert!(matches!(
            parse_word_list(br#"[{"clue": "no word"}]"#),
            Err(PuzzleError::InvalidWordList { .. })
        ));
        assert!(matches!(
            parse_word_list(br#"[{"word": "cat", "clue": 3}]"#),
            Err(PuzzleError::InvalidWordList { .. })
        ));
        assert!(matches!(
            parse_word_list(br#"[{"word": "cat"}, {"word": " \t "}]"#),
            Err(PuzzleError::EmptyWord { index: 1 })
        ));
        assert!(matches!(
            parse_word_list(b"not json"),
            Err(PuzzleError::SerializationError(_))
        ));
    }

    #[tokio::test]
    async fn test_soup_pipeline_end_to_end() {
        let storage = MockStorage::new();
        storage.put("words.json", WORDS).await;
        let pipeline = PuzzlePipeline::new(storage.clone(), MockConfig::soup());

        let request = pipeline.extract().await.unwrap();
        assert_eq!(request.words.len(), 3);
        assert!(request.layout.is_none());

        let rendered = pipeline.transform(request).await.unwrap();
        assert_eq!(rendered.document.kind(), PuzzleKind::Wordsoup);
        assert_eq!(rendered.document.word_count(), 3);
        assert!(rendered.document.grid().is_filled());

        let output = pipeline.load(rendered).await.unwrap();
        assert_eq!(output, "out/puzzle.json");

        let json = storage.get_file("out/puzzle.json").await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(json["kind"], "wordsoup");
        assert_eq!(json["gridSize"], 20);
        assert_eq!(json["words"][0]["word"]["word"], "Ice Cream");
        assert_eq!(json["clues"]["words"].as_array().unwrap().len(), 3);

        let csv = storage.get_file("out/puzzle.csv").await.unwrap();
        assert_eq!(String::from_utf8(csv).unwrap().lines().count(), 20);
    }

    #[tokio::test]
    async fn test_crossword_pipeline_keeps_original_spelling_and_rejects_overflow() {
        let storage = MockStorage::new();
        storage.put("words.json", WORDS).await;
        storage.put("layout.json", LAYOUT).await;
        let pipeline = PuzzlePipeline::new(storage.clone(), MockConfig::crossword());

        let request = pipeline.extract().await.unwrap();
        let rendered = pipeline.transform(request).await.unwrap();

        match &rendered.document {
            PuzzleDocument::Crossword {
                grid,
                words,
                rejected,
                clues,
                ..
            } => {
                assert_eq!(grid.row_string(0, '.'), "CAT");
                assert_eq!(grid.row_string(1, '.'), ".N.");
                assert_eq!(grid.row_string(2, '.'), ".T.");
                assert_eq!(words[0].word, "cat");
                assert_eq!(words[0].clue, "Purrs");
                assert_eq!(rejected.len(), 1);
                assert!(rejected[0].starts_with("DOGS"));
                assert_eq!(clues.across.len(), 2);
                assert_eq!(clues.down.len(), 1);
            }
            other => panic!("expected crossword, got {:?}", other.kind()),
        }
    }

    #[tokio::test]
    async fn test_crossword_without_layout_file_fails() {
        let storage = MockStorage::new();
        let config = MockConfig {
            layout_file: None,
            words_file: None,
            ..MockConfig::crossword()
        };
        let pipeline = PuzzlePipeline::new(storage, config);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, PuzzleError::MissingConfigError { .. }));
    }

    #[tokio::test]
    async fn test_oversized_input_is_rejected() {
        let storage = MockStorage::new();
        storage.put("words.json", &"x".repeat(2048)).await;
        let pipeline = PuzzlePipeline::new(storage, MockConfig::soup());

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, PuzzleError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_load_with_compression_writes_single_zip() {
        let storage = MockStorage::new();
        storage.put("words.json", WORDS).await;
        let config = MockConfig {
            compress: true,
            output_formats: vec!["json".to_string(), "csv".to_string(), "tsv".to_string()],
            ..MockConfig::soup()
        };
        let pipeline = PuzzlePipeline::new(storage.clone(), config);

        let request = pipeline.extract().await.unwrap();
        let rendered = pipeline.transform(request).await.unwrap();
        let output = pipeline.load(rendered).await.unwrap();
        assert_eq!(output, "out/puzzle.zip");

        let zip_bytes = storage.get_file("out/puzzle.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["puzzle.csv", "puzzle.json", "puzzle.tsv"]);
        assert!(storage.get_file("out/puzzle.json").await.is_none());
    }
}
