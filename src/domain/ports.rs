use crate::core::word_soup::SoupSettings;
use crate::domain::document::{PuzzleKind, PuzzleRequest, RenderedPuzzle};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn puzzle_kind(&self) -> PuzzleKind;
    fn words_file(&self) -> Option<&str>;
    fn layout_file(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn soup_settings(&self) -> SoupSettings;
    fn seed(&self) -> Option<u64>;
    fn compress(&self) -> bool;
    fn bundle_name(&self) -> &str;
    fn max_file_size_bytes(&self) -> u64;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<PuzzleRequest>;
    async fn transform(&self, request: PuzzleRequest) -> Result<RenderedPuzzle>;
    async fn load(&self, rendered: RenderedPuzzle) -> Result<String>;
}
