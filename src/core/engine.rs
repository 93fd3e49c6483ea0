use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct PuzzleEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PuzzleEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting puzzle generation...");

        // Extract
        let request = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} words for a {:?} puzzle",
            request.words.len(),
            request.kind
        );

        // Transform
        let rendered = self.pipeline.transform(request).await?;
        tracing::info!(
            "Built {}x{} grid with {} words",
            rendered.document.grid().rows(),
            rendered.document.grid().cols(),
            rendered.document.word_count()
        );

        // Load
        let output_path = self.pipeline.load(rendered).await?;
        tracing::info!("Output saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}
