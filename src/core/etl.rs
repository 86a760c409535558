use crate::core::{ExtractionResult, Pipeline};
use crate::utils::error::Result;

pub struct FragmentEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> FragmentEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Extract and transform without writing anything.
    pub async fn collect(&self) -> Result<ExtractionResult> {
        tracing::info!("Reading sources...");
        let sources = self.pipeline.extract().await?;
        tracing::info!("Read {} source files", sources.len());

        tracing::info!("Extracting fragments...");
        let result = self.pipeline.transform(sources).await?;
        tracing::info!(
            "Extracted {} fragments from {} files",
            result.fragment_count(),
            result.files.len()
        );
        if !result.skipped.is_empty() {
            tracing::warn!("Skipped {} files with marker errors", result.skipped.len());
        }

        Ok(result)
    }

    pub async fn run(&self) -> Result<String> {
        let result = self.collect().await?;

        tracing::info!("Writing output...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
