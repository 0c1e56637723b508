use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Drives one pipeline through its extract, transform and load stages.
pub struct Engine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> Engine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Extracting data...");
        let raw = self.pipeline.extract().await?;

        tracing::info!("Transforming data...");
        let prepared = self.pipeline.transform(raw).await?;

        tracing::info!("Loading data...");
        let output_path = self.pipeline.load(prepared).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
