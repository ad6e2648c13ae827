use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform and load once, in order. Returns the output path.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting ETL process");

        tracing::info!("Extracting data...");
        let raw_data = self.pipeline.extract().await?;

        tracing::info!("Transforming data...");
        let transformed = self.pipeline.transform(raw_data).await?;

        tracing::info!("Loading data...");
        let output_path = self.pipeline.load(transformed).await?;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Output saved to: {}",
            output_path
        );
        Ok(output_path)
    }
}
