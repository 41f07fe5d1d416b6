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

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("🚀 Starting tagging run");

        // Extract
        tracing::info!("📥 Reading catalog...");
        let sheet = self.pipeline.extract().await?;
        tracing::info!("Read {} rows", sheet.records.len());

        // Transform
        tracing::info!("🏷️  Classifying products...");
        let result = self.pipeline.transform(sheet).await?;
        let stats = &result.stats;
        tracing::info!(
            "Tagged {} products ({} other vendor, {} variant rows cleared, {} passed through)",
            stats.products_tagged,
            stats.not_applicable,
            stats.variants_cleared,
            stats.passthrough
        );
        for (tier, count) in &stats.tiers {
            tracing::debug!("  {:?}: {}", tier, count);
        }

        // Load
        tracing::info!("📤 Writing catalog...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Finished in {:?}", started.elapsed());

        Ok(output_path)
    }
}
