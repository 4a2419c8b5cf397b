use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// 依序執行 extract → transform → load；任一階段失敗即停止，不會輸出任何檔案
pub struct PlotEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> PlotEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting scatter plot run...");

        // Extract
        tracing::info!("Fetching dataset...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Fetched {} records", raw_data.len());
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("Rendering scatter plot...");
        let result = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Rendered {} markers ({} flagged)",
            result.points.len(),
            result.points.iter().filter(|p| p.is_flagged()).count()
        );
        self.monitor.log_stats("Transform");

        // Load
        tracing::info!("Writing artifacts...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
