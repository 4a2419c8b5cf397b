use crate::domain::model::{ChartLayout, PlotPoint, RawRecord, RenderResult};
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
    fn data_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn layout(&self) -> ChartLayout;
    fn title(&self) -> &str;
    fn bundle(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawRecord>>;
    async fn transform(&self, data: Vec<RawRecord>) -> Result<RenderResult>;
    async fn load(&self, result: RenderResult) -> Result<String>;
}

/// A marker under the pointer: the point it represents and where it was drawn.
#[derive(Debug, Clone, Copy)]
pub struct MarkerHover<'a> {
    pub point: &'a PlotPoint,
    pub cx: f64,
    pub cy: f64,
}

/// Pointer interaction capability injected into a rendered plot.
pub trait HoverHandler {
    fn on_enter(&mut self, hover: &MarkerHover<'_>);
    fn on_leave(&mut self);
}
