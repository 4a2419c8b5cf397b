pub mod axis;
pub mod document;
pub mod etl;
pub mod loader;
pub mod mapper;
pub mod scale;
pub mod scatter;
pub mod surface;
pub mod tooltip;

pub use crate::domain::model::{ChartLayout, PlotPoint, RawRecord, RenderResult};
pub use crate::domain::ports::{ConfigProvider, HoverHandler, MarkerHover, Pipeline, Storage};
pub use crate::utils::error::Result;
