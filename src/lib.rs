pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::pipelines::scatter_pipeline::ScatterPipeline;
pub use crate::config::{cli::LocalStorage, PlotConfig};
pub use crate::core::{etl::PlotEngine, scatter::render_scatter, tooltip::TooltipController};
pub use crate::utils::error::{PlotError, Result};
