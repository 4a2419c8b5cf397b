pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::ChartLayout;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

/// 合併 TOML 與命令列參數後的最終配置
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub data_url: String,
    pub output_path: String,
    pub layout: ChartLayout,
    pub title: String,
    pub bundle: bool,
    pub monitor: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self::from(&TomlConfig::default())
    }
}

impl From<&TomlConfig> for PlotConfig {
    fn from(config: &TomlConfig) -> Self {
        Self {
            data_url: config.source.url.clone(),
            output_path: config.output_path().to_string(),
            layout: config.layout(),
            title: config.title().to_string(),
            bundle: config.bundle(),
            monitor: config.monitoring_enabled(),
        }
    }
}

impl ConfigProvider for PlotConfig {
    fn data_url(&self) -> &str {
        &self.data_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn layout(&self) -> ChartLayout {
        self.layout
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn bundle(&self) -> bool {
        self.bundle
    }
}

impl Validate for PlotConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.url", &self.data_url)?;
        validation::validate_path("output.path", &self.output_path)?;
        validation::validate_non_empty_string("chart.title", &self.title)?;
        validation::validate_layout(&self.layout)
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "cyclist-scatter")]
#[command(about = "Render the cyclist doping dataset as an interactive scatter plot")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Dataset URL (JSON array of race records)
    #[arg(long)]
    pub data_url: Option<String>,

    /// Directory the artifacts are written to
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long)]
    pub width: Option<f64>,

    #[arg(long)]
    pub height: Option<f64>,

    #[arg(long)]
    pub padding: Option<f64>,

    #[arg(long)]
    pub title: Option<String>,

    /// Pack the SVG, HTML and CSV into a single zip file
    #[arg(long)]
    pub bundle: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory after each phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// TOML 為基礎，命令列有給的值覆蓋之
    pub fn resolve(&self) -> Result<PlotConfig> {
        let base = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                PlotConfig::from(&TomlConfig::from_file(path)?)
            }
            None => PlotConfig::default(),
        };
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, mut config: PlotConfig) -> PlotConfig {
        if let Some(url) = &self.data_url {
            config.data_url = url.clone();
        }
        if let Some(path) = &self.output_path {
            config.output_path = path.clone();
        }
        if let Some(width) = self.width {
            config.layout.width = width;
        }
        if let Some(height) = self.height {
            config.layout.height = height;
        }
        if let Some(padding) = self.padding {
            config.layout.padding = padding;
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        config.bundle |= self.bundle;
        config.monitor |= self.monitor;
        config
    }
}
