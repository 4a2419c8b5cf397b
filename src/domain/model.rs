use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/cyclist-data.json";

/// 遠端資料集的單筆紀錄（欄位名稱沿用來源 JSON）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawRecord {
    pub year: i32,
    pub seconds: f64,
    #[serde(default)]
    pub doping: String,
    pub name: String,
    pub nationality: String,
    pub place: i64,
    #[serde(rename = "URL", default)]
    pub url: String,
}

/// 可直接繪製的資料點
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    /// January 1st of the race year, midnight UTC.
    pub year: DateTime<Utc>,
    /// Race duration carried as an instant: the Unix epoch plus `Seconds`.
    pub time: DateTime<Utc>,
    pub doping: String,
    pub name: String,
    pub nationality: String,
    pub place: i64,
    pub url: String,
}

impl PlotPoint {
    pub fn is_flagged(&self) -> bool {
        !self.doping.is_empty()
    }

    pub fn calendar_year(&self) -> i32 {
        self.year.year()
    }
}

/// Chart dimensions shared by the scales, the axes and the tooltip placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl ChartLayout {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::new(1024.0, 600.0, 55.0)
    }
}

#[derive(Debug, Clone)]
pub struct RenderResult {
    pub points: Vec<PlotPoint>,
    pub svg: String,
    pub html: String,
    pub csv: String,
}
