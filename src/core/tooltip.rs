use crate::domain::model::ChartLayout;
use crate::domain::ports::{HoverHandler, MarkerHover};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 提示框狀態：隱藏時所有欄位皆為 None
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TooltipState {
    pub visible: bool,
    pub left_pct: Option<f64>,
    pub top_pct: Option<f64>,
    pub year: Option<i32>,
    pub person: Option<String>,
    pub race_info: Option<String>,
    pub doping: Option<String>,
}

/// Formats a duration-as-instant as zero-padded `MM:SS`.
pub fn format_race_time(time: DateTime<Utc>) -> String {
    time.format("%M:%S").to_string()
}

/// Tooltip for a hovered marker, positioned as a percentage of the chart size.
pub fn enter(hover: &MarkerHover<'_>, layout: &ChartLayout) -> TooltipState {
    let point = hover.point;
    TooltipState {
        visible: true,
        left_pct: Some(hover.cx / (layout.width / 100.0)),
        top_pct: Some(hover.cy / (layout.height / 100.0)),
        year: Some(point.calendar_year()),
        person: Some(format!("{}: {}", point.name, point.nationality)),
        race_info: Some(format!(
            "Year: {}, Time: {}",
            point.calendar_year(),
            format_race_time(point.time)
        )),
        doping: Some(point.doping.clone()),
    }
}

pub fn leave() -> TooltipState {
    TooltipState::default()
}

/// Owns the single shared tooltip and applies hover events to it.
#[derive(Debug, Clone)]
pub struct TooltipController {
    layout: ChartLayout,
    state: TooltipState,
}

impl TooltipController {
    pub fn new(layout: ChartLayout) -> Self {
        Self {
            layout,
            state: TooltipState::default(),
        }
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }
}

impl HoverHandler for TooltipController {
    fn on_enter(&mut self, hover: &MarkerHover<'_>) {
        self.state = enter(hover, &self.layout);
    }

    fn on_leave(&mut self) {
        self.state = leave();
    }
}
