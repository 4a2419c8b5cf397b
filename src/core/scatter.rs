use crate::core::axis::render_axes;
use crate::core::scale::{build_scales, Scales};
use crate::core::surface::Element;
use crate::domain::model::{ChartLayout, PlotPoint};
use crate::domain::ports::{HoverHandler, MarkerHover};
use crate::utils::error::{PlotError, Result};
use chrono::SecondsFormat;

pub const MARKER_RADIUS: f64 = 5.0;
pub const DOT_CLASS: &str = "dot";
pub const FLAGGED_CLASS: &str = "dot_background_red";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub cx: f64,
    pub cy: f64,
    pub flagged: bool,
}

/// 已繪製的散佈圖：SVG 表面、比例尺以及每個資料點的標記
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    pub surface: Element,
    pub scales: Scales,
    pub points: Vec<PlotPoint>,
    pub markers: Vec<Marker>,
}

pub fn render_scatter(points: Vec<PlotPoint>, layout: &ChartLayout) -> Result<ScatterPlot> {
    let scales = build_scales(&points, layout)?;

    let mut surface = Element::new("svg");
    surface
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("width", layout.width)
        .attr("height", layout.height);

    render_axes(&mut surface, &scales, layout);

    let mut markers = Vec::with_capacity(points.len());
    for (index, point) in points.iter().enumerate() {
        let marker = Marker {
            index,
            cx: scales.x.apply(point.year),
            cy: scales.y.apply(point.time),
            flagged: point.is_flagged(),
        };

        let circle = surface.append("circle");
        circle
            .attr("cx", marker.cx)
            .attr("cy", marker.cy)
            .attr("r", MARKER_RADIUS)
            .attr(
                "data-xvalue",
                point.year.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .attr(
                "data-yvalue",
                point.time.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .attr("data-index", index)
            .class(DOT_CLASS);
        if marker.flagged {
            circle.class(FLAGGED_CLASS);
        }

        markers.push(marker);
    }

    tracing::debug!(
        "Rendered {} markers ({} flagged)",
        markers.len(),
        markers.iter().filter(|m| m.flagged).count()
    );

    Ok(ScatterPlot {
        surface,
        scales,
        points,
        markers,
    })
}

impl ScatterPlot {
    pub fn hover(&self, index: usize) -> Result<MarkerHover<'_>> {
        let marker = self.markers.get(index).ok_or(PlotError::UnknownMarker {
            index,
            count: self.markers.len(),
        })?;
        Ok(MarkerHover {
            point: &self.points[marker.index],
            cx: marker.cx,
            cy: marker.cy,
        })
    }

    pub fn pointer_enter<H: HoverHandler>(&self, index: usize, handler: &mut H) -> Result<()> {
        let hover = self.hover(index)?;
        handler.on_enter(&hover);
        Ok(())
    }

    pub fn pointer_leave<H: HoverHandler>(&self, handler: &mut H) {
        handler.on_leave();
    }

    pub fn to_svg(&self) -> String {
        self.surface.to_markup()
    }
}
