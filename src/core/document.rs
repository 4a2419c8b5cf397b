use crate::core::scatter::{ScatterPlot, FLAGGED_CLASS};
use crate::core::surface::escape;
use crate::core::tooltip::{TooltipController, TooltipState};
use crate::domain::model::ChartLayout;
use crate::utils::error::Result;

pub const PLOT_CONTAINER_ID: &str = "plot-scatter";
pub const TOOLTIP_ID: &str = "tooltip";
pub const TOOLTIP_VISIBLE_CLASS: &str = "tooltip_visibility_visible";

/// 對每個標記送出 pointer enter，記錄提示框狀態；頁面腳本只負責套用
///
/// Returns the per-marker enter states and the state left after a final
/// pointer leave.
pub fn tooltip_states(
    plot: &ScatterPlot,
    layout: &ChartLayout,
) -> Result<(Vec<TooltipState>, TooltipState)> {
    let mut controller = TooltipController::new(*layout);
    let mut states = Vec::with_capacity(plot.markers.len());
    for index in 0..plot.markers.len() {
        plot.pointer_enter(index, &mut controller)?;
        states.push(controller.state().clone());
    }
    plot.pointer_leave(&mut controller);
    Ok((states, controller.state().clone()))
}

// 避免資料內容提前結束 <script> 區塊
fn script_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Host page: plot container, shared tooltip overlay, and the glue that applies
/// precomputed tooltip states on pointer enter/leave.
pub fn render_document(plot: &ScatterPlot, layout: &ChartLayout, title: &str) -> Result<String> {
    let (enter_states, leave_state) = tooltip_states(plot, layout)?;
    let enter_states = script_json(&enter_states)?;
    let leave_state = script_json(&leave_state)?;
    let title = escape(title);

    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        .plot {{ position: relative; width: {width}px; height: {height}px; margin: 0 auto; }}
        .dot {{ fill: #3182bd; stroke: #08306b; }}
        .{flagged} {{ fill: #de2d26; stroke: #67000d; }}
        .plot-tooltip {{ position: absolute; visibility: hidden; pointer-events: none; background: #fff; border: 1px solid #999; padding: 4px 8px; }}
        .{visible} {{ visibility: visible; }}
    </style>
</head>
<body>
    <h1 id="title">{title}</h1>
    <div id="{container}" class="plot">
{svg}        <div id="{tooltip}" class="plot-tooltip">
            <p class="plot-tooltip__person"></p>
            <p class="plot-tooltip__race-info"></p>
            <p class="plot-tooltip__doping"></p>
        </div>
    </div>
    <script>
        const ENTER_STATES = {enter_states};
        const LEAVE_STATE = {leave_state};
        const tooltip = document.getElementById("{tooltip}");
        const regions = {{
            person: tooltip.querySelector(".plot-tooltip__person"),
            race_info: tooltip.querySelector(".plot-tooltip__race-info"),
            doping: tooltip.querySelector(".plot-tooltip__doping"),
        }};
        function applyState(state) {{
            tooltip.classList.toggle("{visible}", state.visible);
            tooltip.style.left = state.left_pct === null ? null : state.left_pct + "%";
            tooltip.style.top = state.top_pct === null ? null : state.top_pct + "%";
            if (state.year === null) {{ delete tooltip.dataset.year; }} else {{ tooltip.dataset.year = state.year; }}
            for (const key in regions) {{ regions[key].textContent = state[key]; }}
        }}
        document.querySelectorAll("#{container} circle.dot").forEach((dot) => {{
            const state = ENTER_STATES[Number(dot.dataset.index)];
            dot.addEventListener("mouseenter", () => applyState(state));
            dot.addEventListener("mouseleave", () => applyState(LEAVE_STATE));
        }});
    </script>
</body>
</html>
"##,
        title = title,
        width = layout.width,
        height = layout.height,
        flagged = FLAGGED_CLASS,
        visible = TOOLTIP_VISIBLE_CLASS,
        container = PLOT_CONTAINER_ID,
        tooltip = TOOLTIP_ID,
        svg = plot.to_svg(),
        enter_states = enter_states,
        leave_state = leave_state,
    ))
}
