use crate::core::scale::Scales;
use crate::core::surface::Element;
use crate::domain::model::ChartLayout;

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const X_TICK_COUNT: usize = 10;
const Y_TICK_SECONDS: i64 = 15;

/// 在繪圖表面加入兩個座標軸與軸標籤
///
/// Not idempotent: every call appends another pair of axes and labels.
pub fn render_axes(svg: &mut Element, scales: &Scales, layout: &ChartLayout) {
    svg.append("text")
        .attr("transform", "rotate(-90)")
        .attr("y", 0)
        .attr("x", -(layout.height / 2.0))
        .attr("dy", "1em")
        .attr("style", "text-anchor: middle")
        .text("Time in minutes");
    svg.append("text")
        .attr("y", layout.height)
        .attr("x", layout.width / 2.0)
        .attr("dy", "-1em")
        .attr("style", "text-anchor: middle")
        .text("Years");

    let x_axis = svg.append("g");
    x_axis
        .attr("id", "x-axis")
        .attr("transform", format!("translate(0, {})", layout.height - layout.padding));
    let (x0, x1) = scales.x.range();
    domain_path(x_axis, format!("M{},{}V0H{}V{}", x0, TICK_SIZE, x1, TICK_SIZE));
    for tick in scales.x.year_ticks(X_TICK_COUNT) {
        let position = scales.x.apply(tick);
        let group = x_axis.append("g");
        group
            .class("tick")
            .attr("transform", format!("translate({}, 0)", position));
        group.append("line").attr("y2", TICK_SIZE);
        group
            .append("text")
            .attr("y", TICK_SIZE + TICK_PADDING)
            .attr("dy", "0.71em")
            .attr("style", "text-anchor: middle")
            .text(tick.format("%Y").to_string());
    }

    let y_axis = svg.append("g");
    y_axis
        .attr("id", "y-axis")
        .attr("transform", format!("translate({}, 0)", layout.padding));
    let (y0, y1) = scales.y.range();
    domain_path(y_axis, format!("M{},{}H0V{}H{}", -TICK_SIZE, y0, y1, -TICK_SIZE));
    for tick in scales.y.second_ticks(Y_TICK_SECONDS) {
        let position = scales.y.apply(tick);
        let group = y_axis.append("g");
        group
            .class("tick")
            .attr("transform", format!("translate(0, {})", position));
        group.append("line").attr("x2", -TICK_SIZE);
        group
            .append("text")
            .attr("x", -(TICK_SIZE + TICK_PADDING))
            .attr("dy", "0.32em")
            .attr("style", "text-anchor: end")
            .text(tick.format("%M:%S").to_string());
    }
}

fn domain_path(axis: &mut Element, d: String) {
    axis.append("path")
        .class("domain")
        .attr("d", d)
        .attr("stroke", "currentColor")
        .attr("fill", "none");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mapper::map_records;
    use crate::core::scale::build_scales;
    use crate::domain::model::RawRecord;

    fn scales_for(seconds: &[(i32, f64)]) -> Scales {
        let raw: Vec<RawRecord> = seconds
            .iter()
            .map(|(year, secs)| RawRecord {
                year: *year,
                seconds: *secs,
                doping: String::new(),
                name: "rider".to_string(),
                nationality: "FRA".to_string(),
                place: 1,
                url: String::new(),
            })
            .collect();
        build_scales(&map_records(&raw).unwrap(), &ChartLayout::default()).unwrap()
    }

    fn tick_labels(axis: &Element) -> Vec<String> {
        axis.children
            .iter()
            .filter(|child| child.has_class("tick"))
            .filter_map(|tick| tick.children.iter().find(|c| c.tag == "text"))
            .filter_map(|text| text.text.clone())
            .collect()
    }

    #[test]
    fn test_y_axis_labels_are_quarter_minutes() {
        let scales = scales_for(&[(1994, 2175.0), (1996, 2230.0)]);
        let mut svg = Element::new("svg");
        render_axes(&mut svg, &scales, &ChartLayout::default());

        let y_axis = svg.find_by_id("y-axis").unwrap();
        assert_eq!(tick_labels(y_axis), vec!["36:15", "36:30", "36:45", "37:00"]);
        assert!(!tick_labels(y_axis).contains(&"36:20".to_string()));
    }

    #[test]
    fn test_x_axis_labels_are_years() {
        let scales = scales_for(&[(1994, 2175.0), (2000, 2230.0)]);
        let mut svg = Element::new("svg");
        render_axes(&mut svg, &scales, &ChartLayout::default());

        let x_axis = svg.find_by_id("x-axis").unwrap();
        assert_eq!(x_axis.get_attr("transform"), Some("translate(0, 545)"));
        assert_eq!(
            tick_labels(x_axis),
            vec!["1994", "1995", "1996", "1997", "1998", "1999", "2000"]
        );
    }

    #[test]
    fn test_axis_labels_are_positioned_from_layout() {
        let scales = scales_for(&[(1994, 2175.0), (1996, 2230.0)]);
        let mut svg = Element::new("svg");
        render_axes(&mut svg, &scales, &ChartLayout::default());

        let labels: Vec<&Element> = svg.children.iter().filter(|c| c.tag == "text").collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].text.as_deref(), Some("Time in minutes"));
        assert_eq!(labels[0].get_attr("transform"), Some("rotate(-90)"));
        assert_eq!(labels[0].get_attr("x"), Some("-300"));
        assert_eq!(labels[1].text.as_deref(), Some("Years"));
        assert_eq!(labels[1].get_attr("x"), Some("512"));
        assert_eq!(labels[1].get_attr("y"), Some("600"));
    }

    #[test]
    fn test_repeated_calls_duplicate_axes() {
        let scales = scales_for(&[(1994, 2175.0), (1996, 2230.0)]);
        let mut svg = Element::new("svg");
        render_axes(&mut svg, &scales, &ChartLayout::default());
        render_axes(&mut svg, &scales, &ChartLayout::default());
        assert_eq!(svg.children.len(), 8);
    }
}
