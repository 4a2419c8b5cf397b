use crate::domain::model::{ChartLayout, PlotPoint};
use crate::utils::error::{PlotError, Result};
use chrono::{DateTime, Datelike, Utc};

const MILLIS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0 * 1000.0;
const MAX_TICKS: usize = 1000;

/// Linear mapping from a time domain to a pixel range.
///
/// The domain may be given in either order; `y` uses a reversed domain so that
/// shorter durations land closer to the top of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (DateTime<Utc>, DateTime<Utc>),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: DateTime<Utc>) -> f64 {
        let (d0, d1) = (
            self.domain.0.timestamp_millis(),
            self.domain.1.timestamp_millis(),
        );
        let (r0, r1) = self.range;

        // 定義域退化為單點時取值域中點
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }

        let t = (value.timestamp_millis() - d0) as f64 / (d1 - d0) as f64;
        r0 + t * (r1 - r0)
    }

    fn extent(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        }
    }

    /// January 1st ticks on years divisible by a 1/2/5×10ⁿ step, chosen so that
    /// roughly `count` ticks cover the domain.
    ///
    /// Ticks are whole years only: a domain shorter than `count` years still
    /// ticks once per year rather than on months, since every plotted x value is
    /// a January 1st.
    pub fn year_ticks(&self, count: usize) -> Vec<DateTime<Utc>> {
        let (lo, hi) = self.extent();
        let span_years = (hi.timestamp_millis() - lo.timestamp_millis()) as f64 / MILLIS_PER_YEAR;
        let step = year_step(span_years, count);

        let first = if is_year_start(lo) {
            lo.year()
        } else {
            lo.year() + 1
        };

        (first..=hi.year())
            .filter(|year| year.rem_euclid(step) == 0)
            .filter_map(crate::core::mapper::year_start)
            .take(MAX_TICKS)
            .collect()
    }

    /// Every instant in the domain whose seconds component is a multiple of `every`.
    ///
    /// When that would exceed `MAX_TICKS`, the step widens to a larger multiple
    /// of `every` so the ticks still span the whole domain.
    pub fn second_ticks(&self, every: i64) -> Vec<DateTime<Utc>> {
        let every_ms = every.max(1) * 1000;
        let (lo, hi) = self.extent();
        let (lo_ms, hi_ms) = (lo.timestamp_millis(), hi.timestamp_millis());

        let needed = (hi_ms - lo_ms) / every_ms + 1;
        let factor = (needed + MAX_TICKS as i64 - 1) / MAX_TICKS as i64;
        let step_ms = every_ms * factor.max(1);
        if factor > 1 {
            tracing::warn!(
                "Time domain needs {} ticks every {}s, widening step to {}s",
                needed,
                every_ms / 1000,
                step_ms / 1000
            );
        }

        let first = lo_ms.div_euclid(step_ms) * step_ms
            + if lo_ms.rem_euclid(step_ms) == 0 { 0 } else { step_ms };

        let mut ticks = Vec::new();
        let mut current = first;
        while current <= hi_ms {
            if let Some(tick) = DateTime::from_timestamp_millis(current) {
                ticks.push(tick);
            }
            current += step_ms;
        }
        ticks
    }
}

fn is_year_start(value: DateTime<Utc>) -> bool {
    crate::core::mapper::year_start(value.year()) == Some(value)
}

/// 1/2/5 倍數的刻度間距（單位：年，最小 1 年）
fn year_step(span: f64, count: usize) -> i32 {
    if span <= 0.0 || count == 0 {
        return 1;
    }

    let step = span / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    (factor * 10f64.powf(power)).round().max(1.0) as i32
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub x: TimeScale,
    pub y: TimeScale,
}

pub fn build_scales(points: &[PlotPoint], layout: &ChartLayout) -> Result<Scales> {
    let first = points.first().ok_or(PlotError::EmptyDataset)?;

    let (mut year_min, mut year_max) = (first.year, first.year);
    let (mut time_min, mut time_max) = (first.time, first.time);
    for point in points {
        year_min = year_min.min(point.year);
        year_max = year_max.max(point.year);
        time_min = time_min.min(point.time);
        time_max = time_max.max(point.time);
    }

    let x = TimeScale::new(
        (year_min, year_max),
        (layout.padding, layout.width - layout.padding),
    );
    let y = TimeScale::new(
        (time_max, time_min),
        (layout.height - layout.padding, layout.padding),
    );

    tracing::debug!(
        "Built scales: years {}..{}, times {}s..{}s",
        year_min.year(),
        year_max.year(),
        time_min.timestamp(),
        time_max.timestamp()
    );

    Ok(Scales { x, y })
}
