use crate::domain::model::{PlotPoint, RawRecord};
use crate::utils::error::{PlotError, Result};
use chrono::{DateTime, NaiveDate, Utc};

/// 將原始紀錄轉為繪圖資料點，保持筆數與順序
pub fn map_records(raw: &[RawRecord]) -> Result<Vec<PlotPoint>> {
    raw.iter()
        .enumerate()
        .map(|(index, record)| map_record(index, record))
        .collect()
}

fn map_record(index: usize, record: &RawRecord) -> Result<PlotPoint> {
    Ok(PlotPoint {
        year: year_start(record.year).ok_or_else(|| PlotError::InvalidRecord {
            index,
            reason: format!("year {} is out of range", record.year),
        })?,
        time: elapsed_since_epoch(record.seconds).ok_or_else(|| PlotError::InvalidRecord {
            index,
            reason: format!("seconds {} is not a valid duration", record.seconds),
        })?,
        doping: record.doping.clone(),
        name: record.name.clone(),
        nationality: record.nationality.clone(),
        place: record.place,
        url: record.url.clone(),
    })
}

pub fn year_start(year: i32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, 1, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

pub fn elapsed_since_epoch(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}
