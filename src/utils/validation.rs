use crate::domain::model::ChartLayout;
use crate::utils::error::{PlotError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PlotError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PlotError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PlotError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PlotError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PlotError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlotError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 不在任何區間內
    if !(min..=max).contains(&value) {
        return Err(PlotError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 圖表尺寸扣掉兩側 padding 後必須還有繪圖空間
pub fn validate_layout(layout: &ChartLayout) -> Result<()> {
    validate_range("chart.width", layout.width, 1.0, 16384.0)?;
    validate_range("chart.height", layout.height, 1.0, 16384.0)?;
    validate_range("chart.padding", layout.padding, 0.0, 16384.0)?;

    let min_side = layout.width.min(layout.height);
    if layout.padding * 2.0 >= min_side {
        return Err(PlotError::InvalidConfigValue {
            field: "chart.padding".to_string(),
            value: layout.padding.to_string(),
            reason: format!(
                "Padding leaves no plot area in a {}x{} chart",
                layout.width, layout.height
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.url", "https://example.com/data.json").is_ok());
        assert!(validate_url("source.url", "http://example.com").is_ok());
        assert!(validate_url("source.url", "").is_err());
        assert!(validate_url("source.url", "invalid-url").is_err());
        assert!(validate_url("source.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_layout() {
        assert!(validate_layout(&ChartLayout::default()).is_ok());
        assert!(validate_layout(&ChartLayout::new(100.0, 100.0, 50.0)).is_err());
        assert!(validate_layout(&ChartLayout::new(0.0, 600.0, 0.0)).is_err());
        assert!(validate_layout(&ChartLayout::new(300.0, 200.0, 20.0)).is_ok());
    }

    #[test]
    fn test_validate_layout_rejects_non_finite() {
        assert!(validate_layout(&ChartLayout::new(f64::NAN, 600.0, 55.0)).is_err());
        assert!(validate_layout(&ChartLayout::new(1024.0, f64::NAN, 55.0)).is_err());
        assert!(validate_layout(&ChartLayout::new(1024.0, 600.0, f64::NAN)).is_err());
        assert!(validate_layout(&ChartLayout::new(f64::INFINITY, 600.0, 55.0)).is_err());
        assert!(validate_range("chart.width", f64::NAN, 1.0, 16384.0).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("chart.title", "Doping in cycling").is_ok());
        assert!(validate_non_empty_string("chart.title", "   ").is_err());
    }
}
