use chrono::NaiveDate;

use crate::errors::{Result, SnapshotError};

// 日期转换工具

/// YYYYMMDD，数据源和日志使用的格式
pub fn format_compact_date(date: &NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// YYYY-MM-DD，输出文件使用的格式
pub fn format_dash_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_compact_date(date_str: &str) -> Result<NaiveDate> {
    let date_str = date_str.trim();
    if date_str.len() != 8 {
        return Err(SnapshotError::DataError(format!("Invalid date format: {}", date_str)));
    }
    Ok(NaiveDate::parse_from_str(date_str, "%Y%m%d")?)
}

/// 只接受严格的 10 位 YYYY-MM-DD，其余一律返回 None
pub fn parse_dash_date(date_str: &str) -> Option<NaiveDate> {
    if date_str.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}

/// 保留两位小数，恰好一半时远离零舍入
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_round_trip() {
        let date = parse_compact_date("20240105").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(format_compact_date(&date), "20240105");
        assert_eq!(format_dash_date(&date), "2024-01-05");
    }

    #[test]
    fn rejects_bad_compact_dates() {
        assert!(parse_compact_date("2024015").is_err());
        assert!(parse_compact_date("20241305").is_err());
        assert!(parse_compact_date("2024-01-05").is_err());
    }

    #[test]
    fn dash_date_requires_exact_shape() {
        assert_eq!(
            parse_dash_date("2024-01-05"),
            Some(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
        assert_eq!(parse_dash_date("2024-1-5"), None);
        assert_eq!(parse_dash_date("20240105"), None);
        assert_eq!(parse_dash_date(""), None);
        assert_eq!(parse_dash_date("2024-02-30"), None);
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(12.344), 12.34);
        assert_eq!(round2(12.346), 12.35);
        assert_eq!(round2(7.0), 7.0);
    }

    #[test]
    fn exact_halves_round_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        // 2.675 * 100 在 f64 下正好是 267.5
        assert_eq!(round2(2.675), 2.68);
    }
}
