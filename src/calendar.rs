use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Utc, Weekday};

const BEIJING_OFFSET_SECS: i32 = 8 * 3600;

// 港股收盘后数据源一般在 17:30（北京时间）前完成当日日线入库
const PUBLISH_CUTOFF_HOUR: u32 = 17;
const PUBLISH_CUTOFF_MINUTE: u32 = 30;

fn beijing_offset() -> FixedOffset {
    FixedOffset::east_opt(BEIJING_OFFSET_SECS).expect("UTC+8 offset in range")
}

/// 北京时间（UTC+8），不依赖系统时区
pub fn beijing_now() -> DateTime<FixedOffset> {
    to_beijing(Utc::now())
}

pub fn to_beijing(now_utc: DateTime<Utc>) -> DateTime<FixedOffset> {
    now_utc.with_timezone(&beijing_offset())
}

pub fn publish_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(PUBLISH_CUTOFF_HOUR, PUBLISH_CUTOFF_MINUTE, 0).expect("valid cutoff time")
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 回退到上一个工作日（只处理周末，不处理港股节假日）
pub fn prev_weekday(mut date: NaiveDate) -> NaiveDate {
    while is_weekend(date) {
        date = date - Duration::days(1);
    }
    date
}

/// 估算“应该能拿到的最新交易日”：
/// - 周末：回退到周五
/// - 工作日 17:30 之后：今天
/// - 工作日 17:30 之前：上一个工作日
pub fn expected_trade_date(now_bj: &DateTime<FixedOffset>) -> NaiveDate {
    let today = now_bj.date_naive();
    if is_weekend(today) {
        return prev_weekday(today);
    }

    if now_bj.time() >= publish_cutoff() {
        today
    } else {
        prev_weekday(today - Duration::days(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bj(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<FixedOffset> {
        beijing_offset().with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_after_cutoff_expects_today() {
        // 2024-01-03 是周三
        assert_eq!(expected_trade_date(&bj(2024, 1, 3, 17, 30, 0)), date(2024, 1, 3));
        assert_eq!(expected_trade_date(&bj(2024, 1, 3, 23, 59, 59)), date(2024, 1, 3));
    }

    #[test]
    fn weekday_before_cutoff_expects_previous_weekday() {
        assert_eq!(expected_trade_date(&bj(2024, 1, 3, 17, 29, 59)), date(2024, 1, 2));
        assert_eq!(expected_trade_date(&bj(2024, 1, 3, 0, 0, 0)), date(2024, 1, 2));
    }

    #[test]
    fn monday_morning_expects_friday() {
        // 2024-01-08 周一 10:00
        assert_eq!(expected_trade_date(&bj(2024, 1, 8, 10, 0, 0)), date(2024, 1, 5));
    }

    #[test]
    fn weekend_expects_friday() {
        for day in [6, 7] {
            for hour in [0, 12, 18] {
                assert_eq!(expected_trade_date(&bj(2024, 1, day, hour, 0, 0)), date(2024, 1, 5));
            }
        }
    }

    #[test]
    fn every_weekday_in_a_week() {
        // 2024-01-08 (Mon) .. 2024-01-12 (Fri)
        let expected_before = [5, 8, 9, 10, 11];
        for (i, day) in (8..=12).enumerate() {
            assert_eq!(expected_trade_date(&bj(2024, 1, day, 18, 0, 0)), date(2024, 1, day));
            assert_eq!(
                expected_trade_date(&bj(2024, 1, day, 9, 0, 0)),
                date(2024, 1, expected_before[i])
            );
        }
    }

    #[test]
    fn utc_is_shifted_to_beijing() {
        // 2024-01-05 22:00 UTC 已是北京时间周六 06:00
        let now = to_beijing(Utc.with_ymd_and_hms(2024, 1, 5, 22, 0, 0).unwrap());
        assert_eq!(now.date_naive(), date(2024, 1, 6));
        assert_eq!(expected_trade_date(&now), date(2024, 1, 5));

        // 09:30 UTC = 17:30 北京时间
        let now = to_beijing(Utc.with_ymd_and_hms(2024, 1, 3, 9, 30, 0).unwrap());
        assert_eq!(expected_trade_date(&now), date(2024, 1, 3));
    }

    #[test]
    fn prev_weekday_leaves_weekdays_alone() {
        assert_eq!(prev_weekday(date(2024, 1, 3)), date(2024, 1, 3));
        assert_eq!(prev_weekday(date(2024, 1, 7)), date(2024, 1, 5));
        assert!(is_weekend(date(2024, 1, 6)));
        assert!(!is_weekend(date(2024, 1, 5)));
    }
}
