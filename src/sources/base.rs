use crate::models::bar::DailyBar;
use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Base trait for daily bar providers
#[async_trait]
pub trait DailyBarSource {
    /// Name used in log lines
    fn source_name(&self) -> &'static str;

    /// Fetch daily bars for `ts_code` with trade dates in `[start, end]`.
    /// Row order is whatever the provider returns.
    async fn fetch_daily_bars(&self, ts_code: &str, start: &NaiveDate, end: &NaiveDate) -> Result<Vec<DailyBar>>;
}
