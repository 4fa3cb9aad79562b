use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::util;

/// 数据源返回的一根日线
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBar {
    pub symbol: String,
    pub trade_date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    /// 成交额，数据源未提供时为 None
    pub amount: Option<f64>,
}

impl DailyBar {
    /// 成交额缺失时按 close × volume 推算
    pub fn amount_or_derived(&self) -> f64 {
        self.amount
            .unwrap_or_else(|| util::round2(self.close * self.volume as f64))
    }
}

/// Snapshot written to the output file. Holds exactly one bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub symbol: String,
    /// YYYY-MM-DD
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    pub amount: f64,
}

impl Snapshot {
    pub fn from_bar(bar: &DailyBar) -> Self {
        Self {
            symbol: bar.symbol.clone(),
            date: util::format_dash_date(&bar.trade_date),
            open: util::round2(bar.open),
            high: util::round2(bar.high),
            low: util::round2(bar.low),
            close: util::round2(bar.close),
            volume: bar.volume,
            amount: util::round2(bar.amount_or_derived()),
        }
    }
}
