use crate::models::bar::DailyBar;
use crate::errors::{Result, SnapshotError};
use crate::sources::base::DailyBarSource;
use crate::util;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

const HK_DAILY_API: &str = "hk_daily";

#[derive(Serialize)]
struct ApiRequest<'a> {
    api_name: &'a str,
    token: &'a str,
    params: HashMap<&'a str, String>,
    fields: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<ApiData>,
}

#[derive(Debug, Deserialize)]
struct ApiData {
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    items: Vec<Vec<Value>>,
}

/// Tushare Pro 港股日线接口
pub struct TushareClient {
    client: Client,
    api_url: String,
    token: String,
}

impl TushareClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(SnapshotError::RequestError)?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl DailyBarSource for TushareClient {
    fn source_name(&self) -> &'static str {
        "Tushare"
    }

    async fn fetch_daily_bars(&self, ts_code: &str, start: &NaiveDate, end: &NaiveDate) -> Result<Vec<DailyBar>> {
        let request = build_request(&self.token, ts_code, start, end);

        let response = self.client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        debug!("{} 返回 {} 字节", HK_DAILY_API, text.len());

        parse_response(&text, ts_code)
    }
}

fn build_request<'a>(token: &'a str, ts_code: &str, start: &NaiveDate, end: &NaiveDate) -> ApiRequest<'a> {
    let mut params = HashMap::new();
    params.insert("ts_code", ts_code.to_string());
    params.insert("start_date", util::format_compact_date(start));
    params.insert("end_date", util::format_compact_date(end));

    ApiRequest {
        api_name: HK_DAILY_API,
        token,
        params,
        fields: "",
    }
}

/// 解析接口返回，code 非 0 视为错误
fn parse_response(text: &str, ts_code: &str) -> Result<Vec<DailyBar>> {
    let response: ApiResponse = serde_json::from_str(text)?;

    if response.code != 0 {
        return Err(SnapshotError::ProviderError {
            code: response.code,
            msg: response.msg.unwrap_or_default(),
        });
    }

    let data = match response.data {
        Some(data) => data,
        None => return Ok(Vec::new()),
    };

    let index: HashMap<&str, usize> = data.fields
        .iter()
        .enumerate()
        .map(|(i, f)| (f.as_str(), i))
        .collect();

    data.items
        .iter()
        .map(|row| parse_row(&index, row, ts_code))
        .collect()
}

fn parse_row(index: &HashMap<&str, usize>, row: &[Value], ts_code: &str) -> Result<DailyBar> {
    let cell = |name: &str| index.get(name).and_then(|&i| row.get(i)).filter(|v| !v.is_null());

    let required = |name: &str| {
        cell(name)
            .and_then(value_as_f64)
            .ok_or_else(|| SnapshotError::DataError(format!("Missing or invalid '{}' in row {:?}", name, row)))
    };

    let trade_date = match cell("trade_date") {
        Some(Value::String(s)) => util::parse_compact_date(s)?,
        Some(Value::Number(n)) => util::parse_compact_date(&n.to_string())?,
        _ => return Err(SnapshotError::DataError(format!("Missing 'trade_date' in row {:?}", row))),
    };

    let symbol = cell("ts_code")
        .and_then(|v| v.as_str())
        .unwrap_or(ts_code)
        .to_string();

    // vol 缺失按 0 处理，小数部分截断
    let volume = cell("vol").and_then(value_as_f64).unwrap_or(0.0) as i64;

    Ok(DailyBar {
        symbol,
        trade_date,
        open: required("open")?,
        high: required("high")?,
        low: required("low")?,
        close: required("close")?,
        volume,
        amount: cell("amount").and_then(value_as_f64),
    })
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
