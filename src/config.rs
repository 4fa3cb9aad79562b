use crate::errors::{Result, SnapshotError};

pub const TOKEN_ENV: &str = "HK_MARKET_API_TOKEN";
pub const FORCE_UPDATE_ENV: &str = "FORCE_UPDATE";
pub const API_URL_ENV: &str = "TUSHARE_API_URL";

pub const DEFAULT_TS_CODE: &str = "02618.HK";
pub const DEFAULT_OUTPUT_FILE: &str = "jd-logistics-latest.json";
pub const DEFAULT_API_URL: &str = "http://api.tushare.pro";
pub const DEFAULT_DAYS_BACK: i64 = 30;

pub struct Config {
    pub token: String,
    pub ts_code: String,
    pub output_file: String,
    pub api_url: String,
    pub days_back: i64,
    pub force_update: bool,
}

impl Config {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            ts_code: DEFAULT_TS_CODE.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            days_back: DEFAULT_DAYS_BACK,
            force_update: false,
        }
    }

    /// 从环境变量读取配置，缺少 Token 时直接报错
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SnapshotError::ConfigError(format!("Missing {} in environment", TOKEN_ENV)))?;

        let mut config = Self::new(token.trim())
            .with_force_update(lookup(FORCE_UPDATE_ENV).map(|v| parse_flag(&v)).unwrap_or(false));

        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config = config.with_api_url(url.trim());
        }

        Ok(config)
    }

    pub fn with_ts_code(mut self, ts_code: &str) -> Self {
        self.ts_code = ts_code.to_string();
        self
    }

    pub fn with_output_file(mut self, path: &str) -> Self {
        self.output_file = path.to_string();
        self
    }

    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    pub fn with_days_back(mut self, days: i64) -> Self {
        self.days_back = days;
        self
    }

    pub fn with_force_update(mut self, force: bool) -> Self {
        self.force_update = force;
        self
    }
}

/// --days-back 只接受正整数
pub fn parse_days_back(value: &str) -> Result<i64> {
    match value.trim().parse::<u32>() {
        Ok(days) if days >= 1 => Ok(i64::from(days)),
        _ => Err(SnapshotError::ConfigError(format!(
            "invalid days-back value: {} (expected a positive integer)",
            value
        ))),
    }
}

/// "1" / "true" / "yes"（忽略大小写和首尾空白）视为开启
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}
