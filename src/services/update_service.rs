use crate::calendar;
use crate::config::Config;
use crate::errors::{Result, SnapshotError};
use crate::models::bar::{DailyBar, Snapshot};
use crate::sources::base::DailyBarSource;
use crate::store::SnapshotStore;
use crate::util;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use log::{info, warn};
use std::sync::Arc;

/// 单次运行的结果
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// 数据源没有返回任何日线
    NoData,
    /// 数据源尚未更新到预期交易日
    ProviderBehind { latest: NaiveDate, expected: NaiveDate },
    /// 输出文件已经是最新交易日
    Unchanged { trade_date: NaiveDate },
    Updated(Snapshot),
}

/// 更新服务：估算预期交易日、拉取最新日线、决定是否写文件
pub struct UpdateService {
    config: Config,
    source: Arc<dyn DailyBarSource + Send + Sync>,
    store: SnapshotStore,
}

impl UpdateService {
    pub fn new(config: Config, source: Arc<dyn DailyBarSource + Send + Sync>) -> Self {
        let store = SnapshotStore::new(&config.output_file);
        Self {
            config,
            source,
            store,
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// 抓取最近 N 天，返回最新一根
    pub async fn fetch_latest(&self, today: NaiveDate) -> Result<Option<DailyBar>> {
        let start = window_start(today, self.config.days_back)?;
        let ts_code = &self.config.ts_code;

        info!("ts_code={}", ts_code);
        info!(
            "request_range={}~{}",
            util::format_compact_date(&start),
            util::format_compact_date(&today)
        );

        let mut bars = self.source.fetch_daily_bars(ts_code, &start, &today).await?;
        if bars.is_empty() {
            warn!("{} returned no rows.", self.source.source_name());
            return Ok(None);
        }

        bars.sort_by(|a, b| a.trade_date.cmp(&b.trade_date));

        let first = &bars[0];
        let latest = &bars[bars.len() - 1];
        info!(
            "returned_rows={} returned_range={}~{}",
            bars.len(),
            util::format_compact_date(&first.trade_date),
            util::format_compact_date(&latest.trade_date)
        );

        Ok(bars.pop())
    }

    pub async fn run(&self, now_bj: &DateTime<FixedOffset>) -> Result<UpdateOutcome> {
        let force = self.config.force_update;
        let expected = calendar::expected_trade_date(now_bj);
        info!(
            "now_bj={} expected_trade_date={}",
            now_bj.format("%Y-%m-%d %H:%M:%S"),
            util::format_compact_date(&expected)
        );
        if force {
            info!("Force update enabled");
        }

        let latest = match self.fetch_latest(now_bj.date_naive()).await? {
            Some(bar) => bar,
            None => {
                info!("No data from {}. Exit without updating.", self.source.source_name());
                return Ok(UpdateOutcome::NoData);
            }
        };

        let latest_td = latest.trade_date;
        info!("latest_trade_date={}", util::format_compact_date(&latest_td));

        if latest_td < expected && !force {
            info!("{} NOT updated to expected trade_date yet.", self.source.source_name());
            info!(
                "latest_td={} < expected_td={} -> skip writing JSON.",
                util::format_compact_date(&latest_td),
                util::format_compact_date(&expected)
            );
            return Ok(UpdateOutcome::ProviderBehind { latest: latest_td, expected });
        }

        if latest_td > expected {
            warn!("latest_td later than expected_td, proceed anyway.");
        }

        let snapshot = Snapshot::from_bar(&latest);

        if self.store.load_existing_date() == Some(latest_td) && !force {
            info!("{}", unchanged_message(&latest_td));
            return Ok(UpdateOutcome::Unchanged { trade_date: latest_td });
        }

        self.store.write(&snapshot)?;
        info!("Updated {}: {:?}", self.store.path().display(), snapshot);

        Ok(UpdateOutcome::Updated(snapshot))
    }
}

/// 回看窗口起点，days_back 必须为正且不能越过 chrono 的日期范围
fn window_start(today: NaiveDate, days_back: i64) -> Result<NaiveDate> {
    if days_back < 1 {
        return Err(SnapshotError::ConfigError(format!(
            "days_back must be positive, got {}",
            days_back
        )));
    }

    Duration::try_days(days_back)
        .and_then(|d| today.checked_sub_signed(d))
        .ok_or_else(|| SnapshotError::ConfigError(format!("days_back {} is out of range", days_back)))
}

fn unchanged_message(trade_date: &NaiveDate) -> String {
    format!(
        "Output already at trade_date={}. No changes.",
        util::format_compact_date(trade_date)
    )
}
