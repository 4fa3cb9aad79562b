use hk_daily_snapshot::calendar;
use hk_daily_snapshot::config::{self, Config};
use hk_daily_snapshot::services::update_service::{UpdateOutcome, UpdateService};
use hk_daily_snapshot::sources::tushare::TushareClient;

use anyhow::Context;
use clap::{App, Arg};
use log::info;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 决策日志全部输出到 stdout
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let days_back_default = config::DEFAULT_DAYS_BACK.to_string();

    let matches = App::new("hk_daily_snapshot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Write the latest HK daily bar to a JSON snapshot once the provider has caught up")
        .arg(
            Arg::with_name("symbol")
                .short('s')
                .long("symbol")
                .value_name("TS_CODE")
                .help("Security to fetch")
                .takes_value(true)
                .default_value(config::DEFAULT_TS_CODE),
        )
        .arg(
            Arg::with_name("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Snapshot file to read and overwrite")
                .takes_value(true)
                .default_value(config::DEFAULT_OUTPUT_FILE),
        )
        .arg(
            Arg::with_name("days-back")
                .long("days-back")
                .value_name("DAYS")
                .help("Calendar days of history to request")
                .takes_value(true)
                .default_value(&days_back_default),
        )
        .arg(
            Arg::with_name("force")
                .short('f')
                .long("force")
                .help("Write even if the provider is behind or the date is unchanged (same as FORCE_UPDATE=1)")
                .takes_value(false),
        )
        .get_matches();

    // Token 缺失时直接退出
    let mut cfg = Config::from_env()?;

    if let Some(symbol) = matches.value_of("symbol") {
        cfg = cfg.with_ts_code(symbol);
    }
    if let Some(output) = matches.value_of("output") {
        cfg = cfg.with_output_file(output);
    }
    if let Some(days) = matches.value_of("days-back") {
        cfg = cfg.with_days_back(config::parse_days_back(days)?);
    }
    if matches.is_present("force") {
        cfg = cfg.with_force_update(true);
    }

    let source = TushareClient::new(&cfg.api_url, &cfg.token)?;
    let service = UpdateService::new(cfg, Arc::new(source));

    let outcome = service
        .run(&calendar::beijing_now())
        .await
        .context("snapshot update failed")?;

    match outcome {
        UpdateOutcome::Updated(_) => info!("Done."),
        other => info!("Finished without writing: {:?}", other),
    }

    Ok(())
}
