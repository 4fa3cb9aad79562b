// 公开导出的模块，供外部使用
pub mod models;
pub mod errors;
pub mod calendar;
pub mod store;

pub mod sources;
pub mod config;
pub mod services;
pub mod util;

// 重新导出常用类型，方便使用
pub use models::bar::{DailyBar, Snapshot};
pub use services::update_service::{UpdateOutcome, UpdateService};
pub use errors::{Result, SnapshotError};
