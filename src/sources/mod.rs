pub mod base;
pub mod tushare;
