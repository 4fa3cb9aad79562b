use chrono::NaiveDate;
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::models::bar::Snapshot;
use crate::util;

/// 输出文件，只保存一根日线
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取现有文件的 date 字段。文件不存在、损坏或字段缺失都返回 None
    pub fn load_existing_date(&self) -> Option<NaiveDate> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                debug!("No existing snapshot at {}: {}", self.path.display(), e);
                return None;
            }
        };

        let obj: Value = match serde_json::from_str(&text) {
            Ok(obj) => obj,
            Err(e) => {
                debug!("Existing snapshot is not valid JSON: {}", e);
                return None;
            }
        };

        obj.get("date")
            .and_then(|d| d.as_str())
            .and_then(util::parse_dash_date)
    }

    /// 整体覆盖写入，两空格缩进
    pub fn write(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
