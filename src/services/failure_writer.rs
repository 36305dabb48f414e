//! 失败记录写入服务 - 业务能力层
//!
//! 只负责"写 failed.txt"能力，不关心流程

use crate::models::Record;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 失败记录写入服务
///
/// 每次运行开头写入带时间的表头，之后逐条追加失败的记录，
/// 方便用户挑出这些行重新处理
pub struct FailureWriter {
    path: PathBuf,
}

impl FailureWriter {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 清空文件并写入本次运行的表头
    pub fn start_run(&self, input: &str) -> Result<()> {
        let header = format!(
            "{}\n失败记录 - {} - {}\n{}\n\n",
            "=".repeat(60),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            input,
            "=".repeat(60)
        );
        fs::write(&self.path, header)
            .with_context(|| format!("无法写入失败记录文件: {}", self.path.display()))?;
        Ok(())
    }

    /// 追加一条失败记录
    ///
    /// # 参数
    /// - `record`: 失败的记录
    /// - `stage`: 失败所在阶段
    /// - `reason`: 失败原因
    pub fn write(&self, record: &Record, stage: &str, reason: &str) -> Result<()> {
        debug!("写入失败记录: {} | {}", record, stage);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("无法打开失败记录文件: {}", self.path.display()))?;

        let line = format!(
            "{} | {} | {} | {}\n",
            record.sequence_id, record.application_number, stage, reason
        );
        file.write_all(line.as_bytes())?;

        Ok(())
    }
}
