//! 单条记录处理流程 - 流程层
//!
//! 核心职责：定义"一条记录"的完整处理流程
//!
//! 流程顺序：
//! 1. 查询 PDF 地址（Resolving）
//! 2. 下载并截取 PDF（Fetching）
//! 3. 写入压缩包（Archived）
//!
//! 任何一步失败都直接进入 Failed，不重试

use std::fmt::Display;
use std::sync::Arc;

use tracing::{error, info};

use crate::clients::{HttpTransport, RegistryClient};
use crate::config::Config;
use crate::error::{AppError, ParseError};
use crate::models::Record;
use crate::services::{ArchiveBuilder, DocumentService};
use crate::workflow::record_ctx::RecordCtx;

/// 记录处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Pending,
    Resolving,
    Fetching,
    Archived,
    Failed,
}

impl Display for RecordState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecordState::Pending => "Pending",
            RecordState::Resolving => "Resolving",
            RecordState::Fetching => "Fetching",
            RecordState::Archived => "Archived",
            RecordState::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// 单条记录的失败信息
#[derive(Debug)]
pub struct RecordFailure {
    /// 失败时所处的阶段（Resolving 或 Fetching）
    pub stage: RecordState,
    pub error: AppError,
}

/// 记录处理流程
///
/// - 编排查询 → 下载截取 → 归档
/// - 不持有压缩包，由编排层传入
/// - 失败只向上返回，不中断批处理
pub struct RecordFlow {
    registry: RegistryClient,
    documents: DocumentService,
}

impl RecordFlow {
    /// 创建新的记录处理流程
    pub fn new(config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            registry: RegistryClient::new(config, transport.clone()),
            documents: DocumentService::new(config, transport),
        }
    }

    /// 处理一条记录，成功时返回写入压缩包的文件名
    pub async fn run(
        &self,
        record: &Record,
        credential: &str,
        ctx: &RecordCtx,
        archive: &mut ArchiveBuilder,
    ) -> Result<String, RecordFailure> {
        let file_name = record.file_name();
        info!("{} 处理中: {}", ctx, file_name);

        let mut state = RecordState::Pending;
        let result = self
            .process(record, credential, &file_name, archive, &mut state)
            .await;

        match result {
            Ok(()) => {
                info!("{} ✓ 已归档: {}", ctx, file_name);
                Ok(file_name)
            }
            Err(error) => {
                error!(
                    "{} ❌ 处理失败 ({}) [{}]: {}",
                    ctx, record.application_number, state, error
                );
                Err(RecordFailure { stage: state, error })
            }
        }
    }

    async fn process(
        &self,
        record: &Record,
        credential: &str,
        file_name: &str,
        archive: &mut ArchiveBuilder,
        state: &mut RecordState,
    ) -> Result<(), AppError> {
        *state = RecordState::Resolving;
        let location = self
            .registry
            .resolve(&record.application_number, credential)
            .await?
            .ok_or_else(|| ParseError::MissingPath {
                application_number: record.application_number.clone(),
            })?;

        *state = RecordState::Fetching;
        let pdf = self.documents.fetch_and_truncate(&location).await?;
        archive.add(file_name, &pdf.bytes)?;

        *state = RecordState::Archived;
        Ok(())
    }
}
