//! 批量记录处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量记录的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **启动前检查**：服务密钥、输入文件、页数上限
//! 2. **批量加载**：从表格读取所有记录（`Vec<Record>`）
//! 3. **顺序处理**：逐条委托 `RecordFlow`，单条失败不影响后续记录
//! 4. **进度回报**：每条记录处理完都回报一次进度
//! 5. **结果输出**：有成功记录时写出压缩包，否则只给出警告

use crate::clients::{HttpTransport, ReqwestTransport};
use crate::config::Config;
use crate::error::{AppError, AppResult, ArchiveError, ConfigError};
use crate::models::{self, Record};
use crate::services::{ArchiveBuilder, FailureWriter};
use crate::utils::logging;
use crate::workflow::{RecordCtx, RecordFlow, RecordState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// 单条记录处理完后的进度
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// 已处理的记录数（含失败）
    pub processed: usize,
    pub total: usize,
    pub file_name: String,
    /// Archived 或 Failed
    pub outcome: RecordState,
}

impl ProgressUpdate {
    /// 进度比例 `processed / total`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// 失败的记录
#[derive(Debug)]
pub struct FailedRecord {
    pub record: Record,
    pub stage: RecordState,
    pub error: AppError,
}

/// 一次批处理的结果
#[derive(Debug)]
pub struct BatchResult {
    pub success_count: usize,
    pub total: usize,
    pub failures: Vec<FailedRecord>,
    /// 完整的 zip 字节，与构建器的生命周期无关
    pub archive_bytes: Vec<u8>,
}

/// 批量处理器：按输入顺序逐条处理记录
pub struct BatchProcessor {
    flow: RecordFlow,
    failure_writer: Option<FailureWriter>,
}

impl BatchProcessor {
    pub fn new(config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            flow: RecordFlow::new(config, transport),
            failure_writer: None,
        }
    }

    /// 失败的记录同时写入文件
    pub fn with_failure_writer(mut self, writer: FailureWriter) -> Self {
        self.failure_writer = Some(writer);
        self
    }

    /// 处理所有记录
    ///
    /// 单条记录的错误只记录，不会提前结束；只有压缩包无法完成时返回错误
    pub async fn run<F>(
        &self,
        records: &[Record],
        credential: &str,
        mut on_progress: F,
    ) -> AppResult<BatchResult>
    where
        F: FnMut(&ProgressUpdate),
    {
        let total = records.len();
        let mut archive = ArchiveBuilder::open();
        let mut success_count = 0;
        let mut failures = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let ctx = RecordCtx::new(index + 1, total);

            let outcome = match self.flow.run(record, credential, &ctx, &mut archive).await {
                Ok(_) => {
                    success_count += 1;
                    RecordState::Archived
                }
                Err(failure) => {
                    self.write_failure(record, failure.stage, &failure.error);
                    failures.push(FailedRecord {
                        record: record.clone(),
                        stage: failure.stage,
                        error: failure.error,
                    });
                    RecordState::Failed
                }
            };

            on_progress(&ProgressUpdate {
                processed: index + 1,
                total,
                file_name: record.file_name(),
                outcome,
            });
        }

        let archive_bytes = archive.finalize()?;

        Ok(BatchResult {
            success_count,
            total,
            failures,
            archive_bytes,
        })
    }

    fn write_failure(&self, record: &Record, stage: RecordState, error: &AppError) {
        if let Some(writer) = &self.failure_writer {
            if let Err(e) = writer.write(record, &stage.to_string(), &error.to_string()) {
                warn!("⚠️ 写入失败记录失败: {}", e);
            }
        }
    }
}

/// 一次运行的摘要
#[derive(Debug)]
pub struct RunSummary {
    pub success_count: usize,
    pub total: usize,
    pub failed: usize,
    /// 写出的压缩包路径；没有成功记录时为 `None`
    pub archive_path: Option<PathBuf>,
    /// 本次运行实际写入的失败记录文件；无法创建时为 `None`
    pub failure_log: Option<PathBuf>,
}

/// 应用主结构
pub struct App {
    config: Config,
    transport: Arc<dyn HttpTransport>,
}

impl App {
    /// 初始化应用（使用 reqwest 传输）
    pub fn initialize(config: Config) -> AppResult<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// 使用指定的传输层初始化应用
    pub fn with_transport(config: Config, transport: Arc<dyn HttpTransport>) -> AppResult<Self> {
        config.validate()?;
        logging::log_startup(&config);
        Ok(Self { config, transport })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<RunSummary> {
        let credential = self
            .config
            .credential()
            .ok_or(ConfigError::MissingServiceKey)?;
        let input = self
            .config
            .input_file
            .as_deref()
            .ok_or(ConfigError::MissingInput)?;

        info!("\n📁 正在读取表格: {}", input.display());
        let records = models::load_records(input).await?;
        logging::log_preview(&records);

        if records.is_empty() {
            warn!("⚠️ 表格中没有可处理的记录，程序结束");
            return Ok(RunSummary {
                success_count: 0,
                total: 0,
                failed: 0,
                archive_path: None,
                failure_log: None,
            });
        }

        let failure_writer = FailureWriter::with_path(self.config.failure_log_path());
        let input_name = input.display().to_string();
        let (processor, failure_log) = match failure_writer.start_run(&input_name) {
            Ok(()) => {
                let path = failure_writer.path().to_path_buf();
                let processor = BatchProcessor::new(&self.config, self.transport.clone())
                    .with_failure_writer(failure_writer);
                (processor, Some(path))
            }
            Err(e) => {
                warn!("⚠️ 无法初始化失败记录文件，将只输出到日志: {}", e);
                (BatchProcessor::new(&self.config, self.transport.clone()), None)
            }
        };

        let result = processor
            .run(&records, credential, logging::log_progress)
            .await?;

        let archive_path = if result.success_count > 0 {
            let path = self.config.archive_path();
            tokio::fs::write(&path, &result.archive_bytes)
                .await
                .map_err(|source| ArchiveError::Io {
                    file_name: path.display().to_string(),
                    source,
                })?;
            Some(path)
        } else {
            None
        };

        let summary = RunSummary {
            success_count: result.success_count,
            total: result.total,
            failed: result.failures.len(),
            archive_path,
            failure_log,
        };
        logging::print_final_stats(&summary);

        Ok(summary)
    }
}
