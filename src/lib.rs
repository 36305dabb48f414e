//! # Patent PDF Downloader
//!
//! 根据表格中的专利申请号，从 KIPRIS 下载公告全文 PDF，
//! 截取前几页后打包成一个 zip 压缩包
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - HTTP 传输和 KIPRIS 查询客户端
//! - `HttpTransport` - 唯一的网络出口，测试中可替换
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单份文档
//! - `DocumentService` - 下载并截取 PDF
//! - `ArchiveBuilder` - 内存中构建 zip
//! - `FailureWriter` - 写 failed.txt
//!
//! ### ③ 流程层（Workflow）
//! - `RecordFlow` - 单条记录的流程编排（查询 → 下载截取 → 归档）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 按顺序处理整张表格，回报进度，写出压缩包

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{HttpResponse, HttpTransport, RegistryClient, ReqwestTransport};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::Record;
pub use orchestrator::{App, BatchProcessor, BatchResult, ProgressUpdate, RunSummary};
pub use workflow::{RecordFlow, RecordState};
