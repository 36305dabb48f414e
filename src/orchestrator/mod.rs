//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Record>)
//!     ↓
//! workflow::RecordFlow (处理单条 Record)
//!     ↓
//! services / clients (能力层：查询 / 下载截取 / 压缩)
//! ```
//!
//! 编排层只做调度和统计，不做具体业务判断

pub mod batch_processor;

pub use batch_processor::{
    App, BatchProcessor, BatchResult, FailedRecord, ProgressUpdate, RunSummary,
};
