/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::config::Config;
use crate::models::Record;
use crate::orchestrator::{ProgressUpdate, RunSummary};
use crate::workflow::RecordState;
use tracing::{info, warn};

/// 预览时显示的记录数
const PREVIEW_ROWS: usize = 5;

/// 记录程序启动信息（不输出服务密钥）
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 专利公告全文 PDF 批量下载");
    info!("🌐 查询接口: {}", config.registry_url);
    info!("📄 每份保留页数: {}", config.page_limit);
    info!("⏱️ PDF 下载超时: {} 秒", config.document_timeout_secs);
    info!("{}", "=".repeat(60));
}

/// 显示数据预览
pub fn log_preview(records: &[Record]) {
    info!("📋 数据预览 (共 {} 条)", records.len());
    for record in records.iter().take(PREVIEW_ROWS) {
        info!("   {} → {}", record, record.file_name());
    }
    if records.len() > PREVIEW_ROWS {
        info!("   ...");
    }
}

/// 每条记录处理完后更新进度
pub fn log_progress(update: &ProgressUpdate) {
    let mark = match update.outcome {
        RecordState::Archived => "✓",
        _ => "✗",
    };
    info!(
        "进度 {}/{} ({:.0}%) {} {}",
        update.processed,
        update.total,
        update.fraction() * 100.0,
        mark,
        update.file_name
    );
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &RunSummary) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", summary.success_count, summary.total);
    info!("❌ 失败: {}", summary.failed);
    info!("{}", "=".repeat(60));

    match &summary.archive_path {
        Some(path) => info!("📦 共压缩 {} 个文件: {}", summary.success_count, path.display()),
        None => warn!("⚠️ 没有下载到任何文件，请检查 API 密钥或表格数据"),
    }
    match (&summary.failure_log, summary.failed) {
        (_, 0) => {}
        (Some(path), _) => info!("📝 失败记录已保存至: {}", path.display()),
        (None, failed) => warn!("⚠️ 失败记录文件不可用，{} 条失败仅输出在日志中", failed),
    }
}
