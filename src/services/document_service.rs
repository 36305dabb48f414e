//! PDF 下载服务 - 业务能力层
//!
//! 只负责"下载一份 PDF 并截取前几页"，不关心表格和压缩包

use crate::clients::HttpTransport;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::pdf_truncator::{truncate_pdf, TruncatedPdf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// PDF 下载与截取服务
pub struct DocumentService {
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
    page_limit: usize,
}

impl DocumentService {
    /// 创建新的下载服务
    pub fn new(config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            timeout: config.document_timeout(),
            page_limit: config.page_limit as usize,
        }
    }

    /// 下载 PDF 并保留前 `page_limit` 页
    ///
    /// 非 200 响应、网络错误和无法解析的 PDF 都以错误返回，由调用方决定如何处理
    pub async fn fetch_and_truncate(&self, url: &str) -> AppResult<TruncatedPdf> {
        let response = self.transport.get(url, &[], Some(self.timeout)).await?;

        if !response.is_ok() {
            return Err(AppError::bad_status(url, response.status));
        }

        debug!("已下载 PDF: {} ({} 字节)", url, response.body.len());

        let truncated = truncate_pdf(&response.body, self.page_limit)?;
        Ok(truncated)
    }
}
