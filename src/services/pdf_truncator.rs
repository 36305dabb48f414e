//! PDF 截取 - 只保留前 N 页

use crate::error::DocumentError;
use lopdf::Document;
use tracing::debug;

/// 截取后的 PDF
#[derive(Debug, Clone)]
pub struct TruncatedPdf {
    /// 原文档页数
    pub total_pages: usize,
    /// 保留的页数，等于 `min(total_pages, page_limit)`
    pub kept_pages: usize,
    pub bytes: Vec<u8>,
}

/// 最后一个保留页的下标（从 0 开始，包含）
///
/// 原文档页数少于上限时不会越界。任一参数为 0 时没有可保留的页，返回 `None`。
pub fn end_page_index(total_pages: usize, page_limit: usize) -> Option<usize> {
    total_pages.min(page_limit).checked_sub(1)
}

/// 从 PDF 字节中截取前 `page_limit` 页
pub fn truncate_pdf(bytes: &[u8], page_limit: usize) -> Result<TruncatedPdf, DocumentError> {
    if page_limit == 0 {
        return Err(DocumentError::InvalidPageLimit(page_limit));
    }

    let mut doc = Document::load_mem(bytes).map_err(DocumentError::Unreadable)?;

    // get_pages 的页码从 1 开始
    let pages = doc.get_pages();
    let total_pages = pages.len();
    let kept_pages = match end_page_index(total_pages, page_limit) {
        Some(end) => end + 1,
        None => return Err(DocumentError::NoPages),
    };
    let to_delete: Vec<u32> = pages
        .keys()
        .copied()
        .filter(|page_number| *page_number as usize > kept_pages)
        .collect();

    if !to_delete.is_empty() {
        doc.delete_pages(&to_delete);
        doc.prune_objects();
    }

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| DocumentError::SaveFailed(e.to_string()))?;

    debug!("PDF 截取完成: {} 页 -> {} 页", total_pages, kept_pages);

    Ok(TruncatedPdf {
        total_pages,
        kept_pages,
        bytes: output,
    })
}
