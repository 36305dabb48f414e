//! 记录处理上下文
//!
//! 封装"我正在处理第几条记录"这一信息

use std::fmt::Display;

/// 记录处理上下文
#[derive(Debug, Clone, Copy)]
pub struct RecordCtx {
    /// 记录序号（从1开始，仅用于日志显示）
    pub index: usize,

    /// 本批记录总数
    pub total: usize,
}

impl RecordCtx {
    pub fn new(index: usize, total: usize) -> Self {
        Self { index, total }
    }
}

impl Display for RecordCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}/{}]", self.index, self.total)
    }
}
