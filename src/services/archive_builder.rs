//! 压缩包构建服务 - 业务能力层
//!
//! 在内存中累积 PDF，最后一次性生成 zip 字节

use crate::error::{AppResult, ArchiveError};
use std::collections::HashSet;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// 内存中的 zip 压缩包
///
/// 同名条目会被拒绝（`ArchiveError::DuplicateEntry`），已写入的条目不受影响
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    names: HashSet<String>,
}

impl ArchiveBuilder {
    /// 创建空压缩包
    pub fn open() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            names: HashSet::new(),
        }
    }

    /// 添加一个 deflate 压缩的条目
    pub fn add(&mut self, file_name: &str, content: &[u8]) -> AppResult<()> {
        if self.names.contains(file_name) {
            return Err(ArchiveError::DuplicateEntry {
                file_name: file_name.to_string(),
            }
            .into());
        }

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        self.writer
            .start_file(file_name, options)
            .map_err(|source| ArchiveError::WriteFailed {
                file_name: file_name.to_string(),
                source,
            })?;
        self.writer
            .write_all(content)
            .map_err(|source| ArchiveError::Io {
                file_name: file_name.to_string(),
                source,
            })?;

        self.names.insert(file_name.to_string());
        debug!("已加入压缩包: {} ({} 字节)", file_name, content.len());
        Ok(())
    }

    /// 已写入的条目数
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 完成压缩包并返回全部字节
    pub fn finalize(self) -> AppResult<Vec<u8>> {
        let cursor = self.writer.finish().map_err(ArchiveError::FinishFailed)?;
        Ok(cursor.into_inner())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::open()
    }
}
