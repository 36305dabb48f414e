use std::fmt::Display;

/// 表格中的一行：序号 + 申请号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 序号（第 1 列）
    pub sequence_id: String,

    /// 去掉连字符后的申请号（第 2 列）
    pub application_number: String,
}

impl Record {
    /// 创建记录，申请号中的 `-` 会被移除
    pub fn new(sequence_id: impl Into<String>, application_number: &str) -> Self {
        Self {
            sequence_id: sequence_id.into().trim().to_string(),
            application_number: normalize_application_number(application_number),
        }
    }

    /// 压缩包中的文件名: `{序号}_{申请号}.pdf`
    pub fn file_name(&self) -> String {
        format!("{}_{}.pdf", self.sequence_id, self.application_number)
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[#{} 申请号 {}]", self.sequence_id, self.application_number)
    }
}

/// 移除申请号中的连字符和首尾空白
pub fn normalize_application_number(raw: &str) -> String {
    raw.trim().chars().filter(|c| *c != '-').collect()
}
