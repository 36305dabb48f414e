use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 表格读取错误（整批致命）
    #[error("表格错误: {0}")]
    Format(#[from] FormatError),
    /// 网络请求错误
    #[error("网络错误: {0}")]
    Network(#[from] NetworkError),
    /// 响应解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// PDF 文档错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
    /// 压缩包写入错误
    #[error("压缩包错误: {0}")]
    Archive(#[from] ArchiveError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 表格格式错误
#[derive(Debug, Error)]
pub enum FormatError {
    /// 无法打开或识别的表格文件
    #[error("无法读取表格文件 ({path}): {source}")]
    Unreadable {
        path: String,
        #[source]
        source: calamine::Error,
    },
    /// 读取文件字节失败
    #[error("读取文件失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 工作簿中没有工作表
    #[error("工作簿中没有工作表: {path}")]
    NoSheet { path: String },
    /// 第一个工作表为空
    #[error("工作表为空: {path}")]
    EmptySheet { path: String },
    /// 表头列数不足（至少需要 序号、申请号 两列）
    #[error("表头只有 {found} 列，至少需要 2 列 (序号, 申请号)")]
    MissingColumns { found: usize },
}

/// 网络请求错误
#[derive(Debug, Error)]
pub enum NetworkError {
    /// 请求未能完成（连接失败、超时等）
    #[error("请求失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务器返回非 200 状态码
    #[error("服务器返回状态码 {status} ({url})")]
    BadStatus { url: String, status: u16 },
}

/// 注册机构响应解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML 格式错误
    #[error("XML 解析失败: {0}")]
    MalformedXml(#[from] roxmltree::Error),
    /// 响应中没有 path 元素
    #[error("响应中没有找到 path 元素 (申请号: {application_number})")]
    MissingPath { application_number: String },
}

/// PDF 文档错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// 无法作为 PDF 打开
    #[error("无法打开 PDF: {0}")]
    Unreadable(#[source] lopdf::Error),
    /// PDF 没有任何页面
    #[error("PDF 没有页面")]
    NoPages,
    /// 页数上限为 0
    #[error("页数上限必须大于 0，当前值: {0}")]
    InvalidPageLimit(usize),
    /// 序列化截取后的 PDF 失败
    #[error("保存 PDF 失败: {0}")]
    SaveFailed(String),
}

/// 压缩包错误
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// 压缩包中已有同名条目
    #[error("压缩包中已存在同名文件: {file_name}")]
    DuplicateEntry { file_name: String },
    /// 写入条目失败
    #[error("写入压缩条目失败 ({file_name}): {source}")]
    WriteFailed {
        file_name: String,
        #[source]
        source: zip::result::ZipError,
    },
    /// 写入条目内容失败
    #[error("写入压缩内容失败 ({file_name}): {source}")]
    Io {
        file_name: String,
        #[source]
        source: std::io::Error,
    },
    /// 完成压缩包失败
    #[error("完成压缩包失败: {0}")]
    FinishFailed(#[source] zip::result::ZipError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 未提供 API 服务密钥
    #[error("未提供 KIPRIS API 服务密钥")]
    MissingServiceKey,
    /// 未指定输入表格
    #[error("未指定输入表格文件")]
    MissingInput,
    /// 页数上限非法
    #[error("页数上限必须大于 0，当前值: {0}")]
    InvalidPageLimit(u32),
    /// 配置文件读取失败
    #[error("无法读取配置文件 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建请求失败错误
    pub fn request_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Network(NetworkError::RequestFailed {
            url: url.into(),
            source: Box::new(source),
        })
    }

    /// 创建状态码错误
    pub fn bad_status(url: impl Into<String>, status: u16) -> Self {
        AppError::Network(NetworkError::BadStatus {
            url: url.into(),
            status,
        })
    }

    /// 是否为整批致命错误
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Format(_) | AppError::Config(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
