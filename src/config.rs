use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// KIPRIS 公告全文查询接口
pub const DEFAULT_REGISTRY_URL: &str =
    "http://plus.kipris.or.kr/kipo-api/kipi/patUtiModInfoSearchSevice/getAnnFullTextInfoSearch";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 公告全文查询接口地址
    pub registry_url: String,
    /// KIPRIS API 服务密钥
    pub service_key: Option<String>,
    /// 每份 PDF 保留的页数
    pub page_limit: u32,
    /// PDF 下载超时（秒）
    pub document_timeout_secs: u64,
    /// 查询接口超时（秒），不设置则不限制
    pub registry_timeout_secs: Option<u64>,
    /// 输入表格文件
    pub input_file: Option<PathBuf>,
    /// 压缩包输出目录
    pub output_dir: PathBuf,
    /// 压缩包文件名
    pub archive_name: String,
    /// 失败记录文件，不设置时写到输出目录下的 `failed.txt`
    pub failure_log_file: Option<PathBuf>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            service_key: None,
            page_limit: 2,
            document_timeout_secs: 30,
            registry_timeout_secs: None,
            input_file: None,
            output_dir: PathBuf::from("."),
            archive_name: "patent_pdfs.zip".to_string(),
            failure_log_file: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（可选）→ 环境变量
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env())
    }

    /// 从 TOML 文件读取配置，缺失的字段使用默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
                path: path.display().to_string(),
                source,
            })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        Ok(config)
    }

    /// 仅从环境变量读取（其余使用默认值）
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    fn with_env(self) -> Self {
        let env = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            registry_url: env("KIPRIS_REGISTRY_URL").unwrap_or(self.registry_url),
            service_key: env("KIPRIS_SERVICE_KEY").or(self.service_key),
            page_limit: env("PAGE_LIMIT").and_then(|v| v.parse().ok()).unwrap_or(self.page_limit),
            document_timeout_secs: env("DOCUMENT_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.document_timeout_secs),
            registry_timeout_secs: env("REGISTRY_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .or(self.registry_timeout_secs),
            input_file: env("INPUT_FILE").map(PathBuf::from).or(self.input_file),
            output_dir: env("OUTPUT_DIR").map(PathBuf::from).unwrap_or(self.output_dir),
            archive_name: env("ARCHIVE_NAME").unwrap_or(self.archive_name),
            failure_log_file: env("FAILURE_LOG_FILE")
                .map(PathBuf::from)
                .or(self.failure_log_file),
            verbose_logging: env("VERBOSE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }

    /// 检查配置是否可以启动批处理
    pub fn validate(&self) -> AppResult<()> {
        if self.page_limit == 0 {
            return Err(ConfigError::InvalidPageLimit(self.page_limit).into());
        }
        if self.credential().is_none() {
            return Err(ConfigError::MissingServiceKey.into());
        }
        if self.input_file.is_none() {
            return Err(ConfigError::MissingInput.into());
        }
        Ok(())
    }

    /// 去除空白后的服务密钥，空字符串视为未提供
    pub fn credential(&self) -> Option<&str> {
        self.service_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn document_timeout(&self) -> Duration {
        Duration::from_secs(self.document_timeout_secs)
    }

    pub fn registry_timeout(&self) -> Option<Duration> {
        self.registry_timeout_secs.map(Duration::from_secs)
    }

    /// 压缩包的完整输出路径
    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(&self.archive_name)
    }

    /// 失败记录文件路径，默认与压缩包放在同一目录
    pub fn failure_log_path(&self) -> PathBuf {
        match &self.failure_log_file {
            Some(path) => path.clone(),
            None => self.output_dir.join("failed.txt"),
        }
    }
}
