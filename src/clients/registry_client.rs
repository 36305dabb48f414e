/// KIPRIS 公告全文查询客户端
///
/// 根据申请号查询公告全文 PDF 的下载地址
use crate::clients::http::HttpTransport;
use crate::config::Config;
use crate::error::{AppError, AppResult, ParseError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// 公告全文查询客户端
pub struct RegistryClient {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    timeout: Option<Duration>,
}

impl RegistryClient {
    /// 创建新的查询客户端
    pub fn new(config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            endpoint: config.registry_url.clone(),
            timeout: config.registry_timeout(),
        }
    }

    /// 查询 PDF 地址
    ///
    /// # 参数
    /// - `application_number`: 已去掉连字符的申请号
    /// - `credential`: API 服务密钥
    ///
    /// # 返回
    /// 响应中第一个 `path` 元素的文本；没有该元素时返回 `None`
    pub async fn resolve(
        &self,
        application_number: &str,
        credential: &str,
    ) -> AppResult<Option<String>> {
        let query = [
            ("applicationNumber", application_number),
            ("ServiceKey", credential),
        ];

        let response = self
            .transport
            .get(&self.endpoint, &query, self.timeout)
            .await?;

        if !response.is_ok() {
            return Err(AppError::bad_status(&self.endpoint, response.status));
        }

        let body = response.text();
        let location = extract_document_path(&body)?;

        if location.is_none() {
            match extract_element_text(&body, "resultMsg") {
                Some(msg) => warn!("申请号 {} 未返回 PDF 地址: {}", application_number, msg),
                None => debug!("申请号 {} 的响应中没有 path 元素", application_number),
            }
        }

        Ok(location)
    }
}

/// 在任意深度查找第一个 `path` 元素，返回其文本
pub fn extract_document_path(xml: &str) -> Result<Option<String>, ParseError> {
    let doc = parse_xml(xml)?;
    Ok(first_text(&doc, "path"))
}

fn extract_element_text(xml: &str, tag: &str) -> Option<String> {
    let doc = parse_xml(xml).ok()?;
    first_text(&doc, tag)
}

fn parse_xml(xml: &str) -> Result<roxmltree::Document<'_>, roxmltree::Error> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    roxmltree::Document::parse_with_options(xml, options)
}

fn first_text(doc: &roxmltree::Document, tag: &str) -> Option<String> {
    doc.descendants()
        .find(|node| node.has_tag_name(tag))
        .and_then(|node| node.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
