//! HTTP 传输层
//!
//! 客户端只依赖 `HttpTransport`，测试中可以替换为本地假实现。

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// 一次 GET 请求的结果
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// 按 UTF-8 解码响应体（非法字节替换）
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// 阻塞式 GET 能力（调用方 await 完成后才继续）
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// 发送 GET 请求
    ///
    /// # 参数
    /// - `url`: 请求地址
    /// - `query`: 查询参数
    /// - `timeout`: 超时时间，`None` 表示不限制
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout: Option<Duration>,
    ) -> AppResult<HttpResponse>;
}

/// 基于 reqwest 的传输实现
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout: Option<Duration>,
    ) -> AppResult<HttpResponse> {
        let mut request = self.client.get(url).query(query);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::request_failed(url, e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::request_failed(url, e))?;

        debug!("GET {} -> {} ({} 字节)", url, status, body.len());

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
