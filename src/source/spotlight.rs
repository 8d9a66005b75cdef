// spotlight.rs - Windows 聚焦接口的异步客户端
// 负责请求壁纸元数据以及下载图片本体

use async_trait::async_trait;
use reqwest::StatusCode;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::model::BatchInfo;
use super::{BatchSource, HttpSettings, ImageFetcher, MAX_BATCH};
use crate::error::{Result, SpotlightError};

/// 聚焦接口客户端
///
/// 内部的 `reqwest::Client` 自带连接池，元数据请求与图片下载复用同一个实例。
/// 超时和 User-Agent 在构建时统一设置。
pub struct SpotlightClient {
    client: reqwest::Client,
    settings: HttpSettings,
}

impl SpotlightClient {
    pub fn new(settings: HttpSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(SpotlightError::Transport)?;

        Ok(Self { client, settings })
    }

    /// 发送 GET 请求并读取完整响应体，非 200 视为失败
    async fn get_bytes(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(SpotlightError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SpotlightError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(SpotlightError::Body)?;
        Ok(bytes.to_vec())
    }
}

/// 把请求数量收敛到 [1, MAX_BATCH]
pub fn clamp_count(count: usize) -> usize {
    count.clamp(1, MAX_BATCH)
}

/// 元数据请求的查询参数
pub fn selection_query(settings: &HttpSettings, count: usize) -> Vec<(&'static str, String)> {
    vec![
        ("placement", settings.placement.clone()),
        ("country", settings.country.clone()),
        ("locale", settings.locale.clone()),
        ("fmt", String::from("json")),
        ("bcnt", clamp_count(count).to_string()),
    ]
}

#[async_trait]
impl BatchSource for SpotlightClient {
    async fn fetch_batch(&self, count: usize) -> Result<BatchInfo> {
        let query = selection_query(&self.settings, count);
        debug!(endpoint = %self.settings.endpoint, ?query, "请求图片批次信息");

        let body = self.get_bytes(&self.settings.endpoint, &query).await?;
        let batch: BatchInfo = serde_json::from_slice(&body)?;

        debug!(ver = batch.version(), items = batch.items().len(), "收到图片批次信息");
        Ok(batch)
    }
}

#[async_trait]
impl ImageFetcher for SpotlightClient {
    async fn fetch_image(&self, url: &str, path: &Path) -> Result<()> {
        info!(url, "开始下载图片");

        let bytes = self.get_bytes(url, &[]).await?;

        let write_err = |source| SpotlightError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::create(path).await.map_err(write_err)?;
        file.write_all(&bytes).await.map_err(write_err)?;
        file.flush().await.map_err(write_err)?;

        info!(path = %path.display(), "图片下载完成");
        Ok(())
    }
}
