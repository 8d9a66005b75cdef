// source/mod.rs - 远端数据源模块入口
pub mod model;
pub mod spotlight;

// 定义批量下载器依赖的两个异步接口：
// 元数据客户端负责按批次拉取壁纸信息，图片下载器负责把单张图片写到磁盘

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use model::BatchInfo;

/// 单次请求最多能拿到的壁纸数量，由接口本身限制
pub const MAX_BATCH: usize = 4;

/// 浏览器 UA，接口会拒绝不带 User-Agent 的请求
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// HTTP 请求参数，元数据请求和图片下载共用
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// 接口地址
    pub endpoint: String,
    pub placement: String,
    pub country: String,
    pub locale: String,
    /// 单个请求的超时时间
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            endpoint: String::from("https://fd.api.iris.microsoft.com/v4/api/selection"),
            placement: String::from("88000820"),
            country: String::from("CN"),
            locale: String::from("zh-CN"),
            timeout: Duration::from_secs(10),
            user_agent: String::from(DEFAULT_USER_AGENT),
        }
    }
}

/// 元数据来源
///
/// `count` 超出 [1, MAX_BATCH] 时由实现方静默收敛，不返回错误。
#[async_trait]
pub trait BatchSource: Send + Sync {
    async fn fetch_batch(&self, count: usize) -> Result<BatchInfo>;
}

/// 图片下载器
///
/// 成功时 `path` 的内容与响应体逐字节一致（文件已存在则覆盖）。
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch_image(&self, url: &str, path: &Path) -> Result<()>;
}
