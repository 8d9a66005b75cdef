// error.rs - 错误类型定义
// 下载过程中所有可能出现的失败都归入 SpotlightError，由调用方决定计数还是上报

use std::path::PathBuf;
use thiserror::Error;

/// 元数据请求与图片下载共用的错误类型
#[derive(Debug, Error)]
pub enum SpotlightError {
    /// 请求无法构造或发送（DNS、连接失败、超时等）
    #[error("发送请求失败[{0}]")]
    Transport(#[source] reqwest::Error),

    /// 服务端返回了非 200 状态码
    #[error("请求失败HTTP状态码[{status}] {url}")]
    HttpStatus { status: u16, url: String },

    /// 响应体读取中断
    #[error("读取响应失败[{0}]")]
    Body(#[source] reqwest::Error),

    /// JSON 解析失败（外层信封或 item 内嵌字符串）
    #[error("解析JSON失败[{0}]")]
    Decode(#[from] serde_json::Error),

    #[error("保存图片失败[{path}]: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SpotlightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_message_carries_code() {
        let err = SpotlightError::HttpStatus {
            status: 503,
            url: "https://example.com/a.jpg".to_string(),
        };
        assert!(err.to_string().contains("[503]"));
    }

    #[test]
    fn decode_error_converts_from_serde() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SpotlightError = parse.into();
        assert!(matches!(err, SpotlightError::Decode(_)));
    }
}
