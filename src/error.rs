// error.rs — 错误类型定义
// 致命错误走 Error，单个文件的下载失败走 DownloadError（只记日志，不向上传播）

use std::path::PathBuf;
use thiserror::Error;

/// 会终止整个程序的错误
#[derive(Debug, Error)]
pub enum Error {
    /// 命令行输入不合法（在任何网络请求之前发现）
    #[error("{message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    /// 列表页无法访问或返回非成功状态码
    #[error("Failed to get links: {0}")]
    Fetch(#[source] reqwest::Error),

    /// 批量下载阶段的整体失败（例如目标目录无法创建）
    #[error("Failed to download files: {0}")]
    Batch(#[source] std::io::Error),

    /// HTTP 客户端构建失败（TLS 后端初始化等）
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// 配置文件读取或解析失败
    #[error("Failed to load config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl Error {
    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

/// 单个下载任务的失败原因
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),

    #[error("no file name in url path")]
    NoFileName,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_displays_message_only() {
        let err = Error::invalid_input("month", "Month value is not valid.");
        assert_eq!(err.to_string(), "Month value is not valid.");
    }

    #[test]
    fn batch_error_wraps_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::Batch(io);
        assert_eq!(err.to_string(), "Failed to download files: denied");
    }
}
