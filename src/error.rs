use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("测试计划文件不存在: {}", .0.display())]
    PlanNotFound(PathBuf),

    #[error("无法读取测试计划 {}: {source}", path.display())]
    PlanUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("无效的用例 ID 模式 '{pattern}': {source}")]
    InvalidIdPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for ReportError {
    fn from(err: anyhow::Error) -> Self {
        ReportError::Other(err.to_string())
    }
}

impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::Config(err.to_string())
    }
}

/// Result type for planreport crate
pub type Result<T> = std::result::Result<T, ReportError>;
