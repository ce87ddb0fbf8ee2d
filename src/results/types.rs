use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// 测试运行器上报的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultStatus {
    Passed,
    Failed,
    Error,
    Skipped,
    /// 无法识别的状态，原样保留
    Other(String),
}

impl ResultStatus {
    /// 不区分大小写地解析状态字符串
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "passed" => ResultStatus::Passed,
            "failed" => ResultStatus::Failed,
            "error" => ResultStatus::Error,
            "skipped" => ResultStatus::Skipped,
            _ => ResultStatus::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResultStatus::Passed => "passed",
            ResultStatus::Failed => "failed",
            ResultStatus::Error => "error",
            ResultStatus::Skipped => "skipped",
            ResultStatus::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ResultStatus::Other(_))
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResultStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// 记录的键来自哪个字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    /// 显式的用例 ID（`id` 字段）
    CaseId,

    /// 回退到完整测试名（`test` 字段），通常无法与计划关联
    TestName,
}

/// 一条测试结果
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// 大写的键
    pub id: String,
    pub status: ResultStatus,
    pub key_source: KeySource,
    /// 可读名称（浏览器测试会提供）
    pub name: Option<String>,
    /// 失败 / 错误信息
    pub message: Option<String>,
}

/// 导出文件中的可选汇总块，仅作参考
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportSummary {
    pub run: Option<u64>,
    pub failed: Option<u64>,
    pub errors: Option<u64>,
    pub skipped: Option<u64>,
}

/// 单个通道的结果集合
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    pub records: HashMap<String, ResultRecord>,
    pub summary: Option<ExportSummary>,
    pub source_path: Option<PathBuf>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入记录，相同键的后一条覆盖前一条
    pub fn insert(&mut self, record: ResultRecord) -> Option<ResultRecord> {
        self.records.insert(record.id.clone(), record)
    }

    pub fn get(&self, id: &str) -> Option<&ResultRecord> {
        self.records.get(&id.to_uppercase())
    }

    pub fn status(&self, id: &str) -> Option<&ResultStatus> {
        self.get(id).map(|r| &r.status)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 通过测试名回退得到键的记录数
    pub fn fallback_keyed(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.key_source == KeySource::TestName)
            .count()
    }
}
