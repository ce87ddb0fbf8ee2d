use crate::plan::Channel;
use crate::results::{KeySource, ResultStatus};
use serde::Serialize;
use std::fmt;

/// 每个用例最终归入的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Passed,
    /// failed 与 error 合并
    Failed,
    Skipped,
    NotFound,
    Manual,
}

impl Classification {
    /// 控制台输出使用的标签
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Passed => "✅Passed",
            Classification::Failed => "❌Failed",
            Classification::Skipped => "⚠️Skipped",
            Classification::NotFound => "🕳Not found",
            Classification::Manual => "🫱Manual test needed",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 单个计划用例的报告行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    pub id: String,
    pub channel: Channel,
    pub classification: Classification,

    /// 结果文件中的原始状态（手工用例或未找到时为空）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResultStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_source: Option<KeySource>,
}

/// 汇总计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub not_found: usize,
    pub manual: usize,
    pub skipped: usize,
}

impl Summary {
    /// 累加一个用例，每个用例只进入一个桶
    pub fn record(mut self, classification: Classification) -> Self {
        self.total += 1;
        match classification {
            Classification::Passed => self.passed += 1,
            Classification::Failed => self.failed += 1,
            Classification::Skipped => self.skipped += 1,
            Classification::NotFound => self.not_found += 1,
            Classification::Manual => self.manual += 1,
        }
        self
    }

    pub fn passed_plus_manual(&self) -> usize {
        self.passed + self.manual
    }

    /// 相对于计划用例总数的百分比，总数为 0 时返回 0.0
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }

    /// 保留一位小数的百分比文本，控制台和 JSON 导出共用
    pub fn percent_display(&self, count: usize) -> String {
        format!("{:.1}", self.percent(count))
    }
}

/// 完整报告
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub cases: Vec<CaseReport>,
    pub summary: Summary,
}
