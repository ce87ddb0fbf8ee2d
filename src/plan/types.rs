use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// 测试用例的执行通道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// 手工执行（默认）
    Manual,

    /// 单元 / 集成测试（`[AUTO]`）
    Automated,

    /// 浏览器驱动的端到端测试（`[AUTO-SELENIUM]`）
    AutomatedBrowser,
}

impl Channel {
    /// 报告中使用的通道名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Manual => "manual",
            Channel::Automated => "auto",
            Channel::AutomatedBrowser => "auto-selenium",
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, Channel::Manual)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 测试计划中的一个用例
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCase {
    /// 大写的用例 ID，如 `TA01`
    pub id: String,

    /// 执行通道
    pub channel: Channel,

    /// 所在行号（从 1 开始，仅用于诊断）
    pub line_number: usize,
}

impl PlannedCase {
    pub fn new(id: impl Into<String>, channel: Channel, line_number: usize) -> Self {
        Self {
            id: id.into(),
            channel,
            line_number,
        }
    }
}

/// 整个测试计划的解析结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestPlan {
    /// 按文档行顺序排列的用例，保留重复 ID
    pub cases: Vec<PlannedCase>,

    /// 源文件路径
    pub source_path: Option<PathBuf>,
}

impl TestPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_path(mut self, path: PathBuf) -> Self {
        self.source_path = Some(path);
        self
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// 某个通道下的用例数量
    pub fn count_by_channel(&self, channel: Channel) -> usize {
        self.cases.iter().filter(|c| c.channel == channel).count()
    }
}
