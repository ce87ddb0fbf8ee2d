use crate::error::{ReportError, Result};
use crate::plan::types::{Channel, PlannedCase, TestPlan};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// 默认的用例 ID 模式：`T` + 一个族字母 + 数字（TA01, TM02, TS10）
pub const DEFAULT_ID_PATTERN: &str = r"T[A-Z]\d+";

/// 默认的浏览器自动化标记
pub const DEFAULT_BROWSER_TOKENS: &[&str] = &["SELENIUM", "BROWSER"];

const AUTO_TOKEN: &str = "AUTO";

/// 测试计划解析器
///
/// 逐行扫描文档，不理解 YAML / Markdown 结构：
/// `{任意内容} <用例ID> {任意内容} [<通道标记>] {任意内容}`
#[derive(Debug, Clone)]
pub struct PlanLoader {
    id_regex: Regex,
    browser_tokens: Vec<String>,
}

impl PlanLoader {
    pub fn new() -> Self {
        Self {
            id_regex: Self::compile_id_pattern(DEFAULT_ID_PATTERN)
                .expect("default id pattern is valid"),
            browser_tokens: DEFAULT_BROWSER_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }

    /// 使用自定义的 ID 模式和浏览器标记
    pub fn with_options(id_pattern: &str, browser_tokens: &[String]) -> Result<Self> {
        let id_regex = Self::compile_id_pattern(id_pattern)?;
        // 空标记会匹配所有 [AUTO]，直接丢弃
        let browser_tokens: Vec<String> = browser_tokens
            .iter()
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();
        let browser_tokens = if browser_tokens.is_empty() {
            DEFAULT_BROWSER_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect()
        } else {
            browser_tokens
        };

        Ok(Self {
            id_regex,
            browser_tokens,
        })
    }

    fn compile_id_pattern(pattern: &str) -> Result<Regex> {
        Regex::new(&format!(r"(?i)\b({})\b", pattern)).map_err(|source| {
            ReportError::InvalidIdPattern {
                pattern: pattern.to_string(),
                source,
            }
        })
    }

    /// 从文件路径加载测试计划
    ///
    /// 计划文件不存在或不可读是整个流程中唯一的致命错误。
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<TestPlan> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ReportError::PlanNotFound(path.to_path_buf()));
        }

        let content =
            std::fs::read_to_string(path).map_err(|source| ReportError::PlanUnreadable {
                path: path.to_path_buf(),
                source,
            })?;

        let plan = self.parse_content(&content).with_source_path(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            cases = plan.len(),
            "Loaded test plan"
        );
        Ok(plan)
    }

    /// 从字符串内容解析
    pub fn parse_content(&self, content: &str) -> TestPlan {
        let mut plan = TestPlan::new();

        for (index, line) in content.lines().enumerate() {
            if let Some(case) = self.parse_line(line, index + 1) {
                plan.cases.push(case);
            }
        }

        plan
    }

    /// 解析单行，没有用例 ID 的行返回 None
    ///
    /// 每行只取第一个匹配的 ID。
    pub fn parse_line(&self, line: &str, line_number: usize) -> Option<PlannedCase> {
        let id = self.id_regex.captures(line)?.get(1)?.as_str().to_uppercase();
        let channel = self.classify_channel(line);

        tracing::trace!(line = line_number, %id, %channel, "Matched plan line");
        Some(PlannedCase::new(id, channel, line_number))
    }

    /// 根据同一行内的方括号标记判断执行通道
    pub fn classify_channel(&self, line: &str) -> Channel {
        let mut channel = Channel::Manual;

        for marker in bracketed_markers(line) {
            let marker = marker.to_uppercase();
            if !marker.contains(AUTO_TOKEN) {
                continue;
            }

            if self.browser_tokens.iter().any(|t| marker.contains(t.as_str())) {
                // 浏览器标记优先级最高
                return Channel::AutomatedBrowser;
            }
            channel = Channel::Automated;
        }

        channel
    }
}

impl Default for PlanLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// 提取一行中所有 `[...]` 标记的内容
fn bracketed_markers(line: &str) -> impl Iterator<Item = &str> {
    static MARKER_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = MARKER_REGEX.get_or_init(|| Regex::new(r"\[([^\[\]]*)\]").unwrap());

    re.captures_iter(line)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}
