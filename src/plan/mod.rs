pub mod loader;
pub mod types;

// Re-export commonly used types
pub use loader::{DEFAULT_BROWSER_TOKENS, DEFAULT_ID_PATTERN, PlanLoader};
pub use types::{Channel, PlannedCase, TestPlan};

/// 使用默认规则从文件加载测试计划
pub fn load_plan<P: AsRef<std::path::Path>>(path: P) -> crate::Result<TestPlan> {
    PlanLoader::new().load_file(path)
}

/// 使用默认规则解析测试计划内容
pub fn parse_plan(content: &str) -> TestPlan {
    PlanLoader::new().parse_content(content)
}
