use crate::error::{ReportError, Result};
use crate::plan::{DEFAULT_BROWSER_TOKENS, DEFAULT_ID_PATTERN, PlanLoader};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PLAN_PATH: &str = "test_list.yaml";
pub const DEFAULT_AUTOMATED_PATH: &str = "result_test_auto.json";
pub const DEFAULT_BROWSER_PATH: &str = "result_test_selenium.json";

/// `planreport.toml` 的内容，所有键都是可选的
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub paths: PathsConfig,
    pub plan: PlanConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub plan: Option<PathBuf>,
    pub automated: Option<PathBuf>,
    pub browser: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    pub id_pattern: Option<String>,
    pub browser_tokens: Vec<String>,
}

/// 合并 CLI、配置文件和默认值之后的最终设置
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub plan_path: PathBuf,
    pub automated_path: PathBuf,
    pub browser_path: PathBuf,
    pub id_pattern: String,
    pub browser_tokens: Vec<String>,
}

impl ResolvedConfig {
    pub fn plan_loader(&self) -> Result<PlanLoader> {
        PlanLoader::with_options(&self.id_pattern, &self.browser_tokens)
    }
}

/// CLI 传入的覆盖项
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub plan: Option<PathBuf>,
    pub automated: Option<PathBuf>,
    pub browser: Option<PathBuf>,
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "planreport.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ReportConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及其父目录
    /// 2. 用户配置目录 ~/.config/planreport/
    pub fn find_and_load() -> Option<ReportConfig> {
        let path = Self::find_in_current_dir().or_else(Self::find_in_user_dir)?;

        match Self::load_from_path(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded config file");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
                None
            }
        }
    }

    fn find_in_current_dir() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            // 尝试父目录
            if !current.pop() {
                break;
            }
        }

        None
    }

    fn find_in_user_dir() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        let config_path = home
            .join(".config")
            .join("planreport")
            .join(Self::CONFIG_FILE);

        config_path.exists().then_some(config_path)
    }

    /// 合并设置，优先级：CLI > 配置文件 > 默认值
    pub fn resolve(config: &ReportConfig, overrides: &PathOverrides) -> ResolvedConfig {
        let pick = |cli: &Option<PathBuf>, file: &Option<PathBuf>, default: &str| {
            cli.clone()
                .or_else(|| file.clone())
                .unwrap_or_else(|| PathBuf::from(default))
        };

        let browser_tokens = if config.plan.browser_tokens.is_empty() {
            DEFAULT_BROWSER_TOKENS.iter().map(|t| t.to_string()).collect()
        } else {
            config.plan.browser_tokens.clone()
        };

        ResolvedConfig {
            plan_path: pick(&overrides.plan, &config.paths.plan, DEFAULT_PLAN_PATH),
            automated_path: pick(
                &overrides.automated,
                &config.paths.automated,
                DEFAULT_AUTOMATED_PATH,
            ),
            browser_path: pick(&overrides.browser, &config.paths.browser, DEFAULT_BROWSER_PATH),
            id_pattern: config
                .plan
                .id_pattern
                .clone()
                .unwrap_or_else(|| DEFAULT_ID_PATTERN.to_string()),
            browser_tokens,
        }
    }
}
