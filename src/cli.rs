use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use planreport::config::{ConfigLoader, PathOverrides, ReportConfig, ResolvedConfig};
use planreport::report::{self, ReportFormat, ReportPrinter};
use planreport::results::{self, ResultStore};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 测试计划文件（默认 test_list.yaml）
    #[arg(short, long)]
    pub plan: Option<PathBuf>,

    /// 单元 / 集成测试结果（默认 result_test_auto.json）
    #[arg(short, long = "auto")]
    pub automated: Option<PathBuf>,

    /// 浏览器测试结果（默认 result_test_selenium.json）
    #[arg(short = 's', long = "selenium")]
    pub browser: Option<PathBuf>,

    /// 指定配置文件，不再自动查找 planreport.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 用例行的输出形式
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Plain)]
    pub format: ReportFormat,

    /// 同时写出 JSON 报告
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// 关闭彩色输出
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    fn overrides(&self) -> PathOverrides {
        PathOverrides {
            plan: self.plan.clone(),
            automated: self.automated.clone(),
            browser: self.browser.clone(),
        }
    }

    fn resolve_config(&self) -> Result<ResolvedConfig> {
        let config = match &self.config {
            Some(path) => ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ConfigLoader::find_and_load().unwrap_or_else(ReportConfig::default),
        };

        Ok(ConfigLoader::resolve(&config, &self.overrides()))
    }
}

pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let resolved = cli.resolve_config()?;
    tracing::debug!(?resolved, "Resolved configuration");

    // 所有可能失败的读取都在输出之前完成
    let loader = resolved.plan_loader()?;
    let plan = loader.load_file(&resolved.plan_path)?;
    let automated = load_store(&resolved.automated_path)?;
    let browser = load_store(&resolved.browser_path)?;

    let printer = ReportPrinter::new(cli.format);
    printer.print_source_status("automated", &resolved.automated_path, automated.1);
    printer.print_source_status("browser", &resolved.browser_path, browser.1);

    let report = report::build_report(&plan.cases, &automated.0, &browser.0);
    printer.print(&report);

    if let Some(path) = &cli.json {
        report::export_json(&report, path)
            .with_context(|| format!("Failed to write JSON report to {}", path.display()))?;
    }

    Ok(())
}

/// 读取结果文件，同时返回文件是否存在
fn load_store(path: &std::path::Path) -> Result<(ResultStore, bool)> {
    let found = path.exists();
    let store = results::load_results(path)
        .with_context(|| format!("Failed to read result export {}", path.display()))?;
    Ok((store, found))
}
