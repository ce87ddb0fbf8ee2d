use crate::report::types::{Report, Summary};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use std::fmt::Write;
use std::path::Path;

use super::Classification;

/// 用例行的输出形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// `ID | channel | result`，下游工具按行解析
    #[default]
    Plain,
    /// comfy-table 表格
    Table,
}

pub struct ReportPrinter {
    format: ReportFormat,
}

impl ReportPrinter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// 打印结果文件的读取状态
    pub fn print_source_status(&self, kind: &str, path: &Path, found: bool) {
        print!("Reading {} results from {}… ", kind, path.display());
        if found {
            println!("{}", "OK".green());
        } else {
            println!(
                "{}",
                format!("not found, {} tests have not been run yet", kind).yellow()
            );
        }
    }

    /// 打印完整报告
    pub fn print(&self, report: &Report) {
        print!("{}", self.render(report));
    }

    /// 渲染完整报告：用例行、空行、汇总
    pub fn render(&self, report: &Report) -> String {
        let mut out = match self.format {
            ReportFormat::Plain => render_plain_cases(report),
            ReportFormat::Table => render_table_cases(report),
        };
        out.push('\n');
        out.push_str(&render_summary(&report.summary));
        out
    }
}

impl Default for ReportPrinter {
    fn default() -> Self {
        Self::new(ReportFormat::Plain)
    }
}

fn render_plain_cases(report: &Report) -> String {
    let mut out = String::new();
    for case in &report.cases {
        let _ = writeln!(
            out,
            "{} | {} | {}",
            case.id, case.channel, case.classification
        );
    }
    out
}

fn render_table_cases(report: &Report) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["ID", "Channel", "Result"]);

    for case in &report.cases {
        let color = match case.classification {
            Classification::Passed => Color::Green,
            Classification::Failed => Color::Red,
            Classification::Skipped | Classification::NotFound => Color::Yellow,
            Classification::Manual => Color::Cyan,
        };
        table.add_row(vec![
            Cell::new(&case.id),
            Cell::new(case.channel),
            Cell::new(case.classification).fg(color),
        ]);
    }

    format!("{}\n", table)
}

/// 汇总块，标签文字和顺序固定
pub fn render_summary(summary: &Summary) -> String {
    let line = |label: &str, count: usize| {
        format!("{}: {} ({}%)\n", label, count, summary.percent_display(count))
    };

    let mut out = format!("Number of tests: {}\n", summary.total);
    out.push_str(&line("✅Passed tests", summary.passed));
    out.push_str(&line("❌Failed tests", summary.failed));
    out.push_str(&line("🕳Not found tests", summary.not_found));
    out.push_str(&line("🫱Test to pass manually", summary.manual));
    out.push_str(&line("✅Passed + 🫱Manual", summary.passed_plus_manual()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Channel;
    use crate::report::CaseReport;

    fn sample_report() -> Report {
        let case = |id: &str, channel, classification| CaseReport {
            id: id.to_string(),
            channel,
            classification,
            status: None,
            key_source: None,
        };
        let cases = vec![
            case("TA01", Channel::Automated, Classification::Passed),
            case("TM02", Channel::Manual, Classification::Manual),
            case("TA03", Channel::AutomatedBrowser, Classification::NotFound),
        ];
        let summary = cases
            .iter()
            .fold(Summary::default(), |s, c| s.record(c.classification));
        Report { cases, summary }
    }

    #[test]
    fn test_render_plain() {
        let output = ReportPrinter::default().render(&sample_report());
        let expected = "\
TA01 | auto | ✅Passed
TM02 | manual | 🫱Manual test needed
TA03 | auto-selenium | 🕳Not found

Number of tests: 3
✅Passed tests: 1 (33.3%)
❌Failed tests: 0 (0.0%)
🕳Not found tests: 1 (33.3%)
🫱Test to pass manually: 1 (33.3%)
✅Passed + 🫱Manual: 2 (66.7%)
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_render_empty_summary() {
        let output = render_summary(&Summary::default());
        assert!(output.starts_with("Number of tests: 0\n"));
        assert!(output.contains("✅Passed tests: 0 (0.0%)"));
        assert!(output.contains("✅Passed + 🫱Manual: 0 (0.0%)"));
    }

    #[test]
    fn test_render_table() {
        let output = ReportPrinter::new(ReportFormat::Table).render(&sample_report());
        assert!(output.contains("Channel"));
        assert!(output.contains("TA03"));
        assert!(output.contains("auto-selenium"));
        assert!(output.contains("Number of tests: 3"));
    }
}
