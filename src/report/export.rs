use crate::Result;
use crate::report::types::{CaseReport, Report, Summary};
use fs2::FileExt;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
struct Percentages {
    passed: f64,
    failed: f64,
    not_found: f64,
    manual: f64,
    skipped: f64,
    passed_plus_manual: f64,
}

#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    cases: &'a [CaseReport],
    summary: &'a Summary,
    passed_plus_manual: usize,
    percentages: Percentages,
}

/// 取控制台显示的一位小数文本再转回数字，两边的舍入方式保持一致
fn rounded_percent(summary: &Summary, count: usize) -> f64 {
    summary
        .percent_display(count)
        .parse()
        .unwrap_or_default()
}

/// 将报告渲染为格式化的 JSON
///
/// 不包含时间戳，相同输入总是得到相同的字节。
pub fn to_json(report: &Report) -> Result<String> {
    let s = &report.summary;
    let document = ExportDocument {
        cases: &report.cases,
        summary: s,
        passed_plus_manual: s.passed_plus_manual(),
        percentages: Percentages {
            passed: rounded_percent(s, s.passed),
            failed: rounded_percent(s, s.failed),
            not_found: rounded_percent(s, s.not_found),
            manual: rounded_percent(s, s.manual),
            skipped: rounded_percent(s, s.skipped),
            passed_plus_manual: rounded_percent(s, s.passed_plus_manual()),
        },
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

/// 将 JSON 报告写入 `path`
///
/// 重写期间持有文件的排他锁。
pub fn export_json<P: AsRef<Path>>(report: &Report, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(report)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)?;
    file.lock_exclusive()?;
    // 加锁之后再截断，避免读者看到写了一半的文件
    file.set_len(0)?;

    let mut writer = BufWriter::new(&file);
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    drop(writer);

    FileExt::unlock(&file)?;
    tracing::info!(path = %path.display(), cases = report.cases.len(), "Wrote JSON report");
    Ok(())
}
