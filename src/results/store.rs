use super::types::{ExportSummary, KeySource, ResultRecord, ResultStatus, ResultStore};
use crate::Result;
use serde_json::Value;
use std::path::Path;

/// 读取一个结果文件
///
/// 文件不存在时返回空集合，表示该通道还没有运行过测试。
pub fn load_results<P: AsRef<Path>>(path: P) -> Result<ResultStore> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(path = %path.display(), "Result export not found, treating as empty");
        let mut store = ResultStore::new();
        store.source_path = Some(path.to_path_buf());
        return Ok(store);
    }

    let content = std::fs::read_to_string(path)?;
    let mut store = parse_results(&content)?;
    store.source_path = Some(path.to_path_buf());

    tracing::debug!(
        path = %path.display(),
        records = store.len(),
        fallback_keyed = store.fallback_keyed(),
        "Loaded result export"
    );
    Ok(store)
}

/// 解析结果文件的 JSON 内容
///
/// 宽松解析：格式异常的条目逐条丢弃，只有非法 JSON 才返回错误。
pub fn parse_results(content: &str) -> Result<ResultStore> {
    let data: Value = serde_json::from_str(content)?;
    let mut store = ResultStore::new();

    let Some(root) = data.as_object() else {
        tracing::warn!("Result export is not a JSON object, ignoring its content");
        return Ok(store);
    };

    let entries = root
        .get("tests")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut skipped = 0usize;
    for entry in entries {
        match parse_entry(entry) {
            Some(record) => {
                if let Some(previous) = store.insert(record) {
                    tracing::debug!(id = %previous.id, "Duplicate result entry, keeping the later one");
                }
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Dropped result entries without identifier");
    }

    store.summary = root
        .get("summary")
        .and_then(|s| serde_json::from_value::<ExportSummary>(s.clone()).ok());

    if let Some(run) = store.summary.as_ref().and_then(|s| s.run)
        && run as usize != entries.len()
    {
        tracing::warn!(
            summary_run = run,
            entries = entries.len(),
            "Result export summary disagrees with its test list"
        );
    }

    Ok(store)
}

/// 解析单条结果，缺少标识符的条目返回 None
fn parse_entry(entry: &Value) -> Option<ResultRecord> {
    let obj = entry.as_object()?;
    let (key, key_source) = entry_key(obj)?;

    let status = match obj.get("status") {
        Some(Value::String(s)) => ResultStatus::parse(s),
        Some(Value::Null) | None => ResultStatus::Other(String::new()),
        Some(other) => ResultStatus::Other(other.to_string()),
    };

    Some(ResultRecord {
        id: key.to_uppercase(),
        status,
        key_source,
        name: string_field(obj, "name"),
        message: string_field(obj, "message"),
    })
}

/// 两级键策略：先用 `id`，再回退到 `test`
fn entry_key(obj: &serde_json::Map<String, Value>) -> Option<(String, KeySource)> {
    if let Some(id) = string_field(obj, "id") {
        return Some((id, KeySource::CaseId));
    }
    string_field(obj, "test").map(|test| (test, KeySource::TestName))
}

fn string_field(obj: &serde_json::Map<String, Value>, field: &str) -> Option<String> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
