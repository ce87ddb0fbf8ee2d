use crate::plan::{Channel, PlannedCase};
use crate::report::types::{CaseReport, Classification, Report, Summary};
use crate::results::{ResultRecord, ResultStatus, ResultStore};

/// 将测试计划与各通道的结果关联
///
/// 手工用例不做查找；自动用例只在本通道的结果中查找，
/// 出现在其他通道结果中的用例视为未找到。
pub fn build_report(
    plan: &[PlannedCase],
    automated_results: &ResultStore,
    browser_results: &ResultStore,
) -> Report {
    let (cases, summary) = plan.iter().fold(
        (Vec::with_capacity(plan.len()), Summary::default()),
        |(mut cases, summary), case| {
            let record = match case.channel {
                Channel::Manual => None,
                Channel::Automated => automated_results.get(&case.id),
                Channel::AutomatedBrowser => browser_results.get(&case.id),
            };

            let line = case_report(case, record);
            let summary = summary.record(line.classification);
            cases.push(line);
            (cases, summary)
        },
    );

    tracing::debug!(
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        not_found = summary.not_found,
        manual = summary.manual,
        skipped = summary.skipped,
        "Report aggregated"
    );

    Report { cases, summary }
}

fn case_report(case: &PlannedCase, record: Option<&ResultRecord>) -> CaseReport {
    let classification = if case.channel.is_manual() {
        Classification::Manual
    } else {
        classify(record.map(|r| &r.status))
    };

    if classification == Classification::NotFound
        && let Some(r) = record
    {
        tracing::debug!(id = %case.id, status = %r.status, "Unrecognized status, counted as not found");
    }

    CaseReport {
        id: case.id.clone(),
        channel: case.channel,
        classification,
        status: record.map(|r| r.status.clone()),
        key_source: record.map(|r| r.key_source),
    }
}

/// 根据查找到的状态分类
pub fn classify(status: Option<&ResultStatus>) -> Classification {
    match status {
        Some(ResultStatus::Passed) => Classification::Passed,
        Some(ResultStatus::Failed | ResultStatus::Error) => Classification::Failed,
        Some(ResultStatus::Skipped) => Classification::Skipped,
        Some(ResultStatus::Other(_)) | None => Classification::NotFound,
    }
}
