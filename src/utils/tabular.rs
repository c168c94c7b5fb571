//! 名单导入 / 历史导出使用的表格格式 (CSV)
//!
//! 导入：首行为表头，必须包含 `name` 列，可选 `employee_no` 列 (不区分大小写)；
//! 姓名为空的行跳过，不做去重。
//! 导出：列顺序固定为 [prize_name, is_special, winner_name, employee_no, drawn_at]。

use chrono::{DateTime, SecondsFormat, Utc};
use csv::{ReaderBuilder, Trim, WriterBuilder};

use crate::error::{AppError, AppResult};
use crate::models::HistoryRecord;

pub const HISTORY_COLUMNS: [&str; 5] = [
    "prize_name",
    "is_special",
    "winner_name",
    "employee_no",
    "drawn_at",
];

/// 导入的一行参与者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub name: String,
    pub employee_no: Option<String>,
}

pub fn parse_participant_table(data: &[u8]) -> AppResult<Vec<ImportRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let find_column = |wanted: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(wanted))
    };

    let name_idx = find_column("name").ok_or_else(|| {
        AppError::ValidationError("Header row must contain a `name` column".to_string())
    })?;
    let employee_idx = find_column("employee_no");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let name = record.get(name_idx).unwrap_or_default().trim();
        if name.is_empty() {
            continue;
        }
        let employee_no = employee_idx
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        rows.push(ImportRow {
            name: name.to_string(),
            employee_no,
        });
    }

    Ok(rows)
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// 按传入顺序导出，调用方负责排序 (历史查询为新到旧)
pub fn write_history_table(records: &[HistoryRecord]) -> AppResult<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(HISTORY_COLUMNS)?;

    for r in records {
        let drawn_at = format_timestamp(&r.drawn_at);
        writer.write_record([
            r.prize_name.as_str(),
            if r.is_special { "yes" } else { "no" },
            r.participant_name.as_str(),
            r.employee_no.as_deref().unwrap_or(""),
            drawn_at.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("CSV flush failed: {e}")))
}
