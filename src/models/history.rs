use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 历史记录查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct HistoryQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20)
    pub per_page: Option<u32>,
}

/// 中奖历史 (记录 + 奖项 + 参与者)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sea_orm::FromQueryResult)]
pub struct HistoryRecord {
    pub record_id: i64,
    pub session_id: i64,
    pub prize_id: i64,
    pub prize_name: String,
    pub is_special: bool,
    pub participant_id: i64,
    pub participant_name: String,
    pub employee_no: Option<String>,
    pub drawn_at: DateTime<Utc>,
}
