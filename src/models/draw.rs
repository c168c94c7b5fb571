use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::participant_entity;

/// 中奖者
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Winner {
    pub id: i64,
    pub name: String,
    pub employee_no: Option<String>,
}

impl Winner {
    /// 揭晓 / 轮盘上显示的文字
    pub fn display_name(&self) -> String {
        match &self.employee_no {
            Some(no) => format!("{} ({})", self.name, no),
            None => self.name.clone(),
        }
    }
}

impl From<participant_entity::Model> for Winner {
    fn from(m: participant_entity::Model) -> Self {
        Winner {
            id: m.id,
            name: m.name,
            employee_no: m.employee_no,
        }
    }
}

/// 单个奖项的抽奖结果类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DrawOutcome {
    /// 按名额正常抽出
    Completed,
    /// 候选人不足名额，全部中奖
    Shortfall,
    /// 没有任何可抽候选人
    NoCandidates,
}

/// 单个奖项的抽奖结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrizeResult {
    pub prize_id: i64,
    pub prize_name: String,
    pub quota: i32,
    pub is_special: bool,
    pub session_id: i64,
    /// 按抽出顺序排列
    pub winners: Vec<Winner>,
    pub outcome: DrawOutcome,
}
