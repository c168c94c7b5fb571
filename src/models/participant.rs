use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::participant_entity;

/// 新增参与者请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateParticipantRequest {
    #[schema(example = "王小明")]
    pub name: String,
    #[schema(example = "E0012")]
    pub employee_no: Option<String>,
}

/// 更新参与者请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateParticipantRequest {
    #[schema(example = "王小明")]
    pub name: String,
    #[schema(example = "E0012")]
    pub employee_no: Option<String>,
}

/// 设置抽奖资格
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParticipantResponse {
    pub id: i64,
    pub name: String,
    pub employee_no: Option<String>,
    /// 是否可参加普通奖
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<participant_entity::Model> for ParticipantResponse {
    fn from(m: participant_entity::Model) -> Self {
        ParticipantResponse {
            id: m.id,
            name: m.name,
            employee_no: m.employee_no,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}

/// 名单导入结果
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImportResponse {
    /// 实际新增人数 (空姓名行已跳过)
    pub imported: usize,
}

/// 批量操作影响行数
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AffectedResponse {
    pub affected: u64,
}
