use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::prize_entity;

/// 新增 / 更新奖项请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PrizeRequest {
    #[schema(example = "头奖")]
    pub name: String,
    /// 名额，必须为正整数
    #[schema(example = 3)]
    pub quota: i32,
    /// 抽奖顺序，升序执行
    #[schema(example = 1)]
    pub draw_order: i32,
    #[serde(default)]
    pub is_special: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrizeResponse {
    pub id: i64,
    pub name: String,
    pub quota: i32,
    pub draw_order: i32,
    pub is_special: bool,
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        PrizeResponse {
            id: m.id,
            name: m.name,
            quota: m.quota,
            draw_order: m.draw_order,
            is_special: m.is_special,
        }
    }
}
