use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 奖项
/// - quota: 中奖名额
/// - draw_order: 抽奖顺序 (升序，可不连续；相同时按 id)
/// - is_special: 特别奖从全部参与者中抽取，不改变 is_active
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub quota: i32,
    pub draw_order: i32,
    pub is_special: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::draw_sessions::Entity")]
    DrawSessions,
}

impl Related<super::draw_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DrawSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
