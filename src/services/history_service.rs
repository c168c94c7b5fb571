use crate::entities::{
    draw_record_entity as records, draw_session_entity as sessions,
    participant_entity as participants, prize_entity as prizes,
};
use crate::error::AppResult;
use crate::models::{HistoryPageResponse, HistoryQuery, HistoryRecord, PaginatedResponse, PaginationParams};
use crate::utils::write_history_table;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
};

/// 中奖历史查询 (只读)
#[derive(Clone)]
pub struct HistoryService {
    pool: DatabaseConnection,
}

impl HistoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 所有中奖记录，新到旧
    pub async fn list_all(&self) -> AppResult<Vec<HistoryRecord>> {
        let rows = Self::newest_first(Self::joined())
            .into_model::<HistoryRecord>()
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_page(&self, query: &HistoryQuery) -> AppResult<HistoryPageResponse> {
        let params = PaginationParams::new(query.page, query.per_page);

        let total = records::Entity::find().count(&self.pool).await? as i64;

        let data = Self::newest_first(Self::joined())
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .into_model::<HistoryRecord>()
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            data,
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    pub async fn list_by_prize(&self, prize_id: i64) -> AppResult<Vec<HistoryRecord>> {
        let rows = Self::newest_first(
            Self::joined().filter(sessions::Column::PrizeId.eq(prize_id)),
        )
        .into_model::<HistoryRecord>()
        .all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// 某一次抽奖的记录，按抽出顺序
    pub async fn list_by_session(&self, session_id: i64) -> AppResult<Vec<HistoryRecord>> {
        let rows = Self::joined()
            .filter(records::Column::SessionId.eq(session_id))
            .order_by_asc(records::Column::Id)
            .into_model::<HistoryRecord>()
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// 导出表格，顺序与 `list_all` 一致
    pub async fn export_table(&self) -> AppResult<Vec<u8>> {
        let rows = self.list_all().await?;
        write_history_table(&rows)
    }

    fn joined() -> Select<records::Entity> {
        records::Entity::find()
            .select_only()
            .column_as(records::Column::Id, "record_id")
            .column_as(records::Column::SessionId, "session_id")
            .column_as(sessions::Column::PrizeId, "prize_id")
            .column_as(prizes::Column::Name, "prize_name")
            .column_as(prizes::Column::IsSpecial, "is_special")
            .column_as(records::Column::ParticipantId, "participant_id")
            .column_as(participants::Column::Name, "participant_name")
            .column_as(participants::Column::EmployeeNo, "employee_no")
            .column_as(records::Column::DrawnAt, "drawn_at")
            .join(JoinType::InnerJoin, records::Relation::DrawSessions.def())
            .join(JoinType::InnerJoin, sessions::Relation::Prizes.def())
            .join(JoinType::InnerJoin, records::Relation::Participants.def())
    }

    fn newest_first(select: Select<records::Entity>) -> Select<records::Entity> {
        select
            .order_by_desc(records::Column::DrawnAt)
            .order_by_desc(records::Column::Id)
    }
}
