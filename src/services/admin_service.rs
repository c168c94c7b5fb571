use crate::entities::{draw_record_entity as records, draw_session_entity as sessions};
use crate::error::AppResult;
use crate::services::participant_service::reactivate_all;
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AdminService {
    pool: DatabaseConnection,
}

/// 清空结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ResetSummary {
    pub records_deleted: u64,
    pub sessions_deleted: u64,
    pub participants_reactivated: u64,
}

impl AdminService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 清空所有抽奖历史并恢复全部参与者资格 (彩排后使用)
    pub async fn reset_lottery_data(&self) -> AppResult<ResetSummary> {
        let txn = self.pool.begin().await?;

        let records_deleted = records::Entity::delete_many().exec(&txn).await?.rows_affected;
        let sessions_deleted = sessions::Entity::delete_many().exec(&txn).await?.rows_affected;
        let participants_reactivated = reactivate_all(&txn).await?;

        txn.commit().await?;

        log::warn!(
            "Lottery data reset: {records_deleted} record(s), {sessions_deleted} session(s) deleted"
        );
        Ok(ResetSummary {
            records_deleted,
            sessions_deleted,
            participants_reactivated,
        })
    }
}
