use crate::entities::{draw_record_entity as records, participant_entity as participants};
use crate::error::{AppError, AppResult};
use crate::models::{CreateParticipantRequest, ParticipantResponse, UpdateParticipantRequest};
use crate::utils::parse_participant_table;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 参与者名单管理
#[derive(Clone)]
pub struct ParticipantService {
    pool: DatabaseConnection,
}

impl ParticipantService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn add(&self, request: CreateParticipantRequest) -> AppResult<ParticipantResponse> {
        let name = validate_name(&request.name)?;
        let model = insert_participant(&self.pool, name, normalize_employee_no(request.employee_no))
            .await?;
        log::info!("Participant added: id={} name={}", model.id, model.name);
        Ok(model.into())
    }

    pub async fn get(&self, id: i64) -> AppResult<ParticipantResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateParticipantRequest,
    ) -> AppResult<ParticipantResponse> {
        let name = validate_name(&request.name)?;
        let mut am = self.find(id).await?.into_active_model();
        am.name = Set(name.to_string());
        am.employee_no = Set(normalize_employee_no(request.employee_no));
        let updated = am.update(&self.pool).await?;
        Ok(updated.into())
    }

    /// 删除参与者
    ///
    /// 已有中奖记录的参与者不允许删除，以保证历史记录完整
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let model = self.find(id).await?;

        let history = records::Entity::find()
            .filter(records::Column::ParticipantId.eq(id))
            .count(&self.pool)
            .await?;
        if history > 0 {
            return Err(AppError::Conflict(format!(
                "Participant {id} has {history} draw record(s) and cannot be deleted"
            )));
        }

        participants::Entity::delete_by_id(model.id)
            .exec(&self.pool)
            .await?;
        log::info!("Participant deleted: id={id}");
        Ok(())
    }

    pub async fn set_active(&self, id: i64, is_active: bool) -> AppResult<ParticipantResponse> {
        let mut am = self.find(id).await?.into_active_model();
        am.is_active = Set(is_active);
        let updated = am.update(&self.pool).await?;
        Ok(updated.into())
    }

    /// 全部名单恢复为可抽
    pub async fn reset_all(&self) -> AppResult<u64> {
        let affected = reactivate_all(&self.pool).await?;
        log::info!("All participants re-activated ({affected} row(s))");
        Ok(affected)
    }

    pub async fn list_all(&self) -> AppResult<Vec<ParticipantResponse>> {
        let list = participants::Entity::find()
            .order_by_asc(participants::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn list_active(&self) -> AppResult<Vec<ParticipantResponse>> {
        let list = participants::Entity::find()
            .filter(participants::Column::IsActive.eq(true))
            .order_by_asc(participants::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 从表格导入名单，整批在一个事务内写入，返回新增人数
    pub async fn import_table(&self, data: &[u8]) -> AppResult<usize> {
        let rows = parse_participant_table(data)?;

        let txn = self.pool.begin().await?;
        for row in &rows {
            insert_participant(&txn, &row.name, row.employee_no.clone()).await?;
        }
        txn.commit().await?;

        log::info!("Imported {} participant(s)", rows.len());
        Ok(rows.len())
    }

    async fn find(&self, id: i64) -> AppResult<participants::Model> {
        participants::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Participant {id} not found")))
    }
}

pub(crate) async fn reactivate_all<C: ConnectionTrait>(conn: &C) -> AppResult<u64> {
    let result = participants::Entity::update_many()
        .col_expr(participants::Column::IsActive, Expr::value(true))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

async fn insert_participant<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    employee_no: Option<String>,
) -> AppResult<participants::Model> {
    let model = participants::ActiveModel {
        name: Set(name.to_string()),
        employee_no: Set(employee_no),
        is_active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(model)
}

fn validate_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::ValidationError(
            "Participant name must not be empty".to_string(),
        ));
    }
    Ok(name)
}

fn normalize_employee_no(employee_no: Option<String>) -> Option<String> {
    employee_no
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
