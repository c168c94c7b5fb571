use crate::entities::{draw_session_entity as sessions, prize_entity as prizes};
use crate::error::{AppError, AppResult};
use crate::models::{PrizeRequest, PrizeResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set,
};

/// 奖项配置
#[derive(Clone)]
pub struct PrizeService {
    pool: DatabaseConnection,
}

impl PrizeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 抽奖顺序：draw_order 升序，相同时按 id (创建顺序)
    pub fn ordered() -> Select<prizes::Entity> {
        prizes::Entity::find()
            .order_by_asc(prizes::Column::DrawOrder)
            .order_by_asc(prizes::Column::Id)
    }

    pub async fn create(&self, request: PrizeRequest) -> AppResult<PrizeResponse> {
        let name = validate(&request)?;
        let model = prizes::ActiveModel {
            name: Set(name.to_string()),
            quota: Set(request.quota),
            draw_order: Set(request.draw_order),
            is_special: Set(request.is_special),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        log::info!(
            "Prize created: id={} name={} quota={} order={} special={}",
            model.id,
            model.name,
            model.quota,
            model.draw_order,
            model.is_special
        );
        Ok(model.into())
    }

    pub async fn get(&self, id: i64) -> AppResult<PrizeResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn update(&self, id: i64, request: PrizeRequest) -> AppResult<PrizeResponse> {
        let name = validate(&request)?;
        let mut am = self.find(id).await?.into_active_model();
        am.name = Set(name.to_string());
        am.quota = Set(request.quota);
        am.draw_order = Set(request.draw_order);
        am.is_special = Set(request.is_special);
        let updated = am.update(&self.pool).await?;
        Ok(updated.into())
    }

    /// 已经抽过的奖项保留，以免历史记录失去关联
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let model = self.find(id).await?;

        let history = sessions::Entity::find()
            .filter(sessions::Column::PrizeId.eq(id))
            .count(&self.pool)
            .await?;
        if history > 0 {
            return Err(AppError::Conflict(format!(
                "Prize {id} has {history} draw session(s) and cannot be deleted"
            )));
        }

        prizes::Entity::delete_by_id(model.id).exec(&self.pool).await?;
        log::info!("Prize deleted: id={id}");
        Ok(())
    }

    pub async fn list_ordered(&self) -> AppResult<Vec<PrizeResponse>> {
        let list = Self::ordered().all(&self.pool).await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: i64) -> AppResult<prizes::Model> {
        prizes::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {id} not found")))
    }
}

fn validate(request: &PrizeRequest) -> AppResult<&str> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::ValidationError(
            "Prize name must not be empty".to_string(),
        ));
    }
    if request.quota < 1 {
        return Err(AppError::ValidationError(
            "Prize quota must be a positive integer".to_string(),
        ));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, quota: i32) -> PrizeRequest {
        PrizeRequest {
            name: name.to_string(),
            quota,
            draw_order: 1,
            is_special: false,
        }
    }

    #[test]
    fn test_validate_prize_request() {
        assert_eq!(validate(&request(" Grand ", 1)).unwrap(), "Grand");
        assert!(validate(&request("", 1)).is_err());
        assert!(validate(&request("Grand", 0)).is_err());
        assert!(validate(&request("Grand", -3)).is_err());
    }
}
