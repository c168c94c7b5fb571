use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest};
use crate::utils::{JwtService, hash_password, verify_password};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// 操作员登录
#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    /// 建立默认管理者账号（若不存在），返回是否新建
    pub async fn ensure_default_admin(&self, username: &str, password: &str) -> AppResult<bool> {
        if self.find_by_username(username).await?.is_some() {
            return Ok(false);
        }

        users::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(hash_password(password)?),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::warn!("Default operator account `{username}` created; change its password");
        Ok(true)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        // 用户不存在与密码错误返回同一错误
        let invalid = || AppError::AuthError("Invalid username or password".to_string());

        let user = self
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(invalid());
        }

        let access_token = self
            .jwt_service
            .generate_access_token(user.id, &user.username)?;

        log::info!("Operator logged in: {}", user.username);
        Ok(AuthResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.get_access_token_expires_in(),
            username: user.username,
        })
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.pool)
            .await?;
        Ok(user)
    }
}
