use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::services::DrawService;

/// 不经过揭晓流程直接抽完所有奖项
#[utoipa::path(
    post,
    path = "/draws/run",
    tag = "draw",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "各奖项抽奖结果", body = [crate::models::PrizeResult]),
        (status = 500, description = "中途失败，已完成的奖项保留")
    )
)]
pub async fn run_full_sequence(draw_service: web::Data<DrawService>) -> Result<HttpResponse> {
    match draw_service.run_full_sequence().await {
        Ok(results) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": results
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draws/prizes/{id}",
    tag = "draw",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "奖项 ID")),
    responses(
        (status = 200, description = "该奖项抽奖结果", body = crate::models::PrizeResult),
        (status = 404, description = "奖项不存在")
    )
)]
pub async fn run_single(
    draw_service: web::Data<DrawService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match draw_service.run_single(path.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": result
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/draws")
            .route("/run", web::post().to(run_full_sequence))
            .route("/prizes/{id}", web::post().to(run_single)),
    );
}
