use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::HistoryService;

#[utoipa::path(
    get,
    path = "/history",
    tag = "history",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u32>, Query, description = "页码 (默认 1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认 20，最多 100)")
    ),
    responses(
        (status = 200, description = "中奖历史，最新在前", body = HistoryPageResponse)
    )
)]
pub async fn list_history(
    history_service: web::Data<HistoryService>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    match history_service.list_page(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/history/export",
    tag = "history",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CSV 格式的全部中奖历史", content_type = "text/csv", body = String)
    )
)]
pub async fn export_history(history_service: web::Data<HistoryService>) -> Result<HttpResponse> {
    match history_service.export_table().await {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"draw_history.csv\"",
            ))
            .body(bytes)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/history/prizes/{id}",
    tag = "history",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "奖项 ID")),
    responses(
        (status = 200, description = "该奖项的全部中奖记录", body = [HistoryRecord])
    )
)]
pub async fn list_by_prize(
    history_service: web::Data<HistoryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match history_service.list_by_prize(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": list
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/history/sessions/{id}",
    tag = "history",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "抽奖场次 ID")),
    responses(
        (status = 200, description = "该场次的中奖记录，按抽出顺序", body = [HistoryRecord])
    )
)]
pub async fn list_by_session(
    history_service: web::Data<HistoryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match history_service.list_by_session(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": list
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn history_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/history")
            .route("", web::get().to(list_history))
            .route("/export", web::get().to(export_history))
            .route("/prizes/{id}", web::get().to(list_by_prize))
            .route("/sessions/{id}", web::get().to(list_by_session)),
    );
}
