use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::PrizeService;

#[utoipa::path(
    get,
    path = "/prizes",
    tag = "prize",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "按抽奖顺序排列的奖项", body = [PrizeResponse])
    )
)]
pub async fn list_prizes(prize_service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match prize_service.list_ordered().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": list
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/prizes",
    tag = "prize",
    security(("bearer_auth" = [])),
    request_body = PrizeRequest,
    responses(
        (status = 200, description = "新增成功", body = PrizeResponse),
        (status = 400, description = "名称为空或名额不是正整数")
    )
)]
pub async fn create_prize(
    prize_service: web::Data<PrizeService>,
    request: web::Json<PrizeRequest>,
) -> Result<HttpResponse> {
    match prize_service.create(request.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": prize
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/prizes/{id}",
    tag = "prize",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "奖项 ID")),
    responses(
        (status = 200, description = "奖项详情", body = PrizeResponse),
        (status = 404, description = "奖项不存在")
    )
)]
pub async fn get_prize(
    prize_service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match prize_service.get(path.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": prize
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/prizes/{id}",
    tag = "prize",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "奖项 ID")),
    request_body = PrizeRequest,
    responses(
        (status = 200, description = "更新成功", body = PrizeResponse),
        (status = 400, description = "名称为空或名额不是正整数"),
        (status = 404, description = "奖项不存在")
    )
)]
pub async fn update_prize(
    prize_service: web::Data<PrizeService>,
    path: web::Path<i64>,
    request: web::Json<PrizeRequest>,
) -> Result<HttpResponse> {
    match prize_service
        .update(path.into_inner(), request.into_inner())
        .await
    {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": prize
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/prizes/{id}",
    tag = "prize",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "奖项 ID")),
    responses(
        (status = 200, description = "删除成功"),
        (status = 404, description = "奖项不存在"),
        (status = 409, description = "已抽过奖，不能删除")
    )
)]
pub async fn delete_prize(
    prize_service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match prize_service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "奖项已删除"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn prize_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/prizes")
            .route("", web::get().to(list_prizes))
            .route("", web::post().to(create_prize))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_prize))
                    .route(web::put().to(update_prize))
                    .route(web::delete().to(delete_prize)),
            ),
    );
}
