use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::session::{DrawSessionOrchestrator, SessionSnapshot};

fn snapshot_response(result: crate::error::AppResult<SessionSnapshot>) -> HttpResponse {
    match result {
        Ok(snapshot) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": snapshot
        })),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    get,
    path = "/session",
    tag = "session",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "当前揭晓进度", body = SessionSnapshot)
    )
)]
pub async fn get_session(
    orchestrator: web::Data<DrawSessionOrchestrator>,
) -> Result<HttpResponse> {
    Ok(snapshot_response(Ok(orchestrator.snapshot().await)))
}

#[utoipa::path(
    post,
    path = "/session/start",
    tag = "session",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "已抽出全部奖项并开始揭晓", body = SessionSnapshot),
        (status = 409, description = "当前状态不能开始")
    )
)]
pub async fn start(orchestrator: web::Data<DrawSessionOrchestrator>) -> Result<HttpResponse> {
    Ok(snapshot_response(orchestrator.start().await))
}

#[utoipa::path(
    post,
    path = "/session/pause",
    tag = "session",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "已暂停", body = SessionSnapshot),
        (status = 409, description = "当前状态不能暂停")
    )
)]
pub async fn pause(orchestrator: web::Data<DrawSessionOrchestrator>) -> Result<HttpResponse> {
    Ok(snapshot_response(orchestrator.pause().await))
}

#[utoipa::path(
    post,
    path = "/session/resume",
    tag = "session",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "已继续", body = SessionSnapshot),
        (status = 409, description = "当前状态不能继续")
    )
)]
pub async fn resume(orchestrator: web::Data<DrawSessionOrchestrator>) -> Result<HttpResponse> {
    Ok(snapshot_response(orchestrator.resume().await))
}

#[utoipa::path(
    post,
    path = "/session/next",
    tag = "session",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "进入下一个奖项，最后一个之后结束", body = SessionSnapshot),
        (status = 409, description = "当前奖项尚未揭晓完毕")
    )
)]
pub async fn next_round(
    orchestrator: web::Data<DrawSessionOrchestrator>,
) -> Result<HttpResponse> {
    Ok(snapshot_response(orchestrator.next_round().await))
}

#[utoipa::path(
    post,
    path = "/session/finish",
    tag = "session",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "已结束", body = SessionSnapshot),
        (status = 409, description = "当前状态不能结束")
    )
)]
pub async fn finish(orchestrator: web::Data<DrawSessionOrchestrator>) -> Result<HttpResponse> {
    Ok(snapshot_response(orchestrator.finish().await))
}

#[utoipa::path(
    post,
    path = "/session/reset",
    tag = "session",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "回到初始状态，已提交的抽奖记录保留", body = SessionSnapshot)
    )
)]
pub async fn reset(orchestrator: web::Data<DrawSessionOrchestrator>) -> Result<HttpResponse> {
    Ok(snapshot_response(Ok(orchestrator.reset().await)))
}

pub fn session_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/session")
            .route("", web::get().to(get_session))
            .route("/start", web::post().to(start))
            .route("/pause", web::post().to(pause))
            .route("/resume", web::post().to(resume))
            .route("/next", web::post().to(next_round))
            .route("/finish", web::post().to(finish))
            .route("/reset", web::post().to(reset)),
    );
}
