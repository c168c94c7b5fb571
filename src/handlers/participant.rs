use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::ParticipantService;

#[utoipa::path(
    get,
    path = "/participants",
    tag = "participant",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "全部参与者", body = [ParticipantResponse]),
        (status = 401, description = "未认证")
    )
)]
pub async fn list_participants(
    participant_service: web::Data<ParticipantService>,
) -> Result<HttpResponse> {
    match participant_service.list_all().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": list
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/participants/active",
    tag = "participant",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "仍可参加普通奖的参与者", body = [ParticipantResponse])
    )
)]
pub async fn list_active_participants(
    participant_service: web::Data<ParticipantService>,
) -> Result<HttpResponse> {
    match participant_service.list_active().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": list
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/participants",
    tag = "participant",
    security(("bearer_auth" = [])),
    request_body = CreateParticipantRequest,
    responses(
        (status = 200, description = "新增成功", body = ParticipantResponse),
        (status = 400, description = "姓名为空")
    )
)]
pub async fn create_participant(
    participant_service: web::Data<ParticipantService>,
    request: web::Json<CreateParticipantRequest>,
) -> Result<HttpResponse> {
    match participant_service.add(request.into_inner()).await {
        Ok(participant) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": participant
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/participants/{id}",
    tag = "participant",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "参与者 ID")),
    responses(
        (status = 200, description = "参与者详情", body = ParticipantResponse),
        (status = 404, description = "参与者不存在")
    )
)]
pub async fn get_participant(
    participant_service: web::Data<ParticipantService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match participant_service.get(path.into_inner()).await {
        Ok(participant) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": participant
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/participants/{id}",
    tag = "participant",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "参与者 ID")),
    request_body = UpdateParticipantRequest,
    responses(
        (status = 200, description = "更新成功", body = ParticipantResponse),
        (status = 400, description = "姓名为空"),
        (status = 404, description = "参与者不存在")
    )
)]
pub async fn update_participant(
    participant_service: web::Data<ParticipantService>,
    path: web::Path<i64>,
    request: web::Json<UpdateParticipantRequest>,
) -> Result<HttpResponse> {
    match participant_service
        .update(path.into_inner(), request.into_inner())
        .await
    {
        Ok(participant) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": participant
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/participants/{id}",
    tag = "participant",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "参与者 ID")),
    responses(
        (status = 200, description = "删除成功"),
        (status = 404, description = "参与者不存在"),
        (status = 409, description = "已有中奖记录，不能删除")
    )
)]
pub async fn delete_participant(
    participant_service: web::Data<ParticipantService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match participant_service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "参与者已删除"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/participants/{id}/active",
    tag = "participant",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "参与者 ID")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "已更新抽奖资格", body = ParticipantResponse),
        (status = 404, description = "参与者不存在")
    )
)]
pub async fn set_participant_active(
    participant_service: web::Data<ParticipantService>,
    path: web::Path<i64>,
    request: web::Json<SetActiveRequest>,
) -> Result<HttpResponse> {
    match participant_service
        .set_active(path.into_inner(), request.is_active)
        .await
    {
        Ok(participant) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": participant
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/participants/reset",
    tag = "participant",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "全部参与者恢复资格", body = AffectedResponse)
    )
)]
pub async fn reset_participants(
    participant_service: web::Data<ParticipantService>,
) -> Result<HttpResponse> {
    match participant_service.reset_all().await {
        Ok(affected) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": AffectedResponse { affected }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 请求体为 CSV 文本，首行表头需包含 `name`，`employee_no` 可选
#[utoipa::path(
    post,
    path = "/participants/import",
    tag = "participant",
    security(("bearer_auth" = [])),
    request_body(content = String, content_type = "text/csv", description = "name,employee_no"),
    responses(
        (status = 200, description = "导入成功", body = ImportResponse),
        (status = 400, description = "表格格式错误，未导入任何数据")
    )
)]
pub async fn import_participants(
    participant_service: web::Data<ParticipantService>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    match participant_service.import_table(&body).await {
        Ok(imported) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": ImportResponse { imported }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn participant_config(cfg: &mut web::ServiceConfig) {
    // 静态路径需注册在 /{id} 之前
    cfg.service(
        web::scope("/participants")
            .route("/reset", web::post().to(reset_participants))
            .route("/import", web::post().to(import_participants))
            .route("/active", web::get().to(list_active_participants))
            .route("", web::get().to(list_participants))
            .route("", web::post().to(create_participant))
            .route("/{id}/active", web::put().to(set_participant_active))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_participant))
                    .route(web::put().to(update_participant))
                    .route(web::delete().to(delete_participant)),
            ),
    );
}
