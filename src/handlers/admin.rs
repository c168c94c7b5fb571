use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::current_operator;
use crate::services::AdminService;
use crate::session::DrawSessionOrchestrator;

/// 彩排结束后清空所有中奖记录并恢复全部参与者资格，同时重置揭晓流程
#[utoipa::path(
    post,
    path = "/admin/reset-lottery",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "已清空", body = ResetSummary),
        (status = 500, description = "清空失败，数据保持不变")
    )
)]
pub async fn reset_lottery(
    req: HttpRequest,
    admin_service: web::Data<AdminService>,
    orchestrator: web::Data<DrawSessionOrchestrator>,
) -> Result<HttpResponse> {
    match admin_service.reset_lottery_data().await {
        Ok(summary) => {
            orchestrator.reset().await;
            log::warn!(
                "Lottery reset requested by {}",
                current_operator(&req).unwrap_or_else(|| "unknown".to_string())
            );
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": summary,
                "message": "抽奖数据已清空"
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/admin").route("/reset-lottery", web::post().to(reset_lottery)));
}
