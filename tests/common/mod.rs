#![allow(dead_code)]

use prize_draw_backend::config::DatabaseConfig;
use prize_draw_backend::database::{create_pool, run_migrations};
use prize_draw_backend::models::{CreateParticipantRequest, ParticipantResponse, PrizeRequest, PrizeResponse};
use prize_draw_backend::services::{ParticipantService, PrizeService};
use sea_orm::DatabaseConnection;

/// 每个测试一个独立的内存库；单连接保证所有查询看到同一个库
pub async fn setup_db() -> DatabaseConnection {
    let pool = create_pool(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .expect("connect sqlite");
    run_migrations(&pool).await.expect("migrate");
    pool
}

pub async fn add_people(
    service: &ParticipantService,
    names: &[&str],
) -> Vec<ParticipantResponse> {
    let mut added = Vec::new();
    for (i, name) in names.iter().enumerate() {
        let p = service
            .add(CreateParticipantRequest {
                name: name.to_string(),
                employee_no: Some(format!("E{:03}", i + 1)),
            })
            .await
            .expect("add participant");
        added.push(p);
    }
    added
}

pub async fn add_prize(
    service: &PrizeService,
    name: &str,
    quota: i32,
    draw_order: i32,
    is_special: bool,
) -> PrizeResponse {
    service
        .create(PrizeRequest {
            name: name.to_string(),
            quota,
            draw_order,
            is_special,
        })
        .await
        .expect("create prize")
}
