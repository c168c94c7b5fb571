mod common;

use std::collections::HashSet;

use common::{add_people, add_prize, setup_db};
use prize_draw_backend::AppError;
use prize_draw_backend::entities::{draw_record_entity, draw_session_entity, prize_entity};
use prize_draw_backend::models::{CreateParticipantRequest, DrawOutcome, HistoryQuery};
use prize_draw_backend::services::{
    AdminService, DrawService, HistoryService, ParticipantService, PrizeService,
};
use prize_draw_backend::utils::format_timestamp;
use sea_orm::{EntityTrait, PaginatorTrait, TransactionTrait};

struct Fixture {
    participants: ParticipantService,
    prizes: PrizeService,
    draw: DrawService,
    history: HistoryService,
    admin: AdminService,
}

async fn fixture() -> (sea_orm::DatabaseConnection, Fixture) {
    let pool = setup_db().await;
    let f = Fixture {
        participants: ParticipantService::new(pool.clone()),
        prizes: PrizeService::new(pool.clone()),
        draw: DrawService::with_seed(pool.clone(), 20240101),
        history: HistoryService::new(pool.clone()),
        admin: AdminService::new(pool.clone()),
    };
    (pool, f)
}

#[tokio::test]
async fn test_full_sequence_follows_draw_order_and_excludes_previous_winners() {
    let (_pool, f) = fixture().await;
    add_people(&f.participants, &["Ann", "Ben", "Cat", "Dan", "Eve"]).await;
    add_prize(&f.prizes, "Second", 2, 2, false).await;
    add_prize(&f.prizes, "First", 1, 1, false).await;
    add_prize(&f.prizes, "Lucky", 1, 3, true).await;

    let results = f.draw.run_full_sequence().await.unwrap();

    let names: Vec<_> = results.iter().map(|r| r.prize_name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Lucky"]);
    assert!(results.iter().all(|r| r.outcome == DrawOutcome::Completed));
    assert_eq!(results[0].winners.len(), 1);
    assert_eq!(results[1].winners.len(), 2);
    assert_eq!(results[2].winners.len(), 1);

    let regular: Vec<i64> = results[..2]
        .iter()
        .flat_map(|r| r.winners.iter().map(|w| w.id))
        .collect();
    let unique: HashSet<_> = regular.iter().collect();
    assert_eq!(unique.len(), 3);

    // 普通奖中奖者失去资格，特别奖不改变资格
    let active = f.participants.list_active().await.unwrap();
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|p| !regular.contains(&p.id)));

    assert_eq!(f.history.list_all().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_shortfall_then_no_candidates() {
    let (pool, f) = fixture().await;
    add_people(&f.participants, &["Ann", "Ben"]).await;
    add_prize(&f.prizes, "Big", 5, 1, false).await;
    add_prize(&f.prizes, "Small", 1, 2, false).await;

    let results = f.draw.run_full_sequence().await.unwrap();

    assert_eq!(results[0].outcome, DrawOutcome::Shortfall);
    assert_eq!(results[0].winners.len(), 2);

    assert_eq!(results[1].outcome, DrawOutcome::NoCandidates);
    assert!(results[1].winners.is_empty());

    // 无人可抽也留下一条已封存的场次
    let sessions = draw_session_entity::Entity::find().all(&pool).await.unwrap();
    assert_eq!(sessions.len(), 2);
    assert!(sessions.iter().all(|s| s.finished_at.is_some()));
    assert!(
        f.history
            .list_by_session(results[1].session_id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_repeated_draws_shrink_the_pool() {
    let (_pool, f) = fixture().await;
    add_people(&f.participants, &["Ann", "Ben", "Cat", "Dan"]).await;
    let prize = add_prize(&f.prizes, "Gift", 2, 1, false).await;

    let first = f.draw.run_single(prize.id).await.unwrap();
    let second = f.draw.run_single(prize.id).await.unwrap();
    let third = f.draw.run_single(prize.id).await.unwrap();

    assert_eq!(first.winners.len(), 2);
    assert_eq!(second.winners.len(), 2);
    let all: HashSet<i64> = first
        .winners
        .iter()
        .chain(second.winners.iter())
        .map(|w| w.id)
        .collect();
    assert_eq!(all.len(), 4);

    assert_eq!(third.outcome, DrawOutcome::NoCandidates);
    assert_eq!(f.history.list_by_prize(prize.id).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_special_prize_draws_from_everyone() {
    let (_pool, f) = fixture().await;
    let people = add_people(&f.participants, &["Ann", "Ben", "Cat"]).await;
    for p in &people {
        f.participants.set_active(p.id, false).await.unwrap();
    }
    let special = add_prize(&f.prizes, "Grand", 2, 1, true).await;

    let result = f.draw.run_single(special.id).await.unwrap();

    assert_eq!(result.outcome, DrawOutcome::Completed);
    assert_eq!(result.winners.len(), 2);
    assert!(f.participants.list_active().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_no_participant_wins_twice_in_a_session() {
    let (_pool, f) = fixture().await;
    let names: Vec<String> = (0..30).map(|i| format!("P{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    add_people(&f.participants, &refs).await;
    add_prize(&f.prizes, "A", 10, 1, false).await;
    add_prize(&f.prizes, "B", 10, 2, true).await;
    add_prize(&f.prizes, "C", 10, 3, false).await;

    f.draw.run_full_sequence().await.unwrap();

    let history = f.history.list_all().await.unwrap();
    assert_eq!(history.len(), 30);
    let pairs: HashSet<(i64, i64)> = history
        .iter()
        .map(|r| (r.session_id, r.participant_id))
        .collect();
    assert_eq!(pairs.len(), history.len());

    let regular: Vec<i64> = history
        .iter()
        .filter(|r| !r.is_special)
        .map(|r| r.participant_id)
        .collect();
    let unique: HashSet<_> = regular.iter().collect();
    assert_eq!(unique.len(), regular.len());
}

#[tokio::test]
async fn test_rolled_back_draw_leaves_no_trace() {
    let (pool, f) = fixture().await;
    add_people(&f.participants, &["Ann", "Ben", "Cat"]).await;
    let prize = add_prize(&f.prizes, "Gift", 2, 1, false).await;
    let model = prize_entity::Entity::find_by_id(prize.id)
        .one(&pool)
        .await
        .unwrap()
        .unwrap();

    let txn = pool.begin().await.unwrap();
    let result = f.draw.draw_prize_in(&txn, &model).await.unwrap();
    assert_eq!(result.winners.len(), 2);
    txn.rollback().await.unwrap();

    assert_eq!(draw_session_entity::Entity::find().count(&pool).await.unwrap(), 0);
    assert_eq!(draw_record_entity::Entity::find().count(&pool).await.unwrap(), 0);
    assert_eq!(f.participants.list_active().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_prize() {
    let (_pool, f) = fixture().await;
    assert!(matches!(
        f.draw.run_single(999).await,
        Err(AppError::PrizeNotFound(999))
    ));
}

#[tokio::test]
async fn test_records_block_deletes() {
    let (_pool, f) = fixture().await;
    let people = add_people(&f.participants, &["Ann", "Ben"]).await;
    let prize = add_prize(&f.prizes, "Gift", 1, 1, false).await;
    let spare = add_prize(&f.prizes, "Unused", 1, 2, false).await;

    let result = f.draw.run_single(prize.id).await.unwrap();
    let winner_id = result.winners[0].id;
    let loser_id = people.iter().find(|p| p.id != winner_id).unwrap().id;

    assert!(matches!(
        f.participants.delete(winner_id).await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        f.prizes.delete(prize.id).await,
        Err(AppError::Conflict(_))
    ));

    f.participants.delete(loser_id).await.unwrap();
    f.prizes.delete(spare.id).await.unwrap();
    assert!(matches!(
        f.participants.get(loser_id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_validation() {
    let (_pool, f) = fixture().await;

    let err = f
        .participants
        .add(CreateParticipantRequest {
            name: "   ".to_string(),
            employee_no: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = f
        .prizes
        .create(prize_draw_backend::models::PrizeRequest {
            name: "Zero".to_string(),
            quota: 0,
            draw_order: 1,
            is_special: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
    assert!(f.prizes.list_ordered().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_history_export_newest_first() {
    let (_pool, f) = fixture().await;
    add_people(&f.participants, &["Ann", "Ben", "Cat"]).await;
    add_prize(&f.prizes, "Early", 1, 1, false).await;
    add_prize(&f.prizes, "Late", 1, 2, true).await;

    f.draw.run_full_sequence().await.unwrap();

    let bytes = f.history.export_table().await.unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "prize_name,is_special,winner_name,employee_no,drawn_at");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Late,yes,"));
    assert!(lines[2].starts_with("Early,no,"));
}

#[tokio::test]
async fn test_export_matches_ledger_row_by_row() {
    let (_pool, f) = fixture().await;
    add_people(&f.participants, &["Ann", "Ben", "Cat", "Dan"]).await;
    f.participants
        .add(CreateParticipantRequest {
            name: "Eve, Jr.".to_string(),
            employee_no: None,
        })
        .await
        .unwrap();
    add_prize(&f.prizes, "Mug", 2, 1, false).await;
    add_prize(&f.prizes, "Trip", 1, 2, true).await;
    add_prize(&f.prizes, "Pen", 2, 3, false).await;

    f.draw.run_full_sequence().await.unwrap();

    let ledger = f.history.list_all().await.unwrap();
    let bytes = f.history.export_table().await.unwrap();
    let mut reader = csv::ReaderBuilder::new().from_reader(bytes.as_slice());
    let header = reader.headers().unwrap().clone();
    assert_eq!(
        header.iter().collect::<Vec<_>>(),
        vec!["prize_name", "is_special", "winner_name", "employee_no", "drawn_at"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    assert_eq!(ledger.len(), 5);
    assert_eq!(rows.len(), ledger.len());
    for (record, row) in ledger.iter().zip(rows.iter()) {
        assert_eq!(&row[0], record.prize_name);
        assert_eq!(&row[1], if record.is_special { "yes" } else { "no" });
        assert_eq!(&row[2], record.participant_name);
        assert_eq!(&row[3], record.employee_no.as_deref().unwrap_or(""));
        assert_eq!(&row[4], format_timestamp(&record.drawn_at));
    }
}

#[tokio::test]
async fn test_equal_draw_order_keeps_creation_order() {
    let (_pool, f) = fixture().await;
    add_people(&f.participants, &["Ann", "Ben", "Cat"]).await;
    add_prize(&f.prizes, "Z-first", 1, 5, false).await;
    add_prize(&f.prizes, "A-second", 1, 5, false).await;
    add_prize(&f.prizes, "M-third", 1, 5, false).await;
    add_prize(&f.prizes, "Opening", 1, 1, true).await;

    let listed: Vec<String> = f
        .prizes
        .list_ordered()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(listed, vec!["Opening", "Z-first", "A-second", "M-third"]);

    let drawn: Vec<String> = f
        .draw
        .run_full_sequence()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.prize_name)
        .collect();
    assert_eq!(drawn, listed);
}

#[tokio::test]
async fn test_regular_then_special_prize() {
    let (_pool, f) = fixture().await;
    let people = add_people(&f.participants, &["P1", "P2", "P3"]).await;
    let everyone: HashSet<i64> = people.iter().map(|p| p.id).collect();
    add_prize(&f.prizes, "A", 2, 1, false).await;
    add_prize(&f.prizes, "B", 1, 2, true).await;

    let results = f.draw.run_full_sequence().await.unwrap();
    assert_eq!(results.len(), 2);

    let a = &results[0];
    assert_eq!(a.prize_name, "A");
    assert_eq!(a.outcome, DrawOutcome::Completed);
    let a_ids: HashSet<i64> = a.winners.iter().map(|w| w.id).collect();
    assert_eq!(a_ids.len(), 2);
    assert!(a_ids.is_subset(&everyone));

    let b = &results[1];
    assert_eq!(b.prize_name, "B");
    assert_eq!(b.winners.len(), 1);
    assert!(everyone.contains(&b.winners[0].id));

    // 特别奖不改变在场状态：只剩 A 之外的那一人
    let active: HashSet<i64> = f
        .participants
        .list_active()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    let expected: HashSet<i64> = everyone.difference(&a_ids).copied().collect();
    assert_eq!(active, expected);

    let history = f.history.list_all().await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history.iter().filter(|r| r.prize_name == "A").count(), 2);
    assert_eq!(history.iter().filter(|r| r.prize_name == "B").count(), 1);
}

#[tokio::test]
async fn test_history_pagination() {
    let (_pool, f) = fixture().await;
    let names: Vec<String> = (0..5).map(|i| format!("P{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    add_people(&f.participants, &refs).await;
    add_prize(&f.prizes, "All", 5, 1, false).await;
    f.draw.run_full_sequence().await.unwrap();

    let page = f
        .history
        .list_page(&HistoryQuery {
            page: Some(2),
            per_page: Some(2),
        })
        .await
        .unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.data.len(), 2);
}

#[tokio::test]
async fn test_import_table() {
    let (_pool, f) = fixture().await;

    let imported = f
        .participants
        .import_table(b"Name,Employee_No\nAnn,E1\n,E2\nBen,\n")
        .await
        .unwrap();
    assert_eq!(imported, 2);

    let all = f.participants.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].employee_no.as_deref(), Some("E1"));
    assert_eq!(all[1].employee_no, None);
    assert!(all.iter().all(|p| p.is_active));

    let err = f.participants.import_table(b"full_name\nCat\n").await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
    assert_eq!(f.participants.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_admin_reset_restores_everything() {
    let (pool, f) = fixture().await;
    add_people(&f.participants, &["Ann", "Ben", "Cat"]).await;
    add_prize(&f.prizes, "Gift", 2, 1, false).await;
    f.draw.run_full_sequence().await.unwrap();
    assert_eq!(f.participants.list_active().await.unwrap().len(), 1);

    let summary = f.admin.reset_lottery_data().await.unwrap();

    assert_eq!(summary.records_deleted, 2);
    assert_eq!(summary.sessions_deleted, 1);
    assert_eq!(summary.participants_reactivated, 3);
    assert_eq!(draw_session_entity::Entity::find().count(&pool).await.unwrap(), 0);
    assert_eq!(f.participants.list_active().await.unwrap().len(), 3);
    // 奖项本身不受影响
    assert_eq!(f.prizes.list_ordered().await.unwrap().len(), 1);
}
