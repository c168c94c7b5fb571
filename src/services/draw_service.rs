use std::sync::{Arc, Mutex, PoisonError};

use crate::entities::{
    draw_record_entity as records, draw_session_entity as sessions,
    participant_entity as participants, prize_entity as prizes,
};
use crate::error::{AppError, AppResult};
use crate::models::{DrawOutcome, PrizeResult, Winner};
use crate::services::PrizeService;
use crate::session::DrawSequence;
use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 抽奖引擎
///
/// 每个奖项的抽奖是一个独立事务:
/// 1. 创建 draw_session
/// 2. 读取候选人 (特别奖: 全部参与者; 普通奖: 仅 is_active)
/// 3. 无候选人 -> 直接封存 session，结果为 NoCandidates
/// 4. 名额 = min(quota, 候选人数)，不足时全部中奖 (Shortfall)
/// 5. 不放回随机抽取
/// 6. 写入中奖记录；普通奖中奖者 is_active 置为 false
/// 7. 封存 session (finished_at) 并提交
///
/// 任一步失败整个事务回滚，不留下 session / 记录 / 资格变更。
#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
    rng: Arc<Mutex<StdRng>>,
}

impl DrawService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self::with_rng(pool, StdRng::from_entropy())
    }

    /// 固定种子，测试时结果可复现
    pub fn with_seed(pool: DatabaseConnection, seed: u64) -> Self {
        Self::with_rng(pool, StdRng::seed_from_u64(seed))
    }

    fn with_rng(pool: DatabaseConnection, rng: StdRng) -> Self {
        Self {
            pool,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// 按 draw_order 依序抽完所有奖项
    ///
    /// 每个奖项单独提交；中途失败时返回错误，之前已提交的奖项保留。
    pub async fn run_full_sequence(&self) -> AppResult<Vec<PrizeResult>> {
        let prize_list = PrizeService::ordered().all(&self.pool).await?;
        let mut results = Vec::with_capacity(prize_list.len());

        for prize in &prize_list {
            match self.draw_prize(prize).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    log::error!(
                        "Draw aborted at prize {} ({}): {e}; {} prize(s) already committed",
                        prize.id,
                        prize.name,
                        results.len()
                    );
                    return Err(e);
                }
            }
        }

        Ok(results)
    }

    /// 只抽指定奖项（手动操作用）
    pub async fn run_single(&self, prize_id: i64) -> AppResult<PrizeResult> {
        let prize = prizes::Entity::find_by_id(prize_id)
            .one(&self.pool)
            .await?
            .ok_or(AppError::PrizeNotFound(prize_id))?;
        self.draw_prize(&prize).await
    }

    async fn draw_prize(&self, prize: &prizes::Model) -> AppResult<PrizeResult> {
        let txn = self.pool.begin().await?;

        match self.draw_prize_in(&txn, prize).await {
            Ok(result) => {
                txn.commit().await?;
                log::info!(
                    "Prize drawn: prize={} ({}) session={} winners={} outcome={:?}",
                    result.prize_id,
                    result.prize_name,
                    result.session_id,
                    result.winners.len(),
                    result.outcome
                );
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    log::error!("Rollback failed for prize {}: {rollback_err}", prize.id);
                }
                Err(e)
            }
        }
    }

    /// 在调用方给定的事务内完成一个奖项的抽奖，不负责提交或回滚
    pub async fn draw_prize_in(
        &self,
        txn: &DatabaseTransaction,
        prize: &prizes::Model,
    ) -> AppResult<PrizeResult> {
        let session = sessions::ActiveModel {
            prize_id: Set(prize.id),
            created_at: Set(Utc::now()),
            finished_at: Set(None),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        let mut query = participants::Entity::find().order_by_asc(participants::Column::Id);
        if !prize.is_special {
            query = query.filter(participants::Column::IsActive.eq(true));
        }
        let candidates = query.all(txn).await?;

        let quota = usize::try_from(prize.quota).unwrap_or(0);
        let outcome = if candidates.is_empty() {
            DrawOutcome::NoCandidates
        } else if candidates.len() < quota {
            DrawOutcome::Shortfall
        } else {
            DrawOutcome::Completed
        };
        let winners = self.pick(candidates, quota);

        if !winners.is_empty() {
            let drawn_at = Utc::now();
            records::Entity::insert_many(winners.iter().map(|w| records::ActiveModel {
                session_id: Set(session.id),
                participant_id: Set(w.id),
                drawn_at: Set(drawn_at),
                ..Default::default()
            }))
            .exec(txn)
            .await?;

            // 特别奖不影响普通奖资格
            if !prize.is_special {
                participants::Entity::update_many()
                    .col_expr(participants::Column::IsActive, Expr::value(false))
                    .filter(participants::Column::Id.is_in(winners.iter().map(|w| w.id)))
                    .exec(txn)
                    .await?;
            }
        }

        let mut am = session.into_active_model();
        am.finished_at = Set(Some(Utc::now()));
        let session = am.update(txn).await?;

        Ok(PrizeResult {
            prize_id: prize.id,
            prize_name: prize.name.clone(),
            quota: prize.quota,
            is_special: prize.is_special,
            session_id: session.id,
            winners: winners.into_iter().map(Winner::from).collect(),
            outcome,
        })
    }

    fn pick(&self, candidates: Vec<participants::Model>, count: usize) -> Vec<participants::Model> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        select_winners(&mut *rng, candidates, count)
    }
}

#[async_trait]
impl DrawSequence for DrawService {
    async fn run_full_sequence(&self) -> AppResult<Vec<PrizeResult>> {
        DrawService::run_full_sequence(self).await
    }
}

/// 不放回抽样：每次从剩余池中等概率取出一个并移除
///
/// 取出数量为 `min(count, pool.len())`，返回顺序即抽出顺序。
pub fn select_winners<T, R: Rng + ?Sized>(rng: &mut R, mut pool: Vec<T>, count: usize) -> Vec<T> {
    let count = count.min(pool.len());
    let mut winners = Vec::with_capacity(count);
    while winners.len() < count {
        let idx = rng.gen_range(0..pool.len());
        winners.push(pool.swap_remove(idx));
    }
    winners
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_select_exact_quota_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool: Vec<u32> = (1..=10).collect();
        let winners = select_winners(&mut rng, pool.clone(), 4);

        assert_eq!(winners.len(), 4);
        let unique: HashSet<_> = winners.iter().collect();
        assert_eq!(unique.len(), 4);
        assert!(winners.iter().all(|w| pool.contains(w)));
    }

    #[test]
    fn test_select_shortfall_takes_everyone() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut winners = select_winners(&mut rng, vec![3, 1, 2], 5);
        winners.sort();
        assert_eq!(winners, vec![1, 2, 3]);
    }

    #[test]
    fn test_select_empty_pool_and_zero_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_winners::<u8, _>(&mut rng, vec![], 3).is_empty());
        assert!(select_winners(&mut rng, vec![1, 2], 0).is_empty());
    }

    #[test]
    fn test_select_is_reproducible_with_seed() {
        let a = select_winners(&mut StdRng::seed_from_u64(42), (0..50).collect::<Vec<_>>(), 5);
        let b = select_winners(&mut StdRng::seed_from_u64(42), (0..50).collect::<Vec<_>>(), 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_select_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut hits = [0u32; 4];
        let trials = 40_000;
        for _ in 0..trials {
            for w in select_winners(&mut rng, vec![0usize, 1, 2, 3], 2) {
                hits[w] += 1;
            }
        }
        // 每人期望 trials * 2 / 4 = 20000 次
        for h in hits {
            assert!((18_000..=22_000).contains(&h), "hits out of range: {h}");
        }
    }
}
