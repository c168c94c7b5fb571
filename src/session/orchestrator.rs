use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use utoipa::ToSchema;

use super::collaborators::{Cue, RevealAnimator, SoundCue};
use super::reveal::{RevealLine, RevealLineKind, RevealScript};
use super::state_machine::{DrawEvent, DrawState, StateMachine};
use crate::error::AppResult;
use crate::models::{PrizeResult, Winner};

/// 一次性算出所有奖项结果的来源 (抽奖引擎)
#[async_trait]
pub trait DrawSequence: Send + Sync {
    async fn run_full_sequence(&self) -> AppResult<Vec<PrizeResult>>;
}

/// 当前奖项的揭晓阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    /// 尚未开始
    Idle,
    /// 逐行揭晓中
    Lines,
    /// 等待特别奖轮盘回调
    AwaitingWheel,
    /// 本奖项已揭晓完毕
    Done,
}

/// 对外展示的会话快照
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionSnapshot {
    pub state: DrawState,
    pub phase: RevealPhase,
    pub prize_index: usize,
    pub total_prizes: usize,
    pub current_prize: Option<PrizeResult>,
    /// 下一行的下标，暂停期间保持不变
    pub next_line: usize,
    /// 当前奖项已揭晓的行
    pub revealed_lines: Vec<RevealLine>,
    pub results: Vec<PrizeResult>,
}

struct Presentation {
    machine: StateMachine,
    results: Vec<PrizeResult>,
    prize_index: usize,
    phase: RevealPhase,
    script: Option<RevealScript>,
    next_line: usize,
    revealed: Vec<RevealLine>,
    timer: Option<JoinHandle<()>>,
    // 计时器代数，取消后旧计时器醒来直接退出
    timer_epoch: u64,
    // 每次 start / reset 递增，过期的轮盘回调据此丢弃
    run_id: u64,
}

impl Presentation {
    fn new() -> Self {
        Self {
            machine: StateMachine::new(),
            results: Vec::new(),
            prize_index: 0,
            phase: RevealPhase::Idle,
            script: None,
            next_line: 0,
            revealed: Vec::new(),
            timer: None,
            timer_epoch: 0,
            run_id: 0,
        }
    }

    fn cancel_timer(&mut self) {
        self.timer_epoch += 1;
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }

    fn current(&self) -> Option<&PrizeResult> {
        self.results.get(self.prize_index)
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.machine.state(),
            phase: self.phase,
            prize_index: self.prize_index,
            total_prizes: self.results.len(),
            current_prize: self.current().cloned(),
            next_line: self.next_line,
            revealed_lines: self.revealed.clone(),
            results: self.results.clone(),
        }
    }
}

/// 抽奖会话编排
///
/// `start` 调用一次引擎算出全部奖项结果，之后只按操作员节奏逐个奖项回放：
/// 普通奖逐行揭晓；特别奖先交给轮盘，回调选中一人后只揭晓这一人。
/// 揭晓计时器只由编排器持有，暂停即取消计时器并保留下一行下标。
#[derive(Clone)]
pub struct DrawSessionOrchestrator {
    engine: Arc<dyn DrawSequence>,
    animator: Arc<dyn RevealAnimator>,
    sound: Arc<dyn SoundCue>,
    line_interval: Duration,
    inner: Arc<Mutex<Presentation>>,
}

impl DrawSessionOrchestrator {
    pub fn new(
        engine: Arc<dyn DrawSequence>,
        animator: Arc<dyn RevealAnimator>,
        sound: Arc<dyn SoundCue>,
        line_interval: Duration,
    ) -> Self {
        Self {
            engine,
            animator,
            sound,
            line_interval,
            inner: Arc::new(Mutex::new(Presentation::new())),
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn state(&self) -> DrawState {
        self.inner.lock().await.machine.state()
    }

    /// 抽出全部奖项并开始揭晓第一个
    ///
    /// 引擎失败时状态保持 Idle。
    pub async fn start(&self) -> AppResult<SessionSnapshot> {
        let mut p = self.inner.lock().await;
        p.machine.can(DrawEvent::Start)?;

        let results = self.engine.run_full_sequence().await?;

        p.machine.start()?;
        p.run_id += 1;
        p.results = results;
        p.prize_index = 0;
        log::info!("Draw session started with {} prize(s)", p.results.len());

        if p.results.is_empty() {
            p.machine.finish()?;
            p.phase = RevealPhase::Done;
        } else {
            self.begin_prize(&mut p);
        }
        Ok(p.snapshot())
    }

    pub async fn pause(&self) -> AppResult<SessionSnapshot> {
        let mut p = self.inner.lock().await;
        p.machine.pause()?;
        p.cancel_timer();
        Ok(p.snapshot())
    }

    pub async fn resume(&self) -> AppResult<SessionSnapshot> {
        let mut p = self.inner.lock().await;
        p.machine.resume()?;
        // 轮盘未结束时由回调负责排程
        if p.phase == RevealPhase::Lines {
            self.schedule(&mut p);
        }
        Ok(p.snapshot())
    }

    pub async fn next_round(&self) -> AppResult<SessionSnapshot> {
        let mut p = self.inner.lock().await;
        p.machine.next_round()?;
        p.prize_index += 1;

        if p.prize_index >= p.results.len() {
            p.machine.finish()?;
            p.phase = RevealPhase::Done;
            p.script = None;
            p.revealed.clear();
            p.next_line = 0;
            log::info!("Draw session finished after {} prize(s)", p.results.len());
        } else {
            self.begin_prize(&mut p);
        }
        Ok(p.snapshot())
    }

    pub async fn finish(&self) -> AppResult<SessionSnapshot> {
        let mut p = self.inner.lock().await;
        p.machine.finish()?;
        p.cancel_timer();
        p.phase = RevealPhase::Done;
        log::info!(
            "Draw session finished by operator at prize {}/{}",
            p.prize_index + 1,
            p.results.len()
        );
        Ok(p.snapshot())
    }

    /// 回到 Idle，丢弃已算出的结果 (已提交的抽奖记录不受影响)
    pub async fn reset(&self) -> SessionSnapshot {
        let mut p = self.inner.lock().await;
        p.machine.reset();
        p.cancel_timer();
        p.run_id += 1;
        p.results.clear();
        p.prize_index = 0;
        p.phase = RevealPhase::Idle;
        p.script = None;
        p.next_line = 0;
        p.revealed.clear();
        p.snapshot()
    }

    fn begin_prize(&self, p: &mut Presentation) {
        p.cancel_timer();
        p.revealed.clear();
        p.next_line = 0;

        let Some(result) = p.current().cloned() else {
            return;
        };

        if result.is_special && !result.winners.is_empty() {
            p.phase = RevealPhase::AwaitingWheel;
            p.script = None;
            self.cue(Cue::WheelStart);

            let items = wheel_labels(&result.winners);
            let me = self.clone();
            let run_id = p.run_id;
            let prize_index = p.prize_index;
            let handle = Handle::current();
            self.animator.spin(
                items,
                Box::new(move |chosen| {
                    handle.spawn(async move {
                        me.on_wheel_stopped(run_id, prize_index, chosen).await;
                    });
                }),
            );
        } else {
            p.script = Some(RevealScript::for_prize(&result));
            p.phase = RevealPhase::Lines;
            self.schedule(p);
        }
    }

    async fn on_wheel_stopped(&self, run_id: u64, prize_index: usize, chosen: String) {
        let mut p = self.inner.lock().await;
        if p.run_id != run_id
            || p.prize_index != prize_index
            || p.phase != RevealPhase::AwaitingWheel
        {
            log::debug!("Ignoring stale wheel callback: {chosen}");
            return;
        }

        let Some(result) = p.current().cloned() else {
            return;
        };
        let position = wheel_labels(&result.winners)
            .iter()
            .position(|label| *label == chosen);
        let winner = match position.and_then(|i| result.winners.get(i)) {
            Some(w) => w.clone(),
            None => {
                log::warn!("Wheel stopped on unknown item `{chosen}`, using first winner");
                match result.winners.first() {
                    Some(w) => w.clone(),
                    None => return,
                }
            }
        };

        log::info!(
            "Special prize {} wheel stopped on participant {}",
            result.prize_name,
            winner.id
        );
        p.script = Some(RevealScript::for_chosen(&result, &winner));
        p.next_line = 0;
        p.phase = RevealPhase::Lines;

        // 暂停中则等 resume 再排程
        if p.machine.state() == DrawState::Running {
            self.schedule(&mut p);
        }
    }

    fn schedule(&self, p: &mut Presentation) {
        p.cancel_timer();
        let epoch = p.timer_epoch;
        let interval = self.line_interval;
        let me = self.clone();

        p.timer = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let mut p = me.inner.lock().await;
                if p.timer_epoch != epoch {
                    return;
                }
                if !me.advance_line(&mut p) {
                    p.timer = None;
                    return;
                }
            }
        }));
    }

    /// 揭晓下一行，返回是否还有后续行
    fn advance_line(&self, p: &mut Presentation) -> bool {
        if p.machine.state() != DrawState::Running || p.phase != RevealPhase::Lines {
            return false;
        }
        let (line, total) = match p.script.as_ref() {
            Some(script) => (script.line(p.next_line), script.len()),
            None => return false,
        };

        if let Some(line) = line {
            if line.kind == RevealLineKind::Winner {
                self.cue(Cue::Winner);
            }
            p.revealed.push(line);
            p.next_line += 1;
            if p.next_line < total {
                return true;
            }
        }

        p.phase = RevealPhase::Done;
        if let Err(e) = p.machine.wait_next() {
            log::warn!("Could not enter waiting state after reveal: {e}");
        }
        if let Some(result) = p.current() {
            log::info!("Prize revealed: {} ({} line(s))", result.prize_name, p.revealed.len());
        }
        false
    }

    fn cue(&self, cue: Cue) {
        if let Err(e) = self.sound.play(cue) {
            log::warn!("Sound cue {cue:?} failed: {e}");
        }
    }
}

/// 轮盘上的文字，与 `winners` 一一对应
///
/// 显示名重复时追加参与者 ID，保证回调能唯一对应回中奖者。
fn wheel_labels(winners: &[Winner]) -> Vec<String> {
    let names: Vec<String> = winners.iter().map(Winner::display_name).collect();
    names
        .iter()
        .zip(winners)
        .map(|(name, w)| {
            if names.iter().filter(|n| *n == name).count() > 1 {
                format!("{name} #{}", w.id)
            } else {
                name.clone()
            }
        })
        .collect()
}
