//! 抽奖流程状态机
//!
//! ```text
//! Idle --start--> Running --waitNext--> WaitingForNextPrize --nextRound--> Running
//! Running --pause--> Paused --resume--> Running
//! Running | WaitingForNextPrize --finish--> Finished
//! * --reset--> Idle
//! ```
//!
//! 转换规则是纯函数 [`transition`]，与计时 / 动画无关；
//! 非法转换返回 `InvalidTransition`，状态保持不变。

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DrawState {
    Idle,
    Running,
    Paused,
    WaitingForNextPrize,
    Finished,
}

impl fmt::Display for DrawState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawState::Idle => write!(f, "idle"),
            DrawState::Running => write!(f, "running"),
            DrawState::Paused => write!(f, "paused"),
            DrawState::WaitingForNextPrize => write!(f, "waiting_for_next_prize"),
            DrawState::Finished => write!(f, "finished"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawEvent {
    Start,
    Pause,
    Resume,
    WaitNext,
    NextRound,
    Finish,
    Reset,
}

impl fmt::Display for DrawEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawEvent::Start => write!(f, "start"),
            DrawEvent::Pause => write!(f, "pause"),
            DrawEvent::Resume => write!(f, "resume"),
            DrawEvent::WaitNext => write!(f, "wait_next"),
            DrawEvent::NextRound => write!(f, "next_round"),
            DrawEvent::Finish => write!(f, "finish"),
            DrawEvent::Reset => write!(f, "reset"),
        }
    }
}

pub fn transition(from: DrawState, event: DrawEvent) -> AppResult<DrawState> {
    use DrawEvent::*;
    use DrawState::*;

    match (from, event) {
        (_, Reset) => Ok(Idle),
        (Idle, Start) => Ok(Running),
        (Running, Pause) => Ok(Paused),
        (Paused, Resume) => Ok(Running),
        (Running, WaitNext) => Ok(WaitingForNextPrize),
        (WaitingForNextPrize, NextRound) => Ok(Running),
        (Running | WaitingForNextPrize, Finish) => Ok(Finished),
        _ => Err(AppError::InvalidTransition { from, event }),
    }
}

/// 持有当前状态的状态机
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMachine {
    state: DrawState,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: DrawState::Idle,
        }
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    /// 只检查不修改
    pub fn can(&self, event: DrawEvent) -> AppResult<()> {
        transition(self.state, event).map(|_| ())
    }

    pub fn apply(&mut self, event: DrawEvent) -> AppResult<DrawState> {
        self.state = transition(self.state, event)?;
        Ok(self.state)
    }

    pub fn start(&mut self) -> AppResult<DrawState> {
        self.apply(DrawEvent::Start)
    }

    pub fn pause(&mut self) -> AppResult<DrawState> {
        self.apply(DrawEvent::Pause)
    }

    pub fn resume(&mut self) -> AppResult<DrawState> {
        self.apply(DrawEvent::Resume)
    }

    pub fn wait_next(&mut self) -> AppResult<DrawState> {
        self.apply(DrawEvent::WaitNext)
    }

    pub fn next_round(&mut self) -> AppResult<DrawState> {
        self.apply(DrawEvent::NextRound)
    }

    pub fn finish(&mut self) -> AppResult<DrawState> {
        self.apply(DrawEvent::Finish)
    }

    pub fn reset(&mut self) -> DrawState {
        self.state = DrawState::Idle;
        self.state
    }
}
