//! 编排器依赖的外部协作者：特别奖轮盘动画与提示音

use std::time::Duration;

use rand::seq::SliceRandom;

use crate::error::AppResult;

/// 轮盘结束时的回调，参数为被选中的那一项
pub type RevealCallback = Box<dyn FnOnce(String) + Send + 'static>;

/// 特别奖揭晓动画
///
/// 接收有序的显示文字列表，展示结束后以其中一项调用 `on_finish`，只调用一次。
/// 展示过程不可中断。编排器不会传入空列表。
pub trait RevealAnimator: Send + Sync {
    fn spin(&self, items: Vec<String>, on_finish: RevealCallback);
}

/// 服务端轮盘：等待固定时长后随机停在一项上
pub struct WheelAnimator {
    duration: Duration,
}

impl WheelAnimator {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl RevealAnimator for WheelAnimator {
    fn spin(&self, items: Vec<String>, on_finish: RevealCallback) {
        let duration = self.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let chosen = {
                let mut rng = rand::thread_rng();
                items.choose(&mut rng).cloned()
            };
            match chosen {
                Some(item) => on_finish(item),
                None => log::warn!("Wheel spun with no items"),
            }
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    WheelStart,
    Winner,
}

/// 提示音，失败只记录日志，不影响揭晓
pub trait SoundCue: Send + Sync {
    fn play(&self, cue: Cue) -> AppResult<()>;
}

/// 无声实现，仅记录 debug 日志
pub struct LogCue;

impl SoundCue for LogCue {
    fn play(&self, cue: Cue) -> AppResult<()> {
        log::debug!("Sound cue: {cue:?}");
        Ok(())
    }
}
