//! 单个奖项的揭晓脚本：一行标题 + 每位中奖者一行 (+ 名额不足 / 无人可抽的提示)
//!
//! 行在读取时才生成，编排器只保存下一行的下标，暂停后从同一下标继续。

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{DrawOutcome, PrizeResult, Winner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RevealLineKind {
    Header,
    Winner,
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RevealLine {
    pub kind: RevealLineKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealScript {
    header: String,
    winners: Vec<Winner>,
    notice: Option<String>,
}

impl RevealScript {
    pub fn for_prize(result: &PrizeResult) -> Self {
        let notice = match result.outcome {
            DrawOutcome::Completed => None,
            DrawOutcome::Shortfall => Some(format!(
                "Only {} eligible candidate(s) for {} place(s); all of them win",
                result.winners.len(),
                result.quota
            )),
            DrawOutcome::NoCandidates => Some("No eligible candidates".to_string()),
        };

        Self {
            header: header_text(result),
            winners: result.winners.clone(),
            notice,
        }
    }

    /// 特别奖轮盘停下后，只揭晓被选中的那一位
    pub fn for_chosen(result: &PrizeResult, chosen: &Winner) -> Self {
        Self {
            header: header_text(result),
            winners: vec![chosen.clone()],
            notice: None,
        }
    }

    pub fn len(&self) -> usize {
        1 + self.winners.len() + usize::from(self.notice.is_some())
    }

    pub fn line(&self, index: usize) -> Option<RevealLine> {
        if index == 0 {
            return Some(RevealLine {
                kind: RevealLineKind::Header,
                text: self.header.clone(),
                winner_id: None,
            });
        }

        if let Some(w) = self.winners.get(index - 1) {
            return Some(RevealLine {
                kind: RevealLineKind::Winner,
                text: format!("{}. {}", index, w.display_name()),
                winner_id: Some(w.id),
            });
        }

        if index == self.winners.len() + 1 {
            return self.notice.as_ref().map(|text| RevealLine {
                kind: RevealLineKind::Notice,
                text: text.clone(),
                winner_id: None,
            });
        }

        None
    }

    /// 从 `start` 开始依次生成剩余各行
    pub fn lines_from(&self, start: usize) -> impl Iterator<Item = RevealLine> + '_ {
        (start..self.len()).filter_map(move |i| self.line(i))
    }
}

fn header_text(result: &PrizeResult) -> String {
    if result.is_special {
        format!("[Special] {} (quota {})", result.prize_name, result.quota)
    } else {
        format!("{} (quota {})", result.prize_name, result.quota)
    }
}
