use crate::oracle::{Location, MatchResult};
use thiserror::Error;

/// 单击或双击。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickCount {
    Single,
    Double,
}

impl TryFrom<u8> for ClickCount {
    type Error = u8;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        match count {
            1 => Ok(ClickCount::Single),
            2 => Ok(ClickCount::Double),
            other => Err(other),
        }
    }
}

/// 执行输入动作时的失败。
#[derive(Debug, Error)]
pub enum ActionError {
    /// 查找时还在，执行动作前已从屏幕上消失。
    #[error("目标图案在执行动作前消失")]
    TargetLost,

    #[error(transparent)]
    Input(#[from] anyhow::Error),
}

/// 模拟输入接口。
///
/// 实现应在动作前确认目标仍在原处，否则返回 [`ActionError::TargetLost`]。
pub trait Actuator {
    fn click(&mut self, target: &MatchResult, count: ClickCount) -> Result<(), ActionError>;

    /// 从 `from` 的点击位置按下左键，拖到 `to` 后松开。
    fn drag_drop(&mut self, from: &MatchResult, to: Location) -> Result<(), ActionError>;
}
