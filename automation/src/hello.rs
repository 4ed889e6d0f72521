use crate::{
    console::Console,
    input::{ActionError, Actuator, ClickCount},
    oracle::{ImageOracle, SearchArea},
    pattern::Pattern,
};
use std::{process::ExitCode, time::Duration};
use tracing::warn;

/// 演示程序默认查找的图案。
pub const DEFAULT_PATTERN: &str = "images/start_button.png";

/// 演示程序的三种结局。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelloOutcome {
    Clicked,
    /// 找到后、点击前消失。
    Lost,
    NotFound,
}

impl HelloOutcome {
    /// 只有中途丢失目标才以非零码退出。
    pub fn exit_code(self) -> ExitCode {
        match self {
            HelloOutcome::Lost => ExitCode::from(1),
            HelloOutcome::Clicked | HelloOutcome::NotFound => ExitCode::SUCCESS,
        }
    }
}

/// 查找一次图案，找到则单击。
pub fn find_and_click(
    oracle: &mut dyn ImageOracle,
    actuator: &mut dyn Actuator,
    console: &mut Console,
    pattern: &Pattern,
    similarity: f64,
    timeout: Duration,
) -> HelloOutcome {
    let found = match oracle.exists(pattern, SearchArea::Screen, similarity, timeout) {
        Ok(found) => found,
        Err(err) => {
            warn!(pattern = %pattern.name(), "查找图案失败: {err:#}");
            None
        }
    };
    let Some(found) = found else {
        console.info("Couldn't find the pattern in the beginning!");
        return HelloOutcome::NotFound;
    };

    match actuator.click(&found, ClickCount::Single) {
        Ok(()) => HelloOutcome::Clicked,
        Err(err) => {
            if let ActionError::Input(err) = &err {
                warn!("模拟输入失败: {err:#}");
            }
            console.error("Lost sight of pattern.");
            HelloOutcome::Lost
        }
    }
}
