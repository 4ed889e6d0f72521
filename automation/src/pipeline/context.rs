use crate::{
    config::AutomationConfig,
    console::Console,
    input::{ActionError, Actuator, ClickCount},
    oracle::{ImageOracle, Location, MatchResult, SearchArea},
    pattern::Pattern,
};
use tracing::warn;

/// 查找超时仍未命中时的提示。
pub const NOT_FOUND_NOTICE: &str = "Could not find the pattern in the beginning!";
/// 命中后、动作完成前目标消失时的提示。
pub const LOST_NOTICE: &str = "Lost sight of pattern.";

/// 运行上下文：把判定、输入、输出与配置打包交给各步骤使用。
///
/// 不缓存任何截图或命中结果，每次查找都重新询问判定器。
pub struct RunCtx<'a> {
    oracle: &'a mut dyn ImageOracle,
    actuator: &'a mut dyn Actuator,
    console: &'a mut Console,
    config: &'a AutomationConfig,
}

impl<'a> RunCtx<'a> {
    pub fn new(
        oracle: &'a mut dyn ImageOracle,
        actuator: &'a mut dyn Actuator,
        console: &'a mut Console,
        config: &'a AutomationConfig,
    ) -> Self {
        Self {
            oracle,
            actuator,
            console,
            config,
        }
    }

    pub fn config(&self) -> &AutomationConfig {
        self.config
    }

    pub fn console(&mut self) -> &mut Console {
        &mut *self.console
    }

    /// 查找图案并单击/双击其中心。
    ///
    /// 只查询一次判定器（内部可轮询至超时），不重试。未找到与中途丢失
    /// 输出不同的提示，但都返回 `false`。
    pub fn execute_step(&mut self, pattern: &Pattern, count: ClickCount, label: &str) -> bool {
        let Some(found) = self.find(pattern, SearchArea::Screen) else {
            self.console.error(NOT_FOUND_NOTICE);
            return false;
        };

        match self.actuator.click(&found, count) {
            Ok(()) => {
                if !label.is_empty() {
                    self.console.info(format_args!("\t Clicked {label}."));
                }
                true
            }
            Err(err) => {
                self.report_action_error(&found, err);
                false
            }
        }
    }

    /// 先找到 `anchor`，再只在其右侧查找 `handle`，然后把 `handle` 拖到
    /// 其左上角下方 `drag_offset` 处。任一查找失败都视为丢失目标。
    pub fn execute_drag(&mut self, anchor: &Pattern, handle: &Pattern, label: &str) -> bool {
        let Some(anchor_match) = self.find(anchor, SearchArea::Screen) else {
            self.console.error(LOST_NOTICE);
            return false;
        };
        let Some(handle_match) = self.find(handle, SearchArea::RightOf(anchor_match.region))
        else {
            self.console.error(LOST_NOTICE);
            return false;
        };

        let top_left = handle_match.top_left();
        let drop = Location::new(top_left.x, top_left.y + self.config.drag_offset);
        match self.actuator.drag_drop(&handle_match, drop) {
            Ok(()) => {
                self.console
                    .info(format_args!("\t Dragged and dropped {label}."));
                true
            }
            Err(err) => {
                self.report_action_error(&handle_match, err);
                false
            }
        }
    }

    fn find(&mut self, pattern: &Pattern, area: SearchArea) -> Option<MatchResult> {
        let similarity = pattern.similarity_or(self.config.similarity);
        match self
            .oracle
            .exists(pattern, area, similarity, self.config.timeout())
        {
            Ok(found) => found,
            Err(err) => {
                warn!(pattern = %pattern.name(), "查找图案失败: {err:#}");
                None
            }
        }
    }

    fn report_action_error(&mut self, target: &MatchResult, err: ActionError) {
        if let ActionError::Input(err) = &err {
            warn!(pattern = %target.pattern.name(), "模拟输入失败: {err:#}");
        }
        self.console.error(LOST_NOTICE);
    }
}
