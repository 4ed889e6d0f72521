use crate::pipeline::RunCtx;

/// 所有步骤类型的统一接口。
///
/// 步骤失败只影响返回值，不会中断进程；是否继续由流水线决定。
pub trait Step {
    fn run(&self, ctx: &mut RunCtx<'_>) -> bool;

    /// 用于进度输出的说明文字。
    fn label(&self) -> &str;
}

pub mod click_pattern;
pub mod drag_beside;

pub use click_pattern::ClickPattern;
pub use drag_beside::DragBeside;
