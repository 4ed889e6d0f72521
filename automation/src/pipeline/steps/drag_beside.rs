use super::Step;
use crate::{pattern::Pattern, pipeline::RunCtx};

/// 拖动位于 `anchor` 右侧的 `handle`（例如下拉列表旁的滚动条）。
pub struct DragBeside {
    pub anchor: Pattern,
    pub handle: Pattern,
    pub label: String,
}

impl DragBeside {
    pub fn new(anchor: Pattern, handle: Pattern, label: impl Into<String>) -> Self {
        Self {
            anchor,
            handle,
            label: label.into(),
        }
    }
}

impl Step for DragBeside {
    fn run(&self, ctx: &mut RunCtx<'_>) -> bool {
        ctx.execute_drag(&self.anchor, &self.handle, &self.label)
    }

    fn label(&self) -> &str {
        &self.label
    }
}
