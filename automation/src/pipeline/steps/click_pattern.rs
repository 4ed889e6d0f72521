use super::Step;
use crate::{input::ClickCount, pattern::Pattern, pipeline::RunCtx};

/// 在整屏范围查找图案并点击其中心。
pub struct ClickPattern {
    pub pattern: Pattern,
    pub count: ClickCount,
    pub label: String,
}

impl ClickPattern {
    pub fn once(pattern: Pattern, label: impl Into<String>) -> Self {
        Self {
            pattern,
            count: ClickCount::Single,
            label: label.into(),
        }
    }

    pub fn twice(pattern: Pattern, label: impl Into<String>) -> Self {
        Self {
            pattern,
            count: ClickCount::Double,
            label: label.into(),
        }
    }
}

impl Step for ClickPattern {
    fn run(&self, ctx: &mut RunCtx<'_>) -> bool {
        ctx.execute_step(&self.pattern, self.count, &self.label)
    }

    fn label(&self) -> &str {
        &self.label
    }
}
