use clap::ValueEnum;
use serde::Deserialize;
use tracing::{debug, info};

mod context;
pub mod gimp;
mod steps;
pub use context::*;
pub use steps::*;

/// 某一步失败后同一文件剩余步骤的处理方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// 尽力而为：继续执行剩余步骤，结果按位与汇总。
    #[default]
    Continue,
    /// 首个失败后放弃当前文件的剩余步骤。
    AbortFile,
}

/// 流水线：按固定顺序执行的步骤列表，描述一次完整的界面操作流程。
pub struct Pipeline {
    name: &'static str,
    steps: Vec<Box<dyn Step>>,
}

impl Pipeline {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    /// 追加一个步骤，返回自身以便链式调用。
    pub fn step(mut self, s: impl Step + 'static) -> Self {
        self.steps.push(Box::new(s));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.label())
    }

    /// 依次执行所有步骤，返回是否全部成功。
    ///
    /// 默认策略下失败不会中断后续步骤；`AbortFile` 策略下首个失败即停止。
    pub fn run(&self, ctx: &mut RunCtx<'_>) -> bool {
        let policy = ctx.config().on_step_failure;
        self.execute(ctx, policy)
    }

    /// 无视配置的失败策略，每一步都执行。用于收尾流程。
    pub fn run_all(&self, ctx: &mut RunCtx<'_>) -> bool {
        self.execute(ctx, FailurePolicy::Continue)
    }

    fn execute(&self, ctx: &mut RunCtx<'_>, policy: FailurePolicy) -> bool {
        let mut ok = true;
        for (i, step) in self.steps.iter().enumerate() {
            debug!(pipeline = self.name, "[step {:02}] {}", i, step.label());
            ok &= step.run(ctx);
            if !ok && policy == FailurePolicy::AbortFile {
                info!(
                    pipeline = self.name,
                    skipped = self.steps.len() - i - 1,
                    "步骤失败，放弃剩余步骤"
                );
                break;
            }
        }
        ok
    }
}
