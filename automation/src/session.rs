use crate::{error::SessionError, opener::FileOpener, pipeline::Pipeline, pipeline::RunCtx};
use std::path::{Path, PathBuf};
use tracing::info;

/// 一次会话的汇总，仅用于输出与日志，不做持久化。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub exported: Vec<String>,
    pub failed: Vec<String>,
}

/// 逐个文件执行转换流水线，最后执行一次清理流水线。
pub struct SessionDriver<'a> {
    opener: &'a mut dyn FileOpener,
    convert: &'a Pipeline,
    cleanup: &'a Pipeline,
}

impl<'a> SessionDriver<'a> {
    pub fn new(opener: &'a mut dyn FileOpener, convert: &'a Pipeline, cleanup: &'a Pipeline) -> Self {
        Self {
            opener,
            convert,
            cleanup,
        }
    }

    /// 处理全部文件。
    ///
    /// 任一文件无法打开即返回 [`SessionError::Open`]，后续文件与清理流水线都不再执行。
    /// 单个文件的步骤失败只体现在报告中。清理流水线不受失败策略影响，每一步都会尝试。
    pub fn run(
        &mut self,
        ctx: &mut RunCtx<'_>,
        files: &[PathBuf],
    ) -> Result<SessionReport, SessionError> {
        let mut report = SessionReport::default();

        for path in files {
            let name = display_name(path);
            if let Err(source) = self.opener.open(path) {
                let console = ctx.console();
                console.error(format_args!(
                    "Cannot open file of the name {name} with default application."
                ));
                console.error("Exiting program.");
                return Err(SessionError::Open {
                    path: path.clone(),
                    source,
                });
            }

            ctx.console().info(format_args!("Opened {name}"));
            if self.convert.run(ctx) {
                ctx.console().info(format_args!("Exported {name}"));
                report.exported.push(name);
            } else {
                ctx.console().info(format_args!("Failed with {name}"));
                report.failed.push(name);
            }
        }

        if !self.cleanup.run_all(ctx) {
            info!(pipeline = self.cleanup.name(), "清理流程未全部完成");
        }
        info!(
            exported = report.exported.len(),
            failed = report.failed.len(),
            "会话结束"
        );
        Ok(report)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
