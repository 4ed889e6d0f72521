use std::{io, path::PathBuf};
use thiserror::Error;

/// 配置取值不合法。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("相似度必须位于 0.0–1.0 之间，当前为 {0}")]
    Similarity(f64),

    #[error("轮询间隔必须大于 0 毫秒")]
    PollInterval,
}

/// 会话级别的致命错误，出现时整个进程以退出码 1 结束。
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("无法用默认程序打开 {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("图片目录下缺少 Input 文件夹: {}", .0.display())]
    MissingInput(PathBuf),
}
