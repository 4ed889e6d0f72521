use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// 安装 stderr 上的 fmt 订阅者，默认只输出 warn 及以上，可用 `RUST_LOG` 调整。
///
/// 重复调用是安全的：已有全局订阅者时直接忽略。
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
