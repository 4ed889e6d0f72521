//! 通过屏幕图案匹配与模拟鼠标输入驱动 GIMP 批量导出图片。
//!
//! - `oracle`：在超时内判断图案是否出现在屏幕上、出现在哪里。
//! - `input`：在命中位置单击、双击或拖拽。
//! - `pipeline`：固定顺序的步骤流水线，汇总每个文件的成败。
//! - `session`：逐个打开文件并执行流水线，最后执行一次清理。
//!
//! 真实桌面后端位于 `desktop` 模块，需要启用 `desktop` 特性。

pub mod capture;
pub mod config;
pub mod console;
#[cfg(feature = "desktop")]
pub mod desktop;
pub mod error;
pub mod files;
pub mod hello;
pub mod input;
pub mod logging;
pub mod opener;
pub mod oracle;
pub mod pattern;
pub mod pipeline;
pub mod session;

pub use config::{AutomationConfig, load_config};
pub use console::Console;
pub use error::{ConfigError, SessionError};
pub use input::{ActionError, Actuator, ClickCount};
pub use oracle::{ImageOracle, Location, MatchResult, ScreenOracle, SearchArea};
pub use pattern::Pattern;
pub use pipeline::{FailurePolicy, Pipeline, RunCtx, Step};
pub use session::{SessionDriver, SessionReport};
