use crate::error::ConfigError;
use crate::pipeline::FailurePolicy;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// 自动化运行参数，可由 JSON 文件提供，再由命令行覆盖。
///
/// 所有字段都有默认值，空对象 `{}` 即为合法配置。
#[derive(Debug, Clone, Deserialize)]
pub struct AutomationConfig {
    /// 图案与截图的最低相似度（0.0–1.0）。
    #[serde(default = "default_similarity")]
    pub similarity: f64,
    /// 每次查找图案时最多等待的秒数。
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// 等待期间两次截图之间的间隔（毫秒）。
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// 拖拽终点相对命中区域左上角的垂直偏移（像素）。
    #[serde(default = "default_drag_offset")]
    pub drag_offset: i32,
    /// 参考图片所在目录，相对当前工作目录。
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
    /// 交互输入为空时使用的图片根目录；缺省为桌面下的 `Images`。
    #[serde(default)]
    pub default_folder: Option<PathBuf>,
    /// 某一步失败后是否继续执行同一文件的剩余步骤。
    #[serde(default)]
    pub on_step_failure: FailurePolicy,
    /// 移动鼠标后、按下按键前的停顿（毫秒）。
    #[serde(default = "default_action_delay_ms")]
    pub action_delay_ms: u64,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            similarity: default_similarity(),
            timeout_secs: default_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            drag_offset: default_drag_offset(),
            images_dir: default_images_dir(),
            default_folder: None,
            on_step_failure: FailurePolicy::default(),
            action_delay_ms: default_action_delay_ms(),
        }
    }
}

impl AutomationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn action_delay(&self) -> Duration {
        Duration::from_millis(self.action_delay_ms)
    }

    /// 交互输入为空时的回退目录。
    pub fn default_folder(&self) -> PathBuf {
        self.default_folder.clone().unwrap_or_else(|| {
            dirs::desktop_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Images")
        })
    }

    /// 校验取值范围，命令行覆盖之后也应再调用一次。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.similarity) {
            return Err(ConfigError::Similarity(self.similarity));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::PollInterval);
        }
        Ok(())
    }
}

fn default_similarity() -> f64 {
    0.8
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_poll_interval_ms() -> u64 {
    200
}

fn default_drag_offset() -> i32 {
    100
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_action_delay_ms() -> u64 {
    60
}

/// 从 JSON 文件读取并校验配置。
pub fn load_config(path: impl AsRef<Path>) -> Result<AutomationConfig> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("无法读取配置文件 {}", path.display()))?;
    let cfg: AutomationConfig = serde_json::from_str(&text)
        .with_context(|| format!("配置文件格式错误 {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
