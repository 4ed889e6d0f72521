use std::path::{Path, PathBuf};

/// 参考图案：一张界面控件截图，可选地带有独立的相似度阈值。
///
/// 未指定阈值时使用运行配置中的全局相似度。
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    image: PathBuf,
    similarity: Option<f64>,
}

impl Pattern {
    pub fn new(image: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            similarity: None,
        }
    }

    /// 为该图案单独指定相似度，超出 0.0–1.0 的值会被截断。
    pub fn similar(mut self, similarity: f64) -> Self {
        self.similarity = Some(similarity.clamp(0.0, 1.0));
        self
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    pub fn similarity_or(&self, fallback: f64) -> f64 {
        self.similarity.unwrap_or(fallback)
    }

    /// 日志中使用的简短名称（文件名主干）。
    pub fn name(&self) -> String {
        self.image
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.image.display().to_string())
    }
}
