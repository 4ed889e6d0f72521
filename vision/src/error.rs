use std::path::PathBuf;
use thiserror::Error;

/// 准备模板时可能出现的错误。
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("无法加载模板图片 {}", path.display())]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("模板图片没有像素")]
    EmptyTemplate,
}
