//! 在截图中定位界面控件的模板匹配。
//!
//! 截图与参考图片统一转为 8 位灰度后比较。得分为去均值归一化互相关
//! （即 `TM_CCOEFF_NORMED`），`1.0` 表示逐像素一致，接近 `0.0` 表示内容无关。
//! 多大的得分算"找到"由调用方决定。
//!
//! 较大的模板先在缩小的图像金字塔上粗搜，再回到原分辨率在少数候选附近细化，
//! 整屏查找的耗时因此远小于逐像素穷举。

mod error;
mod matcher;
mod pyramid;
mod region;
mod template;

pub use error::VisionError;
pub use matcher::{Haystack, TemplateMatch, find_best, score_at};
pub use region::Region;
pub use template::Template;

/// 本 crate 的结果类型。
pub type VisionResult<T> = Result<T, VisionError>;
