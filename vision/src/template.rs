use crate::{VisionError, VisionResult, pyramid};
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// 粗搜层模板短边至少保留的像素数；更小的模板只做原分辨率匹配。
const MIN_COARSE_SIDE: u32 = 6;

/// 单一分辨率下的模板像素及其去均值统计量。
#[derive(Debug, Clone)]
pub(crate) struct Patch {
    luma: GrayImage,
    deviations: Vec<f64>,
    mean: f64,
    norm: f64,
}

impl Patch {
    fn new(luma: GrayImage) -> Self {
        let n = f64::from(luma.width()) * f64::from(luma.height());
        let mean = luma.as_raw().iter().map(|&p| f64::from(p)).sum::<f64>() / n;
        let deviations: Vec<f64> = luma.as_raw().iter().map(|&p| f64::from(p) - mean).collect();
        let norm = deviations.iter().map(|d| d * d).sum::<f64>().sqrt();
        Self {
            luma,
            deviations,
            mean,
            norm,
        }
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        self.luma.dimensions()
    }

    pub(crate) fn pixel_count(&self) -> f64 {
        f64::from(self.luma.width()) * f64::from(self.luma.height())
    }

    pub(crate) fn deviations(&self) -> &[f64] {
        &self.deviations
    }

    pub(crate) fn mean(&self) -> f64 {
        self.mean
    }

    pub(crate) fn norm(&self) -> f64 {
        self.norm
    }

    /// 纯色模板没有可供相关的纹理。
    pub(crate) fn is_flat(&self) -> bool {
        self.norm < 1e-6
    }
}

/// 预处理好的参考图片，可反复与多张截图匹配。
///
/// 去均值偏差与范数只计算一次。足够大且有纹理的模板额外保存一份缩小后的
/// 版本，供在截图金字塔的对应层上粗搜。
#[derive(Debug, Clone)]
pub struct Template {
    full: Patch,
    coarse: Option<(usize, Patch)>,
}

impl Template {
    /// 从磁盘加载，支持 `image` 能解码的任意格式。
    pub fn open(path: impl AsRef<Path>) -> VisionResult<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| VisionError::TemplateLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_image(&image)
    }

    pub fn from_image(image: &DynamicImage) -> VisionResult<Self> {
        Self::from_luma(image.to_luma8())
    }

    pub fn from_luma(luma: GrayImage) -> VisionResult<Self> {
        let (w, h) = luma.dimensions();
        if w == 0 || h == 0 {
            return Err(VisionError::EmptyTemplate);
        }
        let full = Patch::new(luma);
        let coarse = coarse_patch(&full);
        Ok(Self { full, coarse })
    }

    pub fn width(&self) -> u32 {
        self.full.luma.width()
    }

    pub fn height(&self) -> u32 {
        self.full.luma.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.full.dimensions()
    }

    pub(crate) fn full(&self) -> &Patch {
        &self.full
    }

    /// 粗搜所用的金字塔层号及该层的模板。
    pub(crate) fn coarse(&self) -> Option<(usize, &Patch)> {
        self.coarse.as_ref().map(|(level, patch)| (*level, patch))
    }
}

fn coarse_patch(full: &Patch) -> Option<(usize, Patch)> {
    if full.is_flat() {
        return None;
    }
    let (w, h) = full.dimensions();
    let short = w.min(h);
    let level = (1..=pyramid::MAX_LEVEL)
        .rev()
        .find(|&level| short >> level >= MIN_COARSE_SIDE)?;
    let patch = Patch::new(pyramid::shrink(&full.luma, level));
    (!patch.is_flat()).then_some((level, patch))
}
