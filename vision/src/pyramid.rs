use image::{GrayImage, Luma};

/// 金字塔最多向下缩小的层数，每层边长减半。
pub(crate) const MAX_LEVEL: usize = 2;

/// 按 2×2 块取平均缩小一半，奇数尺寸的最后一行/列丢弃。
pub(crate) fn halve(luma: &GrayImage) -> GrayImage {
    let (w, h) = luma.dimensions();
    let raw = luma.as_raw();
    let stride = w as usize;
    GrayImage::from_fn(w / 2, h / 2, |x, y| {
        let top = 2 * y as usize * stride + 2 * x as usize;
        let bottom = top + stride;
        let sum = u32::from(raw[top])
            + u32::from(raw[top + 1])
            + u32::from(raw[bottom])
            + u32::from(raw[bottom + 1]);
        Luma([((sum + 2) / 4) as u8])
    })
}

/// 连续缩小 `level` 次。
pub(crate) fn shrink(luma: &GrayImage, level: usize) -> GrayImage {
    let mut out = luma.clone();
    for _ in 0..level {
        out = halve(&out);
    }
    out
}
