use crate::{Region, Template, pyramid, template::Patch};
use image::{GrayImage, ImageBuffer, Luma, RgbaImage};
use imageproc::template_matching::find_extremes;
use rayon::prelude::*;

/// 粗搜后保留、回到原分辨率细化的候选位置数。
const CANDIDATES: usize = 8;

/// 金字塔中的一层：灰度像素及其积分图（求和、平方和）。
struct Layer {
    luma: GrayImage,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl Layer {
    fn new(luma: GrayImage) -> Self {
        let (w, h) = luma.dimensions();
        let stride = w as usize + 1;
        let mut sum = vec![0u64; stride * (h as usize + 1)];
        let mut sum_sq = vec![0u64; stride * (h as usize + 1)];
        let raw = luma.as_raw();
        for y in 0..h as usize {
            let mut row = 0u64;
            let mut row_sq = 0u64;
            for x in 0..w as usize {
                let p = u64::from(raw[y * w as usize + x]);
                row += p;
                row_sq += p * p;
                sum[(y + 1) * stride + x + 1] = sum[y * stride + x + 1] + row;
                sum_sq[(y + 1) * stride + x + 1] = sum_sq[y * stride + x + 1] + row_sq;
            }
        }
        Self { luma, sum, sum_sq }
    }

    fn window_sums(&self, x: u32, y: u32, w: u32, h: u32) -> (f64, f64) {
        let stride = self.luma.width() as usize + 1;
        let (x0, y0) = (x as usize, y as usize);
        let (x1, y1) = (x0 + w as usize, y0 + h as usize);
        let area = |table: &[u64]| {
            (table[y1 * stride + x1] + table[y0 * stride + x0]) as f64
                - (table[y0 * stride + x1] + table[y1 * stride + x0]) as f64
        };
        (area(&self.sum), area(&self.sum_sq))
    }
}

/// 准备好的截图：原分辨率层加上逐级减半的金字塔层。
pub struct Haystack {
    layers: Vec<Layer>,
}

impl Haystack {
    pub fn from_rgba(image: &RgbaImage) -> Self {
        Self::from_luma(image::imageops::grayscale(image))
    }

    pub fn from_luma(luma: GrayImage) -> Self {
        let mut layers = vec![Layer::new(luma)];
        while layers.len() <= pyramid::MAX_LEVEL {
            let last = &layers[layers.len() - 1].luma;
            if last.width() < 2 || last.height() < 2 {
                break;
            }
            let next = pyramid::halve(last);
            layers.push(Layer::new(next));
        }
        Self { layers }
    }

    pub fn width(&self) -> u32 {
        self.full().luma.width()
    }

    pub fn height(&self) -> u32 {
        self.full().luma.height()
    }

    /// 整张图对应的区域，原点在左上角。
    pub fn bounds(&self) -> Region {
        Region::new(0, 0, self.width(), self.height())
    }

    fn full(&self) -> &Layer {
        &self.layers[0]
    }
}

/// 模板的最佳放置位置。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateMatch {
    /// 截图像素坐标中的位置。
    pub region: Region,
    /// 相关得分，范围 `[-1.0, 1.0]`。
    pub score: f64,
}

impl TemplateMatch {
    pub fn center(&self) -> (i32, i32) {
        self.region.center()
    }
}

/// 模板左上角放在 `(x, y)` 时的相关得分。放置位置必须完全落在截图内。
pub fn score_at(haystack: &Haystack, template: &Template, x: u32, y: u32) -> f64 {
    correlate(haystack.full(), template.full(), x, y)
}

fn correlate(layer: &Layer, patch: &Patch, x: u32, y: u32) -> f64 {
    let (tw, th) = patch.dimensions();
    debug_assert!(x + tw <= layer.luma.width() && y + th <= layer.luma.height());

    let n = patch.pixel_count();
    let (sum, sum_sq) = layer.window_sums(x, y, tw, th);
    let variance_term = (sum_sq - sum * sum / n).max(0.0);

    if patch.is_flat() {
        if variance_term > 1e-6 * n {
            return 0.0;
        }
        return 1.0 - (sum / n - patch.mean()).abs() / 255.0;
    }
    if variance_term < 1e-6 {
        return 0.0;
    }

    let raw = layer.luma.as_raw();
    let hw = layer.luma.width() as usize;
    let deviations = patch.deviations();
    let mut numerator = 0.0;
    for ty in 0..th as usize {
        let row = &raw[(y as usize + ty) * hw + x as usize..][..tw as usize];
        let dev_row = &deviations[ty * tw as usize..][..tw as usize];
        numerator += row
            .iter()
            .zip(dev_row)
            .map(|(&p, &d)| f64::from(p) * d)
            .sum::<f64>();
    }

    (numerator / (patch.norm() * variance_term.sqrt())).clamp(-1.0, 1.0)
}

/// 计算 `patch` 在 `area` 内每个放置位置的得分，按行优先排列，各行并行计算。
///
/// 调用方保证 `area` 在该层范围内且放得下 `patch`。
fn scan(layer: &Layer, patch: &Patch, area: Region) -> (u32, u32, Vec<f32>) {
    let (pw, ph) = patch.dimensions();
    let cols = area.width - pw + 1;
    let rows = area.height - ph + 1;
    let (ox, oy) = (area.x as u32, area.y as u32);

    let mut scores = vec![0f32; cols as usize * rows as usize];
    scores
        .par_chunks_mut(cols as usize)
        .enumerate()
        .for_each(|(cy, row)| {
            for (cx, score) in row.iter_mut().enumerate() {
                *score = correlate(layer, patch, ox + cx as u32, oy + cy as u32) as f32;
            }
        });
    (cols, rows, scores)
}

/// 在 `roi`（为 `None` 时取整张图）内找模板的最佳放置位置。
///
/// `roi` 先裁剪到截图范围内；剩余部分放不下模板时返回 `None`。
pub fn find_best(
    haystack: &Haystack,
    template: &Template,
    roi: Option<Region>,
) -> Option<TemplateMatch> {
    let area = match roi {
        Some(roi) => roi.intersect(&haystack.bounds())?,
        None => haystack.bounds(),
    };
    let (tw, th) = template.dimensions();
    if tw > area.width || th > area.height {
        return None;
    }

    let (x, y, score) = match coarse_candidates(haystack, template, area) {
        Some((step, candidates)) => refine(haystack.full(), template.full(), area, step, &candidates)?,
        None => exhaustive(haystack.full(), template.full(), area)?,
    };
    Some(TemplateMatch {
        region: Region::new(x as i32, y as i32, tw, th),
        score,
    })
}

fn exhaustive(layer: &Layer, patch: &Patch, area: Region) -> Option<(u32, u32, f64)> {
    let (cols, rows, scores) = scan(layer, patch, area);
    let scores: ImageBuffer<Luma<f32>, Vec<f32>> = ImageBuffer::from_raw(cols, rows, scores)?;
    let extremes = find_extremes(&scores);
    let (bx, by) = extremes.max_value_location;
    Some((
        area.x as u32 + bx,
        area.y as u32 + by,
        f64::from(extremes.max_value),
    ))
}

/// 在模板对应的金字塔层上扫描 `area`，取互不相邻的若干最高分位置，
/// 换算回原分辨率坐标。返回值附带该层一个像素对应的原分辨率步长。
fn coarse_candidates(
    haystack: &Haystack,
    template: &Template,
    area: Region,
) -> Option<(u32, Vec<(u32, u32)>)> {
    let (level, patch) = template.coarse()?;
    let layer = haystack.layers.get(level)?;

    let x0 = area.x as u32 >> level;
    let y0 = area.y as u32 >> level;
    let x1 = area.right() as u32 >> level;
    let y1 = area.bottom() as u32 >> level;
    let coarse_area = Region::new(x0 as i32, y0 as i32, x1 - x0, y1 - y0);
    let (pw, ph) = patch.dimensions();
    if pw > coarse_area.width || ph > coarse_area.height {
        return None;
    }

    let (cols, _, scores) = scan(layer, patch, coarse_area);
    let by_score = |a: &usize, b: &usize| scores[*b].total_cmp(&scores[*a]);
    let mut ranked: Vec<usize> = (0..scores.len()).collect();
    let keep = CANDIDATES * 32;
    if ranked.len() > keep {
        ranked.select_nth_unstable_by(keep, by_score);
        ranked.truncate(keep);
    }
    ranked.sort_unstable_by(by_score);

    let cols = cols as usize;
    let mut picked: Vec<(u32, u32)> = Vec::with_capacity(CANDIDATES);
    for index in ranked {
        let (cx, cy) = ((index % cols) as u32, (index / cols) as u32);
        if picked
            .iter()
            .any(|&(px, py)| px.abs_diff(cx) <= 1 && py.abs_diff(cy) <= 1)
        {
            continue;
        }
        picked.push((cx, cy));
        if picked.len() == CANDIDATES {
            break;
        }
    }

    let step = 1u32 << level;
    let candidates = picked
        .into_iter()
        .map(|(cx, cy)| ((x0 + cx) * step, (y0 + cy) * step))
        .collect();
    Some((step, candidates))
}

/// 在每个候选附近、左右上下各一个粗搜像素的范围内逐像素计算，取最高分。
fn refine(
    layer: &Layer,
    patch: &Patch,
    area: Region,
    step: u32,
    candidates: &[(u32, u32)],
) -> Option<(u32, u32, f64)> {
    let (pw, ph) = patch.dimensions();
    let (min_x, min_y) = (area.x as u32, area.y as u32);
    let max_x = min_x + area.width - pw;
    let max_y = min_y + area.height - ph;

    let mut best: Option<(u32, u32, f64)> = None;
    for &(cx, cy) in candidates {
        let xs = cx.saturating_sub(step).max(min_x)..=(cx + 2 * step).min(max_x);
        let ys = cy.saturating_sub(step).max(min_y)..=(cy + 2 * step).min(max_y);
        for y in ys {
            for x in xs.clone() {
                let score = correlate(layer, patch, x, y);
                if best.is_none_or(|(_, _, top)| score > top) {
                    best = Some((x, y, score));
                }
            }
        }
    }
    best
}
