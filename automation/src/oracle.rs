use crate::capture::ScreenCapture;
use crate::pattern::Pattern;
use anyhow::{Context, Result};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};
use tracing::{debug, trace};
use vision::{Haystack, Region, Template};

/// 屏幕坐标系中的一个点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// 查找范围：整屏、某个区域内，或某个区域右侧的条带。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchArea {
    Screen,
    Within(Region),
    /// 从区域右边缘延伸到屏幕右边缘，高度与区域一致。
    RightOf(Region),
}

/// 一次命中：图案、命中区域（屏幕坐标）、得分及判定所用阈值。
///
/// 每次查询都重新计算，不做缓存：屏幕内容随时可能变化。
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub pattern: Pattern,
    pub region: Region,
    pub score: f64,
    pub similarity: f64,
}

impl MatchResult {
    /// 点击位置：命中区域中心。
    pub fn target(&self) -> Location {
        let (x, y) = self.region.center();
        Location::new(x, y)
    }

    pub fn top_left(&self) -> Location {
        Location::new(self.region.x, self.region.y)
    }
}

/// 图像判定接口：在超时前回答图案是否出现在屏幕上、出现在哪里。
///
/// - 返回 `Ok(None)` 表示超时仍未找到。
/// - 返回 `Err` 表示截图或模板加载等后端故障。
pub trait ImageOracle {
    fn exists(
        &mut self,
        pattern: &Pattern,
        area: SearchArea,
        similarity: f64,
        timeout: Duration,
    ) -> Result<Option<MatchResult>>;
}

/// 基于截屏轮询 + 模板匹配的判定实现。
///
/// 模板按路径缓存；截图与匹配结果每次轮询都重新获取。
pub struct ScreenOracle<C> {
    capture: C,
    poll_interval: Duration,
    templates: HashMap<PathBuf, Template>,
}

impl<C: ScreenCapture> ScreenOracle<C> {
    pub fn new(capture: C, poll_interval: Duration) -> Self {
        Self {
            capture,
            poll_interval,
            templates: HashMap::new(),
        }
    }

    /// 截图一次并匹配，不等待。
    pub fn locate_once(
        &mut self,
        pattern: &Pattern,
        area: SearchArea,
        similarity: f64,
    ) -> Result<Option<MatchResult>> {
        let frame = self.capture.capture().context("截屏失败")?;
        let template = cached_template(&mut self.templates, pattern.image())?;
        let haystack = Haystack::from_rgba(&frame.image);

        let roi = match area {
            SearchArea::Screen => None,
            SearchArea::Within(region) => Some(frame.to_pixels(region)),
            SearchArea::RightOf(region) => {
                match frame.to_pixels(region).right_of(&haystack.bounds()) {
                    Some(strip) => Some(strip),
                    None => {
                        trace!(pattern = %pattern.name(), "右侧没有可搜索的区域");
                        return Ok(None);
                    }
                }
            }
        };

        let Some(best) = vision::find_best(&haystack, template, roi) else {
            return Ok(None);
        };
        debug!(
            pattern = %pattern.name(),
            score = best.score,
            x = best.region.x,
            y = best.region.y,
            "模板匹配"
        );
        if best.score < similarity {
            return Ok(None);
        }

        Ok(Some(MatchResult {
            pattern: pattern.clone(),
            region: frame.to_screen(best.region),
            score: best.score,
            similarity,
        }))
    }
}

impl<C: ScreenCapture> ImageOracle for ScreenOracle<C> {
    fn exists(
        &mut self,
        pattern: &Pattern,
        area: SearchArea,
        similarity: f64,
        timeout: Duration,
    ) -> Result<Option<MatchResult>> {
        let start = Instant::now();
        loop {
            if let Some(found) = self.locate_once(pattern, area, similarity)? {
                return Ok(Some(found));
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                debug!(pattern = %pattern.name(), ?elapsed, "等待超时");
                return Ok(None);
            }
            thread::sleep(self.poll_interval.min(timeout - elapsed));
        }
    }
}

fn cached_template<'a>(
    cache: &'a mut HashMap<PathBuf, Template>,
    path: &Path,
) -> Result<&'a Template> {
    if !cache.contains_key(path) {
        let template = Template::open(path)?;
        cache.insert(path.to_path_buf(), template);
    }
    Ok(&cache[path])
}
