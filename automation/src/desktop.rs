//! 真实桌面后端：`xcap` 截屏与 `enigo` 模拟鼠标。需要图形环境及相应权限。

use crate::{
    capture::{Frame, ScreenCapture},
    input::{ActionError, Actuator, ClickCount},
    oracle::{Location, MatchResult, ScreenOracle, SearchArea},
};
use anyhow::{Context, Result, anyhow};
use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use image::RgbaImage;
use std::{thread, time::Duration};
use tracing::debug;
use xcap::Monitor;

/// 动作前复核目标时，在命中区域四周额外搜索的像素数。
const CONFIRM_MARGIN: u32 = 8;
const DOUBLE_CLICK_GAP: Duration = Duration::from_millis(80);

/// 截取主显示器（无主显示器时取第一个）。
pub struct DesktopCapture {
    monitor: Monitor,
}

impl DesktopCapture {
    pub fn primary() -> Result<Self> {
        let mut fallback = None;
        for monitor in Monitor::all().context("无法枚举显示器")? {
            if monitor.is_primary().unwrap_or(false) {
                return Ok(Self { monitor });
            }
            if fallback.is_none() {
                fallback = Some(monitor);
            }
        }
        let monitor = fallback.ok_or_else(|| anyhow!("未找到任何显示器"))?;
        Ok(Self { monitor })
    }
}

impl ScreenCapture for DesktopCapture {
    fn capture(&mut self) -> Result<Frame> {
        let captured = self.monitor.capture_image()?;
        let (w, h) = captured.dimensions();
        let image = RgbaImage::from_raw(w, h, captured.into_raw())
            .ok_or_else(|| anyhow!("截图尺寸与缓冲区长度不匹配"))?;

        // 截图物理像素与显示器逻辑尺寸之比。
        let logical_w = self.monitor.width()?;
        let scale = if logical_w > 0 {
            w as f32 / logical_w as f32
        } else {
            1.0
        };

        Ok(Frame::new(image)
            .with_origin(self.monitor.x()?, self.monitor.y()?)
            .with_scale(scale))
    }
}

/// 基于 enigo 的鼠标输入。每次动作前重新截图确认目标仍在原处。
pub struct DesktopActuator {
    enigo: Enigo,
    verifier: ScreenOracle<DesktopCapture>,
    action_delay: Duration,
}

impl DesktopActuator {
    /// 若系统未授予辅助功能/输入权限，返回错误。
    pub fn new(action_delay: Duration) -> Result<Self> {
        let enigo = Enigo::new(&Settings::default()).context("无法初始化输入模拟")?;
        let verifier = ScreenOracle::new(DesktopCapture::primary()?, action_delay);
        Ok(Self {
            enigo,
            verifier,
            action_delay,
        })
    }

    fn confirm(&mut self, target: &MatchResult) -> Result<(), ActionError> {
        let area = SearchArea::Within(target.region.expand(CONFIRM_MARGIN));
        match self
            .verifier
            .locate_once(&target.pattern, area, target.similarity)?
        {
            Some(_) => Ok(()),
            None => {
                debug!(pattern = %target.pattern.name(), "目标已离开命中位置");
                Err(ActionError::TargetLost)
            }
        }
    }

    fn move_to(&mut self, at: Location) -> Result<()> {
        self.enigo
            .move_mouse(at.x, at.y, Coordinate::Abs)
            .context("移动鼠标失败")?;
        thread::sleep(self.action_delay);
        Ok(())
    }

    fn left(&mut self, direction: Direction) -> Result<()> {
        self.enigo
            .button(Button::Left, direction)
            .context("鼠标按键失败")?;
        Ok(())
    }
}

impl Actuator for DesktopActuator {
    fn click(&mut self, target: &MatchResult, count: ClickCount) -> Result<(), ActionError> {
        self.confirm(target)?;
        self.move_to(target.target())?;
        self.left(Direction::Click)?;
        if count == ClickCount::Double {
            thread::sleep(DOUBLE_CLICK_GAP);
            self.left(Direction::Click)?;
        }
        Ok(())
    }

    fn drag_drop(&mut self, from: &MatchResult, to: Location) -> Result<(), ActionError> {
        self.confirm(from)?;
        self.move_to(from.target())?;
        self.left(Direction::Press)?;
        self.move_to(to)?;
        self.left(Direction::Release)?;
        Ok(())
    }
}
