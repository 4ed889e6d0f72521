use anyhow::Result;
use image::RgbaImage;
use vision::Region;

/// 一次截屏结果：像素数据、所属显示器在屏幕坐标系中的原点，以及缩放比。
///
/// `scale` 为截图像素与屏幕逻辑坐标之比（HiDPI 下通常为 2.0）。
pub struct Frame {
    pub image: RgbaImage,
    pub origin: (i32, i32),
    pub scale: f32,
}

impl Frame {
    /// 原点为 (0, 0)、无缩放的截图。
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            origin: (0, 0),
            scale: 1.0,
        }
    }

    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        if scale > 0.0 {
            self.scale = scale;
        }
        self
    }

    /// 截图像素坐标 -> 屏幕逻辑坐标。
    pub fn to_screen(&self, px: Region) -> Region {
        let (ox, oy) = self.origin;
        Region::new(
            ox + (px.x as f32 / self.scale).round() as i32,
            oy + (px.y as f32 / self.scale).round() as i32,
            ((px.width as f32 / self.scale).round() as u32).max(1),
            ((px.height as f32 / self.scale).round() as u32).max(1),
        )
    }

    /// 屏幕逻辑坐标 -> 截图像素坐标。结果可能超出截图范围，调用方负责裁剪。
    pub fn to_pixels(&self, screen: Region) -> Region {
        let (ox, oy) = self.origin;
        Region::new(
            ((screen.x - ox) as f32 * self.scale).round() as i32,
            ((screen.y - oy) as f32 * self.scale).round() as i32,
            (screen.width as f32 * self.scale).round() as u32,
            (screen.height as f32 * self.scale).round() as u32,
        )
    }
}

/// 截屏能力。桌面实现见 `desktop::DesktopCapture`，测试中可注入合成画面。
pub trait ScreenCapture {
    fn capture(&mut self) -> Result<Frame>;
}
