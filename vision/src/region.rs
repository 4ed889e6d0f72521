/// 像素（或屏幕）坐标系中的轴对齐矩形。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 右边界（不含）。
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// 下边界（不含）。
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// 中心点，奇数尺寸向左上取整。
    pub fn center(&self) -> (i32, i32) {
        (
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    /// 两个区域的交集，不相交时返回 `None`。
    pub fn intersect(&self, other: &Region) -> Option<Region> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Region::new(
            left,
            top,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }

    /// 本区域右侧、直到 `bounds` 右边缘的条带，高度与本区域一致。
    pub fn right_of(&self, bounds: &Region) -> Option<Region> {
        let strip_width = bounds.right() - self.right();
        if strip_width <= 0 {
            return None;
        }
        Region::new(self.right(), self.y, strip_width as u32, self.height).intersect(bounds)
    }

    /// 四周各向外扩 `margin` 像素。
    pub fn expand(&self, margin: u32) -> Region {
        Region::new(
            self.x - margin as i32,
            self.y - margin as i32,
            self.width + margin * 2,
            self.height + margin * 2,
        )
    }
}
