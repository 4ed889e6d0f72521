//! 屏幕、鼠标与系统文件打开器的脚本化替身。

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use automation::{
    ActionError, Actuator, AutomationConfig, ClickCount, Console, ImageOracle, Location,
    MatchResult, Pattern, RunCtx, SearchArea, opener::FileOpener,
};
use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    io::{self, Write},
    path::{Path, PathBuf},
    rc::Rc,
    time::Duration,
};
use vision::Region;

/// 可在控制台释放后读回内容的 `Write` 缓冲。
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_owned).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 按预设的图案布局回答查询。
#[derive(Default)]
pub struct ScriptedOracle {
    placements: HashMap<PathBuf, Region>,
    misses: HashMap<PathBuf, usize>,
    broken: HashSet<PathBuf>,
    pub queries: Vec<(String, SearchArea)>,
}

impl ScriptedOracle {
    pub fn show(&mut self, pattern: &Pattern, region: Region) {
        self.placements.insert(pattern.image().to_path_buf(), region);
    }

    /// 接下来 `count` 次对 `pattern` 的查询返回未找到。
    pub fn miss_next(&mut self, pattern: &Pattern, count: usize) {
        self.misses.insert(pattern.image().to_path_buf(), count);
    }

    pub fn break_backend(&mut self, pattern: &Pattern) {
        self.broken.insert(pattern.image().to_path_buf());
    }

    pub fn queried(&self) -> Vec<&str> {
        self.queries.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl ImageOracle for ScriptedOracle {
    fn exists(
        &mut self,
        pattern: &Pattern,
        area: SearchArea,
        similarity: f64,
        _timeout: Duration,
    ) -> Result<Option<MatchResult>> {
        self.queries.push((pattern.name(), area));
        let key = pattern.image();
        if self.broken.contains(key) {
            return Err(anyhow!("capture failed"));
        }
        if let Some(left) = self.misses.get_mut(key) {
            if *left > 0 {
                *left -= 1;
                return Ok(None);
            }
        }
        let Some(&region) = self.placements.get(key) else {
            return Ok(None);
        };

        let visible = match area {
            SearchArea::Screen => true,
            SearchArea::Within(bounds) => bounds.intersect(&region) == Some(region),
            SearchArea::RightOf(anchor) => {
                region.x >= anchor.right()
                    && region.y >= anchor.y
                    && region.bottom() <= anchor.bottom()
            }
        };
        Ok(visible.then(|| MatchResult {
            pattern: pattern.clone(),
            region,
            score: 1.0,
            similarity,
        }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Click {
        pattern: String,
        count: ClickCount,
        at: Location,
    },
    Drag {
        pattern: String,
        from: Location,
        to: Location,
    },
}

/// 记录每次动作请求，可指定某些目标在动作前消失。
#[derive(Default)]
pub struct RecordingActuator {
    pub actions: Vec<Action>,
    vanishing: HashSet<PathBuf>,
    jammed: HashSet<PathBuf>,
}

impl RecordingActuator {
    pub fn vanish(&mut self, pattern: &Pattern) {
        self.vanishing.insert(pattern.image().to_path_buf());
    }

    pub fn jam(&mut self, pattern: &Pattern) {
        self.jammed.insert(pattern.image().to_path_buf());
    }

    fn outcome(&self, target: &MatchResult) -> Result<(), ActionError> {
        let key = target.pattern.image();
        if self.vanishing.contains(key) {
            return Err(ActionError::TargetLost);
        }
        if self.jammed.contains(key) {
            return Err(ActionError::Input(anyhow!("input device unavailable")));
        }
        Ok(())
    }
}

impl Actuator for RecordingActuator {
    fn click(&mut self, target: &MatchResult, count: ClickCount) -> Result<(), ActionError> {
        self.actions.push(Action::Click {
            pattern: target.pattern.name(),
            count,
            at: target.target(),
        });
        self.outcome(target)
    }

    fn drag_drop(&mut self, from: &MatchResult, to: Location) -> Result<(), ActionError> {
        self.actions.push(Action::Drag {
            pattern: from.pattern.name(),
            from: from.target(),
            to,
        });
        self.outcome(from)
    }
}

/// 不真正打开文件，对指定的文件名返回失败。
#[derive(Default)]
pub struct ScriptedOpener {
    pub opened: Vec<String>,
    refuse: HashSet<String>,
}

impl ScriptedOpener {
    pub fn refuse(&mut self, name: &str) {
        self.refuse.insert(name.to_owned());
    }
}

impl FileOpener for ScriptedOpener {
    fn open(&mut self, path: &Path) -> io::Result<()> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.opened.push(name.clone());
        if self.refuse.contains(&name) {
            return Err(io::Error::other("no application registered"));
        }
        Ok(())
    }
}

/// 持有各替身与捕获的控制台输出，并借给 `RunCtx` 使用。
pub struct Harness {
    pub oracle: ScriptedOracle,
    pub actuator: RecordingActuator,
    pub config: AutomationConfig,
    pub stdout: SharedBuffer,
    pub stderr: SharedBuffer,
    console: Console,
}

impl Default for Harness {
    fn default() -> Self {
        let stdout = SharedBuffer::default();
        let stderr = SharedBuffer::default();
        Self {
            oracle: ScriptedOracle::default(),
            actuator: RecordingActuator::default(),
            config: AutomationConfig::default(),
            console: Console::new(stdout.clone(), stderr.clone()),
            stdout,
            stderr,
        }
    }
}

impl Harness {
    pub fn with_ctx<R>(&mut self, f: impl FnOnce(&mut RunCtx<'_>) -> R) -> R {
        let mut ctx = RunCtx::new(
            &mut self.oracle,
            &mut self.actuator,
            &mut self.console,
            &self.config,
        );
        f(&mut ctx)
    }
}

/// 每个图案单独占一行，避免无意间落在另一个图案的右侧。
pub fn show_all(oracle: &mut ScriptedOracle, patterns: &[&Pattern]) {
    for (row, pattern) in patterns.iter().enumerate() {
        oracle.show(pattern, Region::new(10, 40 * row as i32, 30, 20));
    }
}
