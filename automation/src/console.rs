use std::{
    fmt::Display,
    io::{self, Write},
};

/// 面向用户的进度输出：普通进度写入 stdout，失败提示写入 stderr。
///
/// 诊断信息（分数、坐标、后端错误）走 `tracing`，不经过这里。
pub struct Console {
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Console {
    pub fn new(out: impl Write + 'static, err: impl Write + 'static) -> Self {
        Self {
            out: Box::new(out),
            err: Box::new(err),
        }
    }

    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }

    pub fn info(&mut self, line: impl Display) {
        let _ = writeln!(self.out, "{line}");
    }

    pub fn error(&mut self, line: impl Display) {
        let _ = writeln!(self.err, "{line}");
    }

    /// 打印提示且不换行，随后刷新以便用户看到。
    pub fn prompt(&mut self, text: impl Display) {
        let _ = write!(self.out, "{text}");
        let _ = self.out.flush();
    }
}
