use std::{io, path::Path, process::Command};

/// 用系统默认程序打开文件的能力。
pub trait FileOpener {
    fn open(&mut self, path: &Path) -> io::Result<()>;
}

/// 通过平台命令（`open` / `xdg-open` / `start`）交给系统默认程序。
///
/// 只等待启动命令返回，不等待被打开的程序就绪；就绪与否由后续的图案查找超时兜底。
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl FileOpener for SystemOpener {
    fn open(&mut self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} 不存在", path.display()),
            ));
        }
        let status = default_handler_command(path).status()?;
        if !status.success() {
            return Err(io::Error::other(format!(
                "默认程序启动失败（{status}）: {}",
                path.display()
            )));
        }
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn default_handler_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn default_handler_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    // `start` 的第一个带引号参数是窗口标题，这里留空。
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn default_handler_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
