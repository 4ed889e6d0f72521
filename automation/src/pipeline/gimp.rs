use super::{ClickPattern, DragBeside, Pipeline};
use crate::pattern::Pattern;
use std::path::{Path, PathBuf};

/// GIMP 导出流程用到的全部参考图片。
///
/// 图片需在当前主题、语言与缩放下截取，且在屏幕上唯一。
pub struct GimpPatterns {
    /// 菜单栏中的“文件”。
    pub file_menu: Pattern,
    /// 文件菜单中的“导出为…”。
    pub export_as: Pattern,
    /// 导出对话框路径栏中 Input 的上级目录按钮。
    pub parent_folder: Pattern,
    /// 目录列表中的 Output 文件夹。
    pub output_folder: Pattern,
    /// “选择文件类型（按扩展名）”展开器。
    pub file_type_toggle: Pattern,
    /// 展开后的文件类型列表。
    pub file_type_list: Pattern,
    /// 文件类型列表右侧的滚动条滑块。
    pub file_type_scrollbar: Pattern,
    /// 列表中的 PNG 条目。
    pub png_entry: Pattern,
    /// 对话框中的“导出”按钮。
    pub export_button: Pattern,
    /// 文件菜单中的“退出”。
    pub quit: Pattern,
}

impl GimpPatterns {
    /// 以 `dir` 下的固定文件名构造图案集合。
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let p = |name: &str| Pattern::new(dir.join(name));
        Self {
            file_menu: p("file_menu.png"),
            export_as: p("export_as.png"),
            parent_folder: p("parent_folder.png"),
            output_folder: p("output_folder.png"),
            file_type_toggle: p("file_type_toggle.png"),
            file_type_list: p("file_type_list.png"),
            file_type_scrollbar: p("file_type_scrollbar.png"),
            png_entry: p("png_entry.png"),
            export_button: p("export_button.png"),
            quit: p("quit.png"),
        }
    }

    fn all(&self) -> [&Pattern; 10] {
        [
            &self.file_menu,
            &self.export_as,
            &self.parent_folder,
            &self.output_folder,
            &self.file_type_toggle,
            &self.file_type_list,
            &self.file_type_scrollbar,
            &self.png_entry,
            &self.export_button,
            &self.quit,
        ]
    }

    /// 磁盘上不存在的参考图片路径。
    pub fn missing_images(&self) -> Vec<PathBuf> {
        self.all()
            .into_iter()
            .map(Pattern::image)
            .filter(|path| !path.is_file())
            .map(Path::to_path_buf)
            .collect()
    }
}

/// 单个文件的导出流程：打开导出对话框，切到 Output，选择 PNG，确认导出。
///
/// 导出按钮点两次：第一次确认导出，第二次确认 PNG 选项对话框。
pub fn export_pipeline(p: &GimpPatterns) -> Pipeline {
    Pipeline::new("gimp-export")
        .step(ClickPattern::once(p.file_menu.clone(), "file drop down"))
        .step(ClickPattern::once(p.export_as.clone(), "export image"))
        .step(ClickPattern::once(
            p.parent_folder.clone(),
            "up a folder to Images",
        ))
        .step(ClickPattern::twice(
            p.output_folder.clone(),
            "down a folder to Output",
        ))
        .step(ClickPattern::once(
            p.file_type_toggle.clone(),
            "to see extensions",
        ))
        .step(DragBeside::new(
            p.file_type_list.clone(),
            p.file_type_scrollbar.clone(),
            "the sidebar",
        ))
        .step(ClickPattern::once(
            p.png_entry.clone(),
            "to select extension png",
        ))
        .step(ClickPattern::twice(p.export_button.clone(), "to export image"))
        .step(ClickPattern::twice(p.export_button.clone(), "to export image"))
}

/// 所有文件处理完后执行一次，关闭 GIMP。
pub fn cleanup_pipeline(p: &GimpPatterns) -> Pipeline {
    Pipeline::new("gimp-cleanup")
        .step(ClickPattern::once(p.file_menu.clone(), "file drop down"))
        .step(ClickPattern::once(p.quit.clone(), "to close GIMP"))
}
