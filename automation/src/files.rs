use crate::{console::Console, error::SessionError};
use anyhow::{Context, Result};
use std::{
    io::BufRead,
    path::{Path, PathBuf},
};
use tracing::warn;
use walkdir::WalkDir;

/// 待转换图片所在的子目录。
pub const INPUT_DIR: &str = "Input";
/// 导出结果所在的子目录（需预先存在）。
pub const OUTPUT_DIR: &str = "Output";

/// 询问图片根目录；输入为空或遇到 EOF 时使用 `default`。
pub fn prompt_folder(
    console: &mut Console,
    input: &mut impl BufRead,
    default: &Path,
) -> Result<PathBuf> {
    console.prompt("Folder with the images to convert: ");
    let mut line = String::new();
    input.read_line(&mut line).context("读取目录输入失败")?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(default.to_path_buf());
    }
    Ok(PathBuf::from(trimmed))
}

/// 列出 `<folder>/Input` 的直接子项（不递归、不过滤扩展名），按文件名排序。
pub fn list_input_files(folder: &Path) -> Result<Vec<PathBuf>, SessionError> {
    let input = folder.join(INPUT_DIR);
    if !input.is_dir() {
        return Err(SessionError::MissingInput(input));
    }
    let output = folder.join(OUTPUT_DIR);
    if !output.is_dir() {
        warn!("输出目录不存在: {}", output.display());
    }

    let files = WalkDir::new(&input)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|res| res.ok())
        .map(|entry| entry.into_path())
        .collect();
    Ok(files)
}
