//! IO helper: JSON document read / atomic write

use std::{fs::File, io::{BufReader, Write}, path::Path};

use serde_json::Value;
use tempfile::NamedTempFile;
use crate::model::data_core::AppError;

/// 从文件读取JSON数据
pub fn read_json_file(p: &Path) -> Result<Value, AppError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    let v: Value = serde_json::from_reader(rdr)?;
    Ok(v)
}

/// 整体替换文件内容：先写同目录的唯一临时文件，再重命名覆盖，失败时原文件保持不变
///
/// 临时文件在出错时随 `NamedTempFile` 析构自动删除
pub fn write_text_atomic(p: &Path, text: &str) -> Result<(), AppError> {
    let dir = p
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(text.as_bytes())?;
    staged.flush()?;
    staged.persist(p).map_err(|e| AppError::Io(e.error))?;
    Ok(())
}
