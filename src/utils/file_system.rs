//! 文件系统路径工具
//!
//! 提供跨平台的数据目录、日志目录与导出目录

use std::path::PathBuf;

const APP_DIR: &str = "lottery-dashboard";

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

/// 获取数据目录路径（跨平台）
///
/// - macOS: ~/Library/Application Support/lottery-dashboard
/// - Windows: %APPDATA%/lottery-dashboard
/// - Linux: ~/.local/share/lottery-dashboard
pub fn get_data_dir() -> Result<PathBuf, String> {
    let data_dir = if cfg!(target_os = "macos") {
        home_dir().join("Library/Application Support").join(APP_DIR)
    } else if cfg!(target_os = "windows") {
        let appdata = std::env::var("APPDATA").map_err(|_| "未找到 APPDATA 环境变量".to_string())?;
        PathBuf::from(appdata).join(APP_DIR)
    } else {
        home_dir().join(".local/share").join(APP_DIR)
    };

    Ok(data_dir)
}

/// 获取日志目录路径（跨平台）
///
/// - macOS: ~/Library/Logs/lottery-dashboard
/// - 其他平台: <数据目录>/logs
pub fn get_log_dir() -> Result<PathBuf, String> {
    if cfg!(target_os = "macos") {
        Ok(home_dir().join("Library/Logs").join(APP_DIR))
    } else {
        Ok(get_data_dir()?.join("logs"))
    }
}

/// 获取导出目录路径（默认 <数据目录>/exports）
pub fn get_export_dir() -> Result<PathBuf, String> {
    Ok(get_data_dir()?.join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_share_app_root() {
        let data = get_data_dir().unwrap();
        assert!(data.ends_with(APP_DIR));
        assert!(get_export_dir().unwrap().starts_with(&data));
        assert!(get_log_dir().unwrap().to_string_lossy().contains(APP_DIR));
    }
}
