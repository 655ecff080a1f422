//! 输入验证工具函数
//!
//! 提供命令参数与导出文件名的验证，防止路径穿越和无效输入

/// 验证会员ID是否有效
///
/// # 参数
/// - `id`: 会员ID
///
/// # 返回
/// - `Ok(())`: 验证通过
/// - `Err(String)`: 错误信息
pub fn validate_member_id(id: i64) -> Result<(), String> {
    if id <= 0 {
        return Err(format!("无效的会员 ID: {}", id));
    }
    Ok(())
}

/// 验证导出文件名（只允许单层文件名，不允许路径分隔符）
pub fn validate_export_filename(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("导出文件名不能为空".to_string());
    }
    if trimmed == "." || trimmed == ".." || trimmed.starts_with('.') {
        return Err(format!("无效的导出文件名: {}", name));
    }
    if trimmed
        .chars()
        .any(|c| matches!(c, '/' | '\\' | ':' | '\0') || c.is_control())
    {
        return Err(format!("导出文件名包含非法字符: {}", name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id() {
        assert!(validate_member_id(1).is_ok());
        assert!(validate_member_id(0).is_err());
        assert!(validate_member_id(-5).is_err());
    }

    #[test]
    fn test_export_filename() {
        assert!(validate_export_filename("export_1700000000000.csv").is_ok());
        assert!(validate_export_filename("گزارش تراکنش.csv").is_ok());
        assert!(validate_export_filename("").is_err());
        assert!(validate_export_filename("../secret.csv").is_err());
        assert!(validate_export_filename("a/b.csv").is_err());
        assert!(validate_export_filename(".hidden").is_err());
    }
}
