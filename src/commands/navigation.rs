//! 路由解析命令

use crate::routes::Route;

/// 解析路径(跟随重定向)
pub fn resolve_route(path: &str) -> Result<Route, String> {
    Route::resolve(path).ok_or_else(|| format!("未知路径: {}", path))
}
