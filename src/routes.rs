// 路由表 - 后台页面路径与解析

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "name", content = "id")]
pub enum Route {
    /// 根路径,重定向到注册页
    Home,
    Login,
    /// 登录验证码
    Otp,
    Register,
    RegisterOtp,
    Dashboard,
    Lotteries,
    Settings,
    Members,
    MemberDetail(i64),
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Otp => "Otp",
            Self::Register => "Register",
            Self::RegisterOtp => "RegisterOtp",
            Self::Dashboard => "Dashboard",
            Self::Lotteries => "Lotteries",
            Self::Settings => "Settings",
            Self::Members => "Members",
            Self::MemberDetail(_) => "MemberDetail",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Otp => "/otp".to_string(),
            Self::Register => "/register".to_string(),
            Self::RegisterOtp => "/register/otp".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Lotteries => "/lotteries".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::Members => "/members".to_string(),
            Self::MemberDetail(id) => format!("/members/{}", id),
        }
    }

    pub fn redirect(&self) -> Option<Route> {
        match self {
            Self::Home => Some(Self::Register),
            _ => None,
        }
    }

    /// 不跟随重定向的匹配(忽略查询串与末尾斜杠)
    pub fn match_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["otp"] => Self::Otp,
            ["register"] => Self::Register,
            ["register", "otp"] => Self::RegisterOtp,
            ["dashboard"] => Self::Dashboard,
            ["lotteries"] => Self::Lotteries,
            ["settings"] => Self::Settings,
            ["members"] => Self::Members,
            ["members", id] => Self::MemberDetail(id.parse().ok()?),
            _ => return None,
        };
        Some(route)
    }

    /// 解析路径并跟随重定向
    pub fn resolve(path: &str) -> Option<Route> {
        let route = Self::match_path(path)?;
        Some(route.redirect().unwrap_or(route))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_redirects_to_register() {
        assert_eq!(Route::match_path("/"), Some(Route::Home));
        assert_eq!(Route::resolve("/"), Some(Route::Register));
        assert_eq!(Route::resolve(""), Some(Route::Register));
    }

    #[test]
    fn test_resolve_paths() {
        assert_eq!(Route::resolve("/login"), Some(Route::Login));
        assert_eq!(Route::resolve("/register/otp?phone=0912"), Some(Route::RegisterOtp));
        assert_eq!(Route::resolve("/members/"), Some(Route::Members));
        assert_eq!(Route::resolve("/members/1003"), Some(Route::MemberDetail(1003)));
        assert_eq!(Route::resolve("/members/abc"), None);
        assert_eq!(Route::resolve("/unknown"), None);
    }

    #[test]
    fn test_path_roundtrip() {
        let routes = [
            Route::Login,
            Route::Otp,
            Route::Register,
            Route::RegisterOtp,
            Route::Dashboard,
            Route::Lotteries,
            Route::Settings,
            Route::Members,
            Route::MemberDetail(1001),
        ];
        for route in routes {
            assert_eq!(Route::resolve(&route.path()), Some(route), "{}", route.name());
        }
    }
}
