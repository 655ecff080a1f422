// 注册表单 - 手机号与姓名校验、提交后跳转验证码页

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use tokio::time::Duration;
use tracing::{debug, info};

use crate::routes::Route;
use crate::scheduler::Scheduler;

fn non_digits() -> &'static Regex {
    // 正则只编译一次
    static NON_DIGITS: OnceLock<Regex> = OnceLock::new();
    NON_DIGITS.get_or_init(|| Regex::new(r"[^0-9]").unwrap())
}

/// 提交成功后的跳转目标
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpRedirect {
    pub route: Route,
    pub phone: String,
    pub name: String,
}

impl OtpRedirect {
    pub fn path(&self) -> String {
        self.route.path()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    phone_number: String,
    full_name: String,
    error_message: String,
    is_loading: bool,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// 只保留数字,并清除错误提示
    pub fn handle_phone_input(&mut self, value: &str) {
        self.phone_number = non_digits().replace_all(value, "").into_owned();
        self.error_message.clear();
    }

    pub fn set_full_name(&mut self, value: &str) {
        self.full_name = value.to_string();
    }

    /// 已输入但不以 09 开头
    pub fn phone_invalid(&self) -> bool {
        let v = self.phone_number.trim();
        !v.is_empty() && !v.starts_with("09")
    }

    pub fn is_phone_valid(&self) -> bool {
        self.phone_number.trim().chars().count() == 11 && self.phone_number.starts_with("09")
    }

    pub fn is_full_name_valid(&self) -> bool {
        self.full_name.trim().chars().count() >= 3
    }

    pub fn can_submit(&self) -> bool {
        self.is_phone_valid() && self.is_full_name_valid() && !self.is_loading
    }

    /// 模拟注册请求;不满足提交条件时返回 None
    pub async fn submit(&mut self, scheduler: &dyn Scheduler, delay: Duration) -> Option<OtpRedirect> {
        if !self.can_submit() {
            debug!("注册表单未通过校验");
            return None;
        }

        self.is_loading = true;
        self.error_message.clear();

        scheduler.sleep(delay).await;

        self.is_loading = false;
        info!("验证码已发送: {}", self.phone_number);
        Some(OtpRedirect {
            route: Route::RegisterOtp,
            phone: self.phone_number.clone(),
            name: self.full_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ImmediateScheduler;

    #[test]
    fn test_phone_input_keeps_digits() {
        let mut form = RegistrationForm::new();
        form.error_message = "x".to_string();
        form.handle_phone_input("0912-123 45ab67");
        assert_eq!(form.phone_number(), "09121234567");
        assert!(form.error_message().is_empty());
    }

    #[test]
    fn test_phone_input_drops_non_ascii_digits() {
        let mut form = RegistrationForm::new();
        form.handle_phone_input("۰۹12 345");
        assert_eq!(form.phone_number(), "12345");
        assert!(non_digits().is_match("۰"));
    }

    #[test]
    fn test_phone_validation() {
        let mut form = RegistrationForm::new();
        assert!(!form.phone_invalid());

        form.handle_phone_input("0812");
        assert!(form.phone_invalid());
        assert!(!form.is_phone_valid());

        form.handle_phone_input("0912123456");
        assert!(!form.phone_invalid());
        assert!(!form.is_phone_valid());

        form.handle_phone_input("09121234567");
        assert!(form.is_phone_valid());
    }

    #[test]
    fn test_full_name_counts_characters() {
        let mut form = RegistrationForm::new();
        form.set_full_name("  ab ");
        assert!(!form.is_full_name_valid());
        form.set_full_name("علی");
        assert!(form.is_full_name_valid());
    }

    #[tokio::test]
    async fn test_submit_redirects_to_otp() {
        let scheduler = ImmediateScheduler::new();
        let mut form = RegistrationForm::new();

        assert!(form.submit(&*scheduler, Duration::from_millis(800)).await.is_none());
        assert_eq!(scheduler.calls(), 0);

        form.handle_phone_input("09121234567");
        form.set_full_name("سارا محمدی");
        assert!(form.can_submit());

        let redirect = form
            .submit(&*scheduler, Duration::from_millis(800))
            .await
            .unwrap();
        assert_eq!(redirect.path(), "/register/otp");
        assert_eq!(redirect.phone, "09121234567");
        assert_eq!(redirect.name, "سارا محمدی");
        assert!(!form.is_loading());
        assert_eq!(scheduler.calls(), 1);
    }
}
