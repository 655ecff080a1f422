//! 注册命令

use tracing::warn;

use crate::notifications::NotifyOptions;
use crate::registration::{OtpRedirect, RegistrationForm};
use crate::AppState;

/// 提交注册,成功后返回验证码页跳转信息
pub async fn submit_registration(
    state: &AppState,
    phone: &str,
    full_name: &str,
) -> Result<OtpRedirect, String> {
    let mut form = RegistrationForm::new();
    form.handle_phone_input(phone);
    form.set_full_name(full_name);

    if form.phone_invalid() || !form.is_phone_valid() {
        warn!("注册手机号无效");
        return Err("شماره موبایل باید ۱۱ رقم و با ۰۹ شروع شود".to_string());
    }
    if !form.is_full_name_valid() {
        return Err("نام و نام خانوادگی باید حداقل ۳ حرف باشد".to_string());
    }

    let delay = state
        .storage_domain
        .get_settings()
        .get()
        .await
        .loading_delays
        .register();
    let scheduler = state.system_domain.get_scheduler();

    let redirect = form
        .submit(&**scheduler, delay)
        .await
        .ok_or_else(|| "خطایی رخ داده است".to_string())?;

    state
        .system_domain
        .get_notifications()
        .notify_success("ثبت‌نام", "کد تایید ارسال شد", NotifyOptions::default())
        .await;

    Ok(redirect)
}
