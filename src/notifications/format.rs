// 通知展示辅助函数

use chrono::{DateTime, Utc};

/// 相对时间(波斯语)
///
/// 一周以上显示公历日期 `YYYY/MM/DD`(拉丁数字,不做波斯历与波斯数字转换)
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp);
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if minutes < 1 {
        "همین الان".to_string()
    } else if minutes < 60 {
        format!("{} دقیقه پیش", minutes)
    } else if hours < 24 {
        format!("{} ساعت پیش", hours)
    } else if days < 7 {
        format!("{} روز پیش", days)
    } else {
        timestamp.format("%Y/%m/%d").to_string()
    }
}
