//! 通用小工具

use chrono::Utc;

/// Current time as Unix milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
