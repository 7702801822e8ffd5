//! 日期模块
//!
//! 提供两部分能力：
//! - `BookingWindow`: 可预约的日期区间 `[today, today + 3 个月]`
//! - 服务端日期字符串的解析与格式化

use chrono::{Local, Months, NaiveDate, NaiveDateTime};

/// 预约窗口向后延伸的月数
pub const BOOKING_HORIZON_MONTHS: u32 = 3;

/// 接口使用的日期格式 (`YYYY-MM-DD`)
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// 获取本地日期
#[inline]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// =========================================================
// BookingWindow - 可预约区间
// =========================================================

/// 闭区间 `[start, end]`，日历中只有区间内的日期可选
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl BookingWindow {
    /// 以指定日期为起点构造窗口
    ///
    /// 月末溢出时向前收敛（如 11-30 + 3 个月 = 02-28）。
    pub fn starting(today: NaiveDate) -> Self {
        let end = today
            .checked_add_months(Months::new(BOOKING_HORIZON_MONTHS))
            .unwrap_or(NaiveDate::MAX);
        Self { start: today, end }
    }

    /// 以当前本地日期为起点
    pub fn from_today() -> Self {
        Self::starting(today())
    }

    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// `<input type="date">` 的 `min` 属性值
    pub fn min_attr(&self) -> String {
        format_api_date(self.start)
    }

    /// `<input type="date">` 的 `max` 属性值
    pub fn max_attr(&self) -> String {
        format_api_date(self.end)
    }
}

// =========================================================
// 解析与格式化
// =========================================================

pub fn format_api_date(date: NaiveDate) -> String {
    date.format(API_DATE_FORMAT).to_string()
}

/// 解析 `YYYY-MM-DD`，空串或非法输入返回 None
pub fn parse_api_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), API_DATE_FORMAT).ok()
}

/// 解析服务端返回的时间
///
/// 兼容 RFC 3339（带时区）、不带时区的 ISO 8601 以及纯日期。
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    parse_api_date(s).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// 卡片上的日期，例如 `November 2, 2026`
pub fn display_date(dt: &NaiveDateTime) -> String {
    dt.format("%B %-d, %Y").to_string()
}

/// 卡片上的时间，例如 `9:30 AM`
pub fn display_time(dt: &NaiveDateTime) -> String {
    dt.format("%-I:%M %p").to_string()
}
