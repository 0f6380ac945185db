// ==========================================
// 车间物资配送排期系统 - 日历日与日期窗口
// ==========================================
// 职责: 日期令牌 (DayToken) 抽象 + 公历参考实现
// 红线: 所有日历运算只在本模块内完成，引擎只比较规范日期字符串
// ==========================================

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 规范日期格式（YYYY-MM-DD）
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// 默认窗口长度（以今天为中心，前后各 45 天）
pub const DEFAULT_WINDOW_DAYS: usize = 90;

// ==========================================
// Trait: DayToken
// ==========================================
// 用途: 日期窗口提供方输出的日期令牌
pub trait DayToken: Clone {
    /// 规范日期字符串（YYYY-MM-DD）
    fn canonical(&self) -> String;

    /// 星期名称
    fn weekday_name(&self) -> String;

    /// 月内日
    fn day_of_month(&self) -> u32;

    /// 月份名称
    fn month_name(&self) -> String;

    /// 年份
    fn year(&self) -> i32;

    /// 是否早于 other（按日）
    fn before(&self, other: &Self) -> bool;

    /// 是否同一天
    fn same(&self, other: &Self) -> bool;

    /// 偏移 days 天（可为负）
    fn add(&self, days: i64) -> Self;
}

// ==========================================
// CalendarDay - 公历日期令牌
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// 从规范日期字符串解析
    pub fn parse(value: &str) -> Option<Self> {
        NaiveDate::parse_from_str(value.trim(), CANONICAL_DATE_FORMAT)
            .ok()
            .map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_DATE_FORMAT))
    }
}

impl DayToken for CalendarDay {
    fn canonical(&self) -> String {
        self.0.format(CANONICAL_DATE_FORMAT).to_string()
    }

    fn weekday_name(&self) -> String {
        match self.0.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
        .to_string()
    }

    fn day_of_month(&self) -> u32 {
        self.0.day()
    }

    fn month_name(&self) -> String {
        self.0.format("%B").to_string()
    }

    fn year(&self) -> i32 {
        self.0.year()
    }

    fn before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    fn same(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn add(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }
}

// ==========================================
// DayWindow - 日期窗口
// ==========================================
// 每个会话构造一次，显式传入生成器与选择解析
#[derive(Debug, Clone)]
pub struct DayWindow<D: DayToken> {
    today: D,
    days: Vec<D>,
}

impl<D: DayToken> DayWindow<D> {
    /// 以 today 为中心构造窗口
    ///
    /// 下标 `len / 2` 为今天，升序排列。
    pub fn centered(today: D, len: usize) -> Self {
        let center = (len / 2) as i64;
        let days = (0..len as i64).map(|i| today.add(i - center)).collect();
        Self { today, days }
    }

    /// 由外部提供的日期序列构造（调用方保证升序）
    pub fn from_days(today: D, days: Vec<D>) -> Self {
        Self { today, days }
    }

    pub fn today(&self) -> &D {
        &self.today
    }

    pub fn days(&self) -> &[D] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// 按规范日期查找窗口内的日期令牌
    pub fn find(&self, canonical: &str) -> Option<&D> {
        self.days.iter().find(|d| d.canonical() == canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> CalendarDay {
        CalendarDay::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_canonical_rendering() {
        let d = day(2026, 3, 7);
        assert_eq!(d.canonical(), "2026-03-07");
        assert_eq!(d.day_of_month(), 7);
        assert_eq!(d.year(), 2026);
        assert_eq!(d.month_name(), "March");
        assert_eq!(d.weekday_name(), "Saturday");
    }

    #[test]
    fn test_comparisons_and_add() {
        let d = day(2026, 12, 31);
        let next = d.add(1);
        assert_eq!(next.canonical(), "2027-01-01");
        assert!(d.before(&next));
        assert!(!next.before(&d));
        assert!(next.add(-1).same(&d));
    }

    #[test]
    fn test_centered_window() {
        let today = day(2026, 1, 20);
        let window = DayWindow::centered(today, DEFAULT_WINDOW_DAYS);

        assert_eq!(window.len(), 90);
        assert!(window.days()[45].same(&today));
        assert_eq!(window.days()[0].canonical(), "2025-12-06");
        assert_eq!(window.days()[89].canonical(), "2026-03-05");
        // 升序
        assert!(window.days().windows(2).all(|w| w[0].before(&w[1])));
    }

    #[test]
    fn test_find_and_parse() {
        let today = day(2026, 1, 20);
        let window = DayWindow::centered(today, 10);
        assert!(window.find("2026-01-21").is_some());
        assert!(window.find("2027-01-21").is_none());
        assert_eq!(CalendarDay::parse(" 2026-01-21 "), Some(day(2026, 1, 21)));
        assert_eq!(CalendarDay::parse("2026/01/21"), None);
    }
}
