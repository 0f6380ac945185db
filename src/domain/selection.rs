// ==========================================
// 车间物资配送排期系统 - 日期选择
// ==========================================
// 用户选择：单日 或 连续闭区间
// 聚合器只认规范日期字符串的精确相等
// ==========================================

use crate::domain::calendar::DayToken;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("日期区间颠倒: from={from} 晚于 to={to}")]
    ReversedRange { from: String, to: String },
}

#[derive(Debug, Clone)]
pub enum DaySelection<D: DayToken> {
    Single(D),
    Range { from: D, to: D },
}

impl<D: DayToken> DaySelection<D> {
    /// 构造区间选择；from == to 时退化为单日
    pub fn range(from: D, to: D) -> Result<Self, SelectionError> {
        if to.before(&from) {
            return Err(SelectionError::ReversedRange {
                from: from.canonical(),
                to: to.canonical(),
            });
        }
        if from.same(&to) {
            return Ok(DaySelection::Single(from));
        }
        Ok(DaySelection::Range { from, to })
    }

    /// 展开为日期令牌列表（升序，包含两端）
    pub fn days(&self) -> Vec<D> {
        match self {
            DaySelection::Single(day) => vec![day.clone()],
            DaySelection::Range { from, to } => {
                let mut days = vec![from.clone()];
                let mut cursor = from.clone();
                while cursor.before(to) {
                    cursor = cursor.add(1);
                    days.push(cursor.clone());
                }
                days
            }
        }
    }

    /// 规范日期字符串列表
    pub fn canonical_days(&self) -> Vec<String> {
        self.days().iter().map(DayToken::canonical).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::CalendarDay;

    fn day(s: &str) -> CalendarDay {
        CalendarDay::parse(s).unwrap()
    }

    #[test]
    fn test_single_day() {
        let selection = DaySelection::Single(day("2026-01-21"));
        assert_eq!(selection.canonical_days(), vec!["2026-01-21"]);
    }

    #[test]
    fn test_inclusive_range_across_month() {
        let selection = DaySelection::range(day("2026-01-30"), day("2026-02-02")).unwrap();
        assert_eq!(
            selection.canonical_days(),
            vec!["2026-01-30", "2026-01-31", "2026-02-01", "2026-02-02"]
        );
    }

    #[test]
    fn test_degenerate_range_is_single() {
        let selection = DaySelection::range(day("2026-01-30"), day("2026-01-30")).unwrap();
        assert!(matches!(selection, DaySelection::Single(_)));
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = DaySelection::range(day("2026-02-02"), day("2026-01-30")).unwrap_err();
        assert_eq!(
            err,
            SelectionError::ReversedRange {
                from: "2026-02-02".to_string(),
                to: "2026-01-30".to_string(),
            }
        );
    }
}
