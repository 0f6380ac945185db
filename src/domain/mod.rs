// ==========================================
// 车间物资配送排期系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、日期令牌接口
// 红线: 不含文件读取逻辑,不含引擎逻辑
// ==========================================

pub mod calendar;
pub mod catalog;
pub mod delivery;
pub mod selection;
pub mod types;
pub mod workshop;

// 重导出核心类型
pub use calendar::{CalendarDay, DayToken, DayWindow, CANONICAL_DATE_FORMAT, DEFAULT_WINDOW_DAYS};
pub use catalog::{MaterialCatalog, DEFAULT_MATERIALS};
pub use delivery::DeliveryEntry;
pub use selection::{DaySelection, SelectionError};
pub use types::{CoverageGap, CoverageGapKind, GroupingView};
pub use workshop::{QuotaMap, Workshop, MAX_QUOTA};
