// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use std::io::Write;

use tempfile::NamedTempFile;
use workshop_distribution::domain::{CalendarDay, DayWindow, MaterialCatalog, QuotaMap, Workshop};

// ==========================================
// Workshop 构建器
// ==========================================

pub struct WorkshopBuilder {
    workshop_id: String,
    manager: String,
    phone: String,
    quotas: QuotaMap,
}

impl WorkshopBuilder {
    pub fn new(workshop_id: &str) -> Self {
        Self {
            workshop_id: workshop_id.to_string(),
            manager: format!("manager-{}", workshop_id),
            phone: "09120000000".to_string(),
            quotas: QuotaMap::default(),
        }
    }

    pub fn manager(mut self, manager: &str) -> Self {
        self.manager = manager.to_string();
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.phone = phone.to_string();
        self
    }

    pub fn quota(mut self, material: &str, amount: u64) -> Self {
        self.quotas.insert(material, amount);
        self
    }

    pub fn build(self) -> Workshop {
        Workshop::new(self.workshop_id, self.manager, self.phone, self.quotas)
    }
}

// ==========================================
// 日期/目录辅助
// ==========================================

pub fn day(value: &str) -> CalendarDay {
    CalendarDay::parse(value).unwrap()
}

/// 以 today 为中心的窗口
pub fn centered_window(today: &str, len: usize) -> DayWindow<CalendarDay> {
    DayWindow::centered(day(today), len)
}

/// 从 today 之后连续 len 天构成的窗口（today 不在窗口内）
pub fn window_after(today: &str, len: usize) -> DayWindow<CalendarDay> {
    let today = day(today);
    let days = (1..=len as i64)
        .map(|offset| CalendarDay::new(today.date() + chrono::Duration::days(offset)))
        .collect();
    DayWindow::from_days(today, days)
}

pub fn catalog(materials: &[&str]) -> MaterialCatalog {
    MaterialCatalog::new(materials.iter().copied())
}

// ==========================================
// 名册文件
// ==========================================

pub fn write_roster(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
