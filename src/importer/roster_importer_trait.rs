// ==========================================
// 车间物资配送排期系统 - 车间名册导入接口定义
// ==========================================
// 流程: 文件解析 → 原始记录 → 清洗 → Workshop
// ==========================================

use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// 原始配额值（清洗前）
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum RawQuota {
    Integer(u64), // 非负整数（精确值）
    Number(f64),  // 其他数值（负数/小数/超出 u64）
    Text(String), // 非数值文本
    Empty,        // 空单元格（视为未填写）
    Other(String), // 其他类型（布尔/对象/错误单元格等）
}

impl RawQuota {
    /// 从表格单元格文本解析（CSV / Excel 文本单元格）
    pub fn from_cell_text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return RawQuota::Empty;
        }
        if let Ok(n) = trimmed.parse::<u64>() {
            return RawQuota::Integer(n);
        }
        match trimmed.parse::<f64>() {
            Ok(n) => RawQuota::Number(n),
            Err(_) => RawQuota::Text(trimmed.to_string()),
        }
    }

    /// 从 JSON 值转换
    ///
    /// 只有 JSON 数值被视为数值；数字字符串按非数值处理。
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match (n.as_u64(), n.as_f64()) {
                (Some(i), _) => RawQuota::Integer(i),
                (None, Some(f)) => RawQuota::Number(f),
                (None, None) => RawQuota::Other(n.to_string()),
            },
            serde_json::Value::String(s) => RawQuota::Text(s.clone()),
            serde_json::Value::Null => RawQuota::Other("null".to_string()),
            other => RawQuota::Other(other.to_string()),
        }
    }
}

// ==========================================
// 原始车间记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawWorkshopRecord {
    pub row: usize,                      // 源文件中的行号/序号（从 1 开始）
    pub workshop: Option<String>,
    pub manager: Option<String>,
    pub phone: Option<String>,
    pub quotas: Vec<(String, RawQuota)>, // 保留声明顺序
}

// ==========================================
// Trait: RosterParser
// ==========================================
pub trait RosterParser {
    /// 解析文件为原始车间记录
    fn parse_records(&self, path: &Path) -> ImportResult<Vec<RawWorkshopRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text_classification() {
        assert_eq!(RawQuota::from_cell_text(" 12 "), RawQuota::Integer(12));
        assert_eq!(RawQuota::from_cell_text("-3"), RawQuota::Number(-3.0));
        assert_eq!(RawQuota::from_cell_text("2.5"), RawQuota::Number(2.5));
        assert_eq!(RawQuota::from_cell_text(""), RawQuota::Empty);
        assert_eq!(RawQuota::from_cell_text("n/a"), RawQuota::Text("n/a".to_string()));
    }

    #[test]
    fn test_json_only_numbers_are_numeric() {
        assert_eq!(RawQuota::from_json(&json!(40)), RawQuota::Integer(40));
        assert_eq!(RawQuota::from_json(&json!(40.5)), RawQuota::Number(40.5));
        assert_eq!(RawQuota::from_json(&json!(-2)), RawQuota::Number(-2.0));
        assert_eq!(RawQuota::from_json(&json!("40")), RawQuota::Text("40".to_string()));
        assert_eq!(RawQuota::from_json(&json!(true)), RawQuota::Other("true".to_string()));
        assert_eq!(RawQuota::from_json(&json!(null)), RawQuota::Other("null".to_string()));
    }
}
