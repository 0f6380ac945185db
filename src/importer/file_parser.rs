// ==========================================
// 车间物资配送排期系统 - 名册文件解析器实现
// ==========================================
// 支持: JSON (.json) / CSV (.csv) / Excel (.xlsx/.xls)
// 表格布局: workshop, manager, phone 三列，其余每列为一种物资
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::roster_importer_trait::{RawQuota, RawWorkshopRecord, RosterParser};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

const COL_WORKSHOP: &str = "workshop";
const COL_MANAGER: &str = "manager";
const COL_PHONE: &str = "phone";
const JSON_QUOTA_FIELD: &str = "resourceLimits";

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// 表格一行 → 原始记录（表头已小写化用于识别固定列）
fn record_from_cells<'a>(
    row: usize,
    headers: &[String],
    cells: impl Iterator<Item = (&'a str, RawQuota)>,
) -> RawWorkshopRecord {
    let mut record = RawWorkshopRecord {
        row,
        ..RawWorkshopRecord::default()
    };

    for (header, (text, quota)) in headers.iter().zip(cells) {
        match header.to_lowercase().as_str() {
            COL_WORKSHOP => record.workshop = non_empty(text),
            COL_MANAGER => record.manager = non_empty(text),
            COL_PHONE => record.phone = non_empty(text),
            "" => {}
            _ => record.quotas.push((header.clone(), quota)),
        }
    }
    record
}

fn is_blank(record: &RawWorkshopRecord) -> bool {
    record.workshop.is_none()
        && record.manager.is_none()
        && record.phone.is_none()
        && record.quotas.iter().all(|(_, q)| *q == RawQuota::Empty)
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 格式: [{"workshop": "...", "manager": "...", "phone": "...", "resourceLimits": {...}}]
pub struct JsonRosterParser;

impl JsonRosterParser {
    pub fn parse_str(&self, raw: &str) -> ImportResult<Vec<RawWorkshopRecord>> {
        let value: Value = serde_json::from_str(raw)?;
        let items = value.as_array().ok_or_else(|| ImportError::FieldMappingError {
            row: 0,
            message: "顶层必须是车间数组".to_string(),
        })?;

        items
            .iter()
            .enumerate()
            .map(|(idx, item)| Self::parse_item(idx + 1, item))
            .collect()
    }

    fn parse_item(row: usize, item: &Value) -> ImportResult<RawWorkshopRecord> {
        let obj = item.as_object().ok_or_else(|| ImportError::FieldMappingError {
            row,
            message: "车间记录必须是对象".to_string(),
        })?;

        let text = |key: &str| -> Option<String> {
            match obj.get(key) {
                Some(Value::String(s)) => non_empty(s),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            }
        };

        let quotas = match obj.get(JSON_QUOTA_FIELD) {
            Some(Value::Object(limits)) => limits
                .iter()
                .map(|(material, value)| (material.clone(), RawQuota::from_json(value)))
                .collect(),
            None | Some(Value::Null) => Vec::new(),
            Some(_) => {
                return Err(ImportError::FieldMappingError {
                    row,
                    message: format!("{} 必须是对象", JSON_QUOTA_FIELD),
                })
            }
        };

        Ok(RawWorkshopRecord {
            row,
            workshop: text(COL_WORKSHOP),
            manager: text(COL_MANAGER),
            phone: text(COL_PHONE),
            quotas,
        })
    }
}

impl RosterParser for JsonRosterParser {
    fn parse_records(&self, path: &Path) -> ImportResult<Vec<RawWorkshopRecord>> {
        ensure_exists(path)?;
        let raw = std::fs::read_to_string(path)?;
        self.parse_str(&raw)
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvRosterParser;

impl RosterParser for CsvRosterParser {
    fn parse_records(&self, path: &Path) -> ImportResult<Vec<RawWorkshopRecord>> {
        ensure_exists(path)?;

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let row = result?;
            let cells = row.iter().map(|v| (v, RawQuota::from_cell_text(v)));
            let record = record_from_cells(row_idx + 1, &headers, cells);

            // 跳过完全空白的行
            if is_blank(&record) {
                continue;
            }
            records.push(record);
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelRosterParser;

impl ExcelRosterParser {
    fn cell_quota(cell: &Data) -> RawQuota {
        match cell {
            Data::Int(i) => match u64::try_from(*i) {
                Ok(n) => RawQuota::Integer(n),
                Err(_) => RawQuota::Number(*i as f64),
            },
            Data::Float(f) => RawQuota::Number(*f),
            Data::String(s) => RawQuota::from_cell_text(s),
            Data::Empty => RawQuota::Empty,
            other => RawQuota::Other(other.to_string()),
        }
    }
}

impl RosterParser for ExcelRosterParser {
    fn parse_records(&self, path: &Path) -> ImportResult<Vec<RawWorkshopRecord>> {
        ensure_exists(path)?;

        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (row_idx, data_row) in rows.enumerate() {
            let texts: Vec<String> = data_row.iter().map(|c| c.to_string()).collect();
            let cells = texts
                .iter()
                .zip(data_row.iter())
                .map(|(text, cell)| (text.as_str(), Self::cell_quota(cell)));
            let record = record_from_cells(row_idx + 1, &headers, cells);

            if is_blank(&record) {
                continue;
            }
            records.push(record);
        }

        Ok(records)
    }
}

// ==========================================
// 通用名册解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalRosterParser;

impl RosterParser for UniversalRosterParser {
    fn parse_records(&self, path: &Path) -> ImportResult<Vec<RawWorkshopRecord>> {
        match extension_of(path).as_str() {
            "json" => JsonRosterParser.parse_records(path),
            "csv" => CsvRosterParser.parse_records(path),
            "xlsx" | "xls" => ExcelRosterParser.parse_records(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
