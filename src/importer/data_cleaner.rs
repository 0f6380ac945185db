// ==========================================
// 车间物资配送排期系统 - 名册清洗器实现
// ==========================================
// 职责: TRIM / 主键校验 / 配额只保留非负整数
// 红线: 非数值配额在此过滤，生成器只接收 u64
// ==========================================

use crate::domain::workshop::{QuotaMap, Workshop, MAX_QUOTA};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::roster_importer_trait::{RawQuota, RawWorkshopRecord};
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

/// 被丢弃的配额（不阻断导入）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedQuota {
    pub row: usize,
    pub workshop_id: String,
    pub material: String,
    pub raw_value: String,
    pub reason: String,
}

pub struct RosterCleaner;

impl RosterCleaner {
    /// 清洗单个配额值
    ///
    /// # 返回
    /// - Ok(Some(n)): 合法非负整数（不超过 MAX_QUOTA）
    /// - Ok(None): 空单元格（未填写）
    /// - Err((raw, reason)): 需丢弃
    pub fn clean_quota(&self, raw: &RawQuota) -> Result<Option<u64>, (String, String)> {
        match raw {
            RawQuota::Empty => Ok(None),
            RawQuota::Integer(n) => {
                if *n > MAX_QUOTA {
                    Err((n.to_string(), format!("配额超出上限 {}", MAX_QUOTA)))
                } else {
                    Ok(Some(*n))
                }
            }
            RawQuota::Number(n) => {
                if !n.is_finite() {
                    Err((n.to_string(), "非有限数值".to_string()))
                } else if *n < 0.0 {
                    Err((n.to_string(), "配额为负数".to_string()))
                } else if n.fract() != 0.0 {
                    Err((n.to_string(), "配额不是整数".to_string()))
                } else if *n > MAX_QUOTA as f64 {
                    Err((n.to_string(), format!("配额超出上限 {}", MAX_QUOTA)))
                } else {
                    Ok(Some(*n as u64))
                }
            }
            RawQuota::Text(s) => Err((s.clone(), "非数值配额".to_string())),
            RawQuota::Other(s) => Err((s.clone(), "不支持的配额类型".to_string())),
        }
    }

    /// 清洗全部记录
    ///
    /// 缺少车间标识或车间重复时整体失败；配额问题只记录不阻断。
    pub fn clean_records(
        &self,
        records: Vec<RawWorkshopRecord>,
    ) -> ImportResult<(Vec<Workshop>, Vec<DroppedQuota>)> {
        let mut seen = HashSet::new();
        let mut workshops = Vec::with_capacity(records.len());
        let mut dropped = Vec::new();

        for record in records {
            let workshop_id = record
                .workshop
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or(ImportError::WorkshopIdMissing(record.row))?
                .to_string();

            if !seen.insert(workshop_id.clone()) {
                return Err(ImportError::DuplicateWorkshop {
                    row: record.row,
                    workshop_id,
                });
            }

            let mut quotas = QuotaMap::new();
            for (material, raw) in &record.quotas {
                let material = material.trim();
                match self.clean_quota(raw) {
                    Ok(Some(amount)) => quotas.insert(material, amount),
                    Ok(None) => {}
                    Err((raw_value, reason)) => {
                        warn!(
                            row = record.row,
                            workshop = %workshop_id,
                            material,
                            raw = %raw_value,
                            reason = %reason,
                            "配额已丢弃"
                        );
                        dropped.push(DroppedQuota {
                            row: record.row,
                            workshop_id: workshop_id.clone(),
                            material: material.to_string(),
                            raw_value,
                            reason,
                        });
                    }
                }
            }

            workshops.push(Workshop::new(
                workshop_id,
                record.manager.unwrap_or_default().trim(),
                record.phone.unwrap_or_default().trim(),
                quotas,
            ));
        }

        Ok((workshops, dropped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(row: usize, id: Option<&str>, quotas: Vec<(&str, RawQuota)>) -> RawWorkshopRecord {
        RawWorkshopRecord {
            row,
            workshop: id.map(str::to_string),
            manager: Some(" Ali ".to_string()),
            phone: None,
            quotas: quotas.into_iter().map(|(m, q)| (m.to_string(), q)).collect(),
        }
    }

    #[test]
    fn test_clean_quota_rules() {
        let cleaner = RosterCleaner;
        assert_eq!(cleaner.clean_quota(&RawQuota::Number(40.0)), Ok(Some(40)));
        assert_eq!(cleaner.clean_quota(&RawQuota::Number(0.0)), Ok(Some(0)));
        assert_eq!(cleaner.clean_quota(&RawQuota::Empty), Ok(None));
        assert!(cleaner.clean_quota(&RawQuota::Number(-1.0)).is_err());
        assert!(cleaner.clean_quota(&RawQuota::Number(2.5)).is_err());
        assert!(cleaner.clean_quota(&RawQuota::Number(f64::NAN)).is_err());
        assert!(cleaner.clean_quota(&RawQuota::Text("abc".to_string())).is_err());
    }

    #[test]
    fn test_quota_upper_bound() {
        let cleaner = RosterCleaner;
        assert_eq!(
            cleaner.clean_quota(&RawQuota::Integer(MAX_QUOTA)),
            Ok(Some(MAX_QUOTA))
        );
        assert!(cleaner.clean_quota(&RawQuota::Integer(MAX_QUOTA + 1)).is_err());
        assert!(cleaner.clean_quota(&RawQuota::Integer(u64::MAX / 2 + 1)).is_err());
        // 2^53 作为浮点数与 2^53 + 1 无法区分
        assert!(cleaner.clean_quota(&RawQuota::Number(9007199254740992.0)).is_err());
        assert!(cleaner.clean_quota(&RawQuota::Number(18446744073709551616.0)).is_err());
    }

    #[test]
    fn test_large_json_integer_dropped_not_rounded() {
        let value: serde_json::Value = serde_json::from_str("9007199254740993").unwrap();
        let raw = RawQuota::from_json(&value);
        assert_eq!(raw, RawQuota::Integer(9007199254740993));

        let records = vec![record(1, Some("W1"), vec![("A", raw), ("B", RawQuota::Integer(7))])];
        let (workshops, dropped) = RosterCleaner.clean_records(records).unwrap();
        assert_eq!(workshops[0].quotas.get("A"), None);
        assert_eq!(workshops[0].quotas.get("B"), Some(7));
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].raw_value, "9007199254740993");
    }

    #[test]
    fn test_non_numeric_quotas_filtered_and_reported() {
        let records = vec![record(
            1,
            Some("W1"),
            vec![
                ("A", RawQuota::Number(10.0)),
                ("B", RawQuota::Text("n/a".to_string())),
                ("C", RawQuota::Number(5.0)),
            ],
        )];
        let (workshops, dropped) = RosterCleaner.clean_records(records).unwrap();

        assert_eq!(workshops.len(), 1);
        assert_eq!(workshops[0].manager, "Ali");
        assert_eq!(workshops[0].phone, "");
        let kept: Vec<(&str, u64)> = workshops[0].quotas.iter().collect();
        assert_eq!(kept, vec![("A", 10), ("C", 5)]);
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].material, "B");
        assert_eq!(dropped[0].raw_value, "n/a");
    }

    #[test]
    fn test_missing_workshop_id_rejected() {
        let records = vec![record(3, Some("  "), vec![])];
        let err = RosterCleaner.clean_records(records).unwrap_err();
        assert!(matches!(err, ImportError::WorkshopIdMissing(3)));
    }

    #[test]
    fn test_duplicate_workshop_rejected() {
        let records = vec![record(1, Some("W1"), vec![]), record(2, Some("W1"), vec![])];
        let err = RosterCleaner.clean_records(records).unwrap_err();
        assert!(matches!(err, ImportError::DuplicateWorkshop { row: 2, .. }));
    }
}
