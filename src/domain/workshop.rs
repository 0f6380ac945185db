// ==========================================
// 车间物资配送排期系统 - 车间领域模型
// ==========================================
// 职责: 车间 + 物资配额表（声明顺序有意义）
// 红线: 进入生成器前配额必须已清洗为非负整数
// ==========================================

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 单项配额上限（2^53 - 1，超出的值在导入时丢弃）
pub const MAX_QUOTA: u64 = (1 << 53) - 1;

// ==========================================
// QuotaMap - 物资配额表
// ==========================================
// 物资标识 → 总配额（吨），保留声明顺序；阶段号按此顺序递增
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotaMap {
    entries: Vec<(String, u64)>,
}

impl QuotaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加配额；同名物资覆盖原值但保留首次出现的位置
    pub fn insert(&mut self, material: impl Into<String>, amount: u64) {
        let material = material.into();
        match self.entries.iter_mut().find(|(m, _)| *m == material) {
            Some(entry) => entry.1 = amount,
            None => self.entries.push((material, amount)),
        }
    }

    pub fn get(&self, material: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(m, _)| m == material)
            .map(|(_, amount)| *amount)
    }

    /// 按声明顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(m, a)| (m.as_str(), *a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for QuotaMap {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut map = QuotaMap::new();
        for (material, amount) in iter {
            map.insert(material, amount);
        }
        map
    }
}

impl Serialize for QuotaMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (material, amount) in &self.entries {
            map.serialize_entry(material, amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for QuotaMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct QuotaMapVisitor;

        impl<'de> Visitor<'de> for QuotaMapVisitor {
            type Value = QuotaMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of material id to non-negative integer quota")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<QuotaMap, A::Error> {
                let mut map = QuotaMap::new();
                while let Some((material, amount)) = access.next_entry::<String, u64>()? {
                    map.insert(material, amount);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(QuotaMapVisitor)
    }
}

// ==========================================
// Workshop - 车间
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workshop {
    #[serde(rename = "workshop")]
    pub workshop_id: String,   // 车间标识
    pub manager: String,       // 负责人
    pub phone: String,         // 联系电话
    #[serde(rename = "resourceLimits")]
    pub quotas: QuotaMap,      // 物资配额（已清洗）
}

impl Workshop {
    pub fn new(
        workshop_id: impl Into<String>,
        manager: impl Into<String>,
        phone: impl Into<String>,
        quotas: QuotaMap,
    ) -> Self {
        Self {
            workshop_id: workshop_id.into(),
            manager: manager.into(),
            phone: phone.into(),
            quotas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_map_keeps_declared_order() {
        let quotas: QuotaMap = vec![("M3", 30u64), ("M1", 10), ("M2", 20)]
            .into_iter()
            .collect();
        let order: Vec<&str> = quotas.iter().map(|(m, _)| m).collect();
        assert_eq!(order, vec!["M3", "M1", "M2"]);
    }

    #[test]
    fn test_quota_map_insert_overrides_in_place() {
        let mut quotas = QuotaMap::new();
        quotas.insert("M1", 10);
        quotas.insert("M2", 20);
        quotas.insert("M1", 15);
        assert_eq!(quotas.len(), 2);
        assert_eq!(quotas.get("M1"), Some(15));
        assert_eq!(quotas.iter().next(), Some(("M1", 15)));
    }

    #[test]
    fn test_workshop_json_round_trip_preserves_order() {
        let json = r#"{"workshop":"W1","manager":"Ali","phone":"0912","resourceLimits":{"Z":5,"A":7}}"#;
        let workshop: Workshop = serde_json::from_str(json).unwrap();
        assert_eq!(workshop.workshop_id, "W1");
        let order: Vec<&str> = workshop.quotas.iter().map(|(m, _)| m).collect();
        assert_eq!(order, vec!["Z", "A"]);
        assert_eq!(serde_json::to_string(&workshop).unwrap(), json);
    }

    #[test]
    fn test_quota_map_rejects_non_integer() {
        let result: Result<QuotaMap, _> = serde_json::from_str(r#"{"A":"x"}"#);
        assert!(result.is_err());
    }
}
