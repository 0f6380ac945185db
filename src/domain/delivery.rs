// ==========================================
// 车间物资配送排期系统 - 配送条目
// ==========================================
// DeliveryEntry: 某日、某车间、某物资的一次配送，带阶段号
// 红线: 创建后不可变（字段只读，通过访问器读取）
// ==========================================

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEntry {
    date: String,             // 规范日期 YYYY-MM-DD
    #[serde(rename = "workshop")]
    workshop_id: String,
    manager: String,
    phone: String,
    material: String,
    #[serde(with = "amount_string")]
    amount: u64,              // 线上格式为字符串
    stage: u32,               // 阶段号（从 1 开始）
}

impl DeliveryEntry {
    pub fn new(
        date: String,
        workshop_id: String,
        manager: String,
        phone: String,
        material: String,
        amount: u64,
        stage: u32,
    ) -> Self {
        Self {
            date,
            workshop_id,
            manager,
            phone,
            material,
            amount,
            stage,
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn workshop_id(&self) -> &str {
        &self.workshop_id
    }

    pub fn manager(&self) -> &str {
        &self.manager
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// 数量的字符串形式（展示层/线上格式）
    pub fn amount_string(&self) -> String {
        self.amount.to_string()
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }
}

mod amount_string {
    use super::*;

    pub fn serialize<S: Serializer>(amount: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim().parse::<u64>().map_err(serde::de::Error::custom)
    }
}
