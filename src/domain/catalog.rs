// ==========================================
// 车间物资配送排期系统 - 物资目录
// ==========================================
// 职责: 可识别物资标识的有序集合
// 目录之外的物资配额一律忽略
// ==========================================

use serde::{Deserialize, Serialize};

/// 默认物资目录（九种，"ماده 5" 不在目录中）
pub const DEFAULT_MATERIALS: [&str; 9] = [
    "ماده 1",
    "ماده 2",
    "ماده 3",
    "ماده 4",
    "ماده 6",
    "ماده 7",
    "ماده 8",
    "ماده 9",
    "ماده 10",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialCatalog {
    materials: Vec<String>,
}

impl MaterialCatalog {
    pub fn new<I, S>(materials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            materials: materials.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, material: &str) -> bool {
        self.materials.iter().any(|m| m == material)
    }

    pub fn materials(&self) -> &[String] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_MATERIALS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = MaterialCatalog::default();
        assert_eq!(catalog.len(), 9);
        assert!(catalog.contains("ماده 1"));
        assert!(catalog.contains("ماده 10"));
        assert!(!catalog.contains("ماده 5"));
    }
}
